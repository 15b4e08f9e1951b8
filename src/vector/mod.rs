//! Vector Module
//!
//! Word2vec model loading, word vector storage and nearest-neighbor search.

mod model;
pub mod reader;
mod search;
mod similarity;
mod store;

pub use model::VectorModel;
pub use reader::{FormatError, MAX_WORD_BYTES};
pub use search::{top_k, Neighbor};
pub use similarity::{cosine_similarity, dot_product, magnitude, sum_vectors};
pub use store::{Vector, VectorStore};
