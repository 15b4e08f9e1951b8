//! Synonyms - Chinese Synonyms and Sentence Similarity
//!
//! Nearest-neighbor word lookup over a binary word2vec model, jieba-based
//! segmentation with stopword filtering, and a blended sentence similarity
//! score (edit distance plus bag-of-words cosine).

pub mod config;
pub mod error;
pub mod init;
pub mod metrics;
pub mod sentence;
pub mod synonyms;
pub mod tokenizer;
pub mod vector;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{Result, SynonymsError};
pub use metrics::Metrics;
pub use sentence::{SentenceVectorizer, SimilarityScorer};
pub use synonyms::Synonyms;
pub use tokenizer::{JiebaSegmenter, Segmenter, Token, Tokenizer};
pub use vector::{Neighbor, Vector, VectorModel, VectorStore};
