//! Sentence Module
//!
//! Sentence vectors and sentence-pair similarity.

mod levenshtein;
mod scorer;
mod vectorizer;

pub use levenshtein::{edit_distance, levenshtein_score};
pub use scorer::{blend, SimilarityScorer, COSINE_WEIGHT, LEVENSHTEIN_WEIGHT};
pub use vectorizer::SentenceVectorizer;
