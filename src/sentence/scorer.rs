//! Sentence Similarity
//!
//! Blends surface similarity (edit distance) with semantic similarity
//! (cosine of bag-of-words vectors) into one score.

use futures::future;
use tracing::debug;

use super::levenshtein::levenshtein_score;
use super::vectorizer::SentenceVectorizer;
use crate::error::{Result, SynonymsError};
use crate::vector::cosine_similarity;

/// Weight of the cosine similarity in the blend
pub const COSINE_WEIGHT: f64 = 0.5;
/// Weight of the normalized edit distance in the blend
pub const LEVENSHTEIN_WEIGHT: f64 = 0.8;

/// `min(1, cosine * 0.5 + levenshtein * 0.8)`
///
/// Only clamped from above: a strongly negative cosine with little lexical
/// overlap can score below zero.
pub fn blend(cosine: f64, levenshtein: f64) -> f64 {
    (cosine * COSINE_WEIGHT + levenshtein * LEVENSHTEIN_WEIGHT).min(1.0)
}

/// Sentence pair scorer
#[derive(Clone)]
pub struct SimilarityScorer {
    vectorizer: SentenceVectorizer,
}

impl SimilarityScorer {
    pub fn new(vectorizer: SentenceVectorizer) -> Self {
        Self { vectorizer }
    }

    /// Underlying sentence vectorizer
    pub fn vectorizer(&self) -> &SentenceVectorizer {
        &self.vectorizer
    }

    /// Similarity of two sentences
    ///
    /// Fails with `Segmentation` naming the first sentence (in argument
    /// order) that could not be vectorized.
    pub async fn compare(&self, sen1: &str, sen2: &str) -> Result<f64> {
        let levenshtein = levenshtein_score(sen1, sen2);
        debug!("compare levenshtein: {}", levenshtein);

        let (v1, v2) = future::join(
            self.vectorizer.vectorize(sen1),
            self.vectorizer.vectorize(sen2),
        )
        .await;
        let v1 = v1.map_err(|e| SynonymsError::segmentation(sen1, e))?;
        let v2 = v2.map_err(|e| SynonymsError::segmentation(sen2, e))?;

        let cosine = cosine_similarity(&v1, &v2) as f64;
        debug!("compare cosine: {}", cosine);

        let similarity = blend(cosine, levenshtein);
        debug!("compare similarity: {}", similarity);
        Ok(similarity)
    }
}
