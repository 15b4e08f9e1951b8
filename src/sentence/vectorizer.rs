//! Sentence Vectorizer
//!
//! Bag-of-words sentence vectors: the element-wise sum of the vectors of a
//! sentence's content words.

use std::sync::Arc;
use tracing::debug;

use crate::error::{Result, SynonymsError};
use crate::tokenizer::Tokenizer;
use crate::vector::{sum_vectors, Vector, VectorStore};

/// Turns sentences into vectors of the model's dimension
#[derive(Clone)]
pub struct SentenceVectorizer {
    tokenizer: Arc<Tokenizer>,
    store: Arc<VectorStore>,
}

impl SentenceVectorizer {
    pub fn new(tokenizer: Arc<Tokenizer>, store: Arc<VectorStore>) -> Self {
        Self { tokenizer, store }
    }

    /// Sum of the vectors of the sentence's content words
    ///
    /// Stopwords and punctuation are dropped before lookup and words
    /// without a vector are skipped. The sum is taken in token order, so
    /// repeated calls give bit-identical results.
    pub async fn vectorize(&self, sentence: &str) -> Result<Vector> {
        let words = self.tokenizer.segment(sentence, false, false).await?;
        if words.is_empty() {
            return Err(SynonymsError::BlankSentence {
                sentence: sentence.to_string(),
            });
        }

        let model = self.store.initialize().await?;
        let known: Vec<&[f32]> = words.iter().filter_map(|w| model.get(w)).collect();
        debug!(
            "Sentence '{}': {} content words, {} with vectors",
            sentence,
            words.len(),
            known.len()
        );

        sum_vectors(known).ok_or_else(|| SynonymsError::EmptyVector {
            sentence: sentence.to_string(),
        })
    }
}
