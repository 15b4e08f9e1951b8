//! Vector Store
//!
//! Lazily loaded, read-only word vector table with O(1) lookups.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::model::VectorModel;
use super::reader;
use super::search::{self, Neighbor};
use crate::error::{Result, SynonymsError};
use crate::init::SingleFlight;

/// Word vector returned to callers (an owned copy)
pub type Vector = Vec<f32>;

const COMPONENT: &str = "vector store";

/// Word vector store backed by a binary model file
///
/// The file is parsed on first use on the blocking thread pool. Concurrent
/// first callers share that one parse; a failed parse is reported to every
/// caller until [`VectorStore::retry_initialize`] is invoked.
pub struct VectorStore {
    /// Model file location
    path: PathBuf,
    /// Parsed model
    model: SingleFlight<VectorModel>,
}

impl VectorStore {
    /// Create a store that loads `path` on first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            model: SingleFlight::new(),
        }
    }

    /// Create a store around an already built model
    pub fn from_model(model: VectorModel) -> Self {
        Self {
            path: PathBuf::new(),
            model: SingleFlight::ready(model),
        }
    }

    /// Model file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the model once, sharing the in-flight load with concurrent callers
    pub async fn initialize(&self) -> Result<Arc<VectorModel>> {
        let path = self.path.clone();
        self.model
            .get_or_init(|| async move {
                tokio::task::spawn_blocking(move || reader::load(&path))
                    .await
                    .map_err(SynonymsError::worker)?
            })
            .await
    }

    /// Discard a failed load and try again
    pub async fn retry_initialize(&self) -> Result<Arc<VectorModel>> {
        if self.model.reset_failed() {
            debug!("Retrying vector model load from {}", self.path.display());
        }
        self.initialize().await
    }

    /// Whether the model is loaded
    pub fn is_ready(&self) -> bool {
        self.model.get().is_some()
    }

    /// The loaded model, without triggering a load
    pub fn model(&self) -> Result<Arc<VectorModel>> {
        self.model
            .get()
            .ok_or(SynonymsError::NotInitialized { component: COMPONENT })
    }

    /// Get number of words (requires a completed load)
    pub fn vocabulary_size(&self) -> Result<usize> {
        Ok(self.model()?.vocabulary_size())
    }

    /// Get embedding dimension (requires a completed load)
    pub fn embedding_dim(&self) -> Result<usize> {
        Ok(self.model()?.embedding_dim())
    }

    /// Vector of a single word
    pub async fn vector(&self, word: &str) -> Result<Vector> {
        if word.is_empty() {
            return Err(SynonymsError::EmptyWord);
        }
        let model = self.initialize().await?;
        model
            .get(word)
            .map(<[f32]>::to_vec)
            .ok_or_else(|| SynonymsError::WordNotFound {
                word: word.to_string(),
            })
    }

    /// Vectors of every word that has one
    ///
    /// Misses are dropped; the call fails only when nothing is left.
    pub async fn vectors<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<Vector>> {
        let model = self.initialize().await?;
        let found: Vec<Vector> = words
            .iter()
            .filter_map(|word| {
                let word = word.as_ref();
                let hit = model.get(word);
                if hit.is_none() {
                    debug!("No vector for '{}', skipping", word);
                }
                hit.map(<[f32]>::to_vec)
            })
            .collect();

        if found.is_empty() {
            return Err(SynonymsError::NoValidVectors {
                requested: words.len(),
            });
        }
        Ok(found)
    }

    /// Top-`k` words closest to `word`, excluding `word` itself
    ///
    /// `k` is taken literally; callers resolve a default count first
    /// (see [`crate::Config::top_k`]).
    pub async fn nearby(&self, word: &str, k: usize) -> Result<Vec<Neighbor>> {
        let model = self.initialize().await?;
        let index = model
            .index_of(word)
            .ok_or_else(|| SynonymsError::OutOfVocabulary {
                word: word.to_string(),
            })?;

        tokio::task::spawn_blocking(move || search::top_k(&model, model.row(index), k, Some(index)))
            .await
            .map_err(SynonymsError::worker)
    }

    /// Top-`k` words closest to an arbitrary query vector
    pub async fn nearby_vector(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        let model = self.initialize().await?;
        if query.len() != model.embedding_dim() {
            return Err(SynonymsError::DimensionMismatch {
                expected: model.embedding_dim(),
                actual: query.len(),
            });
        }

        let query = query.to_vec();
        tokio::task::spawn_blocking(move || search::top_k(&model, &query, k, None))
            .await
            .map_err(SynonymsError::worker)
    }
}
