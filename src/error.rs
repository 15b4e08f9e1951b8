//! Error Types
//!
//! Categorized failures for model loading, lookups, segmentation and scoring.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, SynonymsError>;

/// Errors surfaced by the synonyms engine
///
/// Errors are `Clone` so a single initialization failure can be handed to
/// every caller that was waiting on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynonymsError {
    /// Vector model file missing, truncated or inconsistent
    #[error("Failed to load vector model '{path}': {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    /// Word lookup miss
    #[error("Word '{word}' not found in vocabulary")]
    WordNotFound { word: String },

    /// Nearby query for a word the model does not know
    #[error("Word '{word}' is out of vocabulary")]
    OutOfVocabulary { word: String },

    /// Empty lookup key
    #[error("Empty word")]
    EmptyWord,

    /// Batch lookup where every word missed
    #[error("None of the {requested} requested words has a vector")]
    NoValidVectors { requested: usize },

    /// Sentence with no content words after filtering
    #[error("Sentence '{sentence}' has no content words")]
    BlankSentence { sentence: String },

    /// Sentence whose content words are all out of vocabulary
    #[error("Sentence '{sentence}' has no word with a vector")]
    EmptyVector { sentence: String },

    /// Failure while turning a sentence into a vector
    #[error("wordseg error: '{sentence}': {source}")]
    Segmentation {
        sentence: String,
        #[source]
        source: Box<SynonymsError>,
    },

    /// The segmentation backend rejected the input
    #[error("Failed to tokenize '{text}': {reason}")]
    Tokenize { text: String, reason: String },

    /// Stopword, punctuation or user dictionary could not be read
    #[error("Failed to load dictionary '{path}': {reason}")]
    DictionaryLoad { path: PathBuf, reason: String },

    /// Accessor used before lazy initialization completed
    #[error("{component} is not initialized")]
    NotInitialized { component: &'static str },

    /// Query vector length differs from the model dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Model built with a zero embedding dimension
    #[error("Invalid embedding dimension: {dim}")]
    InvalidDimension { dim: usize },

    /// Background worker panicked or was cancelled
    #[error("Background task failed: {reason}")]
    Worker { reason: String },
}

impl SynonymsError {
    /// Stable category code for callers and logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::ModelLoad { .. } => "MODEL_LOAD",
            Self::WordNotFound { .. } => "WORD_NOT_FOUND",
            Self::OutOfVocabulary { .. } => "OUT_OF_VOCABULARY",
            Self::EmptyWord => "EMPTY_WORD",
            Self::NoValidVectors { .. } => "NO_VALID_VECTORS",
            Self::BlankSentence { .. } => "BLANK_SENTENCE",
            Self::EmptyVector { .. } => "EMPTY_VECTOR",
            Self::Segmentation { .. } => "SEGMENTATION",
            Self::Tokenize { .. } => "TOKENIZE",
            Self::DictionaryLoad { .. } => "DICTIONARY_LOAD",
            Self::NotInitialized { .. } => "NOT_INITIALIZED",
            Self::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            Self::InvalidDimension { .. } => "INVALID_DIMENSION",
            Self::Worker { .. } => "WORKER",
        }
    }

    /// Expected lookup misses that callers handle as a normal branch
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::WordNotFound { .. } | Self::OutOfVocabulary { .. } | Self::EmptyWord
        )
    }

    pub(crate) fn model_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn segmentation(sentence: &str, source: SynonymsError) -> Self {
        Self::Segmentation {
            sentence: sentence.to_string(),
            source: Box::new(source),
        }
    }

    pub(crate) fn worker(err: tokio::task::JoinError) -> Self {
        Self::Worker {
            reason: err.to_string(),
        }
    }
}
