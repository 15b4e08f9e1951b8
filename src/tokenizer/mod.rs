//! Tokenizer Module
//!
//! Word segmentation with stopword and punctuation filtering.

mod dictionary;
mod segmenter;

pub use dictionary::{load_word_set, parse_word_set};
pub use segmenter::{JiebaSegmenter, Segmenter, Token};

use hashbrown::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::init::SingleFlight;

/// Word sets used to drop tokens after segmentation
#[derive(Debug, Clone, Default)]
pub struct FilterSets {
    pub stopwords: HashSet<String>,
    pub punctuation: HashSet<String>,
}

impl FilterSets {
    /// Whether `word` survives the given keep policies
    pub fn keeps(&self, word: &str, keep_stopwords: bool, keep_punctuation: bool) -> bool {
        if !keep_stopwords && self.stopwords.contains(word) {
            return false;
        }
        if !keep_punctuation && self.punctuation.contains(word) {
            return false;
        }
        true
    }
}

/// Segmenter plus lazily loaded filter sets
pub struct Tokenizer {
    segmenter: Arc<dyn Segmenter>,
    stopword_path: PathBuf,
    punctuation_path: PathBuf,
    filters: SingleFlight<FilterSets>,
}

impl Tokenizer {
    /// Tokenizer whose filter sets load from the given files on first use
    pub fn new(
        segmenter: Arc<dyn Segmenter>,
        stopword_path: impl Into<PathBuf>,
        punctuation_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            segmenter,
            stopword_path: stopword_path.into(),
            punctuation_path: punctuation_path.into(),
            filters: SingleFlight::new(),
        }
    }

    /// Tokenizer using the dictionary locations in `config`
    pub fn from_config(config: &Config, segmenter: Arc<dyn Segmenter>) -> Self {
        Self::new(
            segmenter,
            config.stopword_path.clone(),
            config.punctuation_path.clone(),
        )
    }

    /// Tokenizer with filter sets supplied up front
    pub fn with_filters(segmenter: Arc<dyn Segmenter>, filters: FilterSets) -> Self {
        Self {
            segmenter,
            stopword_path: PathBuf::new(),
            punctuation_path: PathBuf::new(),
            filters: SingleFlight::ready(filters),
        }
    }

    /// Load stopwords and punctuation once; later calls are no-ops
    pub async fn initialize(&self) -> Result<Arc<FilterSets>> {
        let stopword_path = self.stopword_path.clone();
        let punctuation_path = self.punctuation_path.clone();
        self.filters
            .get_or_init(|| async move {
                let (stopwords, punctuation) = tokio::try_join!(
                    load_word_set(&stopword_path),
                    load_word_set(&punctuation_path),
                )?;
                info!(
                    "Tokenizer ready: {} stopwords, {} punctuation marks",
                    stopwords.len(),
                    punctuation.len()
                );
                Ok(FilterSets {
                    stopwords,
                    punctuation,
                })
            })
            .await
    }

    /// Discard a failed dictionary load and try again
    pub async fn retry_initialize(&self) -> Result<Arc<FilterSets>> {
        self.filters.reset_failed();
        self.initialize().await
    }

    /// Tagged words straight from the segmenter, unfiltered
    pub fn tag(&self, text: &str) -> Result<Vec<Token>> {
        self.segmenter.tag(text)
    }

    /// Segment `text`, dropping stopwords and/or punctuation on request
    ///
    /// Token order is preserved.
    pub async fn segment(
        &self,
        text: &str,
        keep_stopwords: bool,
        keep_punctuation: bool,
    ) -> Result<Vec<String>> {
        let filters = self.initialize().await?;
        let words = self
            .tag(text)?
            .into_iter()
            .filter(|token| {
                let keep = filters.keeps(&token.word, keep_stopwords, keep_punctuation);
                if !keep {
                    debug!("Dropping '{}' ({})", token.word, token.tag);
                }
                keep
            })
            .map(|token| token.word)
            .collect();
        Ok(words)
    }
}
