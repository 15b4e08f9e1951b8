//! Word Segmentation Backends
//!
//! The segmentation algorithm itself lives outside this crate; anything that
//! can split text into `(word, tag)` pairs plugs in through [`Segmenter`].

use jieba_rs::Jieba;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

use crate::error::{Result, SynonymsError};

/// A segmented word with its part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub word: String,
    pub tag: String,
}

impl Token {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }
}

/// Text -> tagged words
pub trait Segmenter: Send + Sync {
    fn tag(&self, text: &str) -> Result<Vec<Token>>;
}

/// jieba segmenter with optional user dictionary
pub struct JiebaSegmenter {
    jieba: Jieba,
    /// Use the HMM model for unknown words
    hmm: bool,
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl JiebaSegmenter {
    /// Builtin dictionary only
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
            hmm: true,
        }
    }

    /// Builtin dictionary extended with a user dictionary
    ///
    /// Lines follow jieba's `word [freq] [tag]` layout.
    pub fn with_user_dict(path: &Path) -> Result<Self> {
        let dict_err = |reason: String| SynonymsError::DictionaryLoad {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| dict_err(e.to_string()))?;
        let mut segmenter = Self::new();
        segmenter
            .jieba
            .load_dict(&mut BufReader::new(file))
            .map_err(|e| dict_err(e.to_string()))?;

        info!("Loaded user dictionary {}", path.display());
        Ok(segmenter)
    }

    /// Toggle HMM discovery of unknown words
    pub fn with_hmm(mut self, hmm: bool) -> Self {
        self.hmm = hmm;
        self
    }
}

impl Segmenter for JiebaSegmenter {
    fn tag(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self
            .jieba
            .tag(text, self.hmm)
            .into_iter()
            .map(|t| Token::new(t.word, t.tag))
            .collect())
    }
}
