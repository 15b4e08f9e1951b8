//! Engine Configuration
//!
//! File locations for the vector model and tokenizer dictionaries.

use std::path::{Path, PathBuf};

/// Environment variable overriding the vector model path
pub const ENV_MODEL_PATH: &str = "SYN_MODEL_W2V_PATH";
/// Environment variable overriding the segmenter user dictionary
pub const ENV_USER_DICT: &str = "SYN_WORDSEG_CUSTOM_DICT";
/// Environment variable overriding the stopword list
pub const ENV_STOPWORD_DICT: &str = "SYN_WORDSEG_STOPWORD_DICT";
/// Environment variable overriding the punctuation list
pub const ENV_PUNCT_DICT: &str = "SYN_WORDSEG_PUNCT_DICT";

/// Number of neighbors returned when the caller asks for zero
pub const DEFAULT_TOP_K: usize = 10;

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Binary word-vector model
    pub model_path: PathBuf,

    /// User dictionary handed to the segmenter (None = builtin dictionary only)
    pub user_dict_path: Option<PathBuf>,

    /// Newline-delimited stopword list
    pub stopword_path: PathBuf,

    /// Newline-delimited punctuation list
    pub punctuation_path: PathBuf,

    /// Neighbor count used when `nearby` is called with k = 0
    pub default_top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        let data = data_dir();
        let tokenizer = data.join("tokenizer");
        Self {
            model_path: data.join("words.vector"),
            user_dict_path: Some(tokenizer.join("user.dict.utf8")),
            stopword_path: tokenizer.join("stop_words.utf8"),
            punctuation_path: tokenizer.join("punctuation.utf8"),
            default_top_k: DEFAULT_TOP_K,
        }
    }
}

impl Config {
    /// Default configuration with process environment overrides applied
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(PathBuf::from))
    }

    /// Default configuration with overrides resolved through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let mut config = Self::default();
        if let Some(path) = lookup(ENV_MODEL_PATH) {
            config.model_path = path;
        }
        if let Some(path) = lookup(ENV_USER_DICT) {
            config.user_dict_path = Some(path);
        }
        if let Some(path) = lookup(ENV_STOPWORD_DICT) {
            config.stopword_path = path;
        }
        if let Some(path) = lookup(ENV_PUNCT_DICT) {
            config.punctuation_path = path;
        }
        config
    }

    /// Set the vector model path
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    /// Set the segmenter user dictionary
    pub fn with_user_dict(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_dict_path = Some(path.into());
        self
    }

    /// Use the segmenter's builtin dictionary only
    pub fn without_user_dict(mut self) -> Self {
        self.user_dict_path = None;
        self
    }

    /// Set the stopword list
    pub fn with_stopwords(mut self, path: impl Into<PathBuf>) -> Self {
        self.stopword_path = path.into();
        self
    }

    /// Set the punctuation list
    pub fn with_punctuation(mut self, path: impl Into<PathBuf>) -> Self {
        self.punctuation_path = path.into();
        self
    }

    /// Set the default neighbor count (0 keeps the builtin default)
    pub fn with_default_top_k(mut self, k: usize) -> Self {
        self.default_top_k = if k == 0 { DEFAULT_TOP_K } else { k };
        self
    }

    /// Resolve a requested neighbor count against the default
    pub fn top_k(&self, k: usize) -> usize {
        if k == 0 {
            self.default_top_k
        } else {
            k
        }
    }
}

/// Package data directory shipped next to the manifest
fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_package_relative() {
        let config = Config::default();
        assert!(config.model_path.ends_with("data/words.vector"));
        assert!(config.stopword_path.ends_with("data/tokenizer/stop_words.utf8"));
        assert!(config
            .punctuation_path
            .ends_with("data/tokenizer/punctuation.utf8"));
        assert_eq!(config.default_top_k, DEFAULT_TOP_K);
    }

    #[test]
    fn test_lookup_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_MODEL_PATH, "/models/zh.bin"),
            (ENV_PUNCT_DICT, "/dicts/punct.txt"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|key| env.get(key).map(PathBuf::from));
        assert_eq!(config.model_path, PathBuf::from("/models/zh.bin"));
        assert_eq!(config.punctuation_path, PathBuf::from("/dicts/punct.txt"));
        // Untouched entries keep their defaults
        assert_eq!(config.stopword_path, Config::default().stopword_path);
    }

    #[test]
    fn test_top_k_fallback() {
        let config = Config::default().with_default_top_k(5);
        assert_eq!(config.top_k(0), 5);
        assert_eq!(config.top_k(3), 3);
        assert_eq!(Config::default().with_default_top_k(0).default_top_k, DEFAULT_TOP_K);
    }
}
