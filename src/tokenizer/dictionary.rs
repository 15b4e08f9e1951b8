//! Word List Loader
//!
//! Newline-delimited UTF-8 word lists (stopwords, punctuation).

use hashbrown::HashSet;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SynonymsError};

/// Load one entry per line; lines are trimmed and blank lines skipped
pub async fn load_word_set(path: &Path) -> Result<HashSet<String>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SynonymsError::DictionaryLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let words = parse_word_set(&text);
    debug!("Loaded {} entries from {}", words.len(), path.display());
    Ok(words)
}

/// Parse word list text
pub fn parse_word_set(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_parse_trims_and_skips_blanks() {
        let words = parse_word_set("的\n  了 \r\n\n\t\n，\n的\n");
        assert_eq!(words.len(), 3);
        assert!(words.contains("了"));
        assert!(words.contains("，"));
        assert!(!words.contains(""));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_word_set(Path::new("/nonexistent/stop_words.utf8"))
            .await
            .unwrap_err();
        assert!(matches!(err, SynonymsError::DictionaryLoad { .. }));
    }

    #[tokio::test]
    async fn test_shipped_dictionaries() {
        let config = Config::default();
        let stopwords = load_word_set(&config.stopword_path).await.unwrap();
        let punctuation = load_word_set(&config.punctuation_path).await.unwrap();
        assert!(stopwords.contains("的"));
        assert!(punctuation.contains("。"));
        assert!(punctuation.contains(","));
    }
}
