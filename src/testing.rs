//! Test fixtures: model images and a deterministic segmenter.

use bytes::{BufMut, Bytes, BytesMut};
use std::path::{Path, PathBuf};

use crate::error::{Result, SynonymsError};
use crate::tokenizer::{FilterSets, Segmenter, Token};
use crate::vector::VectorModel;

/// In-memory description of a model file
#[derive(Debug, Clone)]
pub(crate) struct ModelImage {
    pub dim: usize,
    /// Header override, to describe inconsistent files
    pub vocab_size: Option<u64>,
    pub words: Vec<(String, Vec<f32>)>,
}

impl ModelImage {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vocab_size: None,
            words: Vec::new(),
        }
    }

    pub fn word(mut self, word: &str, vector: &[f32]) -> Self {
        self.words.push((word.to_string(), vector.to_vec()));
        self
    }

    pub fn build(&self) -> VectorModel {
        let mut model = VectorModel::with_capacity(self.dim, self.words.len()).unwrap();
        for (word, vector) in &self.words {
            model.insert(word, vector).unwrap();
        }
        model
    }
}

/// Serialize an image in the binary model layout
pub(crate) fn encode_model(image: &ModelImage) -> Bytes {
    let vocab_size = image.vocab_size.unwrap_or(image.words.len() as u64);
    let mut buf = BytesMut::new();
    buf.put_slice(format!("{} {}\n", vocab_size, image.dim).as_bytes());
    for (word, vector) in &image.words {
        buf.put_slice(word.as_bytes());
        buf.put_u8(b' ');
        for x in vector {
            buf.put_f32_le(*x);
        }
        buf.put_u8(b'\n');
    }
    buf.freeze()
}

/// Write `image` to `<dir>/words.vector`
pub(crate) fn write_model(dir: &Path, image: &ModelImage) -> PathBuf {
    let path = dir.join("words.vector");
    std::fs::write(&path, encode_model(image)).unwrap();
    path
}

/// Small model where airplane/airliner and internet words cluster
pub(crate) fn fixture_image() -> ModelImage {
    ModelImage::new(6)
        .word("飞机", &[1.0, 0.1, 0.0, 0.0, 0.0, 0.0])
        .word("客机", &[0.95, 0.15, 0.05, 0.0, 0.0, 0.0])
        .word("火车", &[0.6, 0.0, 0.5, 0.0, 0.0, 0.0])
        .word("移动", &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0])
        .word("互联网", &[0.0, 0.0, 0.0, 0.2, 1.0, 0.0])
        .word("股市", &[0.0, 0.0, 0.0, 0.0, 0.0, 1.0])
        .word("行情", &[0.0, 0.0, 0.0, 0.0, 0.1, 0.9])
        .word("好", &[0.1, 0.1, 0.1, 0.1, 0.1, 0.1])
}

/// Stopwords {我, 的, 和}, punctuation {，, 。}
pub(crate) fn fixture_filters() -> FilterSets {
    FilterSets {
        stopwords: ["我", "的", "和"].iter().map(|s| s.to_string()).collect(),
        punctuation: ["，", "。"].iter().map(|s| s.to_string()).collect(),
    }
}

const LEXICON: &[&str] = &[
    "移动", "互联网", "飞机", "客机", "火车", "股市", "行情", "句子", "比特币",
];
const PUNCTUATION: &[&str] = &["，", "。", ",", "."];
const MAX_WORD_CHARS: usize = 3;

/// Forward maximum matching over a fixed lexicon
///
/// Unknown characters become single-character tokens.
#[derive(Debug, Clone, Default)]
pub(crate) struct FixtureSegmenter {
    fail_on: Option<String>,
}

impl FixtureSegmenter {
    /// Fail any text containing `needle`
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }
}

impl Segmenter for FixtureSegmenter {
    fn tag(&self, text: &str) -> Result<Vec<Token>> {
        if let Some(needle) = &self.fail_on {
            if text.contains(needle.as_str()) {
                return Err(SynonymsError::Tokenize {
                    text: text.to_string(),
                    reason: format!("refusing '{}'", needle),
                });
            }
        }

        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let longest = MAX_WORD_CHARS.min(chars.len() - i);
            for len in (1..=longest).rev() {
                let candidate: String = chars[i..i + len].iter().collect();
                let known = LEXICON.contains(&candidate.as_str());
                if known || len == 1 {
                    let tag = if PUNCTUATION.contains(&candidate.as_str()) {
                        "w"
                    } else if known {
                        "n"
                    } else {
                        "x"
                    };
                    tokens.push(Token::new(candidate, tag));
                    i += len;
                    break;
                }
            }
        }
        Ok(tokens)
    }
}
