//! Word2Vec Binary Reader
//!
//! Parses the binary word-vector model format:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ "<vocab_size> <dim>" ASCII decimals, whitespace separated   │
//! ├─────────────────────────────────────────────────────────────┤
//! │ record × vocab_size:                                        │
//! │   [whitespace]  word (UTF-8)  0x20  f32 LE × dim            │
//! ├─────────────────────────────────────────────────────────────┤
//! │ [trailing whitespace]                                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The whitespace before each word is normally the `\n` that ends the
//! header or the previous record. Files are streamed through a buffered
//! reader, so only the float table is held in memory.

use bytes::{Buf, Bytes};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

use super::model::VectorModel;
use crate::error::{Result, SynonymsError};

/// Longest accepted word, in bytes
pub const MAX_WORD_BYTES: usize = 255;

/// Bytes per vector component
const FLOAT_SIZE: usize = std::mem::size_of::<f32>();

/// Read buffer used for model files
const READ_BUFFER_SIZE: usize = 1 << 20;

/// Structural problems found while parsing a model file
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormatError {
    #[error("missing header")]
    MissingHeader,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("header declares {vocab_size} words of dimension {dim}, which describes an empty model")]
    EmptyModel { vocab_size: u64, dim: u64 },

    #[error("header declares {vocab_size} words of dimension {dim} but only {available} bytes follow")]
    SizeMismatch {
        vocab_size: u64,
        dim: u64,
        available: u64,
    },

    #[error("record {index}: file ends inside the word")]
    TruncatedWord { index: usize },

    #[error("record {index}: word longer than {max} bytes")]
    WordTooLong { index: usize, max: usize },

    #[error("record {index}: empty word")]
    EmptyWord { index: usize },

    #[error("record {index}: word is not valid UTF-8")]
    InvalidUtf8 { index: usize },

    #[error("record {index} ('{word}'): expected {expected} bytes of vector data, found {found}")]
    TruncatedVector {
        index: usize,
        word: String,
        expected: usize,
        found: u64,
    },

    #[error("record {index} ('{word}'): non-finite value at component {component}")]
    NonFinite {
        index: usize,
        word: String,
        component: usize,
    },

    #[error("{count} unexpected bytes after the last record")]
    TrailingData { count: u64 },

    #[error("read failed: {0}")]
    Io(String),
}

impl From<io::Error> for FormatError {
    fn from(err: io::Error) -> Self {
        FormatError::Io(err.to_string())
    }
}

/// Read and parse a model file
pub fn load(path: &Path) -> Result<VectorModel> {
    info!("Loading vector model from {}", path.display());
    let start = Instant::now();

    if !path.exists() {
        return Err(SynonymsError::model_load(path, "file does not exist"));
    }
    let file = File::open(path).map_err(|e| SynonymsError::model_load(path, e.to_string()))?;
    let len = file
        .metadata()
        .map_err(|e| SynonymsError::model_load(path, e.to_string()))?
        .len();
    let model = parse_from(BufReader::with_capacity(READ_BUFFER_SIZE, file), len)
        .map_err(|e| SynonymsError::model_load(path, e.to_string()))?;

    info!(
        "Vector model loaded: {} words, {} dims in {:?}",
        model.vocabulary_size(),
        model.embedding_dim(),
        start.elapsed()
    );
    Ok(model)
}

/// Parse a complete in-memory model image
pub fn parse(buf: Bytes) -> std::result::Result<VectorModel, FormatError> {
    let len = buf.len() as u64;
    parse_from(buf.reader(), len)
}

/// Parse a model streamed from `reader`, which yields exactly `len` bytes
pub fn parse_from<R: BufRead>(reader: R, len: u64) -> std::result::Result<VectorModel, FormatError> {
    let mut input = Input::new(reader, len);
    let (vocab_size, dim) = decode_header(&mut input)?;

    // Every record needs at least one word byte, the separator and its floats
    let record_min = dim
        .checked_mul(FLOAT_SIZE as u64)
        .and_then(|n| n.checked_add(2));
    let needed = record_min.and_then(|n| n.checked_mul(vocab_size));
    if needed.map_or(true, |n| n > input.remaining()) {
        return Err(FormatError::SizeMismatch {
            vocab_size,
            dim,
            available: input.remaining(),
        });
    }

    // Both fit in usize now: they are bounded by the input length
    let vocab_size = vocab_size as usize;
    let dim = dim as usize;

    let mut model = VectorModel::with_capacity(dim, vocab_size).map_err(|_| FormatError::EmptyModel {
        vocab_size: vocab_size as u64,
        dim: dim as u64,
    })?;
    let mut raw = vec![0u8; dim * FLOAT_SIZE];
    let mut vector = vec![0.0f32; dim];

    for index in 0..vocab_size {
        let word = input.word(index)?;
        input.vector(index, &word, &mut raw, &mut vector)?;

        // Dimension always matches: `vector` was sized from the header
        if let Ok(false) = model.insert(&word, &vector) {
            warn!("Duplicate word '{}' at record {}, keeping the later vector", word, index);
        }
    }

    input.skip_whitespace()?;
    if input.peek()?.is_some() {
        return Err(FormatError::TrailingData {
            count: input.remaining(),
        });
    }

    Ok(model)
}

/// Decode `<vocab_size> <dim>`
fn decode_header<R: BufRead>(input: &mut Input<R>) -> std::result::Result<(u64, u64), FormatError> {
    input.skip_whitespace()?;
    if input.peek()?.is_none() {
        return Err(FormatError::MissingHeader);
    }

    let vocab_size = input.decimal("vocabulary size")?;
    if !input.peek()?.is_some_and(|b| b.is_ascii_whitespace()) {
        return Err(FormatError::InvalidHeader(
            "expected whitespace after vocabulary size".to_string(),
        ));
    }
    input.skip_whitespace()?;
    let dim = input.decimal("dimension")?;

    if vocab_size == 0 || dim == 0 {
        return Err(FormatError::EmptyModel { vocab_size, dim });
    }
    Ok((vocab_size, dim))
}

/// Buffered model input that tracks how many bytes are left
struct Input<R> {
    reader: R,
    remaining: u64,
}

impl<R: BufRead> Input<R> {
    fn new(reader: R, len: u64) -> Self {
        Self {
            reader,
            remaining: len,
        }
    }

    fn remaining(&self) -> u64 {
        self.remaining
    }

    fn peek(&mut self) -> std::result::Result<Option<u8>, FormatError> {
        Ok(self.reader.fill_buf()?.first().copied())
    }

    fn consume(&mut self, n: usize) {
        self.reader.consume(n);
        self.remaining = self.remaining.saturating_sub(n as u64);
    }

    fn skip_whitespace(&mut self) -> std::result::Result<(), FormatError> {
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                return Ok(());
            }
            let n = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
            let done = n < buf.len();
            self.consume(n);
            if done {
                return Ok(());
            }
        }
    }

    fn decimal(&mut self, field: &str) -> std::result::Result<u64, FormatError> {
        let mut value: u64 = 0;
        let mut digits = 0;
        while let Some(b) = self.peek()?.filter(u8::is_ascii_digit) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((b - b'0') as u64))
                .ok_or_else(|| FormatError::InvalidHeader(format!("{} overflows", field)))?;
            digits += 1;
            self.consume(1);
        }
        if digits == 0 {
            return Err(FormatError::InvalidHeader(format!("missing {}", field)));
        }
        Ok(value)
    }

    /// One space-terminated word, trimming surrounding whitespace
    fn word(&mut self, index: usize) -> std::result::Result<String, FormatError> {
        self.skip_whitespace()?;

        let mut bytes = Vec::new();
        loop {
            match self.peek()? {
                None => return Err(FormatError::TruncatedWord { index }),
                Some(b' ') => {
                    self.consume(1);
                    break;
                }
                Some(_) if bytes.len() == MAX_WORD_BYTES => {
                    return Err(FormatError::WordTooLong {
                        index,
                        max: MAX_WORD_BYTES,
                    })
                }
                Some(b) => {
                    bytes.push(b);
                    self.consume(1);
                }
            }
        }

        let word = String::from_utf8(bytes).map_err(|_| FormatError::InvalidUtf8 { index })?;
        let word = word.trim_end_matches(|c: char| c.is_ascii_whitespace());
        if word.is_empty() {
            return Err(FormatError::EmptyWord { index });
        }
        Ok(word.to_string())
    }

    /// `out.len()` little-endian floats, rejecting NaN and infinities
    fn vector(
        &mut self,
        index: usize,
        word: &str,
        raw: &mut [u8],
        out: &mut [f32],
    ) -> std::result::Result<(), FormatError> {
        let expected = raw.len();
        let truncated = |found| FormatError::TruncatedVector {
            index,
            word: word.to_string(),
            expected,
            found,
        };
        if self.remaining < expected as u64 {
            return Err(truncated(self.remaining));
        }
        match self.reader.read_exact(raw) {
            Ok(()) => self.remaining -= expected as u64,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(truncated(self.remaining))
            }
            Err(e) => return Err(e.into()),
        }

        let mut floats: &[u8] = &raw[..];
        for (component, slot) in out.iter_mut().enumerate() {
            let value = floats.get_f32_le();
            if !value.is_finite() {
                return Err(FormatError::NonFinite {
                    index,
                    word: word.to_string(),
                    component,
                });
            }
            *slot = value;
        }
        Ok(())
    }
}
