//! Vector Model
//!
//! Immutable word -> vector table built once from a model file.

use indexmap::IndexSet;

use crate::error::{Result, SynonymsError};

/// Word vectors stored in one contiguous float table
///
/// Row `i` of `data` belongs to the `i`-th vocabulary entry, so vocabulary
/// order is also the scan order used by nearest-neighbor search.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorModel {
    /// Fixed dimension of every vector
    dim: usize,
    /// Distinct words in file order
    words: IndexSet<Box<str>>,
    /// `words.len() * dim` floats
    data: Vec<f32>,
}

impl VectorModel {
    /// Empty model expecting `capacity` words of `dim` floats
    ///
    /// Fails with `InvalidDimension` when `dim` is zero.
    pub fn with_capacity(dim: usize, capacity: usize) -> Result<Self> {
        if dim == 0 {
            return Err(SynonymsError::InvalidDimension { dim });
        }
        Ok(Self {
            dim,
            words: IndexSet::with_capacity(capacity),
            data: Vec::with_capacity(capacity.saturating_mul(dim)),
        })
    }

    /// Insert or replace a word's vector
    ///
    /// Returns true when the word was new. A replaced word keeps its
    /// original vocabulary position.
    pub fn insert(&mut self, word: &str, vector: &[f32]) -> Result<bool> {
        if vector.len() != self.dim {
            return Err(SynonymsError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }

        let (index, added) = self.words.insert_full(Box::from(word));
        if added {
            self.data.extend_from_slice(vector);
        } else {
            let start = index * self.dim;
            self.data[start..start + self.dim].copy_from_slice(vector);
        }
        Ok(added)
    }

    /// Get embedding dimension
    pub fn embedding_dim(&self) -> usize {
        self.dim
    }

    /// Get number of distinct words
    pub fn vocabulary_size(&self) -> usize {
        self.words.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check if word exists
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Borrow a word's vector
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.words.get_index_of(word).map(|index| self.row(index))
    }

    /// Vocabulary position of a word
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.words.get_index_of(word)
    }

    /// Word at a vocabulary position
    pub fn word_at(&self, index: usize) -> Option<&str> {
        self.words.get_index(index).map(|w| w.as_ref())
    }

    /// Vector at a vocabulary position
    ///
    /// Panics if `index` is out of bounds.
    pub fn row(&self, index: usize) -> &[f32] {
        let start = index * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Iterate `(word, vector)` pairs in vocabulary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> + '_ {
        self.words
            .iter()
            .zip(self.data.chunks_exact(self.dim))
            .map(|(w, v)| (w.as_ref(), v))
    }

    /// The whole float table, row-major
    pub(crate) fn rows(&self) -> &[f32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut model = VectorModel::with_capacity(3, 2).unwrap();
        assert!(model.insert("飞机", &[1.0, 0.0, 0.0]).unwrap());
        assert!(model.insert("客机", &[0.9, 0.1, 0.0]).unwrap());

        assert_eq!(model.vocabulary_size(), 2);
        assert_eq!(model.embedding_dim(), 3);
        assert_eq!(model.get("客机"), Some(&[0.9, 0.1, 0.0][..]));
        assert_eq!(model.get("火车"), None);
        assert_eq!(model.word_at(1), Some("客机"));
    }

    #[test]
    fn test_duplicate_keeps_position() {
        let mut model = VectorModel::with_capacity(2, 2).unwrap();
        model.insert("a", &[1.0, 1.0]).unwrap();
        model.insert("b", &[2.0, 2.0]).unwrap();
        assert!(!model.insert("a", &[3.0, 3.0]).unwrap());

        assert_eq!(model.vocabulary_size(), 2);
        assert_eq!(model.index_of("a"), Some(0));
        assert_eq!(model.get("a"), Some(&[3.0, 3.0][..]));
        assert_eq!(model.rows().len(), 4);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut model = VectorModel::with_capacity(4, 1).unwrap();
        let result = model.insert("a", &[1.0, 0.0, 0.0]);
        assert_eq!(
            result,
            Err(SynonymsError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert!(model.is_empty());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            VectorModel::with_capacity(0, 4).err(),
            Some(SynonymsError::InvalidDimension { dim: 0 })
        );
    }

    #[test]
    fn test_iter_in_vocabulary_order() {
        let mut model = VectorModel::with_capacity(1, 3).unwrap();
        for (i, w) in ["c", "a", "b"].iter().enumerate() {
            model.insert(w, &[i as f32]).unwrap();
        }
        let words: Vec<_> = model.iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["c", "a", "b"]);
    }
}
