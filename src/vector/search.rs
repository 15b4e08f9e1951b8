//! Nearest-Neighbor Search
//!
//! Exact top-K search by cosine similarity over the whole vocabulary.

use rayon::prelude::*;
use std::cmp::Ordering;

use super::model::VectorModel;
use super::similarity::{cosine_with_norm, magnitude};

/// One search hit
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// Vocabulary word
    pub word: String,
    /// Cosine similarity to the query
    pub score: f32,
}

impl Neighbor {
    pub fn new(word: impl Into<String>, score: f32) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// Rows scored in one rayon task
const PAR_CHUNK_ROWS: usize = 1024;

/// Top-`k` vocabulary entries most similar to `query`
///
/// `exclude` skips one vocabulary position (the query word itself).
/// Results are ordered by descending score; equal scores keep vocabulary
/// order.
pub fn top_k(model: &VectorModel, query: &[f32], k: usize, exclude: Option<usize>) -> Vec<Neighbor> {
    let dim = model.embedding_dim();
    if k == 0 || dim == 0 || model.is_empty() {
        return Vec::new();
    }
    debug_assert_eq!(query.len(), dim, "Vector dimensions must match");

    let query_norm = magnitude(query);

    // Indexed parallel collect keeps vocabulary order
    let mut scored: Vec<(usize, f32)> = model
        .rows()
        .par_chunks(dim)
        .with_min_len(PAR_CHUNK_ROWS)
        .enumerate()
        .filter(|(index, _)| Some(*index) != exclude)
        .map(|(index, row)| (index, cosine_with_norm(query, query_norm, row)))
        .collect();

    let by_rank = |a: &(usize, f32), b: &(usize, f32)| -> Ordering {
        b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
    };

    // Partition the best k to the front, then order just those
    if scored.len() > k {
        scored.select_nth_unstable_by(k - 1, by_rank);
        scored.truncate(k);
    }
    scored.sort_unstable_by(by_rank);

    scored
        .into_iter()
        .filter_map(|(index, score)| model.word_at(index).map(|w| Neighbor::new(w, score)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(rows: &[(&str, [f32; 3])]) -> VectorModel {
        let mut model = VectorModel::with_capacity(3, rows.len()).unwrap();
        for (word, v) in rows {
            model.insert(word, v).unwrap();
        }
        model
    }

    #[test]
    fn test_top_k_orders_by_similarity() {
        let m = model(&[
            ("a", [1.0, 0.0, 0.0]),
            ("b", [0.9, 0.1, 0.0]),
            ("c", [0.0, 1.0, 0.0]),
            ("d", [0.7, 0.7, 0.0]),
        ]);

        let hits = top_k(&m, &[1.0, 0.0, 0.0], 3, None);
        let words: Vec<_> = hits.iter().map(|n| n.word.as_str()).collect();
        assert_eq!(words, vec!["a", "b", "d"]);
        assert!((hits[0].score - 1.0).abs() < 1e-6);
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_exclude_query_position() {
        let m = model(&[("a", [1.0, 0.0, 0.0]), ("b", [0.9, 0.1, 0.0])]);
        let hits = top_k(&m, &[1.0, 0.0, 0.0], 10, m.index_of("a"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].word, "b");
    }

    #[test]
    fn test_ties_keep_vocabulary_order() {
        let m = model(&[
            ("x", [0.0, 0.0, 1.0]),
            ("c", [2.0, 0.0, 0.0]),
            ("a", [1.0, 0.0, 0.0]),
            ("b", [3.0, 0.0, 0.0]),
        ]);
        let hits = top_k(&m, &[1.0, 0.0, 0.0], 2, None);
        let words: Vec<_> = hits.iter().map(|n| n.word.as_str()).collect();
        assert_eq!(words, vec!["c", "a"]);
    }

    #[test]
    fn test_zero_norm_rows_score_zero() {
        let m = model(&[("zero", [0.0, 0.0, 0.0]), ("neg", [-1.0, 0.0, 0.0])]);
        let hits = top_k(&m, &[1.0, 0.0, 0.0], 2, None);
        assert_eq!(hits[0], Neighbor::new("zero", 0.0));
        assert_eq!(hits[1].word, "neg");
    }

    #[test]
    fn test_k_zero_is_empty() {
        let m = model(&[("a", [1.0, 0.0, 0.0])]);
        assert!(top_k(&m, &[1.0, 0.0, 0.0], 0, None).is_empty());
    }
}
