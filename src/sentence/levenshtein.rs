//! Edit Distance
//!
//! Character-level Levenshtein distance and its normalized score.

/// Decimal places kept by [`levenshtein_score`]
const SCORE_SCALE: usize = 100_000;

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows of the DP table
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// `(maxLen - distance) / maxLen`, floored to 5 decimal places
///
/// Two empty strings are identical and score 1.
pub fn levenshtein_score(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = edit_distance(a, b);
    // Integer division floors exactly
    let scaled = (max_len - distance) * SCORE_SCALE / max_len;
    scaled as f64 / SCORE_SCALE as f64
}
