//! Vector Similarity Functions
//!
//! Dot product, cosine similarity and element-wise sums over word vectors.
//! Accumulation happens in f64 so long vectors stay stable.

/// Compute dot product of two vectors
///
/// Uses unrolled loop for better CPU performance.
#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    let len = a.len().min(b.len());
    let mut sum = 0.0f64;

    // Process 4 elements at a time (manual unrolling)
    let chunks = len / 4;
    for i in 0..chunks {
        let idx = i * 4;
        sum += a[idx] as f64 * b[idx] as f64;
        sum += a[idx + 1] as f64 * b[idx + 1] as f64;
        sum += a[idx + 2] as f64 * b[idx + 2] as f64;
        sum += a[idx + 3] as f64 * b[idx + 3] as f64;
    }

    // Handle remainder
    for i in (chunks * 4)..len {
        sum += a[i] as f64 * b[i] as f64;
    }

    sum
}

/// Euclidean (L2) norm
#[inline]
pub fn magnitude(v: &[f32]) -> f64 {
    dot_product(v, v).sqrt()
}

/// Compute cosine similarity between two vectors
///
/// Returns value in range [-1, 1] where 1 means identical direction.
/// A zero-norm operand yields 0 instead of dividing by zero.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let denom = magnitude(a) * magnitude(b);
    if denom > 0.0 {
        (dot_product(a, b) / denom) as f32
    } else {
        0.0
    }
}

/// Cosine similarity against a query whose norm is already known
#[inline]
pub(crate) fn cosine_with_norm(query: &[f32], query_norm: f64, other: &[f32]) -> f32 {
    let denom = query_norm * magnitude(other);
    if denom > 0.0 {
        (dot_product(query, other) / denom) as f32
    } else {
        0.0
    }
}

/// Element-wise sum of equally sized vectors
///
/// Returns None when `vectors` is empty.
pub fn sum_vectors<'a, I>(vectors: I) -> Option<Vec<f32>>
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let mut iter = vectors.into_iter();
    let mut total = iter.next()?.to_vec();
    for v in iter {
        debug_assert_eq!(v.len(), total.len(), "Vector dimensions must match");
        for (acc, x) in total.iter_mut().zip(v) {
            *acc += *x;
        }
    }
    Some(total)
}
