//! Vector math used by every selector.
//!
//! Sums are accumulated in `f64` and narrowed to `f32` once at the end.

use recall_core::{Error, Result};

/// Dot product and both squared magnitudes in one pass.
#[inline]
fn dot_and_norms(a: &[f32], b: &[f32]) -> (f64, f64, f64) {
    a.iter().zip(b).fold((0.0f64, 0.0f64, 0.0f64), |(dot, na, nb), (&x, &y)| {
        let (x, y) = (f64::from(x), f64::from(y));
        (dot + x * y, na + x * x, nb + y * y)
    })
}

/// Cosine similarity of two equal-length vectors, in `[-1, 1]`.
///
/// Returns `0.0` when either vector has zero magnitude, including when both
/// do: a zero vector is treated as dissimilar to everything.
///
/// The denominator is `sqrt(|a|² · |b|²)`, so the result is exactly
/// symmetric and `cosine_similarity(a, a)` is exactly `1.0` for any nonzero
/// finite `a`.
///
/// # Errors
///
/// [`Error::DimensionMismatch`] if `a.len() != b.len()`.
#[allow(clippy::cast_possible_truncation)]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch { left: a.len(), right: b.len() });
    }
    let (dot, na, nb) = dot_and_norms(a, b);
    if na == 0.0 || nb == 0.0 {
        return Ok(0.0);
    }
    let cos = dot / (na * nb).sqrt();
    Ok(cos.clamp(-1.0, 1.0) as f32)
}

fn magnitude(v: &[f32]) -> f64 {
    v.iter().map(|&x| f64::from(x) * f64::from(x)).sum::<f64>().sqrt()
}

/// Scale `v` to unit length. The zero vector is returned unchanged.
#[must_use]
pub fn normalize_embedding(v: &[f32]) -> Vec<f32> {
    let mut out = v.to_vec();
    normalize_in_place(&mut out);
    out
}

/// In-place variant of [`normalize_embedding`].
#[allow(clippy::cast_possible_truncation)]
pub fn normalize_in_place(v: &mut [f32]) {
    let norm = magnitude(v);
    if norm == 0.0 {
        return;
    }
    for x in v.iter_mut() {
        *x = (f64::from(*x) / norm) as f32;
    }
}


#[cfg(test)]
mod proptests {
    use super::{cosine_similarity, normalize_embedding};
    use proptest::prelude::*;

    fn pair(max_dim: usize) -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
        (1usize..max_dim).prop_flat_map(|d| {
            (
                prop::collection::vec(-100.0f32..100.0, d),
                prop::collection::vec(-100.0f32..100.0, d),
            )
        })
    }

    proptest! {
        /// Cosine stays in [-1, 1]
        #[test]
        fn cosine_bounded((a, b) in pair(64)) {
            let s = cosine_similarity(&a, &b).unwrap();
            prop_assert!((-1.0..=1.0).contains(&s), "out of range: {}", s);
        }

        /// Argument order does not matter
        #[test]
        fn cosine_symmetric((a, b) in pair(64)) {
            prop_assert_eq!(cosine_similarity(&a, &b).unwrap(), cosine_similarity(&b, &a).unwrap());
        }

        /// Any nonzero vector is maximally similar to itself
        #[test]
        fn cosine_self_is_one(v in prop::collection::vec(-100.0f32..100.0, 1..64)) {
            prop_assume!(v.iter().any(|&x| x != 0.0));
            prop_assert_eq!(cosine_similarity(&v, &v).unwrap(), 1.0);
        }

        /// Lengths that differ always fail
        #[test]
        fn cosine_mismatch_errors(d in 1usize..32, extra in 1usize..8) {
            let a = vec![1.0f32; d];
            let b = vec![1.0f32; d + extra];
            prop_assert!(cosine_similarity(&a, &b).is_err());
        }

        /// Normalized nonzero vectors have unit length
        #[test]
        fn normalize_unit_length(v in prop::collection::vec(-100.0f32..100.0, 1..64)) {
            prop_assume!(v.iter().any(|&x| x.abs() > 1e-3));
            let n = normalize_embedding(&v);
            let len: f64 = n.iter().map(|&x| f64::from(x) * f64::from(x)).sum::<f64>().sqrt();
            prop_assert!((len - 1.0).abs() < 1e-5);
        }
    }
}
