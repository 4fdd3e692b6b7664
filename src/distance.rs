//! Dissimilarity between two numeric vectors.
//!
//! Every clusterer is parametrized by a [`Distance`]: smaller means closer.
//! The metric is a value, so a closure works as well as the unit structs here.
//!
//! | Metric | Formula | Range |
//! |--------|---------|-------|
//! | [`Pearson`] | `1 - r` (0 when r = 0) | [0, 2] |
//! | [`Euclidean`] | `sqrt(Σ(aᵢ - bᵢ)²)` | [0, ∞) |
//! | [`EuclideanSimilarity`] | `1 / (1 + sqrt(Σ(aᵢ - bᵢ)²))` | (0, 1] |
//!
//! # Degenerate inputs
//!
//! Vectors of different length, or empty vectors, score 0 under every metric.
//! Pearson also scores 0 when either vector has zero variance, which is the
//! same value it gives two uncorrelated vectors:
//!
//! ```text
//! den = sqrt((Σx² - (Σx)²/n) (Σy² - (Σy)²/n))
//! den == 0  ⇒  r = 0  ⇒  distance = 0
//! ```
//!
//! `EuclideanSimilarity` grows as vectors get closer. Clusterers minimise the
//! metric, so with it they pair up the *least* similar vectors first; use
//! [`Euclidean`] when merges should follow spatial proximity.

use std::collections::HashMap;
use std::hash::Hash;

/// A dissimilarity score between two equal-length vectors.
pub trait Distance: Sync {
    /// Score `a` against `b`. Smaller is closer.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<F> Distance for F
where
    F: Fn(&[f64], &[f64]) -> f64 + Sync,
{
    #[inline]
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// Pearson-correlation distance: `1 - r`.
///
/// Highly correlated vectors score near 0, anti-correlated near 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pearson;

impl Distance for Pearson {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        let r = pearson_r(a, b);
        if r == 0.0 {
            0.0
        } else {
            1.0 - r
        }
    }
}

/// Pearson correlation coefficient of two vectors.
///
/// Returns 0 for mismatched or empty vectors and for zero variance.
pub fn pearson_r(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let n = a.len() as f64;

    let (mut sum1, mut sum2) = (0.0, 0.0);
    let (mut sum1_sq, mut sum2_sq) = (0.0, 0.0);
    let mut p_sum = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        sum1 += x;
        sum2 += y;
        sum1_sq += x * x;
        sum2_sq += y * y;
        p_sum += x * y;
    }

    let num = p_sum - (sum1 * sum2 / n);
    let den = ((sum1_sq - sum1 * sum1 / n) * (sum2_sq - sum2 * sum2 / n)).sqrt();
    // Rounding can leave a tiny negative variance (NaN after sqrt).
    if den.is_nan() || den <= 0.0 {
        return 0.0;
    }

    (num / den).clamp(-1.0, 1.0)
}

/// Plain Euclidean (L2) distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Distance for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }
        squared_l2(a, b).sqrt()
    }
}

/// Euclidean similarity `1 / (1 + d)`, used as a distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EuclideanSimilarity;

impl Distance for EuclideanSimilarity {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        if a.len() != b.len() || a.is_empty() {
            return 0.0;
        }
        1.0 / (1.0 + squared_l2(a, b).sqrt())
    }
}

/// Euclidean similarity over keyed (sparse) vectors.
///
/// Only keys present in both maps contribute. Returns 0 when the maps share
/// no key, and 1 for identical shared values.
pub fn sim_euclidean<K, S>(a: &HashMap<K, f64, S>, b: &HashMap<K, f64, S>) -> f64
where
    K: Eq + Hash,
    S: std::hash::BuildHasher,
{
    let mut shared = 0usize;
    let mut sum_of_squares = 0.0;
    for (key, x) in a {
        if let Some(y) = b.get(key) {
            shared += 1;
            sum_of_squares += (x - y) * (x - y);
        }
    }

    if shared == 0 {
        return 0.0;
    }
    1.0 / (1.0 + sum_of_squares.sqrt())
}

#[inline]
fn squared_l2(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
