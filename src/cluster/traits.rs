//! Clustering traits.

use crate::error::Result;

/// Trait for clustering algorithms over row vectors.
pub trait Clustering {
    /// What a run produces: a merge tree, a partition, ...
    type Output;

    /// Cluster the rows of `data`.
    fn fit(&self, data: &[Vec<f64>]) -> Result<Self::Output>;
}
