//! K-means clustering.
//!
//! Partitions rows into k groups by iterative centroid refinement (Lloyd).
//!
//! # Lloyd's Algorithm
//!
//! 1. Place k centroids uniformly at random inside the per-dimension
//!    [min, max] bounding box of the data
//! 2. **Assign**: each row → nearest centroid under the chosen metric
//! 3. **Update**: each centroid → mean of its rows (an empty cluster's
//!    centroid stays where it is)
//! 4. Repeat until an assignment equals the previous one, or the iteration
//!    limit is hit
//!
//! Hitting the limit is not an error: the last assignment is returned.
//!
//! # Row 0
//!
//! The assignment pass starts at row 1. Row 0 still shapes the bounding box
//! but is never placed in a cluster, so no [`Partition`] contains index 0.
//!
//! # Randomness
//!
//! Only the initial centroids are random. Two unseeded runs can settle on
//! different partitions (or different label orders); use
//! [`Kmeans::with_seed`] for reproducible runs.

use super::traits::Clustering;
use crate::distance::{Distance, Pearson};
use crate::error::{Error, Result};
use crate::matrix::to_array;
use ndarray::{Array2, Axis};
use rand::prelude::*;
use std::ops::Index;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans<D = Pearson> {
    /// Number of clusters.
    k: usize,
    /// Maximum iterations.
    max_iter: usize,
    /// Random seed.
    seed: Option<u64>,
    /// Distance metric.
    metric: D,
}

impl Kmeans<Pearson> {
    /// Create a new K-means clusterer using Pearson distance.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            seed: None,
            metric: Pearson,
        }
    }
}

impl<D: Distance> Kmeans<D> {
    /// Set distance metric.
    pub fn with_metric<E: Distance>(self, metric: E) -> Kmeans<E> {
        Kmeans {
            k: self.k,
            max_iter: self.max_iter,
            seed: self.seed,
            metric,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of clusters.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Place `k` centroids uniformly inside the bounding box of `data`.
    ///
    /// A dimension with `min == max` pins every centroid to that value.
    fn init_centroids(&self, data: &Array2<f64>, rng: &mut impl Rng) -> Vec<Vec<f64>> {
        let ranges: Vec<(f64, f64)> = data
            .columns()
            .into_iter()
            .map(|col| {
                col.iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                        (lo.min(x), hi.max(x))
                    })
            })
            .collect();

        (0..self.k)
            .map(|_| {
                ranges
                    .iter()
                    .map(|&(lo, hi)| {
                        if lo < hi {
                            // Interpolate: `hi - lo` can overflow for finite bounds.
                            let u = rng.random::<f64>();
                            lo * (1.0 - u) + hi * u
                        } else {
                            lo
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Index of the centroid nearest to `row`; the lowest index wins ties.
    fn nearest(&self, centroids: &[Vec<f64>], row: &[f64]) -> usize {
        let mut best = 0;
        let mut best_dist = self.metric.distance(&centroids[0], row);
        for (i, c) in centroids.iter().enumerate().skip(1) {
            let d = self.metric.distance(c, row);
            if d < best_dist {
                best = i;
                best_dist = d;
            }
        }
        best
    }

    /// Bucket rows 1.. by nearest centroid.
    fn assign(&self, data: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<Vec<usize>> {
        #[cfg(feature = "parallel")]
        let nearest: Vec<usize> = data
            .par_iter()
            .skip(1)
            .map(|row| self.nearest(centroids, row))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let nearest: Vec<usize> = data
            .iter()
            .skip(1)
            .map(|row| self.nearest(centroids, row))
            .collect();

        let mut buckets = vec![Vec::new(); self.k];
        for (offset, c) in nearest.into_iter().enumerate() {
            buckets[c].push(offset + 1);
        }
        buckets
    }

    /// Partition the rows of `data` into `k` clusters.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] for no rows, [`Error::DimensionMismatch`] for
    /// ragged rows, [`Error::InvalidClusterCount`] unless `1 <= k <= rows`.
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<Partition> {
        let data_arr = to_array(data)?;
        let n = data_arr.nrows();

        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }
        tracing::debug!(n, dim = data_arr.ncols(), k = self.k, "running k-means");

        // Initialize RNG
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut centroids = self.init_centroids(&data_arr, &mut rng);
        let mut last: Option<Vec<Vec<usize>>> = None;
        let mut buckets = vec![Vec::new(); self.k];

        for iter in 0..self.max_iter {
            buckets = self.assign(data, &centroids);
            tracing::trace!(iter, "k-means assignment");

            if last.as_ref() == Some(&buckets) {
                tracing::debug!(iterations = iter + 1, "k-means converged");
                return Ok(Partition { clusters: buckets });
            }

            for (centroid, rows) in centroids.iter_mut().zip(&buckets) {
                if let Some(mean) = data_arr.select(Axis(0), rows).mean_axis(Axis(0)) {
                    *centroid = mean.to_vec();
                }
            }
            last = Some(buckets.clone());
        }

        tracing::debug!(iterations = self.max_iter, "k-means hit iteration limit");
        Ok(Partition { clusters: buckets })
    }
}

impl<D: Distance> Clustering for Kmeans<D> {
    type Output = Partition;

    fn fit(&self, data: &[Vec<f64>]) -> Result<Partition> {
        Kmeans::<D>::fit(self, data)
    }
}

/// K-means result: for each cluster, the ascending row indices assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    clusters: Vec<Vec<usize>>,
}

impl Partition {
    /// Number of clusters (k), including empty ones.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// True when there are no clusters.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Rows in cluster `i`.
    pub fn cluster(&self, i: usize) -> Option<&[usize]> {
        self.clusters.get(i).map(Vec::as_slice)
    }

    /// Iterate clusters in index order.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.clusters.iter().map(Vec::as_slice)
    }

    /// Cluster holding `row`, if it was assigned.
    pub fn cluster_of(&self, row: usize) -> Option<usize> {
        self.clusters
            .iter()
            .position(|rows| rows.binary_search(&row).is_ok())
    }

    /// Per-row cluster labels for `n_rows` rows (`None` for unassigned rows).
    pub fn labels(&self, n_rows: usize) -> Vec<Option<usize>> {
        let mut labels = vec![None; n_rows];
        for (c, rows) in self.clusters.iter().enumerate() {
            for &r in rows {
                if let Some(slot) = labels.get_mut(r) {
                    *slot = Some(c);
                }
            }
        }
        labels
    }

    /// Take the raw cluster lists.
    pub fn into_inner(self) -> Vec<Vec<usize>> {
        self.clusters
    }
}

impl Index<usize> for Partition {
    type Output = [usize];

    fn index(&self, i: usize) -> &[usize] {
        &self.clusters[i]
    }
}
