//! Hierarchical (agglomerative) clustering.
//!
//! Bottom-up clustering that builds a **dendrogram** by repeatedly merging
//! the closest pair of clusters until one remains.
//!
//! # Merging
//!
//! Each round scans every pair of active clusters in row-major order:
//!
//! ```text
//! (0,1) (0,2) (0,3) ...
//!       (1,2) (1,3) ...
//!             (2,3) ...
//! ```
//!
//! The pair with the smallest distance wins. Comparison is strict, so on a
//! tie the pair seen first is merged. The new cluster's vector is the mean of
//! the two merged vectors, and it joins the end of the active list while the
//! survivors keep their order. Merge ids count down from -1.
//!
//! # Cost
//!
//! Pairwise distances are cached by cluster id, so each pair is evaluated
//! once. The scan itself is repeated every round: O(n²) distance evaluations,
//! O(n³) comparisons. Fine for hundreds of rows; for larger inputs enable the
//! `parallel` feature, which evaluates each round's new pairs on rayon while
//! keeping the scan serial.

use super::bicluster::Bicluster;
use super::traits::Clustering;
use crate::distance::{Distance, Pearson};
use crate::error::{Error, Result};
use crate::matrix::check_rectangular;
use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Hierarchical (agglomerative) clustering.
#[derive(Debug, Clone, Default)]
pub struct HierarchicalClustering<D = Pearson> {
    /// Distance metric.
    metric: D,
}

impl HierarchicalClustering<Pearson> {
    /// Create a new hierarchical clusterer using Pearson distance.
    pub fn new() -> Self {
        Self { metric: Pearson }
    }
}

impl<D: Distance> HierarchicalClustering<D> {
    /// Set distance metric.
    pub fn with_metric<E: Distance>(self, metric: E) -> HierarchicalClustering<E> {
        HierarchicalClustering { metric }
    }

    /// The metric in use.
    pub fn metric(&self) -> &D {
        &self.metric
    }

    /// Build the merge tree over `data` and return its root.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] for no rows, [`Error::DimensionMismatch`] for
    /// rows of differing length.
    pub fn fit(&self, data: &[Vec<f64>]) -> Result<Bicluster> {
        let d = check_rectangular(data)?;
        tracing::debug!(n = data.len(), dim = d, "building dendrogram");

        let mut clusters: Vec<Bicluster> = data
            .iter()
            .enumerate()
            .map(|(i, row)| Bicluster::leaf(i, row.clone()))
            .collect();

        let mut cache = DistanceCache::default();
        let mut next_id = -1i64;

        while clusters.len() > 1 {
            #[cfg(feature = "parallel")]
            cache.fill_par(&clusters, &self.metric);

            let mut lowest = (0, 1);
            let mut closest = cache.get_or_compute(&clusters[0], &clusters[1], &self.metric);

            for i in 0..clusters.len() - 1 {
                for j in (i + 1)..clusters.len() {
                    let dist = cache.get_or_compute(&clusters[i], &clusters[j], &self.metric);
                    if dist < closest {
                        closest = dist;
                        lowest = (i, j);
                    }
                }
            }

            // j > i, so removing j first leaves i in place.
            let (i, j) = lowest;
            let right = clusters.remove(j);
            let left = clusters.remove(i);
            tracing::trace!(
                id = next_id,
                left = left.id(),
                right = right.id(),
                distance = closest,
                "merged clusters"
            );

            clusters.push(Bicluster::merge(left, right, closest, next_id));
            next_id -= 1;
        }

        tracing::debug!(merges = -(next_id + 1), evaluated = cache.len(), "dendrogram complete");
        clusters.pop().ok_or(Error::EmptyInput)
    }
}

impl<D: Distance> Clustering for HierarchicalClustering<D> {
    type Output = Bicluster;

    fn fit(&self, data: &[Vec<f64>]) -> Result<Bicluster> {
        HierarchicalClustering::<D>::fit(self, data)
    }
}

/// Distances between live clusters, keyed by `(smaller id, larger id)`.
///
/// Ids are never reused within one build, so entries never go stale.
#[derive(Debug, Default)]
struct DistanceCache {
    distances: HashMap<(i64, i64), f64>,
}

impl DistanceCache {
    #[inline]
    fn key(a: i64, b: i64) -> (i64, i64) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn get_or_compute<D: Distance>(&mut self, a: &Bicluster, b: &Bicluster, metric: &D) -> f64 {
        *self
            .distances
            .entry(Self::key(a.id(), b.id()))
            .or_insert_with(|| metric.distance(a.vector(), b.vector()))
    }

    /// Evaluate every uncached pair in parallel.
    #[cfg(feature = "parallel")]
    fn fill_par<D: Distance>(&mut self, clusters: &[Bicluster], metric: &D) {
        let missing: Vec<(usize, usize)> = (0..clusters.len())
            .flat_map(|i| ((i + 1)..clusters.len()).map(move |j| (i, j)))
            .filter(|&(i, j)| {
                !self
                    .distances
                    .contains_key(&Self::key(clusters[i].id(), clusters[j].id()))
            })
            .collect();

        let computed: Vec<((i64, i64), f64)> = missing
            .par_iter()
            .map(|&(i, j)| {
                let (a, b) = (&clusters[i], &clusters[j]);
                (Self::key(a.id(), b.id()), metric.distance(a.vector(), b.vector()))
            })
            .collect();

        self.distances.extend(computed);
    }

    fn len(&self) -> usize {
        self.distances.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::Euclidean;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_hierarchical_basic() {
        let data = vec![vec![1.0], vec![1.0], vec![10.0], vec![10.0]];

        let hc = HierarchicalClustering::new().with_metric(Euclidean);
        assert_eq!(hc.metric(), &Euclidean);
        let root = hc.fit(&data).unwrap();

        assert_eq!(root.id(), -3);
        assert_eq!(root.distance(), 9.0);
        let (l, r) = root.children().unwrap();
        assert_eq!(l.distance(), 0.0);
        assert_eq!(r.distance(), 0.0);
        assert_eq!(l.leaf_ids(), vec![0, 1]);
        assert_eq!(r.leaf_ids(), vec![2, 3]);
        assert_eq!(root.vector(), &[5.5]);
    }

    #[test]
    fn test_single_row_is_leaf() {
        let root = HierarchicalClustering::new().fit(&[vec![1.0, 2.0]]).unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.id(), 0);
    }

    #[test]
    fn test_empty_input_error() {
        let data: Vec<Vec<f64>> = vec![];
        assert_eq!(HierarchicalClustering::new().fit(&data), Err(Error::EmptyInput));
    }

    #[test]
    fn test_ragged_input_error() {
        let data = vec![vec![1.0, 2.0], vec![3.0]];
        let err = HierarchicalClustering::new().fit(&data).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_first_pair_wins_ties() {
        // d(0,1) == d(2,3) == 1; (0,1) is scanned first.
        let data = vec![vec![0.0], vec![1.0], vec![10.0], vec![11.0]];
        let root = HierarchicalClustering::new()
            .with_metric(Euclidean)
            .fit(&data)
            .unwrap();

        let first = root.iter().find(|n| n.id() == -1).unwrap();
        assert_eq!(first.leaf_ids(), vec![0, 1]);
        let second = root.iter().find(|n| n.id() == -2).unwrap();
        assert_eq!(second.leaf_ids(), vec![2, 3]);
    }

    #[test]
    fn test_pearson_all_ties_merge_in_scan_order() {
        // One dimension has no variance: every distance is 0.
        let data = vec![vec![3.0], vec![1.0], vec![2.0]];
        let root = HierarchicalClustering::new().fit(&data).unwrap();

        // Round 1 merges (0,1); round 2 merges leaf 2 with node -1.
        assert_eq!(root.id(), -2);
        assert_eq!(root.left().map(Bicluster::id), Some(2));
        assert_eq!(root.right().map(Bicluster::id), Some(-1));
    }

    #[test]
    fn test_each_pair_evaluated_once() {
        let calls = AtomicUsize::new(0);
        let metric = |a: &[f64], b: &[f64]| {
            calls.fetch_add(1, Ordering::Relaxed);
            Euclidean.distance(a, b)
        };
        let data = vec![vec![0.0], vec![1.0], vec![5.0], vec![9.0], vec![20.0]];

        HierarchicalClustering::new()
            .with_metric(metric)
            .fit(&data)
            .unwrap();

        // C(5,2) initial pairs, then the new node against 3, 2, 1 survivors.
        assert_eq!(calls.load(Ordering::Relaxed), 10 + 3 + 2 + 1);
    }

    fn all_ids(root: &Bicluster) -> (BTreeSet<i64>, BTreeSet<i64>) {
        let mut leaves = BTreeSet::new();
        let mut internal = BTreeSet::new();
        for node in root {
            let fresh = if node.is_leaf() {
                leaves.insert(node.id())
            } else {
                internal.insert(node.id())
            };
            assert!(fresh, "duplicate id {}", node.id());
        }
        (leaves, internal)
    }

    proptest! {
        #[test]
        fn tree_has_n_leaves_and_n_minus_one_merges(
            data in (1usize..12, 1usize..5).prop_flat_map(|(n, d)| {
                proptest::collection::vec(proptest::collection::vec(-50.0f64..50.0, d), n)
            })
        ) {
            let n = data.len() as i64;
            let root = HierarchicalClustering::new().fit(&data).unwrap();
            let (leaves, internal) = all_ids(&root);

            prop_assert_eq!(leaves, (0..n).collect::<BTreeSet<_>>());
            prop_assert_eq!(internal, (1..n).map(|i| -i).collect::<BTreeSet<_>>());
            prop_assert_eq!(root.id(), if n == 1 { 0 } else { -(n - 1) });
        }

        #[test]
        fn merge_order_is_deterministic(
            data in (2usize..10, 2usize..5).prop_flat_map(|(n, d)| {
                proptest::collection::vec(proptest::collection::vec(0.0f64..20.0, d), n)
            })
        ) {
            let hc = HierarchicalClustering::new();
            prop_assert_eq!(hc.fit(&data).unwrap(), hc.fit(&data).unwrap());
        }
    }
}
