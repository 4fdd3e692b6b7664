//! Clustering algorithms for grouping similar rows.
//!
//! ## Algorithms
//!
//! ### Hierarchical (Agglomerative) Clustering
//!
//! Bottom-up: start with each row as its own cluster, repeatedly merge
//! the two closest clusters until one remains. The merge history forms a
//! **dendrogram**: a binary tree of [`Bicluster`] nodes whose leaves are the
//! original rows.
//!
//! ```text
//!          -3 (distance 9.0)
//!         /  \
//!       -1    -2 (distance 0.0)
//!      / \    / \
//!     0   1  2   3
//! ```
//!
//! A cluster is represented by the mean of its two children, so distances
//! between merged clusters are centroid distances.
//!
//! **When to use**: When you want to see the whole structure, or don't know
//! how many groups to expect.
//!
//! ### K-means
//!
//! The classic algorithm: assign each row to the nearest centroid, then
//! move each centroid to the mean of its rows. Repeat until the assignment
//! stops changing.
//!
//! **When to use**: When you know k, and want a flat partition fast.
//!
//! ## Usage
//!
//! ```rust
//! use bicluster::cluster::{HierarchicalClustering, Kmeans};
//! use bicluster::distance::Euclidean;
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! let root = HierarchicalClustering::new()
//!     .with_metric(Euclidean)
//!     .fit(&data)
//!     .unwrap();
//! assert_eq!(root.leaf_count(), 4);
//!
//! // Row 0 is never assigned by k-means.
//! let partition = Kmeans::new(2).with_metric(Euclidean).fit(&data).unwrap();
//! assert_eq!(partition.cluster_of(0), None);
//! ```

mod bicluster;
mod hierarchical;
mod kmeans;
mod render;
mod traits;

pub use bicluster::{Bicluster, Iter};
pub use hierarchical::HierarchicalClustering;
pub use kmeans::{Kmeans, Partition};
pub use render::TreeDisplay;
pub use traits::Clustering;
