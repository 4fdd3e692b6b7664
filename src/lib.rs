//! # bicluster
//!
//! Group numeric row vectors two ways:
//!
//! - [`HierarchicalClustering`] builds a binary merge tree ([`Bicluster`])
//! - [`Kmeans`] partitions rows into k clusters ([`Partition`])
//!
//! Both take a [`Distance`] ([`Pearson`] by default). To cluster columns
//! instead of rows, [`matrix::rotate`] the data first.
//!
//! The `csv` feature (default) adds [`Dataset`], a loader for tab-delimited
//! files. The `parallel` feature evaluates distances on rayon; results are
//! identical either way.

pub mod cluster;
#[cfg(feature = "csv")]
pub mod dataset;
pub mod distance;
/// Error types used across `bicluster`.
pub mod error;
pub mod matrix;

pub use cluster::{Bicluster, Clustering, HierarchicalClustering, Kmeans, Partition, TreeDisplay};
#[cfg(feature = "csv")]
pub use dataset::Dataset;
pub use distance::{sim_euclidean, Distance, Euclidean, EuclideanSimilarity, Pearson};
pub use error::{Error, Result};
