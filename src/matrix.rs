//! Row-major matrices as `Vec<Vec<T>>`.
//!
//! Clustering works on rows. To cluster the columns of a dataset instead
//! (words rather than blogs, say), [`rotate`] it first:
//!
//! ```rust
//! use bicluster::matrix::rotate;
//!
//! let data = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
//! let cols = rotate(&data).unwrap();
//! assert_eq!(cols, vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
//! ```

use crate::error::{Error, Result};
use ndarray::Array2;

/// Check that `rows` is a non-empty rectangular matrix.
///
/// Returns the shared row length.
pub fn check_rectangular<T>(rows: &[Vec<T>]) -> Result<usize> {
    let first = rows.first().ok_or(Error::EmptyInput)?;
    let d = first.len();
    if let Some(p) = rows.iter().find(|p| p.len() != d) {
        return Err(Error::DimensionMismatch {
            expected: d,
            found: p.len(),
        });
    }
    Ok(d)
}

/// Copy a rectangular matrix into an `Array2`.
pub(crate) fn to_array<T: Clone>(rows: &[Vec<T>]) -> Result<Array2<T>> {
    let d = check_rectangular(rows)?;
    let flat: Vec<T> = rows.iter().flat_map(|r| r.iter().cloned()).collect();
    Array2::from_shape_vec((rows.len(), d), flat).map_err(|_| Error::DimensionMismatch {
        expected: rows.len() * d,
        found: rows.iter().map(Vec::len).sum(),
    })
}

/// Transpose an m×n matrix into n×m: output row `i` is `input[*][i]`.
///
/// # Errors
///
/// [`Error::EmptyInput`] for no rows, [`Error::DimensionMismatch`] for a
/// ragged matrix.
pub fn rotate<T: Clone>(rows: &[Vec<T>]) -> Result<Vec<Vec<T>>> {
    let arr = to_array(rows)?;
    Ok(arr.t().rows().into_iter().map(|r| r.to_vec()).collect())
}
