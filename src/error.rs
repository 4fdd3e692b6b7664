use thiserror::Error;

/// Result alias for `bicluster`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by clustering, matrix and dataset primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// Rows of differing length.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid number of clusters requested.
    #[error("cannot create {requested} clusters from {n_items} items")]
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items.
        n_items: usize,
    },

    /// A dataset line could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number in the source.
        line: u64,
        /// What went wrong.
        message: String,
    },

    /// Reading a dataset failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl Error {
    /// Whether the error rejects the shape of the caller's input
    /// (empty, ragged, or an out-of-range cluster count).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::EmptyInput | Error::DimensionMismatch { .. } | Error::InvalidClusterCount { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = Error::InvalidClusterCount {
            requested: 5,
            n_items: 2,
        };
        assert_eq!(e.to_string(), "cannot create 5 clusters from 2 items");
        assert!(e.is_invalid_input());
    }

    #[test]
    fn test_parse_is_not_invalid_input() {
        let e = Error::Parse {
            line: 3,
            message: "bad float".into(),
        };
        assert!(!e.is_invalid_input());
        assert!(e.to_string().contains("line 3"));
    }
}
