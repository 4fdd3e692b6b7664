//! Tab-delimited datasets: a header of column names, then one labelled row
//! of numbers per line.
//!
//! ```text
//! Blog        china   kids    music
//! Gothamist   0       3       8
//! Slashdot    2       0       1
//! ```
//!
//! The first header cell names the label column and is dropped, so
//! `col_names.len()` equals the width of every data row.

use crate::error::{Error, Result};
use crate::matrix::{check_rectangular, rotate};
use std::io;
use std::path::Path;

/// Row labels, column labels and the numeric matrix between them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    /// One label per data row.
    pub row_names: Vec<String>,
    /// One label per data column.
    pub col_names: Vec<String>,
    /// Row-major values.
    pub data: Vec<Vec<f64>>,
}

impl Dataset {
    /// Read a dataset from a tab-delimited file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())
            .map_err(|e| Error::Io(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_reader(io::BufReader::new(file))
    }

    /// Read a dataset from any tab-delimited source.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] for a line whose width differs from the header or a
    /// cell that is not a number; [`Error::Io`] when reading fails.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let col_names: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .skip(1)
            .map(str::to_owned)
            .collect();

        let mut row_names = Vec::new();
        let mut data = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let line = record.position().map_or(0, |p| p.line());

            let mut cells = record.iter();
            row_names.push(cells.next().unwrap_or_default().to_owned());
            let row = cells
                .map(|cell| {
                    cell.parse::<f64>().map_err(|e| Error::Parse {
                        line,
                        message: format!("{cell:?}: {e}"),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            data.push(row);
        }

        tracing::debug!(rows = data.len(), cols = col_names.len(), "loaded dataset");
        Ok(Self {
            row_names,
            col_names,
            data,
        })
    }

    /// Swap rows and columns, so clustering groups the columns.
    pub fn rotate(&self) -> Result<Self> {
        Ok(Self {
            row_names: self.col_names.clone(),
            col_names: self.row_names.clone(),
            data: rotate(&self.data)?,
        })
    }

    /// Number of data rows.
    pub fn n_rows(&self) -> usize {
        self.data.len()
    }

    /// Number of data columns.
    pub fn n_cols(&self) -> Result<usize> {
        check_rectangular(&self.data)
    }
}

fn csv_error(e: csv::Error) -> Error {
    let line = e.position().map_or(0, |p| p.line());
    match e.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io.to_string()),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => Error::Parse {
            line,
            message: format!("expected {expected_len} fields, found {len}"),
        },
        other => Error::Parse {
            line,
            message: format!("{other:?}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOGS: &str = "Blog\tchina\tkids\tmusic\n\
                         Gothamist\t0\t3\t8\n\
                         Slashdot\t2\t0\t1\n";

    #[test]
    fn test_from_reader() {
        let ds = Dataset::from_reader(BLOGS.as_bytes()).unwrap();
        assert_eq!(ds.row_names, vec!["Gothamist", "Slashdot"]);
        assert_eq!(ds.col_names, vec!["china", "kids", "music"]);
        assert_eq!(ds.data, vec![vec![0.0, 3.0, 8.0], vec![2.0, 0.0, 1.0]]);
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.n_cols(), Ok(3));
    }

    #[test]
    fn test_rotate_swaps_labels() {
        let ds = Dataset::from_reader(BLOGS.as_bytes()).unwrap().rotate().unwrap();
        assert_eq!(ds.row_names, vec!["china", "kids", "music"]);
        assert_eq!(ds.col_names, vec!["Gothamist", "Slashdot"]);
        assert_eq!(ds.data[2], vec![8.0, 1.0]);
    }

    #[test]
    fn test_ragged_line_is_parse_error() {
        let text = "Blog\ta\tb\nx\t1\t2\ny\t3\n";
        let err = Dataset::from_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_non_numeric_cell_is_parse_error() {
        let text = "Blog\ta\nx\tlots\n";
        let err = Dataset::from_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Dataset::from_path("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
