//! Plain-text matrix files.
//!
//! One row per line, each value followed by a single space:
//!
//! ```text
//! 1 2 3
//! 4 5 6
//! 7 8 9
//! ```
//!
//! Reading accepts any whitespace between values and skips blank lines.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use tracing::debug;

use super::{Element, Matrix};
use crate::error::{MatmulError, Result};

pub(crate) fn push_row(out: &mut String, row: &[Element]) {
    for value in row {
        // writing to a String cannot fail
        let _ = write!(out, "{} ", value);
    }
    out.push('\n');
}

/// Writes `matrix` to `writer` in the text format.
pub fn write_matrix<W: Write>(matrix: &Matrix, mut writer: W) -> std::io::Result<()> {
    let mut line = String::new();
    for row in matrix.rows() {
        line.clear();
        push_row(&mut line, row);
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()
}

/// Reads a matrix in the text format from `reader`.
///
/// I/O failures are reported against `<reader>`; use [`load`] to get the
/// file path in the error.
pub fn read_matrix<R: BufRead>(reader: R) -> Result<Matrix> {
    read_with_path(reader, Path::new("<reader>"))
}

/// Writes `matrix` to the file at `path`, replacing it.
pub fn save<P: AsRef<Path>>(matrix: &Matrix, path: P) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), n = matrix.dim(), "writing matrix");
    let io_err = |source| MatmulError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    write_matrix(matrix, BufWriter::new(file)).map_err(io_err)
}

/// Reads a matrix from the file at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| MatmulError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let matrix = read_with_path(BufReader::new(file), path)?;
    debug!(path = %path.display(), n = matrix.dim(), "read matrix");
    Ok(matrix)
}

fn read_with_path<R: BufRead>(reader: R, path: &Path) -> Result<Matrix> {
    let mut rows: Vec<Vec<Element>> = Vec::new();
    let mut width: Option<usize> = None;
    let mut last_line = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| {
            // lines() reports bad UTF-8 as InvalidData
            if source.kind() == ErrorKind::InvalidData {
                MatmulError::Parse {
                    line: line_no,
                    reason: "invalid UTF-8".to_string(),
                }
            } else {
                MatmulError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        if line.trim().is_empty() {
            continue;
        }
        last_line = line_no;

        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<Element>().map_err(|e| MatmulError::Parse {
                    line: line_no,
                    reason: format!("invalid value {:?}: {}", token, e),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        match width {
            None => width = Some(row.len()),
            Some(w) if w != row.len() => {
                return Err(MatmulError::Parse {
                    line: line_no,
                    reason: format!("expected {} values, found {}", w, row.len()),
                });
            }
            Some(_) => {}
        }
        rows.push(row);
    }

    if let Some(w) = width {
        if w != rows.len() {
            return Err(MatmulError::Parse {
                line: last_line,
                reason: format!("matrix is not square: {} rows of {} values", rows.len(), w),
            });
        }
    }

    Matrix::from_rows(rows)
}
