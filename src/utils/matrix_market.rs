//! Loading adjacency matrices from Matrix Market files.
//!
//! Only the coordinate format is supported, with `real`, `integer` or
//! `pattern` fields and `general` or `symmetric` symmetry. Entries are
//! 1-indexed; pattern entries get weight one, and symmetric files are
//! expanded so that both `(i, j)` and `(j, i)` are present.

use crate::sparse::{Element, Matrix};
use anyhow::{bail, ensure, Context, Result};
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Real,
    Integer,
    Pattern,
}

/// Loads a Matrix Market file.
///
/// # Arguments
/// * `path`: the file to load.
///
/// * `fill`: the fill value of the resulting matrix. Entries whose value
///   equals the fill value are rejected, as they could not be told apart
///   from missing ones.
pub fn load_matrix_market<T: Element>(path: impl AsRef<Path>, fill: T) -> Result<Matrix<T>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Could not open {}", path.display()))?;
    parse_matrix_market(BufReader::new(file), fill)
        .with_context(|| format!("Could not parse {}", path.display()))
}

/// Parses a Matrix Market stream.
///
/// See [`load_matrix_market`] for the meaning of `fill`.
pub fn parse_matrix_market<T: Element>(reader: impl BufRead, fill: T) -> Result<Matrix<T>> {
    let mut lines = reader.lines().enumerate();

    let (_, header) = lines.next().context("Empty input")?;
    let header = header?.to_lowercase();
    let tokens: Vec<&str> = header.split_whitespace().collect();
    ensure!(
        tokens.len() == 5 && tokens[0] == "%%matrixmarket" && tokens[1] == "matrix",
        "Invalid header: {}",
        header
    );
    ensure!(
        tokens[2] == "coordinate",
        "Unsupported format {} (only coordinate is supported)",
        tokens[2]
    );
    let field = match tokens[3] {
        "real" | "double" => Field::Real,
        "integer" => Field::Integer,
        "pattern" => Field::Pattern,
        other => bail!("Unsupported field {}", other),
    };
    let symmetric = match tokens[4] {
        "general" => false,
        "symmetric" => true,
        other => bail!("Unsupported symmetry {}", other),
    };

    let mut entries = lines.filter_map(|(n, line)| match line {
        Ok(line) if line.trim().is_empty() || line.starts_with('%') => None,
        other => Some((n + 1, other)),
    });

    let (line_num, size) = entries.next().context("Missing size line")?;
    let size = size?;
    let dims = size
        .split_whitespace()
        .map(str::parse::<usize>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid size line {}: {}", line_num, size))?;
    ensure!(
        dims.len() == 3,
        "Invalid size line {}: {}",
        line_num,
        size
    );
    let (nrows, ncols, nnz) = (dims[0], dims[1], dims[2]);

    let mut matrix = Matrix::new(nrows, ncols, fill)?;
    let mut count = 0;
    for (line_num, line) in entries {
        let line = line?;
        let mut fields = line.split_whitespace();
        let mut index = |what: &str, bound: usize| -> Result<usize> {
            let index: usize = fields
                .next()
                .with_context(|| format!("Missing {} index at line {}", what, line_num))?
                .parse()
                .with_context(|| format!("Invalid {} index at line {}", what, line_num))?;
            ensure!(
                (1..=bound).contains(&index),
                "{} index {} out of range 1..={} at line {}",
                what,
                index,
                bound,
                line_num
            );
            Ok(index - 1)
        };
        let row = index("row", nrows)?;
        let col = index("column", ncols)?;
        let value = match field {
            Field::Pattern => T::ONE,
            Field::Real | Field::Integer => {
                let value: f64 = fields
                    .next()
                    .with_context(|| format!("Missing value at line {}", line_num))?
                    .parse()
                    .with_context(|| format!("Invalid value at line {}", line_num))?;
                ensure!(!value.is_nan(), "NaN value at line {}", line_num);
                T::try_from_f64(value).with_context(|| {
                    format!("Value {} at line {} is not representable", value, line_num)
                })?
            }
        };
        ensure!(
            value != fill,
            "Value at line {} equals the fill value {}",
            line_num,
            fill
        );

        matrix.set(row, col, value);
        if symmetric && row != col {
            ensure!(
                col < nrows && row < ncols,
                "Symmetric file with non-square shape {}x{}",
                nrows,
                ncols
            );
            matrix.set(col, row, value);
        }
        count += 1;
    }

    ensure!(
        count == nnz,
        "Expected {} entries, found {}",
        nnz,
        count
    );
    Ok(matrix)
}
