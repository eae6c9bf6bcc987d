// SPDX-License-Identifier: MIT

//! Row projection: positional query output to named records.
//!
//! Column-listing queries return each row as an ordered sequence of values.
//! Projection pairs the i-th value with the i-th column name to build one
//! mapping per row, preserving row order.

use serde_json::{Map, Value};

/// A row's arity did not match the column-name list.
///
/// This indicates a server-side bug or corrupt query output, so it is
/// reported rather than silently truncating or padding the row.
#[derive(Debug, thiserror::Error)]
#[error("row {row} has {got} values but {expected} column names")]
pub struct ShapeMismatch {
    pub row: usize,
    pub got: usize,
    pub expected: usize,
}

/// Convert positional rows into mappings keyed by column name.
pub fn project(
    rows: Vec<Vec<Value>>,
    columns: &[String],
) -> Result<Vec<Map<String, Value>>, ShapeMismatch> {
    rows.into_iter()
        .enumerate()
        .map(|(row, values)| {
            if values.len() != columns.len() {
                return Err(ShapeMismatch {
                    row,
                    got: values.len(),
                    expected: columns.len(),
                });
            }
            Ok(columns.iter().cloned().zip(values).collect())
        })
        .collect()
}
