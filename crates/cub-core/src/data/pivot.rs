//! Pivot tables over one or two grouping columns

use super::*;

use std::collections::{BTreeMap, BTreeSet};

/// How each group of a pivot table is summarized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PivotAgg {
    /// Apply a reduction to the `values` column within each group
    Reduce(Reduction),
    /// Count the rows in each group; needs no `values` column
    Size,
}

impl PivotAgg {
    pub fn name(&self) -> &'static str {
        match self {
            PivotAgg::Reduce(reduction) => reduction.name(),
            PivotAgg::Size => "size",
        }
    }
}

impl From<Reduction> for PivotAgg {
    fn from(reduction: Reduction) -> Self {
        PivotAgg::Reduce(reduction)
    }
}

/// Summarize the rows at `indices` into a single value
fn summarize(values: Option<&Column>, indices: &[usize], aggfunc: PivotAgg) -> Result<Value> {
    match (aggfunc, values) {
        (PivotAgg::Size, _) => Ok(Value::Int(indices.len() as i64)),
        (PivotAgg::Reduce(reduction), Some(column)) => Ok(column
            .take(indices)?
            .reduce(reduction)?
            .get(0)
            .unwrap_or(Value::Null)),
        (PivotAgg::Reduce(reduction), None) => Err(DataError::InvalidParameter(format!(
            "pivot with '{}' needs a values column",
            reduction.name()
        ))),
    }
}

impl DataFrame {
    /// Group by `rows` and/or `columns` and summarize each group
    ///
    /// Group keys come out in ascending order. With only `rows`, the result
    /// holds the keys and one column named after the aggregation. With only
    /// `columns`, it is a single row with one column per key. With both, the
    /// row keys lead and every column key gets its own column; combinations
    /// that never occur are NaN, or null when the summaries are text.
    ///
    /// A generated name that is already taken, such as a column key equal to
    /// the `rows` name, gets the first free `_1`, `_2`, ... suffix.
    pub fn pivot_table(
        &self,
        rows: Option<&str>,
        columns: Option<&str>,
        values: Option<&str>,
        aggfunc: PivotAgg,
    ) -> Result<DataFrame> {
        if rows.is_none() && columns.is_none() {
            return Err(DataError::InvalidParameter(
                "pivot_table needs `rows`, `columns` or both".to_string(),
            ));
        }

        let lookup = |name: &str| {
            self.column(name)
                .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
        };

        let row_keys = rows.map(lookup).transpose()?;
        let col_keys = columns.map(lookup).transpose()?;
        let values = values.map(lookup).transpose()?;

        if values.is_none() && aggfunc != PivotAgg::Size {
            return Err(DataError::InvalidParameter(format!(
                "pivot with '{}' needs a values column",
                aggfunc.name()
            )));
        }

        let key_of = |column: Option<&Column>, idx: usize| {
            column.and_then(|c| c.get(idx)).unwrap_or(Value::Null)
        };

        let mut groups: BTreeMap<(Value, Value), Vec<usize>> = BTreeMap::new();
        for idx in 0..self.nrows {
            groups
                .entry((key_of(row_keys, idx), key_of(col_keys, idx)))
                .or_default()
                .push(idx);
        }

        let mut cells = BTreeMap::new();
        for (key, indices) in &groups {
            cells.insert(key.clone(), summarize(values, indices, aggfunc)?);
        }

        log::debug!(
            "pivot_table: {} group(s) summarized with {}",
            cells.len(),
            aggfunc.name()
        );

        let fallback = values.map_or(ColumnKind::Int, |c| c.kind());
        let row_set: BTreeSet<Value> = groups.keys().map(|(r, _)| r.clone()).collect();
        let col_set: BTreeSet<Value> = groups.keys().map(|(_, c)| c.clone()).collect();

        match (rows, row_keys, columns) {
            (Some(rows), Some(row_keys), None) => {
                let keys: Vec<Value> = row_set.into_iter().collect();
                let summaries: Vec<Value> = keys
                    .iter()
                    .map(|r| {
                        cells
                            .get(&(r.clone(), Value::Null))
                            .cloned()
                            .unwrap_or(Value::Null)
                    })
                    .collect();

                let builder = DataFrameBuilder::with_capacity(2)
                    .with_column(rows, Column::of_kind(row_keys.kind(), keys))?;
                let name = builder.free_name(aggfunc.name());
                builder
                    .with_column(name, Column::from_values(summaries, fallback))?
                    .build()
            }
            (None, _, Some(_)) => {
                let mut builder = DataFrameBuilder::with_capacity(col_set.len());
                for c in col_set {
                    let summary = cells
                        .remove(&(Value::Null, c.clone()))
                        .unwrap_or(Value::Null);
                    let name = builder.free_name(&c.to_string());
                    builder =
                        builder.with_column(name, Column::from_values(vec![summary], fallback))?;
                }
                builder.build()
            }
            (Some(rows), Some(row_keys), Some(_)) => {
                let keys: Vec<Value> = row_set.into_iter().collect();
                let mut builder = DataFrameBuilder::with_capacity(col_set.len() + 1)
                    .with_column(rows, Column::of_kind(row_keys.kind(), keys.clone()))?;

                for c in col_set {
                    let summaries: Vec<Value> = keys
                        .iter()
                        .map(|r| cells.remove(&(r.clone(), c.clone())).unwrap_or(Value::Null))
                        .collect();
                    let name = builder.free_name(&c.to_string());
                    builder = builder.with_column(name, Column::from_values(summaries, fallback))?;
                }
                builder.build()
            }
            _ => Err(DataError::InvalidParameter(
                "pivot_table needs `rows`, `columns` or both".to_string(),
            )),
        }
    }
}
