//! Row ordering for DataFrames

use super::*;

use std::cmp::Ordering;

/// Arrange (sort) operation
///
/// Keys are compared in the order they were added. The sort is stable, and
/// missing values (null or NaN) go last whichever direction a key sorts in.
pub struct Arrange<'a> {
    df: &'a DataFrame,
    columns: Vec<(String, bool)>, // (column_name, ascending)
}

impl<'a> Arrange<'a> {
    /// Create a new arrange operation
    pub fn new(df: &'a DataFrame) -> Self {
        Self {
            df,
            columns: Vec::new(),
        }
    }

    /// Add a column to sort by
    pub fn by<S: Into<String>>(mut self, col: S, ascending: bool) -> Self {
        self.columns.push((col.into(), ascending));
        self
    }

    /// Execute the arrange
    pub fn execute(self) -> Result<DataFrame> {
        if self.columns.is_empty() {
            return Ok(self.df.clone());
        }

        let mut keys = Vec::with_capacity(self.columns.len());
        for (col, ascending) in &self.columns {
            let column = self
                .df
                .column(col)
                .ok_or_else(|| DataError::ColumnNotFound(col.clone()))?;
            keys.push((column.values().collect::<Vec<_>>(), *ascending));
        }

        let mut indices: Vec<usize> = (0..self.df.len()).collect();

        indices.sort_by(|&a, &b| {
            for (values, ascending) in &keys {
                let cmp = compare_values(&values[a], &values[b], *ascending);
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            Ordering::Equal
        });

        log::debug!("sorted {} rows by {} key(s)", indices.len(), keys.len());

        self.df.take_rows(&indices)
    }
}

fn compare_values(v1: &Value, v2: &Value, ascending: bool) -> Ordering {
    match (v1.is_missing(), v2.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if ascending => v1.cmp(v2),
        (false, false) => v2.cmp(v1),
    }
}

impl DataFrame {
    /// Sort rows by one or more columns, all in the same direction
    pub fn sort_values<S: AsRef<str>>(&self, by: &[S], ascending: bool) -> Result<DataFrame> {
        by.iter()
            .fold(Arrange::new(self), |arrange, col| {
                arrange.by(col.as_ref(), ascending)
            })
            .execute()
    }
}
