//! Builder pattern for constructing DataFrames

use indexmap::IndexMap;

use super::*;

/// Builder for creating DataFrames
///
/// Every column passes through `with_column`, which is where names and
/// lengths are validated. A DataFrame is only ever produced by `build`.
#[derive(Debug, Default)]
pub struct DataFrameBuilder {
    columns: IndexMap<String, Column>,
    nrows: Option<usize>,
}

impl DataFrameBuilder {
    /// Create a new DataFrameBuilder
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
            nrows: None,
        }
    }

    /// Create a builder with room for `n` columns
    pub fn with_capacity(n: usize) -> Self {
        Self {
            columns: IndexMap::with_capacity(n),
            nrows: None,
        }
    }

    /// Add a column to the DataFrame
    pub fn with_column<S, C>(mut self, name: S, column: C) -> Result<Self>
    where
        S: Into<String>,
        C: Into<Column>,
    {
        let name = name.into();
        let column = column.into();

        if name.is_empty() {
            return Err(DataError::EmptyColumnName);
        }

        if self.columns.contains_key(&name) {
            return Err(DataError::DuplicateColumn(name));
        }

        // Check dimension consistency
        match self.nrows {
            Some(n) if column.len() != n => {
                return Err(DataError::DimensionMismatch {
                    expected: format!("{} rows", n),
                    actual: format!("{} rows", column.len()),
                });
            }
            None => {
                self.nrows = Some(column.len());
            }
            _ => {}
        }

        self.columns.insert(name, column);
        Ok(self)
    }

    /// `base` if no column holds it yet, otherwise the first of `base_1`,
    /// `base_2`, ... that is free
    pub(crate) fn free_name(&self, base: &str) -> String {
        if !base.is_empty() && !self.columns.contains_key(base) {
            return base.to_string();
        }

        (1..)
            .map(|n| format!("{}_{}", base, n))
            .find(|name| !self.columns.contains_key(name))
            .unwrap_or_default()
    }

    /// Build the DataFrame
    pub fn build(self) -> Result<DataFrame> {
        Ok(DataFrame::from_parts(
            self.columns,
            self.nrows.unwrap_or(0),
        ))
    }
}
