//! DataFrame implementation for tabular data
//!
//! A DataFrame is an ordered collection of equally long, named columns.
//! Columns keep their insertion order, which is also the display order.
//! Every operation returns a new DataFrame except `set` and `set_columns`.

use super::*;

use indexmap::IndexMap;
use ndarray::Array2;
use rand::seq::SliceRandom;

use std::collections::{HashMap, HashSet};

/// Main DataFrame structure
#[derive(Clone, Debug, Default)]
pub struct DataFrame {
    pub(crate) columns: IndexMap<String, Column>,
    pub(crate) nrows: usize,
}

/// Largest sample `DataFrame::sample` will draw
pub const MAX_SAMPLE_ROWS: usize = u32::MAX as usize;

/// How many rows `DataFrame::sample` draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleSize {
    /// An exact number of rows
    Count(usize),
    /// A proportion of the current row count, rounded to the nearest row
    Fraction(f64),
}

impl DataFrame {
    /// Create an empty DataFrame
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
            nrows: 0,
        }
    }

    /// Create DataFrame from named columns
    pub fn from_columns<I, S, C>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, C)>,
        S: Into<String>,
        C: Into<Column>,
    {
        let mut builder = DataFrameBuilder::new();

        for (name, column) in columns.into_iter() {
            builder = builder.with_column(name, column)?;
        }

        builder.build()
    }

    pub(crate) fn from_parts(columns: IndexMap<String, Column>, nrows: usize) -> Self {
        Self { columns, nrows }
    }

    /// Get the shape of the DataFrame (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.columns.len())
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.nrows
    }

    /// Check if the DataFrame has no rows
    pub fn is_empty(&self) -> bool {
        self.nrows == 0
    }

    /// Get the number of columns
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Get column names in order
    pub fn columns(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    /// Rebind every column to a new name, positionally
    ///
    /// The name list must have exactly one entry per column, no duplicates
    /// and no empty names. On error the DataFrame is left untouched.
    pub fn set_columns<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.len() != self.columns.len() {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} column names", self.columns.len()),
                actual: format!("{} column names", names.len()),
            });
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.is_empty() {
                return Err(DataError::EmptyColumnName);
            }
            if !seen.insert(name.as_str()) {
                return Err(DataError::DuplicateColumn(name.clone()));
            }
        }

        let columns = std::mem::take(&mut self.columns);
        self.columns = names.into_iter().zip(columns.into_values()).collect();
        Ok(())
    }

    /// Get a reference to a column
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Check if column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Iterate over `(name, column)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(name, column)| (name.as_str(), column))
    }

    /// A two-column DataFrame of column names and their kinds
    pub fn dtypes(&self) -> Result<DataFrame> {
        let names: Vec<&str> = self.columns();
        let kinds: Vec<&str> = self.columns.values().map(Column::dtype).collect();

        DataFrameBuilder::with_capacity(2)
            .with_column("column name", names)?
            .with_column("data type", kinds)?
            .build()
    }

    /// All cells as a single 2-D array, rows by columns
    pub fn values(&self) -> Array2<Value> {
        Array2::from_shape_fn((self.nrows, self.columns.len()), |(row, col)| {
            self.columns[col].get(row).unwrap_or(Value::Null)
        })
    }

    /// Return the first `n` rows
    pub fn head(&self, n: usize) -> Result<Self> {
        let end = n.min(self.nrows);
        self.map_columns(|column| column.slice(0..end))
    }

    /// Return the last `n` rows
    pub fn tail(&self, n: usize) -> Result<Self> {
        let start = self.nrows - n.min(self.nrows);
        let end = self.nrows;
        self.map_columns(|column| column.slice(start..end))
    }

    /// Rename columns with an old-name to new-name mapping
    ///
    /// Names missing from the mapping are kept; mapping entries for names
    /// the DataFrame does not have are ignored.
    pub fn rename<I, K, V>(&self, mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mapping: HashMap<String, String> = mapping
            .into_iter()
            .map(|(old, new)| (old.as_ref().to_string(), new.into()))
            .collect();

        let mut builder = DataFrameBuilder::with_capacity(self.columns.len());
        for (name, column) in &self.columns {
            let new_name = mapping.get(name).unwrap_or(name);
            builder = builder.with_column(new_name.clone(), column.clone())?;
        }

        builder.build()
    }

    /// Drop columns by name; unknown names are ignored
    pub fn drop<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let doomed: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();

        let mut builder = DataFrameBuilder::with_capacity(self.columns.len());
        for (name, column) in &self.columns {
            if !doomed.contains(name.as_str()) {
                builder = builder.with_column(name.clone(), column.clone())?;
            }
        }

        builder.build()
    }

    /// Gather rows by position, in the order given
    pub fn take_rows(&self, indices: &[usize]) -> Result<Self> {
        for &idx in indices {
            if idx >= self.nrows {
                return Err(DataError::IndexOutOfBounds {
                    index: idx as isize,
                    len: self.nrows,
                });
            }
        }

        self.map_columns(|column| column.take(indices))
    }

    /// Randomly sample rows
    ///
    /// Without replacement the rows are shuffled and truncated, so asking
    /// for more rows than exist is an error. The same seed gives the same
    /// rows for a given `rand` release; no seed draws from the OS.
    pub fn sample(&self, size: SampleSize, replace: bool, seed: Option<u64>) -> Result<Self> {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let n = match size {
            SampleSize::Count(n) => n,
            SampleSize::Fraction(frac) => {
                if !frac.is_finite() || frac < 0.0 {
                    return Err(DataError::InvalidParameter(format!(
                        "sample fraction must be a non-negative number, got {}",
                        frac
                    )));
                }
                let n = (frac * self.nrows as f64).round();
                if n > MAX_SAMPLE_ROWS as f64 {
                    return Err(DataError::InvalidParameter(format!(
                        "sample fraction {} gives more than {} rows",
                        frac, MAX_SAMPLE_ROWS
                    )));
                }
                n as usize
            }
        };

        if n > MAX_SAMPLE_ROWS {
            return Err(DataError::InvalidParameter(format!(
                "sample size {} exceeds {} rows",
                n, MAX_SAMPLE_ROWS
            )));
        }

        if n > self.nrows && !replace {
            return Err(DataError::DimensionMismatch {
                expected: format!("sample size <= {}", self.nrows),
                actual: format!("sample size {}", n),
            });
        }

        if n > 0 && self.nrows == 0 {
            return Err(DataError::InvalidParameter(
                "cannot sample rows from an empty DataFrame".to_string(),
            ));
        }

        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_os_rng()
        };

        let indices: Vec<usize> = if replace {
            (0..n).map(|_| rng.random_range(0..self.nrows)).collect()
        } else {
            let mut indices: Vec<usize> = (0..self.nrows).collect();
            indices.shuffle(&mut rng);
            indices.truncate(n);
            indices
        };

        log::debug!(
            "sampled {} of {} rows (replace: {}, seeded: {})",
            n,
            self.nrows,
            replace,
            seed.is_some()
        );

        self.take_rows(&indices)
    }

    /// Apply `f` to every column and collect the results under the same names
    pub(crate) fn map_columns<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&Column) -> Result<Column>,
    {
        let mut builder = DataFrameBuilder::with_capacity(self.columns.len());

        for (name, column) in &self.columns {
            builder = builder.with_column(name.clone(), f(column)?)?;
        }

        builder.build()
    }
}

impl PartialEq for DataFrame {
    /// Same names in the same order holding equal columns
    fn eq(&self, other: &Self) -> bool {
        self.nrows == other.nrows
            && self.columns.len() == other.columns.len()
            && self
                .columns
                .iter()
                .zip(other.columns.iter())
                .all(|((n1, c1), (n2, c2))| n1 == n2 && c1 == c2)
    }
}
