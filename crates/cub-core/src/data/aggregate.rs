//! Per-column reductions, null tests and distinct-value counting
//!
//! A reduction collapses each column to a single element. Columns a
//! reduction cannot handle are dropped from the result instead of failing
//! the whole call.

use super::*;

use std::cmp::Ordering;

/// The reductions `DataFrame::agg` knows how to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reduction {
    Min,
    Max,
    Mean,
    Median,
    Sum,
    /// Population variance (ddof = 0)
    Var,
    /// Population standard deviation (ddof = 0)
    Std,
    All,
    Any,
    /// Position of the first maximum
    ArgMax,
    /// Position of the first minimum
    ArgMin,
}

impl Reduction {
    pub fn name(&self) -> &'static str {
        match self {
            Reduction::Min => "min",
            Reduction::Max => "max",
            Reduction::Mean => "mean",
            Reduction::Median => "median",
            Reduction::Sum => "sum",
            Reduction::Var => "var",
            Reduction::Std => "std",
            Reduction::All => "all",
            Reduction::Any => "any",
            Reduction::ArgMax => "argmax",
            Reduction::ArgMin => "argmin",
        }
    }
}

/// Per-column results: unwrapped when the DataFrame had exactly one column
#[derive(Debug, Clone, PartialEq)]
pub enum Frames {
    Single(DataFrame),
    Multiple(Vec<DataFrame>),
}

impl Frames {
    fn from_vec(mut frames: Vec<DataFrame>) -> Self {
        if frames.len() == 1 {
            Frames::Single(frames.remove(0))
        } else {
            Frames::Multiple(frames)
        }
    }

    /// Number of per-column results
    pub fn len(&self) -> usize {
        match self {
            Frames::Single(_) => 1,
            Frames::Multiple(frames) => frames.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The lone result, if there is exactly one
    pub fn single(self) -> Option<DataFrame> {
        match self {
            Frames::Single(frame) => Some(frame),
            Frames::Multiple(_) => None,
        }
    }

    /// Every result as a list, regardless of how many there are
    pub fn into_vec(self) -> Vec<DataFrame> {
        match self {
            Frames::Single(frame) => vec![frame],
            Frames::Multiple(frames) => frames,
        }
    }
}

/// Position of the first element that no later element beats
fn arg_best<T, F>(values: impl Iterator<Item = T>, beats: F) -> Option<usize>
where
    F: Fn(&T, &T) -> bool,
{
    let mut best: Option<(usize, T)> = None;
    for (idx, value) in values.enumerate() {
        let replace = match &best {
            Some((_, current)) => beats(&value, current),
            None => true,
        };
        if replace {
            best = Some((idx, value));
        }
    }
    best.map(|(idx, _)| idx)
}

fn median(arr: &FloatArray) -> f64 {
    if arr.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }

    let mut sorted: Vec<f64> = arr.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

fn reduce_float(arr: &FloatArray, reduction: Reduction) -> Result<Column> {
    let has_nan = arr.iter().any(|v| v.is_nan());
    let value = match reduction {
        Reduction::Sum => arr.sum(),
        Reduction::Mean => arr.mean().unwrap_or(f64::NAN),
        Reduction::Var if arr.is_empty() => f64::NAN,
        Reduction::Var => arr.var(0.0),
        Reduction::Std if arr.is_empty() => f64::NAN,
        Reduction::Std => arr.std(0.0),
        Reduction::All => return Ok(Column::bool(vec![arr.iter().all(|&v| v != 0.0)])),
        Reduction::Any => return Ok(Column::bool(vec![arr.iter().any(|&v| v != 0.0)])),
        _ if arr.is_empty() => {
            return Err(DataError::Unsupported {
                operation: reduction.name(),
                dtype: "empty",
            })
        }
        Reduction::Median => median(arr),
        Reduction::Min if has_nan => f64::NAN,
        Reduction::Max if has_nan => f64::NAN,
        Reduction::Min => arr.iter().copied().fold(f64::INFINITY, f64::min),
        Reduction::Max => arr.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Reduction::ArgMax | Reduction::ArgMin => {
            let idx = if has_nan {
                arr.iter().position(|v| v.is_nan())
            } else if reduction == Reduction::ArgMax {
                arg_best(arr.iter(), |a, b| a > b)
            } else {
                arg_best(arr.iter(), |a, b| a < b)
            };
            return Ok(Column::int(vec![idx.unwrap_or(0) as i64]));
        }
    };

    Ok(Column::float(vec![value]))
}

fn reduce_int(arr: &IntArray, reduction: Reduction) -> Result<Column> {
    match reduction {
        Reduction::Mean | Reduction::Median | Reduction::Var | Reduction::Std => {
            reduce_float(&arr.mapv(|v| v as f64), reduction)
        }
        Reduction::Sum => Ok(Column::int(vec![arr
            .iter()
            .fold(0i64, |acc, &v| acc.wrapping_add(v))])),
        Reduction::All => Ok(Column::bool(vec![arr.iter().all(|&v| v != 0)])),
        Reduction::Any => Ok(Column::bool(vec![arr.iter().any(|&v| v != 0)])),
        Reduction::Min | Reduction::Max | Reduction::ArgMax | Reduction::ArgMin => {
            let idx = match reduction {
                Reduction::Min | Reduction::ArgMin => arg_best(arr.iter(), |a, b| a < b),
                _ => arg_best(arr.iter(), |a, b| a > b),
            }
            .ok_or(DataError::Unsupported {
                operation: reduction.name(),
                dtype: "empty",
            })?;

            Ok(match reduction {
                Reduction::Min | Reduction::Max => Column::int(vec![arr[idx]]),
                _ => Column::int(vec![idx as i64]),
            })
        }
    }
}

fn reduce_bool(arr: &BoolArray, reduction: Reduction) -> Result<Column> {
    match reduction {
        Reduction::Mean | Reduction::Median | Reduction::Var | Reduction::Std => {
            reduce_float(&arr.mapv(|v| if v { 1.0 } else { 0.0 }), reduction)
        }
        Reduction::Sum => Ok(Column::int(vec![
            arr.iter().filter(|&&v| v).count() as i64,
        ])),
        Reduction::All => Ok(Column::bool(vec![arr.iter().all(|&v| v)])),
        Reduction::Any => Ok(Column::bool(vec![arr.iter().any(|&v| v)])),
        Reduction::Min | Reduction::Max | Reduction::ArgMax | Reduction::ArgMin => {
            let idx = match reduction {
                Reduction::Min | Reduction::ArgMin => arg_best(arr.iter(), |a, b| a < b),
                _ => arg_best(arr.iter(), |a, b| a > b),
            }
            .ok_or(DataError::Unsupported {
                operation: reduction.name(),
                dtype: "empty",
            })?;

            Ok(match reduction {
                Reduction::Min | Reduction::Max => Column::bool(vec![arr[idx]]),
                _ => Column::int(vec![idx as i64]),
            })
        }
    }
}

fn reduce_object(arr: &ObjectArray, reduction: Reduction) -> Result<Column> {
    let unsupported = |dtype| DataError::Unsupported {
        operation: reduction.name(),
        dtype,
    };

    if arr.iter().any(Option::is_none) {
        return Err(unsupported("nullable string"));
    }
    let text = arr.iter().flatten();

    match reduction {
        Reduction::Sum if arr.is_empty() => Err(unsupported("empty")),
        Reduction::Sum => Ok(Column::text([text.map(String::as_str).collect::<String>()])),
        Reduction::Min | Reduction::Max | Reduction::ArgMax | Reduction::ArgMin => {
            let idx = match reduction {
                Reduction::Min | Reduction::ArgMin => arg_best(text, |a, b| a < b),
                _ => arg_best(text, |a, b| a > b),
            }
            .ok_or_else(|| unsupported("empty"))?;

            Ok(match reduction {
                Reduction::Min | Reduction::Max => Column::Object(vec![arr[idx].clone()]),
                _ => Column::int(vec![idx as i64]),
            })
        }
        _ => Err(unsupported("string")),
    }
}

impl Column {
    /// Collapse the column to a one-element column
    pub fn reduce(&self, reduction: Reduction) -> Result<Column> {
        match self {
            Column::Int(arr) => reduce_int(arr, reduction),
            Column::Float(arr) => reduce_float(arr, reduction),
            Column::Bool(arr) => reduce_bool(arr, reduction),
            Column::Object(arr) => reduce_object(arr, reduction),
        }
    }

    /// Distinct values in ascending order, NaN and null last
    pub fn unique(&self) -> Column {
        let mut values: Vec<Value> = self.values().collect();
        values.sort();
        values.dedup();
        Column::of_kind(self.kind(), values)
    }

    fn value_counts(&self) -> Vec<(Value, usize)> {
        let mut values: Vec<Value> = self.values().collect();
        values.sort();

        let mut counts: Vec<(Value, usize)> = Vec::new();
        for value in values {
            match counts.last_mut() {
                Some((last, n)) if *last == value => *n += 1,
                _ => counts.push((value, 1)),
            }
        }

        // stable, so ties stay in ascending value order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

impl DataFrame {
    /// Apply a reduction to every column, dropping columns it cannot handle
    pub fn agg(&self, reduction: Reduction) -> Result<DataFrame> {
        let mut builder = DataFrameBuilder::with_capacity(self.ncols());

        for (name, column) in &self.columns {
            match column.reduce(reduction) {
                Ok(reduced) => builder = builder.with_column(name.clone(), reduced)?,
                Err(err) => {
                    log::debug!("{} skips column '{}': {}", reduction.name(), name, err);
                }
            }
        }

        builder.build()
    }

    pub fn min(&self) -> Result<DataFrame> {
        self.agg(Reduction::Min)
    }

    pub fn max(&self) -> Result<DataFrame> {
        self.agg(Reduction::Max)
    }

    pub fn mean(&self) -> Result<DataFrame> {
        self.agg(Reduction::Mean)
    }

    pub fn median(&self) -> Result<DataFrame> {
        self.agg(Reduction::Median)
    }

    pub fn sum(&self) -> Result<DataFrame> {
        self.agg(Reduction::Sum)
    }

    pub fn var(&self) -> Result<DataFrame> {
        self.agg(Reduction::Var)
    }

    pub fn std(&self) -> Result<DataFrame> {
        self.agg(Reduction::Std)
    }

    pub fn all(&self) -> Result<DataFrame> {
        self.agg(Reduction::All)
    }

    pub fn any(&self) -> Result<DataFrame> {
        self.agg(Reduction::Any)
    }

    pub fn argmax(&self) -> Result<DataFrame> {
        self.agg(Reduction::ArgMax)
    }

    pub fn argmin(&self) -> Result<DataFrame> {
        self.agg(Reduction::ArgMin)
    }

    /// Elementwise missing-value test, same shape as `self`
    pub fn isna(&self) -> Result<DataFrame> {
        self.map_columns(|column| Ok(Column::Bool(column.is_null())))
    }

    /// Number of non-missing values in each column
    pub fn count(&self) -> Result<DataFrame> {
        let nrows = self.nrows as i64;
        self.isna()?.sum()?.map_columns(|missing| match missing {
            Column::Int(arr) => Ok(Column::Int(arr.mapv(|m| nrows - m))),
            other => Err(DataError::TypeMismatch {
                expected: "int",
                actual: other.dtype(),
            }),
        })
    }

    /// Distinct values of each column, one DataFrame per column
    pub fn unique(&self) -> Result<Frames> {
        let mut frames = Vec::with_capacity(self.ncols());

        for (name, column) in &self.columns {
            frames.push(
                DataFrameBuilder::new()
                    .with_column(name.clone(), column.unique())?
                    .build()?,
            );
        }

        Ok(Frames::from_vec(frames))
    }

    /// Number of distinct values in each column
    pub fn nunique(&self) -> Result<DataFrame> {
        self.map_columns(|column| Ok(Column::int(vec![column.unique().len() as i64])))
    }

    /// Frequency of each distinct value, most frequent first
    ///
    /// Each result has the value column followed by a `count` column, which
    /// holds proportions instead of counts when `normalize` is set. A value
    /// column already called `count` pushes the counts to `count_1`.
    pub fn value_counts(&self, normalize: bool) -> Result<Frames> {
        let mut frames = Vec::with_capacity(self.ncols());

        for (name, column) in &self.columns {
            let counts = column.value_counts();
            let total = column.len() as f64;

            let (values, ns): (Vec<Value>, Vec<usize>) = counts.into_iter().unzip();
            let values = Column::of_kind(column.kind(), values);
            let ns = if normalize {
                Column::float(ns.iter().map(|&n| n as f64 / total).collect::<Vec<_>>())
            } else {
                Column::int(ns.iter().map(|&n| n as i64).collect::<Vec<_>>())
            };

            let builder = DataFrameBuilder::with_capacity(2).with_column(name.clone(), values)?;
            let count = builder.free_name("count");
            frames.push(builder.with_column(count, ns)?.build()?);
        }

        Ok(Frames::from_vec(frames))
    }
}
