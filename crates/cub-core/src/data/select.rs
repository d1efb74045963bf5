//! Row and column selection, and column assignment
//!
//! Reads go through a tagged `Selector`; writes go through `Assign`. Both
//! validate fully before touching any data.

use super::*;

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// What `DataFrame::get` selects
#[derive(Debug, Clone)]
pub enum Selector<'a> {
    /// One column by name
    Name(&'a str),
    /// Several columns by name, in the given order
    Names(Vec<&'a str>),
    /// Rows where a one-column boolean DataFrame is true
    Mask(&'a DataFrame),
    /// Rows first, then columns, resolved independently
    Cells(RowSelector<'a>, ColSelector<'a>),
}

/// Row half of a `Selector::Cells`
#[derive(Debug, Clone)]
pub enum RowSelector<'a> {
    /// A single position; negative counts from the end
    Index(isize),
    Slice(Slice),
    Positions(Vec<isize>),
    Mask(&'a DataFrame),
}

/// Column half of a `Selector::Cells`
#[derive(Debug, Clone)]
pub enum ColSelector<'a> {
    /// A single position; negative counts from the end
    Index(isize),
    Slice(Slice),
    Positions(Vec<isize>),
    Name(&'a str),
    Names(Vec<&'a str>),
}

/// A start/stop/step range over positions with negative-index support
///
/// Bounds are clamped to the sequence the way Python slices are, so a
/// slice never fails on out-of-range bounds; only a zero step is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: isize,
}

impl Slice {
    pub fn new(start: Option<isize>, stop: Option<isize>) -> Self {
        Self {
            start,
            stop,
            step: 1,
        }
    }

    /// Every position
    pub fn full() -> Self {
        Self::new(None, None)
    }

    pub fn with_step(mut self, step: isize) -> Self {
        self.step = step;
        self
    }

    /// Resolve to concrete positions in a sequence of length `len`
    pub fn indices(&self, len: usize) -> Result<Vec<usize>> {
        if self.step == 0 {
            return Err(DataError::InvalidParameter(
                "slice step cannot be zero".to_string(),
            ));
        }

        let len = len as isize;
        let step = self.step;
        let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };

        let clamp = |bound: isize| {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };

        let start = self
            .start
            .map(clamp)
            .unwrap_or(if step > 0 { lower } else { upper });
        let stop = self
            .stop
            .map(clamp)
            .unwrap_or(if step > 0 { upper } else { lower });

        let mut positions = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            positions.push(i as usize);
            i = match i.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }

        Ok(positions)
    }
}

impl From<Range<isize>> for Slice {
    fn from(range: Range<isize>) -> Self {
        Slice::new(Some(range.start), Some(range.end))
    }
}

impl From<RangeFrom<isize>> for Slice {
    fn from(range: RangeFrom<isize>) -> Self {
        Slice::new(Some(range.start), None)
    }
}

impl From<RangeTo<isize>> for Slice {
    fn from(range: RangeTo<isize>) -> Self {
        Slice::new(None, Some(range.end))
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Slice::full()
    }
}

impl<'a> From<&'a str> for Selector<'a> {
    fn from(name: &'a str) -> Self {
        Selector::Name(name)
    }
}

impl<'a> From<Vec<&'a str>> for Selector<'a> {
    fn from(names: Vec<&'a str>) -> Self {
        Selector::Names(names)
    }
}

impl<'a> From<&[&'a str]> for Selector<'a> {
    fn from(names: &[&'a str]) -> Self {
        Selector::Names(names.to_vec())
    }
}

impl<'a> From<&'a DataFrame> for Selector<'a> {
    fn from(mask: &'a DataFrame) -> Self {
        Selector::Mask(mask)
    }
}

impl<'a> From<(RowSelector<'a>, ColSelector<'a>)> for Selector<'a> {
    fn from((rows, cols): (RowSelector<'a>, ColSelector<'a>)) -> Self {
        Selector::Cells(rows, cols)
    }
}

impl From<isize> for RowSelector<'_> {
    fn from(idx: isize) -> Self {
        RowSelector::Index(idx)
    }
}

impl From<Slice> for RowSelector<'_> {
    fn from(slice: Slice) -> Self {
        RowSelector::Slice(slice)
    }
}

impl From<Vec<isize>> for RowSelector<'_> {
    fn from(positions: Vec<isize>) -> Self {
        RowSelector::Positions(positions)
    }
}

impl<'a> From<&'a DataFrame> for RowSelector<'a> {
    fn from(mask: &'a DataFrame) -> Self {
        RowSelector::Mask(mask)
    }
}

impl From<isize> for ColSelector<'_> {
    fn from(idx: isize) -> Self {
        ColSelector::Index(idx)
    }
}

impl From<Slice> for ColSelector<'_> {
    fn from(slice: Slice) -> Self {
        ColSelector::Slice(slice)
    }
}

impl From<Vec<isize>> for ColSelector<'_> {
    fn from(positions: Vec<isize>) -> Self {
        ColSelector::Positions(positions)
    }
}

impl<'a> From<&'a str> for ColSelector<'a> {
    fn from(name: &'a str) -> Self {
        ColSelector::Name(name)
    }
}

impl<'a> From<Vec<&'a str>> for ColSelector<'a> {
    fn from(names: Vec<&'a str>) -> Self {
        ColSelector::Names(names)
    }
}

/// Map a possibly negative position onto `0..len`
fn resolve_position(pos: isize, len: usize) -> Result<usize> {
    let resolved = if pos < 0 { pos + len as isize } else { pos };
    if resolved < 0 || resolved as usize >= len {
        return Err(DataError::IndexOutOfBounds { index: pos, len });
    }
    Ok(resolved as usize)
}

/// Validate a row mask against a row count and borrow its booleans
fn mask_values(mask: &DataFrame, nrows: usize) -> Result<&BoolArray> {
    if mask.ncols() != 1 {
        return Err(DataError::DimensionMismatch {
            expected: "a one-column boolean DataFrame".to_string(),
            actual: format!("{} columns", mask.ncols()),
        });
    }

    let column = &mask.columns[0];
    let values = column.as_bool().ok_or(DataError::TypeMismatch {
        expected: "bool",
        actual: column.dtype(),
    })?;

    if values.len() != nrows {
        return Err(DataError::DimensionMismatch {
            expected: format!("mask length {}", nrows),
            actual: format!("mask length {}", values.len()),
        });
    }

    Ok(values)
}

impl RowSelector<'_> {
    fn resolve(&self, nrows: usize) -> Result<Vec<usize>> {
        match self {
            RowSelector::Index(idx) => Ok(vec![resolve_position(*idx, nrows)?]),
            RowSelector::Slice(slice) => slice.indices(nrows),
            RowSelector::Positions(positions) => positions
                .iter()
                .map(|&pos| resolve_position(pos, nrows))
                .collect(),
            RowSelector::Mask(mask) => Ok(mask_values(mask, nrows)?
                .iter()
                .enumerate()
                .filter(|(_, keep)| **keep)
                .map(|(i, _)| i)
                .collect()),
        }
    }
}

impl ColSelector<'_> {
    fn resolve(&self, df: &DataFrame) -> Result<Vec<usize>> {
        let ncols = df.ncols();
        let by_name = |name: &str| {
            df.columns
                .get_index_of(name)
                .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
        };

        match self {
            ColSelector::Index(idx) => Ok(vec![resolve_position(*idx, ncols)?]),
            ColSelector::Slice(slice) => slice.indices(ncols),
            ColSelector::Positions(positions) => positions
                .iter()
                .map(|&pos| resolve_position(pos, ncols))
                .collect(),
            ColSelector::Name(name) => Ok(vec![by_name(*name)?]),
            ColSelector::Names(names) => names.iter().map(|name| by_name(*name)).collect(),
        }
    }
}

/// A value that `DataFrame::set` can store under a column name
#[derive(Debug, Clone)]
pub enum Assign {
    /// A column of exactly the DataFrame's length
    Column(Column),
    /// A one-column DataFrame of matching length; its column is extracted
    Frame(DataFrame),
    /// A scalar broadcast to every row
    Scalar(Value),
}

impl From<Column> for Assign {
    fn from(column: Column) -> Self {
        Assign::Column(column)
    }
}

impl From<DataFrame> for Assign {
    fn from(frame: DataFrame) -> Self {
        Assign::Frame(frame)
    }
}

impl From<Value> for Assign {
    fn from(value: Value) -> Self {
        Assign::Scalar(value)
    }
}

macro_rules! impl_assign_from {
    ($($src:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$src> for Assign {
                fn from(value: $src) -> Self {
                    Assign::$variant(value.into())
                }
            }
        )*
    };
}

impl_assign_from!(
    i64 => Scalar,
    i32 => Scalar,
    f64 => Scalar,
    bool => Scalar,
    &str => Scalar,
    String => Scalar,
    IntArray => Column,
    FloatArray => Column,
    BoolArray => Column,
    Vec<i64> => Column,
    Vec<i32> => Column,
    Vec<f64> => Column,
    Vec<bool> => Column,
    Vec<&str> => Column,
    Vec<String> => Column,
    Vec<Option<&str>> => Column,
);

impl DataFrame {
    /// Select columns, rows, or both
    ///
    /// ```ignore
    /// df.get("a")?;                                  // one column
    /// df.get(vec!["a", "c"])?;                       // several columns
    /// df.get(&mask)?;                                // rows where mask is true
    /// df.get((RowSelector::from(Slice::new(Some(1), None)), ColSelector::from("a")))?;
    /// ```
    pub fn get<'a>(&self, selector: impl Into<Selector<'a>>) -> Result<DataFrame> {
        match selector.into() {
            Selector::Name(name) => self.select([name]),
            Selector::Names(names) => self.select(names),
            Selector::Mask(mask) => self.filter(mask),
            Selector::Cells(rows, cols) => {
                let rows = rows.resolve(self.nrows)?;
                let cols = cols.resolve(self)?;

                let mut builder = DataFrameBuilder::with_capacity(cols.len());
                for idx in cols {
                    let (name, column) = self.columns.get_index(idx).ok_or(
                        DataError::IndexOutOfBounds {
                            index: idx as isize,
                            len: self.ncols(),
                        },
                    )?;
                    builder = builder.with_column(name.clone(), column.take(&rows)?)?;
                }

                builder.build()
            }
        }
    }

    /// Select specific columns by name
    pub fn select<I, S>(&self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = DataFrameBuilder::new();

        for name in names.into_iter() {
            let name = name.as_ref();
            match self.columns.get(name) {
                Some(column) => {
                    builder = builder.with_column(name, column.clone())?;
                }
                None => {
                    return Err(DataError::ColumnNotFound(name.to_string()));
                }
            }
        }

        builder.build()
    }

    /// Keep the rows where a one-column boolean DataFrame is true
    pub fn filter(&self, mask: &DataFrame) -> Result<Self> {
        let mask: Vec<bool> = mask_values(mask, self.nrows)?.to_vec();
        self.map_columns(|column| column.filter(&mask))
    }

    /// Add a new column or overwrite an existing one
    ///
    /// New names are appended after the existing columns; existing names
    /// keep their position. A DataFrame without columns takes its row count
    /// from the first column assigned to it.
    pub fn set<S>(&mut self, name: S, value: impl Into<Assign>) -> Result<()>
    where
        S: Into<String>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(DataError::EmptyColumnName);
        }

        let column = match value.into() {
            Assign::Column(column) => column,
            Assign::Frame(frame) => {
                if frame.ncols() != 1 {
                    return Err(DataError::DimensionMismatch {
                        expected: "a one-column DataFrame".to_string(),
                        actual: format!("{} columns", frame.ncols()),
                    });
                }
                frame.columns.into_values().next().ok_or_else(|| {
                    DataError::DimensionMismatch {
                        expected: "a one-column DataFrame".to_string(),
                        actual: "0 columns".to_string(),
                    }
                })?
            }
            Assign::Scalar(value) => Column::repeat(&value, self.nrows)?,
        };

        if self.columns.is_empty() {
            self.nrows = column.len();
        } else if column.len() != self.nrows {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} rows", self.nrows),
                actual: format!("{} rows", column.len()),
            });
        }

        self.columns.insert(name, column);
        Ok(())
    }
}
