//! Column data structure for holding homogeneous data
//!
//! A Column is a typed, one-dimensional array and the building block of
//! DataFrames. Text always lives in the `Object` kind, where `None` is the
//! null sentinel; it is never stored in any other form.

use super::*;

use ndarray::{ArrayD, Axis, Ix1};

/// A Column is a typed, one-dimensional array of data
#[derive(Clone, Debug)]
pub enum Column {
    /// Integer numbers (i64)
    Int(IntArray),
    /// Floating point numbers (f64), NaN marks a missing value
    Float(FloatArray),
    /// Boolean values
    Bool(BoolArray),
    /// Text values with an explicit null
    Object(ObjectArray),
}

impl Column {
    /// Create a new Int column
    pub fn int(data: impl Into<IntArray>) -> Self {
        Column::Int(data.into())
    }

    /// Create a new Float column
    pub fn float(data: impl Into<FloatArray>) -> Self {
        Column::Float(data.into())
    }

    /// Create a new Bool column
    pub fn bool(data: impl Into<BoolArray>) -> Self {
        Column::Bool(data.into())
    }

    /// Create an Object column from optional text
    pub fn object<I, S>(data: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Column::Object(data.into_iter().map(|v| v.map(Into::into)).collect())
    }

    /// Create an Object column with no nulls
    pub fn text<I, S>(data: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Column::Object(data.into_iter().map(|v| Some(v.into())).collect())
    }

    /// Broadcast a scalar into a column of length `n`
    pub fn repeat(value: &Value, n: usize) -> Result<Self> {
        match value {
            Value::Int(v) => Ok(Column::Int(IntArray::from_elem(n, *v))),
            Value::Float(v) => Ok(Column::Float(FloatArray::from_elem(n, *v))),
            Value::Bool(v) => Ok(Column::Bool(BoolArray::from_elem(n, *v))),
            Value::Str(v) => Ok(Column::Object(vec![Some(v.clone()); n])),
            Value::Null => Err(DataError::TypeMismatch {
                expected: "int, float, bool or string scalar",
                actual: "null",
            }),
        }
    }

    /// Build a column from loose values, inferring the narrowest kind
    ///
    /// Ints stay Int and bools stay Bool only when every value agrees; any
    /// mix of numbers and nulls becomes Float with NaN holes; anything
    /// holding text becomes Object. `fallback` is the kind of an empty
    /// result.
    pub fn from_values(values: Vec<Value>, fallback: ColumnKind) -> Self {
        if values.is_empty() {
            return Column::empty(fallback);
        }

        let kind = if values.iter().all(|v| matches!(v, Value::Int(_))) {
            ColumnKind::Int
        } else if values.iter().all(|v| matches!(v, Value::Bool(_))) {
            ColumnKind::Bool
        } else if values.iter().any(|v| matches!(v, Value::Str(_))) {
            ColumnKind::Object
        } else {
            ColumnKind::Float
        };

        Column::of_kind(kind, values)
    }

    /// Build a column of a known kind from values that already fit it
    pub(crate) fn of_kind(kind: ColumnKind, values: Vec<Value>) -> Self {
        match kind {
            ColumnKind::Int => Column::Int(
                values
                    .iter()
                    .map(|v| match v {
                        Value::Int(i) => *i,
                        other => other.as_f64().unwrap_or(0.0) as i64,
                    })
                    .collect(),
            ),
            ColumnKind::Float => Column::Float(
                values
                    .iter()
                    .map(|v| v.as_f64().unwrap_or(f64::NAN))
                    .collect(),
            ),
            ColumnKind::Bool => {
                Column::Bool(values.iter().map(|v| matches!(v, Value::Bool(true))).collect())
            }
            ColumnKind::Object => Column::Object(
                values
                    .into_iter()
                    .map(|v| match v {
                        Value::Null => None,
                        Value::Str(s) => Some(s),
                        other => Some(other.to_string()),
                    })
                    .collect(),
            ),
        }
    }

    /// An empty column of the given kind
    pub fn empty(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Int => Column::Int(IntArray::zeros(0)),
            ColumnKind::Float => Column::Float(FloatArray::zeros(0)),
            ColumnKind::Bool => Column::Bool(BoolArray::from_elem(0, false)),
            ColumnKind::Object => Column::Object(Vec::new()),
        }
    }

    /// Get the length of the column
    pub fn len(&self) -> usize {
        match self {
            Column::Int(arr) => arr.len(),
            Column::Float(arr) => arr.len(),
            Column::Bool(arr) => arr.len(),
            Column::Object(arr) => arr.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the element kind of the column
    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Int(_) => ColumnKind::Int,
            Column::Float(_) => ColumnKind::Float,
            Column::Bool(_) => ColumnKind::Bool,
            Column::Object(_) => ColumnKind::Object,
        }
    }

    /// Get the type name of the column
    pub fn dtype(&self) -> &'static str {
        self.kind().name()
    }

    pub fn as_int(&self) -> Option<&IntArray> {
        match self {
            Column::Int(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<&FloatArray> {
        match self {
            Column::Float(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<&BoolArray> {
        match self {
            Column::Bool(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectArray> {
        match self {
            Column::Object(arr) => Some(arr),
            _ => None,
        }
    }

    /// Get a value at index
    pub fn get(&self, idx: usize) -> Option<Value> {
        match self {
            Column::Int(arr) => arr.get(idx).map(|&v| Value::Int(v)),
            Column::Float(arr) => arr.get(idx).map(|&v| Value::Float(v)),
            Column::Bool(arr) => arr.get(idx).map(|&v| Value::Bool(v)),
            Column::Object(arr) => arr
                .get(idx)
                .map(|v| v.clone().map(Value::Str).unwrap_or(Value::Null)),
        }
    }

    /// Iterate over the column as loose values
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Elementwise missing-value test: NaN for floats, null for objects
    pub fn is_null(&self) -> BoolArray {
        match self {
            Column::Float(arr) => arr.mapv(|v| v.is_nan()),
            Column::Object(arr) => arr.iter().map(Option::is_none).collect(),
            Column::Int(_) | Column::Bool(_) => BoolArray::from_elem(self.len(), false),
        }
    }

    /// Whether any element is missing
    pub fn has_nulls(&self) -> bool {
        match self {
            Column::Float(arr) => arr.iter().any(|v| v.is_nan()),
            Column::Object(arr) => arr.iter().any(Option::is_none),
            Column::Int(_) | Column::Bool(_) => false,
        }
    }

    /// Get a slice of the column
    pub fn slice(&self, range: std::ops::Range<usize>) -> Result<Self> {
        if range.end > self.len() || range.start > range.end {
            return Err(DataError::IndexOutOfBounds {
                index: range.end as isize,
                len: self.len(),
            });
        }

        match self {
            Column::Int(arr) => Ok(Column::Int(
                arr.slice(ndarray::s![range.start..range.end]).to_owned(),
            )),
            Column::Float(arr) => Ok(Column::Float(
                arr.slice(ndarray::s![range.start..range.end]).to_owned(),
            )),
            Column::Bool(arr) => Ok(Column::Bool(
                arr.slice(ndarray::s![range.start..range.end]).to_owned(),
            )),
            Column::Object(arr) => Ok(Column::Object(arr[range].to_vec())),
        }
    }

    /// Filter the column with a boolean mask
    pub fn filter(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.len() {
            return Err(DataError::DimensionMismatch {
                expected: format!("mask length {}", self.len()),
                actual: format!("mask length {}", mask.len()),
            });
        }

        let keep: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter(|(_, keep)| **keep)
            .map(|(i, _)| i)
            .collect();

        self.take(&keep)
    }

    /// Gather rows by position, in the order given
    pub fn take(&self, indices: &[usize]) -> Result<Self> {
        let len = self.len();
        if let Some(&bad) = indices.iter().find(|&&idx| idx >= len) {
            return Err(DataError::IndexOutOfBounds {
                index: bad as isize,
                len,
            });
        }

        Ok(match self {
            Column::Int(arr) => Column::Int(arr.select(Axis(0), indices)),
            Column::Float(arr) => Column::Float(arr.select(Axis(0), indices)),
            Column::Bool(arr) => Column::Bool(arr.select(Axis(0), indices)),
            Column::Object(arr) => {
                Column::Object(indices.iter().map(|&idx| arr[idx].clone()).collect())
            }
        })
    }

    /// Convert to a float array if the column is numeric
    pub fn to_float(&self) -> Result<FloatArray> {
        match self {
            Column::Float(arr) => Ok(arr.clone()),
            Column::Int(arr) => Ok(arr.mapv(|v| v as f64)),
            Column::Bool(arr) => Ok(arr.mapv(|v| if v { 1.0 } else { 0.0 })),
            Column::Object(_) => Err(DataError::NonNumericData("string")),
        }
    }
}

impl PartialEq for Column {
    /// Content equality; NaN equals NaN so copies compare equal
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Column::Int(a), Column::Int(b)) => a == b,
            (Column::Float(a), Column::Float(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b.iter())
                        .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
            }
            (Column::Bool(a), Column::Bool(b)) => a == b,
            (Column::Object(a), Column::Object(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! impl_column_from {
    ($src:ty, $variant:ident, $conv:expr) => {
        impl From<$src> for Column {
            fn from(data: $src) -> Self {
                Column::$variant($conv(data))
            }
        }
    };
}

impl_column_from!(IntArray, Int, |a| a);
impl_column_from!(FloatArray, Float, |a| a);
impl_column_from!(BoolArray, Bool, |a| a);
impl_column_from!(Vec<i64>, Int, IntArray::from);
impl_column_from!(Vec<f64>, Float, FloatArray::from);
impl_column_from!(Vec<bool>, Bool, BoolArray::from);
impl_column_from!(Vec<i32>, Int, |v: Vec<i32>| v.into_iter().map(i64::from).collect());
impl_column_from!(Vec<&str>, Object, |v: Vec<&str>| v
    .into_iter()
    .map(|s| Some(s.to_string()))
    .collect());
impl_column_from!(Vec<String>, Object, |v: Vec<String>| v
    .into_iter()
    .map(Some)
    .collect());
impl_column_from!(Vec<Option<&str>>, Object, |v: Vec<Option<&str>>| v
    .into_iter()
    .map(|s| s.map(str::to_string))
    .collect());
impl_column_from!(ObjectArray, Object, |v| v);

macro_rules! impl_column_try_from_dyn {
    ($elem:ty, $variant:ident) => {
        impl TryFrom<ArrayD<$elem>> for Column {
            type Error = DataError;

            fn try_from(arr: ArrayD<$elem>) -> Result<Self> {
                let ndim = arr.ndim();
                arr.into_dimensionality::<Ix1>()
                    .map(Column::$variant)
                    .map_err(|_| DataError::NotOneDimensional(ndim))
            }
        }
    };
}

impl_column_try_from_dyn!(i64, Int);
impl_column_try_from_dyn!(f64, Float);
impl_column_try_from_dyn!(bool, Bool);
