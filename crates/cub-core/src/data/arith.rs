//! Elementwise arithmetic and comparison operators
//!
//! The right-hand side is either a scalar, broadcast to every row, or a
//! DataFrame of the same shape whose columns line up by position.

use super::*;

use ndarray::Zip;

/// Binary operators applied cell by cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Pow,
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
}

impl BinaryOp {
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::FloorDiv => "floordiv",
            BinaryOp::Pow => "pow",
            BinaryOp::Gt => "gt",
            BinaryOp::Lt => "lt",
            BinaryOp::Ge => "ge",
            BinaryOp::Le => "le",
            BinaryOp::Eq => "eq",
            BinaryOp::Ne => "ne",
        }
    }

    /// Whether the operator yields booleans
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Gt | BinaryOp::Lt | BinaryOp::Ge | BinaryOp::Le | BinaryOp::Eq | BinaryOp::Ne
        )
    }
}

/// Right-hand side of an operator
#[derive(Debug, Clone)]
pub enum Operand<'a> {
    Scalar(Value),
    Frame(&'a DataFrame),
}

impl<'a> From<&'a DataFrame> for Operand<'a> {
    fn from(frame: &'a DataFrame) -> Self {
        Operand::Frame(frame)
    }
}

macro_rules! impl_operand_from_scalar {
    ($($src:ty),*) => {
        $(
            impl From<$src> for Operand<'_> {
                fn from(value: $src) -> Self {
                    Operand::Scalar(value.into())
                }
            }
        )*
    };
}

impl_operand_from_scalar!(Value, i64, i32, f64, bool, &str, String);

/// A scalar repeated `n` times; null becomes an all-null Object column
fn broadcast(value: &Value, n: usize) -> Result<Column> {
    match value {
        Value::Null => Ok(Column::Object(vec![None; n])),
        other => Column::repeat(other, n),
    }
}

fn compare<T: PartialOrd>(op: BinaryOp, a: &T, b: &T) -> bool {
    match op {
        BinaryOp::Gt => a > b,
        BinaryOp::Lt => a < b,
        BinaryOp::Ge => a >= b,
        BinaryOp::Le => a <= b,
        BinaryOp::Eq => a == b,
        _ => a != b,
    }
}

/// Integer floor division; dividing by zero gives zero
fn floor_div(x: i64, y: i64) -> i64 {
    if y == 0 {
        return 0;
    }
    let q = x.wrapping_div(y);
    if x.wrapping_rem(y) != 0 && ((x < 0) != (y < 0)) {
        q - 1
    } else {
        q
    }
}

fn int_op(op: BinaryOp, a: &IntArray, b: &IntArray) -> Result<Column> {
    if op.is_comparison() {
        return Ok(Column::Bool(
            Zip::from(a).and(b).map_collect(|x, y| compare(op, x, y)),
        ));
    }

    let out = match op {
        BinaryOp::Add => Zip::from(a).and(b).map_collect(|&x, &y| x.wrapping_add(y)),
        BinaryOp::Sub => Zip::from(a).and(b).map_collect(|&x, &y| x.wrapping_sub(y)),
        BinaryOp::Mul => Zip::from(a).and(b).map_collect(|&x, &y| x.wrapping_mul(y)),
        BinaryOp::FloorDiv => Zip::from(a).and(b).map_collect(|&x, &y| floor_div(x, y)),
        BinaryOp::Pow => {
            if b.iter().any(|&y| y < 0) {
                return Err(DataError::InvalidParameter(
                    "integers to negative integer powers are not allowed".to_string(),
                ));
            }
            Zip::from(a).and(b).map_collect(|&x, &y| {
                x.wrapping_pow(u32::try_from(y).unwrap_or(u32::MAX))
            })
        }
        _ => return float_op(op, &a.mapv(|v| v as f64), &b.mapv(|v| v as f64)),
    };

    Ok(Column::Int(out))
}

fn float_op(op: BinaryOp, a: &FloatArray, b: &FloatArray) -> Result<Column> {
    if op.is_comparison() {
        return Ok(Column::Bool(
            Zip::from(a).and(b).map_collect(|x, y| compare(op, x, y)),
        ));
    }

    let out = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::FloorDiv => Zip::from(a).and(b).map_collect(|&x, &y| (x / y).floor()),
        _ => Zip::from(a).and(b).map_collect(|&x, &y| x.powf(y)),
    };

    Ok(Column::Float(out))
}

fn object_op(op: BinaryOp, a: &ObjectArray, b: &ObjectArray) -> Result<Column> {
    let null_operand = || DataError::Unsupported {
        operation: op.name(),
        dtype: "null",
    };

    match op {
        BinaryOp::Eq => Ok(Column::bool(
            a.iter().zip(b).map(|(x, y)| x == y).collect::<Vec<_>>(),
        )),
        BinaryOp::Ne => Ok(Column::bool(
            a.iter().zip(b).map(|(x, y)| x != y).collect::<Vec<_>>(),
        )),
        BinaryOp::Gt | BinaryOp::Lt | BinaryOp::Ge | BinaryOp::Le => {
            let mut out = Vec::with_capacity(a.len());
            for (x, y) in a.iter().zip(b) {
                match (x, y) {
                    (Some(x), Some(y)) => out.push(compare(op, x, y)),
                    _ => return Err(null_operand()),
                }
            }
            Ok(Column::bool(out))
        }
        BinaryOp::Add => {
            let mut out = Vec::with_capacity(a.len());
            for (x, y) in a.iter().zip(b) {
                match (x, y) {
                    (Some(x), Some(y)) => out.push(Some(format!("{}{}", x, y))),
                    _ => return Err(null_operand()),
                }
            }
            Ok(Column::Object(out))
        }
        _ => Err(DataError::Unsupported {
            operation: op.name(),
            dtype: "string",
        }),
    }
}

/// Apply `op` to two columns of equal length
fn binary(op: BinaryOp, left: &Column, right: &Column) -> Result<Column> {
    match (left, right) {
        (Column::Object(a), Column::Object(b)) => object_op(op, a, b),
        (Column::Object(_), _) | (_, Column::Object(_)) => match op {
            BinaryOp::Eq => Ok(Column::Bool(BoolArray::from_elem(left.len(), false))),
            BinaryOp::Ne => Ok(Column::Bool(BoolArray::from_elem(left.len(), true))),
            _ => Err(DataError::TypeMismatch {
                expected: "matching string operands",
                actual: if left.kind().is_object() {
                    right.dtype()
                } else {
                    left.dtype()
                },
            }),
        },
        (Column::Float(_), _) | (_, Column::Float(_)) => {
            float_op(op, &left.to_float()?, &right.to_float()?)
        }
        (Column::Bool(a), Column::Bool(b)) if op.is_comparison() => Ok(Column::Bool(
            Zip::from(a).and(b).map_collect(|x, y| compare(op, x, y)),
        )),
        _ => int_op(op, &as_int(left)?, &as_int(right)?),
    }
}

/// Integers as-is, booleans as 0 and 1
fn as_int(column: &Column) -> Result<IntArray> {
    match column {
        Column::Int(arr) => Ok(arr.clone()),
        Column::Bool(arr) => Ok(arr.mapv(i64::from)),
        other => Err(DataError::TypeMismatch {
            expected: "int or bool",
            actual: other.dtype(),
        }),
    }
}

impl DataFrame {
    /// Apply `op` with `self` on the left
    ///
    /// A DataFrame operand must have the same shape; its columns pair up
    /// with ours by position and the result keeps our column names.
    pub fn oper<'a>(&self, op: BinaryOp, other: impl Into<Operand<'a>>) -> Result<DataFrame> {
        match other.into() {
            Operand::Scalar(value) => {
                self.map_columns(|column| binary(op, column, &broadcast(&value, column.len())?))
            }
            Operand::Frame(frame) => {
                if frame.shape() != self.shape() {
                    return Err(DataError::DimensionMismatch {
                        expected: format!("shape {:?}", self.shape()),
                        actual: format!("shape {:?}", frame.shape()),
                    });
                }

                let mut builder = DataFrameBuilder::with_capacity(self.ncols());
                for ((name, left), right) in self.columns.iter().zip(frame.columns.values()) {
                    builder = builder.with_column(name.clone(), binary(op, left, right)?)?;
                }

                builder.build()
            }
        }
    }

    /// Apply `op` with the scalar on the left and `self` on the right
    pub fn roper(&self, op: BinaryOp, scalar: impl Into<Value>) -> Result<DataFrame> {
        let scalar = scalar.into();
        self.map_columns(|column| binary(op, &broadcast(&scalar, column.len())?, column))
    }

    pub fn add<'a>(&self, other: impl Into<Operand<'a>>) -> Result<DataFrame> {
        self.oper(BinaryOp::Add, other)
    }

    pub fn sub<'a>(&self, other: impl Into<Operand<'a>>) -> Result<DataFrame> {
        self.oper(BinaryOp::Sub, other)
    }

    pub fn mul<'a>(&self, other: impl Into<Operand<'a>>) -> Result<DataFrame> {
        self.oper(BinaryOp::Mul, other)
    }

    pub fn div<'a>(&self, other: impl Into<Operand<'a>>) -> Result<DataFrame> {
        self.oper(BinaryOp::Div, other)
    }

    pub fn floordiv<'a>(&self, other: impl Into<Operand<'a>>) -> Result<DataFrame> {
        self.oper(BinaryOp::FloorDiv, other)
    }

    pub fn pow<'a>(&self, other: impl Into<Operand<'a>>) -> Result<DataFrame> {
        self.oper(BinaryOp::Pow, other)
    }

    pub fn gt<'a>(&self, other: impl Into<Operand<'a>>) -> Result<DataFrame> {
        self.oper(BinaryOp::Gt, other)
    }

    pub fn lt<'a>(&self, other: impl Into<Operand<'a>>) -> Result<DataFrame> {
        self.oper(BinaryOp::Lt, other)
    }

    pub fn ge<'a>(&self, other: impl Into<Operand<'a>>) -> Result<DataFrame> {
        self.oper(BinaryOp::Ge, other)
    }

    pub fn le<'a>(&self, other: impl Into<Operand<'a>>) -> Result<DataFrame> {
        self.oper(BinaryOp::Le, other)
    }

    /// Elementwise equality; see `PartialEq` for whole-frame equality
    pub fn eq<'a>(&self, other: impl Into<Operand<'a>>) -> Result<DataFrame> {
        self.oper(BinaryOp::Eq, other)
    }

    pub fn ne<'a>(&self, other: impl Into<Operand<'a>>) -> Result<DataFrame> {
        self.oper(BinaryOp::Ne, other)
    }

    pub fn radd(&self, scalar: impl Into<Value>) -> Result<DataFrame> {
        self.roper(BinaryOp::Add, scalar)
    }

    pub fn rsub(&self, scalar: impl Into<Value>) -> Result<DataFrame> {
        self.roper(BinaryOp::Sub, scalar)
    }

    pub fn rmul(&self, scalar: impl Into<Value>) -> Result<DataFrame> {
        self.roper(BinaryOp::Mul, scalar)
    }

    pub fn rdiv(&self, scalar: impl Into<Value>) -> Result<DataFrame> {
        self.roper(BinaryOp::Div, scalar)
    }

    pub fn rfloordiv(&self, scalar: impl Into<Value>) -> Result<DataFrame> {
        self.roper(BinaryOp::FloorDiv, scalar)
    }

    pub fn rpow(&self, scalar: impl Into<Value>) -> Result<DataFrame> {
        self.roper(BinaryOp::Pow, scalar)
    }
}
