//! Core data structures for CubFrame
//!
//! This module provides the column store and everything that reads from it:
//! selection, aggregation, elementwise transforms, operators, reshaping,
//! string methods and presentation.

mod aggregate;
mod arith;
mod builder;
mod column;
mod dataframe;
mod display;
mod kind;
mod ops;
mod pivot;
mod select;
mod strings;
mod transform;
mod value;

#[cfg(test)]
mod tests;

// Re-exports
pub use aggregate::{Frames, Reduction};
pub use arith::{BinaryOp, Operand};
pub use builder::DataFrameBuilder;
pub use column::Column;
pub use dataframe::{DataFrame, SampleSize, MAX_SAMPLE_ROWS};
pub use display::DisplayOptions;
pub use kind::ColumnKind;
pub use ops::Arrange;
pub use pivot::PivotAgg;
pub use select::{Assign, ColSelector, RowSelector, Selector, Slice};
pub use strings::StringMethods;
pub use transform::Transform;
pub use value::Value;

// Type aliases for column storage
pub type IntArray = ndarray::Array1<i64>;
pub type FloatArray = ndarray::Array1<f64>;
pub type BoolArray = ndarray::Array1<bool>;
pub type ObjectArray = Vec<Option<String>>;

/// The two classes every data error falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong argument type or shape
    Type,
    /// Wrong cardinality, duplicate names, mismatched lengths
    Value,
}

/// Error types specific to data operations
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Index out of bounds: index {index}, length {len}")]
    IndexOutOfBounds { index: isize, len: usize },

    #[error("Invalid column type: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Column names must be non-empty")]
    EmptyColumnName,

    #[error("Operation requires numeric data, got {0}")]
    NonNumericData(&'static str),

    #[error("Columns must be 1-d arrays, got {0} dimensions")]
    NotOneDimensional(usize),

    #[error("Operation '{operation}' is not supported for {dtype} data")]
    Unsupported {
        operation: &'static str,
        dtype: &'static str,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl DataError {
    /// Which of the two error classes this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::TypeMismatch { .. }
            | DataError::NonNumericData(_)
            | DataError::NotOneDimensional(_)
            | DataError::Unsupported { .. } => ErrorKind::Type,
            DataError::DimensionMismatch { .. }
            | DataError::ColumnNotFound(_)
            | DataError::IndexOutOfBounds { .. }
            | DataError::DuplicateColumn(_)
            | DataError::EmptyColumnName
            | DataError::InvalidParameter(_) => ErrorKind::Value,
        }
    }
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
