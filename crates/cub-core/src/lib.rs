//! CubFrame: a small columnar DataFrame
//!
//! Tables hold named, equally long columns of integers, floats, booleans or
//! nullable strings. Operations return new tables; only `set` and
//! `set_columns` modify a table in place.
//!
//! ```
//! use cub_core::prelude::*;
//!
//! let df = DataFrame::from_columns(vec![
//!     ("a", Column::int(vec![1, 2, 3])),
//!     ("b", Column::float(vec![4.0, 5.0, 6.0])),
//! ])
//! .unwrap();
//!
//! let mask = df.get("a").unwrap().gt(1).unwrap();
//! assert_eq!(df.filter(&mask).unwrap().len(), 2);
//! ```

pub mod data;
pub mod error;
pub mod io;

pub use error::{CubError, Result};

pub mod prelude {
    pub use crate::data::{
        Arrange, BinaryOp, Column, ColumnKind, DataError, DataFrame, DataFrameBuilder,
        DisplayOptions, ErrorKind, Frames, PivotAgg, Reduction, SampleSize, Selector, Slice,
        Transform, Value,
    };
    pub use crate::io::{read_csv, read_csv_with, CsvOptions};
}
