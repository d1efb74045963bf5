//! Reading DataFrames from delimited text
//!
//! Every column is read as text first and then given the narrowest kind
//! all of its fields fit, tried in the order int, float, bool, string.

use crate::data::{Column, DataError, DataFrame, DataFrameBuilder};

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Errors raised while reading delimited text
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

pub type Result<T> = std::result::Result<T, ReadError>;

/// CSV reader configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Whether the first record holds column names
    pub has_header: bool,
    /// Tokens read as missing, on top of the empty field
    pub null_values: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            null_values: Vec::new(),
        }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_null_value<S: Into<String>>(mut self, token: S) -> Self {
        self.null_values.push(token.into());
        self
    }
}

/// Read a comma-separated file with a header row
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    read_csv_with(path, &CsvOptions::default())
}

/// Read a delimited file
pub fn read_csv_with<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<DataFrame> {
    let path = path.as_ref();
    let df = read_csv_from(File::open(path)?, options)?;

    log::info!(
        "read {} rows x {} columns from {}",
        df.len(),
        df.ncols(),
        path.display()
    );

    Ok(df)
}

/// Read delimited text from any reader
pub fn read_csv_from<R: Read>(reader: R, options: &CsvOptions) -> Result<DataFrame> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(options.has_header)
        .delimiter(options.delimiter)
        .trim(Trim::All)
        .from_reader(reader);

    let mut names: Vec<String> = if options.has_header {
        rdr.headers()?.iter().map(String::from).collect()
    } else {
        Vec::new()
    };

    let mut fields: Vec<Vec<String>> = vec![Vec::new(); names.len()];
    for record in rdr.records() {
        let record = record?;
        if names.is_empty() && fields.is_empty() {
            names = (0..record.len()).map(|i| i.to_string()).collect();
            fields = vec![Vec::new(); record.len()];
        }
        for (column, field) in fields.iter_mut().zip(record.iter()) {
            let field = if options.null_values.iter().any(|token| token == field) {
                ""
            } else {
                field
            };
            column.push(field.to_string());
        }
    }

    let mut builder = DataFrameBuilder::with_capacity(names.len());
    for (name, column) in names.into_iter().zip(fields) {
        let column = infer_column(column);
        log::debug!("column '{}' read as {}", name, column.dtype());
        builder = builder.with_column(name, column)?;
    }

    Ok(builder.build()?)
}

fn parse_bool(field: &str) -> Option<bool> {
    match field {
        "true" | "True" => Some(true),
        "false" | "False" => Some(false),
        _ => None,
    }
}

/// Narrowest column kind every field fits
fn infer_column(fields: Vec<String>) -> Column {
    let ints: Option<Vec<i64>> = fields.iter().map(|f| f.parse::<i64>().ok()).collect();
    if let Some(ints) = ints {
        return Column::int(ints);
    }

    let floats: Option<Vec<f64>> = fields
        .iter()
        .map(|f| {
            if f.is_empty() {
                Some(f64::NAN)
            } else {
                f.parse::<f64>().ok()
            }
        })
        .collect();
    if let Some(floats) = floats {
        return Column::float(floats);
    }

    if let Some(bools) = fields.iter().map(|f| parse_bool(f)).collect::<Option<Vec<_>>>() {
        return Column::bool(bools);
    }

    Column::object(fields.into_iter().map(|f| if f.is_empty() { None } else { Some(f) }))
}
