use crate::data::DataError;
use crate::io::ReadError;

/// Any error the crate can raise
#[derive(thiserror::Error, Debug)]
pub enum CubError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Read error: {0}")]
    Read(#[from] ReadError),
}

impl CubError {
    /// The data error underneath, wherever it was raised
    pub fn data_error(&self) -> Option<&DataError> {
        match self {
            CubError::Data(err) | CubError::Read(ReadError::Data(err)) => Some(err),
            CubError::Read(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CubError>;
