use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    #[error("Include depth limit of {0} exceeded")]
    DepthExceeded(usize),
}

pub type Result<T> = std::result::Result<T, ApiError>;
