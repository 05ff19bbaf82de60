use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("image decode error: {0}")]
    Format(#[from] image::ImageError),
    #[error("image has zero area ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("output of {width}x{height} px exceeds the {limit} byte allocation limit")]
    TooLarge { width: u32, height: u32, limit: u64 },
    #[error("cell bounds must be non-zero, got {width}x{height}")]
    EmptyBounds { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, DecodeError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAnnotationError {
    #[error("expected kind:offset:length[:payload], got {0:?}")]
    Shape(String),
    #[error("invalid {field}: {value:?}")]
    Number { field: &'static str, value: String },
}
