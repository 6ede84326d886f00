//! Error types for ganudenu-imaging.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Caller supplied nothing to work with
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Decoding or encoding failure
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
