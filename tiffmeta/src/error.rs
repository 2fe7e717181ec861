use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TiffError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("Directory error: {0}")]
    Directory(String),

    #[error("Unsupported image layout: {0}")]
    Mode(String),

    #[error("Cannot identify image file '{0}'")]
    Unidentified(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("ICC profile: {0}")]
    Profile(String),

    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TiffError>;
