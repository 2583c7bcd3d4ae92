use crate::model::Rejected;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),
    #[error("Invalid dimension: {width}x{height}")]
    InvalidDimension { width: f64, height: f64 },
    #[error("{} picture(s) too large for the page, even when rotated", rejected.len())]
    DoesNotFit { rejected: Vec<Rejected> },
}

pub type Result<T> = std::result::Result<T, PackError>;
