use navbanner_extractor::ExtractError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid page location: {0}")]
    InvalidLocation(String),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),
}

pub type Result<T> = std::result::Result<T, BannerError>;
