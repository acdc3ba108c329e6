//! Source adapter error types

use bhavcopy_core::TableError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed table: {0}")]
    Table(#[from] TableError),

    #[error("Archive contains no files")]
    EmptyArchive,
}

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing published for the date
    NotFound,
    Transport,
    Decode,
}

impl SourceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Status { status: 404, .. } | Self::EmptyArchive => ErrorKind::NotFound,
            Self::Http(_) | Self::Status { .. } | Self::Url(_) | Self::InvalidHeader(_) => {
                ErrorKind::Transport
            }
            Self::Zip(_) | Self::Csv(_) | Self::Io(_) | Self::Table(_) => ErrorKind::Decode,
        }
    }
}
