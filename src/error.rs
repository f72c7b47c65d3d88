use thiserror::Error;

pub type Result<T> = std::result::Result<T, XtringError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum XtringError {
    #[error("invalid pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("region {start}..{end} is out of range for text of length {len}")]
    RegionOutOfRange { start: usize, end: usize, len: usize },
    #[error("region {start}..{end} overlaps the region ending at {previous_end}")]
    OverlappingRegions {
        start: usize,
        end: usize,
        previous_end: usize,
    },
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

impl XtringError {
    pub fn invalid_pattern(pattern: &str, err: regex::Error) -> Self {
        XtringError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}
