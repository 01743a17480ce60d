use thiserror::Error;

pub type BloomResult<T> = std::result::Result<T, BloomError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BloomError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(
        "Incompatible filters: bit array size {left_bits} vs {right_bits}, hash count {left_hashes} vs {right_hashes}, seeds equal: {seeds_match}"
    )]
    IncompatibleFilters {
        left_bits: usize,
        right_bits: usize,
        left_hashes: usize,
        right_hashes: usize,
        seeds_match: bool,
    },
}

impl From<crate::config::FilterConfigBuilderError> for BloomError {
    fn from(err: crate::config::FilterConfigBuilderError) -> Self {
        BloomError::InvalidParameter(err.to_string())
    }
}
