//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover invalid run configuration and degenerate or inverted geometry.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_message_is_prefixed() {
        let err = Error::InvalidConfig("cell size is zero".into());
        assert_eq!(err.to_string(), "invalid configuration: cell size is zero");
    }

    #[test]
    fn geometry_error_message_is_prefixed() {
        let err = Error::InvalidGeometry("care area #2 is inverted".into());
        assert_eq!(err.to_string(), "invalid geometry: care area #2 is inverted");
    }
}
