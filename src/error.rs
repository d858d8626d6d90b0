// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Per-folder loading problems never surface here: the loader contains them
//! and reports them through [`crate::gallery::loader::LoadError`] and the log.
//! This type covers failures the application itself has to react to.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Thumbnail Error: {0}")]
    Thumbnail(String),

    #[error("Playback Error: {0}")]
    Playback(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn playback_error_formats_properly() {
        let err = Error::Playback("no audio stream".into());
        assert_eq!(format!("{}", err), "Playback Error: no audio stream");
    }

    #[test]
    fn invalid_toml_converts_to_config_error() {
        let parse = toml::from_str::<toml::Table>("not = [valid");
        let err: Error = parse.expect_err("should fail").into();
        assert!(matches!(err, Error::Config(_)));
    }
}
