//! Crate-wide error type.
//!
//! Startup failures (enumeration, event-source setup, bad config) are fatal;
//! everything that can go wrong after startup is reported and survived by the
//! caller instead of surfacing here.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The platform device-enumeration primitive itself failed. Zero devices
    /// found is not an error.
    #[error("device enumeration failed: {0}")]
    Enumeration(String),

    /// Raw-input registration or message-queue creation failed at startup.
    #[error("event source setup failed: {0}")]
    EventSource(String),

    /// Friendly-name lookup failed for one device. Recoverable: the caller
    /// logs it and keeps an empty display name.
    #[error("display name lookup failed: {0}")]
    NameResolution(String),

    #[error("cannot read config file {path}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
