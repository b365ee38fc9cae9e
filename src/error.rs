use std::path::PathBuf;

use thiserror::Error;

use crate::render::ImageKey;

/// Why an inbound datagram was dropped
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("unknown object kind code {0}")]
    UnknownKind(i64),

    #[error("{kind} message is missing field `{field}`")]
    MissingField { kind: &'static str, field: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A required image could not be loaded. Fatal at startup.
#[derive(Debug, Error)]
#[error("failed to load {key:?} from {path}: {source}")]
pub struct AssetError {
    pub key: ImageKey,
    pub path: String,
    #[source]
    pub source: macroquad::Error,
}

#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("failed to bind UDP socket on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to configure UDP socket: {0}")]
    Configure(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_asset_error_keeps_source() {
        let err = AssetError {
            key: ImageKey::Caves,
            path: "assets/caves.jpg".to_string(),
            source: macroquad::Error::UnknownError("no such file"),
        };
        assert!(err.to_string().contains("assets/caves.jpg"));
        let source = err.source().map(|e| e.to_string());
        assert!(source.is_some_and(|s| s.contains("no such file")));
    }
}
