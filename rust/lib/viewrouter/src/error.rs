use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouterError {
    /// Route table key that does not start with `/`.
    #[error("route path must start with '/': {0:?}")]
    InvalidPath(String),

    #[error("route table has no mapping for '/'")]
    MissingDefaultRoute,

    /// Only raised under [`FallbackPolicy::Strict`](crate::FallbackPolicy::Strict).
    #[error("no route for path: {0}")]
    UnknownPath(String),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid router config: {0}")]
    Config(#[from] toml::de::Error),
}
