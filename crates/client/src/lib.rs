//! Blocking HTTP transport to the SP21 game engine.

mod http;

pub use http::{route, HttpEngine};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid engine URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid engine URL scheme: {0} (expected http or https)")]
    InvalidScheme(String),
    #[error("http client setup failed: {0}")]
    Build(#[from] reqwest::Error),
}
