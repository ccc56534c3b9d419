//! Error types shared by every stage of the run.
//!
//! Nothing in this crate recovers from an error locally: each variant carries
//! enough context (the failing step, the HTTP status, the file involved) for the
//! message printed by `main` to be actionable on its own.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The callback request carried neither a `code` nor an `error` parameter.
    #[error("authorization callback did not contain a code")]
    MissingCode,

    /// The provider redirected back with an `error` parameter.
    #[error("authorization was denied by the provider: {0}")]
    AuthorizationDenied(String),

    /// The `state` echoed by the provider does not match the one we sent.
    #[error("authorization callback state does not match the request")]
    StateMismatch,

    /// No callback arrived before the configured deadline.
    #[error("no authorization callback received within {0} seconds")]
    AuthorizationTimeout(u64),

    /// The token endpoint rejected the authorization code.
    #[error("token exchange failed (status {status}): {body}")]
    TokenExchange { status: StatusCode, body: String },

    /// The token endpoint answered 2xx but the payload is unusable.
    #[error("invalid token response: {0}")]
    InvalidTokenResponse(String),

    /// An operation needed a stored token and there is none.
    #[error("not authenticated: no token found at {}; run the authorization flow first", path.display())]
    NotAuthenticated { path: PathBuf },

    /// The refresh token was rejected; the user has to authorize again.
    #[error(
        "token refresh failed (status {status}): {body}; delete {} and authorize again",
        path.display()
    )]
    ReauthorizationRequired {
        status: StatusCode,
        body: String,
        path: PathBuf,
    },

    /// A playlist list/create call returned a non-success status.
    #[error("{step} failed (status {status}): {body}")]
    RemoteApi {
        step: &'static str,
        status: StatusCode,
        body: String,
    },

    /// A persisted credential file exists but cannot be parsed.
    #[error("corrupt credential file {}: {source}; delete it and authorize again", path.display())]
    CorruptCredentials {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
