//! # API Module
//!
//! HTTP endpoints served by the local listener during the authorization flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the provider's redirect on `GET /oauth/callback`,
//!   exchanges the authorization code for a token and persists it. The
//!   listener answers exactly one such request and then shuts down.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use ytplaylist::api::callback;
//!
//! let app = Router::new()
//!     .route("/oauth/callback", get(callback))
//!     .layer(Extension(state));
//! ```

mod callback;

pub use callback::callback;
