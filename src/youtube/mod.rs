//! # YouTube Integration Module
//!
//! Everything that talks to Google: the OAuth 2.0 authorization code flow, the
//! token-injecting HTTP client and the playlist lookup built on top of it.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (entry point)
//!          ↓
//! YouTube Integration Layer
//!     ├── auth      (consent URL, code exchange, token refresh)
//!     ├── client    (bearer auth, refresh-once-and-retry)
//!     └── playlist  (find-or-create by title)
//!          ↓
//! HTTP Layer (reqwest, JSON / form bodies)
//! ```
//!
//! ## Endpoints
//!
//! All endpoint URLs come from [`crate::config::Config`]:
//!
//! - `auth_url`  - browser-navigated consent page
//! - `token_url` - `POST`, form-encoded, for code exchange and refresh
//! - `api_url`   - base of the Data API; `GET /playlists` and `POST /playlists`

pub mod auth;
pub mod client;
pub mod playlist;

pub use client::AuthenticatedClient;
