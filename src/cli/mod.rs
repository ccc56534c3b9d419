//! # CLI Module
//!
//! The entry point's state machine. ytplaylist has no subcommands: which of the
//! two flows runs is decided once, at start-up, by whether a token has been
//! persisted.
//!
//! ## Flows
//!
//! - [`auth`] - **Unauthenticated**: opens the consent page, serves exactly one
//!   callback, stores the token and exits.
//! - [`update`] - **Authenticated**: builds the authenticated client and
//!   resolves (finds, creates or reads from cache) the playlist id.
//!
//! There is no transition from the authenticated flow back to authorization
//! within one run. If the refresh token has been revoked the run fails with
//! [`crate::Error::ReauthorizationRequired`]; deleting the token file and
//! running again re-enters the authorization flow.
//!
//! ## Usage Patterns
//!
//! ```bash
//! ytplaylist            # first run: authorize in the browser
//! ytplaylist            # later runs: print the playlist id
//! rm .token && ytplaylist   # force re-authorization
//! ```

mod auth;
mod update;

use crate::{config::Config, error::Result, management::CredentialStore};

pub use auth::auth;
pub use update::update;

/// The two start-up states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Unauthenticated,
    Authenticated,
}

impl Mode {
    pub fn detect(store: &CredentialStore) -> Self {
        if store.has_token() {
            Mode::Authenticated
        } else {
            Mode::Unauthenticated
        }
    }
}

pub async fn run(config: &Config) -> Result<()> {
    let store = CredentialStore::from_config(config);
    match Mode::detect(&store) {
        Mode::Unauthenticated => auth(config, store).await,
        Mode::Authenticated => update(config, store).await.map(|_| ()),
    }
}
