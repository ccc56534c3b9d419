//! YouTube Playlist Resolver Library
//!
//! This library authorizes a user against Google's OAuth 2.0 provider, keeps the
//! resulting credential on disk (refreshing it when it expires) and uses it to
//! find or create a named playlist through the YouTube Data API.
//!
//! # Modules
//!
//! - `api` - HTTP endpoint for the local OAuth callback
//! - `cli` - Entry point flows (authorize or resolve)
//! - `config` - Configuration parsing and `.env` loading
//! - `error` - Error taxonomy shared by all modules
//! - `management` - Credential store for the token and the playlist id
//! - `server` - Single-shot local HTTP listener for the OAuth callback
//! - `types` - Data structures and wire formats
//! - `utils` - PKCE and clock helpers
//! - `youtube` - OAuth flow, authenticated client and playlist resolver
//!
//! # Example
//!
//! ```
//! use ytplaylist::{cli, config::Config};
//!
//! async fn run(config: Config) -> ytplaylist::Result<()> {
//!     cli::run(&config).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod types;
pub mod utils;
pub mod youtube;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Waiting for the authorization callback...");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Token saved to {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark to stderr and exits
/// the program with status 1.
///
/// Only the binary's `main` uses this; library code returns
/// [`Error`] values instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark to stderr.
///
/// # Example
///
/// ```
/// warning!("Failed to open browser. Please navigate to the URL above manually.");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
