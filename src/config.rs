//! Configuration management for ytplaylist.
//!
//! Configuration is read exactly once, in `main`. Values come from command line
//! flags or, when a flag is absent, from environment variables (which may in
//! turn be populated from a `.env` file by [`load_env`]). The parsed
//! [`ConfigArgs`] are validated into an immutable [`Config`] that is passed by
//! reference to every component; nothing else in the crate looks at the process
//! environment.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command line flags (highest priority)
//! 2. Environment variables
//! 3. `.env` in the working directory, then `ytplaylist/.env` in the local data directory
//! 4. Application defaults (where applicable)

use std::{path::PathBuf, time::Duration};

use clap::Args;

use crate::error::{Error, Result};

pub const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.google.com/o/oauth2/token";
pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/youtube";

/// Path of the callback route served during authorization.
pub const CALLBACK_PATH: &str = "/oauth/callback";

/// Loads environment variables from `.env` files.
///
/// The working directory is consulted first, then `ytplaylist/.env` inside the
/// platform-specific local data directory:
/// - Linux: `~/.local/share/ytplaylist/.env`
/// - macOS: `~/Library/Application Support/ytplaylist/.env`
/// - Windows: `%LOCALAPPDATA%/ytplaylist/.env`
///
/// Variables that are already set are never overridden, and missing files are
/// not an error.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> std::result::Result<(), String> {
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(e.to_string());
        }
    }

    let path = data_env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn data_env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("ytplaylist/.env");
    path
}

/// Raw configuration as accepted on the command line or via the environment.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Local port for the OAuth callback listener
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Title of the playlist to find or create
    #[arg(long, env = "PLAYLIST_NAME", default_value = "gopro")]
    pub playlist_name: String,

    /// File holding the persisted OAuth token
    #[arg(long, env = "TOKEN_FILENAME", default_value = ".token")]
    pub token_file: PathBuf,

    /// File holding the cached playlist id
    #[arg(long, env = "PLAYLIST_FILENAME", default_value = ".playlist")]
    pub playlist_file: PathBuf,

    /// OAuth client id
    #[arg(long, env = "YOUTUBE_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, env = "YOUTUBE_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Provider authorization endpoint
    #[arg(long, env = "YOUTUBE_AUTH_URL", default_value = DEFAULT_AUTH_URL)]
    pub auth_url: String,

    /// Provider token endpoint
    #[arg(long, env = "YOUTUBE_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
    pub token_url: String,

    /// Base URL of the YouTube Data API
    #[arg(long, env = "YOUTUBE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// OAuth scope requested during authorization
    #[arg(long, env = "YOUTUBE_SCOPE", default_value = DEFAULT_SCOPE)]
    pub scope: String,

    /// Seconds to wait for the authorization callback
    #[arg(long, env = "AUTH_TIMEOUT_SECS", default_value_t = 300)]
    pub auth_timeout: u64,

    /// Print the authorization URL instead of opening a browser
    #[arg(long)]
    pub no_browser: bool,
}

/// Validated, immutable configuration for one process run.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub port: u16,
    pub playlist_name: String,
    pub token_path: PathBuf,
    pub playlist_path: PathBuf,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub scope: String,
    pub auth_timeout: Duration,
    pub open_browser: bool,
}

impl Config {
    /// Redirect URI registered with the provider for this port.
    pub fn redirect_uri(&self) -> String {
        format!("http://localhost:{}{}", self.port, CALLBACK_PATH)
    }

    /// Joins `path` onto the API base URL.
    pub fn api_endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }
}

fn required(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(Error::Configuration(format!(
            "{name} must be set (flag or environment variable)"
        ))),
    }
}

impl TryFrom<ConfigArgs> for Config {
    type Error = Error;

    fn try_from(args: ConfigArgs) -> Result<Self> {
        let client_id = required(args.client_id, "YOUTUBE_CLIENT_ID")?;
        let client_secret = required(args.client_secret, "YOUTUBE_CLIENT_SECRET")?;

        if args.playlist_name.is_empty() {
            return Err(Error::Configuration(
                "PLAYLIST_NAME must not be empty".to_string(),
            ));
        }
        if args.auth_timeout == 0 {
            return Err(Error::Configuration(
                "AUTH_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Config {
            client_id,
            client_secret,
            port: args.port,
            playlist_name: args.playlist_name,
            token_path: args.token_file,
            playlist_path: args.playlist_file,
            auth_url: args.auth_url,
            token_url: args.token_url,
            api_url: args.api_url,
            scope: args.scope,
            auth_timeout: Duration::from_secs(args.auth_timeout),
            open_browser: !args.no_browser,
        })
    }
}
