use serde::{Deserialize, Serialize};

/// Persisted OAuth credential.
///
/// `expires_at` is an absolute Unix timestamp in seconds. The relative
/// `expires_in` the provider sends is converted on capture and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub token_type: String,
    pub scope: String,
}

/// Seconds before `expires_at` at which a token is already treated as expired.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

impl Token {
    pub fn is_expired_at(&self, now: i64) -> bool {
        now + EXPIRY_MARGIN_SECS >= self.expires_at
    }
}

/// Body of a successful response from the provider's token endpoint.
///
/// Refresh responses usually omit `refresh_token` and sometimes `scope`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Query string of the redirect sent to `/oauth/callback`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSnippet {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub snippet: PlaylistSnippet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistListResponse {
    #[serde(default)]
    pub items: Vec<Playlist>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Request body for creating a playlist.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlaylist {
    pub kind: &'static str,
    pub snippet: PlaylistSnippet,
}

impl NewPlaylist {
    pub fn titled(title: &str) -> Self {
        Self {
            kind: "youtube#playlist",
            snippet: PlaylistSnippet {
                title: title.to_string(),
            },
        }
    }
}

/// Response of the create call; only the id is used.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPlaylist {
    pub id: String,
}
