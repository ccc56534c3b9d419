#![allow(dead_code)]

use std::{path::Path, time::Duration};

use ytplaylist::{config::Config, management::CredentialStore, types::Token, utils};

// Helper function to create a config pointing every endpoint at a mock server
pub fn test_config(server_uri: &str, dir: &Path) -> Config {
    Config {
        client_id: "client-123".to_string(),
        client_secret: "secret-456".to_string(),
        port: 0,
        playlist_name: "gopro".to_string(),
        token_path: dir.join(".token"),
        playlist_path: dir.join(".playlist"),
        auth_url: format!("{server_uri}/o/oauth2/auth"),
        token_url: format!("{server_uri}/token"),
        api_url: format!("{server_uri}/youtube/v3"),
        scope: "https://www.googleapis.com/auth/youtube".to_string(),
        auth_timeout: Duration::from_secs(5),
        open_browser: false,
    }
}

// Helper function to create a token that is valid for another hour
pub fn fresh_token(access_token: &str) -> Token {
    Token {
        access_token: access_token.to_string(),
        refresh_token: "refresh-1".to_string(),
        expires_at: utils::now_timestamp() + 3600,
        token_type: "Bearer".to_string(),
        scope: "https://www.googleapis.com/auth/youtube".to_string(),
    }
}

pub fn expired_token(access_token: &str) -> Token {
    Token {
        expires_at: utils::now_timestamp() - 10,
        ..fresh_token(access_token)
    }
}

pub async fn store_with_token(config: &Config, token: &Token) -> CredentialStore {
    let store = CredentialStore::from_config(config);
    store.save_token(token).await.unwrap();
    store
}
