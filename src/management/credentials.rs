use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    config::Config,
    error::{Error, Result},
    types::Token,
};

/// Flat-file storage for the OAuth token and the cached playlist id.
///
/// The token is kept as a JSON object, the playlist id as a raw string. Every
/// write replaces the previous content through a temporary file and a rename,
/// so a reader only ever sees a complete value.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    token_path: PathBuf,
    playlist_path: PathBuf,
}

impl CredentialStore {
    pub fn new(token_path: impl Into<PathBuf>, playlist_path: impl Into<PathBuf>) -> Self {
        Self {
            token_path: token_path.into(),
            playlist_path: playlist_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.token_path, &config.playlist_path)
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    pub fn playlist_path(&self) -> &Path {
        &self.playlist_path
    }

    pub fn has_token(&self) -> bool {
        self.token_path.exists()
    }

    /// Returns `Ok(None)` when no token has been stored yet.
    pub async fn load_token(&self) -> Result<Option<Token>> {
        let Some(content) = read_optional(&self.token_path).await? else {
            return Ok(None);
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| Error::CorruptCredentials {
                path: self.token_path.clone(),
                source,
            })
    }

    pub async fn save_token(&self, token: &Token) -> Result<()> {
        let json = serde_json::to_string_pretty(token)?;
        write_replace(&self.token_path, json.as_bytes(), Access::Private).await
    }

    /// Returns `Ok(None)` when the file is missing or blank.
    pub async fn load_playlist_id(&self) -> Result<Option<String>> {
        let content = read_optional(&self.playlist_path).await?;
        Ok(content
            .map(|c| c.trim().to_string())
            .filter(|id| !id.is_empty()))
    }

    pub async fn save_playlist_id(&self, playlist_id: &str) -> Result<()> {
        write_replace(&self.playlist_path, playlist_id.as_bytes(), Access::Default).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Default,
    /// Owner read/write only (0600 on Unix).
    Private,
}

async fn read_optional(path: &Path) -> Result<Option<String>> {
    match async_fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

async fn write_replace(path: &Path, contents: &[u8], access: Access) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent).await?;
    }

    let tmp = tmp_path(path);
    create_tmp(&tmp, access).await?;
    // the file already exists, so its mode is kept
    async_fs::write(&tmp, contents).await?;
    async_fs::rename(&tmp, path).await?;
    Ok(())
}

/// Creates an empty temporary file with its final permissions, before any
/// content is written to it. A leftover from an interrupted write is removed
/// first so its mode is not inherited.
async fn create_tmp(tmp: &Path, access: Access) -> Result<()> {
    match async_fs::remove_file(tmp).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut options = async_fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    if access == Access::Private {
        use async_fs::unix::OpenOptionsExt;
        options.mode(0o600);
    }
    #[cfg(not(unix))]
    let _ = access;

    options.open(tmp).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_token() -> Token {
        Token {
            access_token: "ya29.access".to_string(),
            refresh_token: "1//refresh".to_string(),
            expires_at: 1_700_000_000,
            token_type: "Bearer".to_string(),
            scope: "https://www.googleapis.com/auth/youtube".to_string(),
        }
    }

    #[tokio::test]
    async fn test_token_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join(".token"), dir.path().join(".playlist"));

        store.save_token(&sample_token()).await.unwrap();
        let loaded = store.load_token().await.unwrap();

        assert_eq!(loaded, Some(sample_token()));
    }

    #[tokio::test]
    async fn test_missing_files_are_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join(".token"), dir.path().join(".playlist"));

        assert!(!store.has_token());
        assert!(store.load_token().await.unwrap().is_none());
        assert!(store.load_playlist_id().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_token_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join(".token");
        std::fs::write(&token_path, "{\"access_token\": \"trunc").unwrap();
        let store = CredentialStore::new(&token_path, dir.path().join(".playlist"));

        let err = store.load_token().await.unwrap_err();
        assert!(matches!(err, Error::CorruptCredentials { path, .. } if path == token_path));
    }

    #[tokio::test]
    async fn test_playlist_id_is_trimmed_and_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let playlist_path = dir.path().join(".playlist");
        std::fs::write(&playlist_path, "PLold\n").unwrap();
        let store = CredentialStore::new(dir.path().join(".token"), &playlist_path);

        assert_eq!(store.load_playlist_id().await.unwrap().as_deref(), Some("PLold"));

        store.save_playlist_id("PLnew").await.unwrap();
        assert_eq!(std::fs::read_to_string(&playlist_path).unwrap(), "PLnew");
    }

    #[tokio::test]
    async fn test_blank_playlist_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let playlist_path = dir.path().join(".playlist");
        std::fs::write(&playlist_path, "  \n").unwrap();
        let store = CredentialStore::new(dir.path().join(".token"), &playlist_path);

        assert!(store.load_playlist_id().await.unwrap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join(".token"), dir.path().join(".playlist"));
        store.save_token(&sample_token()).await.unwrap();

        let mode = std::fs::metadata(store.token_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_token_tmp_file_is_private_before_content_is_written() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join(".token");
        let tmp = tmp_path(&token_path);
        // leftover from an interrupted write
        std::fs::write(&tmp, "stale").unwrap();
        std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o644)).unwrap();

        create_tmp(&tmp, Access::Private).await.unwrap();

        let metadata = std::fs::metadata(&tmp).unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
        assert_eq!(metadata.len(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_save_token_over_stale_tmp_stays_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join(".token"), dir.path().join(".playlist"));
        let tmp = tmp_path(store.token_path());
        std::fs::write(&tmp, "stale").unwrap();
        std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o644)).unwrap();

        store.save_token(&sample_token()).await.unwrap();

        assert!(!tmp.exists());
        let mode = std::fs::metadata(store.token_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load_token().await.unwrap(), Some(sample_token()));
    }
}
