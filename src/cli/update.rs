use crate::{
    config::Config,
    error::Result,
    management::CredentialStore,
    success,
    youtube::{self, AuthenticatedClient},
};

/// Resolves the playlist id with the stored credentials.
///
/// Fails with [`crate::Error::NotAuthenticated`] before any network call when no
/// token is stored.
pub async fn update(config: &Config, store: CredentialStore) -> Result<String> {
    let mut client = AuthenticatedClient::new(config, store).await?;
    let playlist_id = youtube::playlist::resolve_playlist_id(&mut client, config).await?;
    success!("Playlist \"{}\" has id {}", config.playlist_name, playlist_id);
    Ok(playlist_id)
}
