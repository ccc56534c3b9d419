use reqwest::Response;

use crate::{
    config::Config,
    error::{Error, Result},
    info, success,
    types::{CreatedPlaylist, NewPlaylist, Playlist, PlaylistListResponse},
    warning,
    youtube::client::AuthenticatedClient,
};

/// Page size requested from the list endpoint (the provider maximum).
pub const LIST_PAGE_SIZE: &str = "50";

/// Returns the id of the configured playlist, creating it if necessary.
///
/// A cached id is returned without any remote call and without validation,
/// so a playlist deleted out-of-band is not detected here. Otherwise the
/// user's playlists are listed once; if none is titled exactly
/// `config.playlist_name`, one is created. The resolved id is cached before it
/// is returned.
///
/// # Arguments
///
/// * `client` - Authenticated client whose credential store holds the cache
/// * `config` - Provides the playlist title and the API base URL
///
/// # Remote Calls
///
/// At most one list call and at most one create call per invocation.
///
/// # Errors
///
/// Returns [`Error::RemoteApi`] for any non-success answer from the list or
/// create endpoint.
pub async fn resolve_playlist_id(
    client: &mut AuthenticatedClient,
    config: &Config,
) -> Result<String> {
    if let Some(playlist_id) = client.store().load_playlist_id().await? {
        info!("Using cached playlist id {}", playlist_id);
        return Ok(playlist_id);
    }

    let listing = list_playlists(client, config).await?;
    let playlist_id = match find_playlist(&listing.items, &config.playlist_name) {
        Some(id) => {
            info!("Found playlist \"{}\" ({})", config.playlist_name, id);
            id.to_string()
        }
        None => {
            if listing.next_page_token.is_some() {
                warning!(
                    "Playlist \"{}\" not found on the first page of results; it may exist on a later page",
                    config.playlist_name
                );
            }
            let created = create_playlist(client, config).await?;
            success!("Created playlist \"{}\" ({})", config.playlist_name, created.id);
            created.id
        }
    };

    client.store().save_playlist_id(&playlist_id).await?;
    info!("Cached playlist id in {}", client.store().playlist_path().display());
    Ok(playlist_id)
}

/// Picks the playlist titled exactly `name`.
///
/// When several playlists share the title, the last one in response order
/// wins.
pub fn find_playlist<'a>(playlists: &'a [Playlist], name: &str) -> Option<&'a str> {
    playlists
        .iter()
        .rev()
        .find(|p| p.snippet.title == name)
        .map(|p| p.id.as_str())
}

/// Lists the authenticated user's playlists (first page only).
pub async fn list_playlists(
    client: &mut AuthenticatedClient,
    config: &Config,
) -> Result<PlaylistListResponse> {
    let url = config.api_endpoint("playlists");
    let response = client
        .get(
            &url,
            &[
                ("part", "snippet,id"),
                ("mine", "true"),
                ("maxResults", LIST_PAGE_SIZE),
            ],
        )
        .await?;

    Ok(ensure_success(response, "listing playlists").await?.json().await?)
}

pub async fn create_playlist(
    client: &mut AuthenticatedClient,
    config: &Config,
) -> Result<CreatedPlaylist> {
    let url = config.api_endpoint("playlists");
    let body = NewPlaylist::titled(&config.playlist_name);
    let response = client.post_json(&url, &[("part", "snippet")], &body).await?;

    Ok(ensure_success(response, "creating playlist").await?.json().await?)
}

async fn ensure_success(response: Response, step: &'static str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::RemoteApi { step, status, body })
}
