use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;

use crate::{
    config::Config,
    error::{Error, Result},
    info,
    management::CredentialStore,
    success,
    types::Token,
    utils,
    youtube::auth,
};

/// HTTP client that attaches the stored access token to every request.
///
/// Each call is allowed at most one token refresh. The refresh happens either
/// before sending, when the token is already (nearly) expired, or after the
/// provider answered `401 Unauthorized`, in which case the request is sent
/// exactly once more with the new token. Every refreshed token is written to
/// the [`CredentialStore`] before it is used.
pub struct AuthenticatedClient {
    http: Client,
    config: Config,
    store: CredentialStore,
    token: Token,
}

impl AuthenticatedClient {
    /// Loads the stored token and builds a client around it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthenticated`] when no token has been stored. No
    /// network request is made in that case.
    pub async fn new(config: &Config, store: CredentialStore) -> Result<Self> {
        Self::with_http(config, store, Client::new()).await
    }

    pub async fn with_http(config: &Config, store: CredentialStore, http: Client) -> Result<Self> {
        let token = store
            .load_token()
            .await?
            .ok_or_else(|| Error::NotAuthenticated {
                path: store.token_path().to_path_buf(),
            })?;

        Ok(Self {
            http,
            config: config.clone(),
            store,
            token,
        })
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Sends the request produced by `build`, refreshing the token once if
    /// needed.
    ///
    /// `build` may be invoked twice: once for the initial attempt and once for
    /// the retry after a refresh. The final response is returned whatever its
    /// status; interpreting it is up to the caller.
    ///
    /// # Errors
    ///
    /// - [`Error::ReauthorizationRequired`] if the token endpoint rejects the
    ///   refresh token; the original request is not retried
    /// - [`Error::Http`] for transport failures
    pub async fn send<F>(&mut self, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut refreshed = false;
        if self.token.is_expired_at(utils::now_timestamp()) {
            info!("Access token expired, refreshing");
            self.refresh().await?;
            refreshed = true;
        }

        let response = self.authorized(&build).send().await?;
        if response.status() != StatusCode::UNAUTHORIZED || refreshed {
            return Ok(response);
        }

        info!("Access token rejected, refreshing and retrying");
        self.refresh().await?;
        Ok(self.authorized(&build).send().await?)
    }

    pub async fn get<Q>(&mut self, url: &str, query: &Q) -> Result<Response>
    where
        Q: Serialize + ?Sized,
    {
        self.send(|http| http.get(url).query(query)).await
    }

    pub async fn post_json<Q, B>(&mut self, url: &str, query: &Q, body: &B) -> Result<Response>
    where
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        self.send(|http| http.post(url).query(query).json(body)).await
    }

    fn authorized<F>(&self, build: &F) -> RequestBuilder
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        build(&self.http).bearer_auth(&self.token.access_token)
    }

    async fn refresh(&mut self) -> Result<()> {
        let token = auth::refresh_token(&self.http, &self.config, &self.token).await?;
        self.store.save_token(&token).await?;
        self.token = token;
        success!("Access token refreshed");
        Ok(())
    }
}
