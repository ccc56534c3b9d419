use reqwest::{Client, Response, Url};

use crate::{
    config::Config,
    error::{Error, Result},
    info,
    management::CredentialStore,
    server, success,
    types::{CallbackParams, Token, TokenResponse},
    utils, warning,
};

/// Everything the callback needs to finish one authorization attempt.
///
/// Created by [`AuthorizationRequest::new`] before the browser is opened and
/// handed to the callback listener, which consumes it on the first request.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
    pub code_verifier: String,
    pub config: Config,
    pub store: CredentialStore,
    pub http: Client,
}

impl AuthorizationRequest {
    /// Generates PKCE material and a CSRF `state`, and builds the consent URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the configured authorization
    /// endpoint is not a valid URL.
    pub fn new(config: &Config, store: CredentialStore, http: Client) -> Result<Self> {
        let code_verifier = utils::generate_code_verifier();
        let code_challenge = utils::generate_code_challenge(&code_verifier);
        let state = utils::generate_state();
        let url = authorization_url(config, &code_challenge, &state)?;

        Ok(Self {
            url,
            state,
            code_verifier,
            config: config.clone(),
            store,
            http,
        })
    }
}

/// Builds the provider consent URL.
///
/// Besides the mandatory `client_id`, `redirect_uri`, `scope` and
/// `response_type=code`, it requests `access_type=offline` (so a refresh token
/// is issued), forces the consent screen, and attaches the PKCE challenge and
/// the CSRF state.
pub fn authorization_url(config: &Config, code_challenge: &str, state: &str) -> Result<String> {
    let redirect_uri = config.redirect_uri();
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("scope", config.scope.as_str()),
            ("response_type", "code"),
            ("access_type", "offline"),
            ("prompt", "consent"),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("state", state),
        ],
    )
    .map_err(|e| Error::Configuration(format!("invalid authorization url: {e}")))?;

    Ok(url.to_string())
}

/// Runs the complete authorization flow.
///
/// 1. Binds the callback listener on the loopback interface so the redirect cannot
///    race the server start.
/// 2. Prints the consent URL and opens it in the default browser.
/// 3. Serves exactly one callback request, which exchanges the code and
///    persists the token.
/// 4. Shuts the listener down and returns the token.
///
/// # Errors
///
/// Any failure aborts the flow: binding the port, the callback itself
/// ([`Error::MissingCode`], [`Error::StateMismatch`],
/// [`Error::AuthorizationDenied`], [`Error::TokenExchange`]) or the deadline
/// ([`Error::AuthorizationTimeout`]).
pub async fn begin_authorization(config: &Config, store: CredentialStore) -> Result<Token> {
    let request = AuthorizationRequest::new(config, store, Client::new())?;

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", config.port)).await?;

    info!("Authorize access to your YouTube account:\n{}", request.url);
    if config.open_browser && webbrowser::open(&request.url).is_err() {
        warning!("Failed to open browser. Please navigate to the URL above manually.");
    }
    info!(
        "Waiting up to {}s for the callback on {}",
        config.auth_timeout.as_secs(),
        config.redirect_uri()
    );

    let timeout = config.auth_timeout;
    server::serve_callback(listener, request, timeout).await
}

/// Processes the one expected redirect: validates it, exchanges the code and
/// persists the resulting token.
pub async fn handle_callback(
    request: &AuthorizationRequest,
    params: CallbackParams,
) -> Result<Token> {
    if let Some(error) = params.error {
        return Err(Error::AuthorizationDenied(error));
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or(Error::MissingCode)?;

    if params.state.as_deref() != Some(request.state.as_str()) {
        return Err(Error::StateMismatch);
    }

    info!("Authorization code received, exchanging it for a token");
    let token = exchange_code(
        &request.http,
        &request.config,
        &code,
        &request.code_verifier,
    )
    .await?;

    request.store.save_token(&token).await?;
    success!("Token saved to {}", request.store.token_path().display());

    Ok(token)
}

/// Exchanges an authorization code for a token.
///
/// The provider's relative `expires_in` is turned into an absolute
/// `expires_at` using the time the response was received.
///
/// # Errors
///
/// - [`Error::TokenExchange`] for a non-2xx answer from the token endpoint
/// - [`Error::InvalidTokenResponse`] if the body is not a usable token
pub async fn exchange_code(
    http: &Client,
    config: &Config,
    code: &str,
    code_verifier: &str,
) -> Result<Token> {
    let redirect_uri = config.redirect_uri();
    let response = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
            ("code_verifier", code_verifier),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::TokenExchange { status, body });
    }

    let payload = parse_token_response(response).await?;
    let captured_at = utils::now_timestamp();

    let refresh_token = payload.refresh_token.ok_or_else(|| {
        Error::InvalidTokenResponse("token response did not include a refresh_token".to_string())
    })?;

    Ok(Token {
        access_token: payload.access_token,
        refresh_token,
        expires_at: utils::expires_at(captured_at, payload.expires_in),
        token_type: payload.token_type.unwrap_or_else(|| "Bearer".to_string()),
        scope: payload.scope.unwrap_or_else(|| config.scope.clone()),
    })
}

/// Obtains a new access token with the stored refresh token.
///
/// The provider normally omits `refresh_token` (and sometimes `scope`) in a
/// refresh response; the current values are carried over in that case.
///
/// # Errors
///
/// A non-2xx answer means the refresh token is no longer usable and yields
/// [`Error::ReauthorizationRequired`].
pub async fn refresh_token(http: &Client, config: &Config, current: &Token) -> Result<Token> {
    let response = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", current.refresh_token.as_str()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::ReauthorizationRequired {
            status,
            body,
            path: config.token_path.clone(),
        });
    }

    let payload = parse_token_response(response).await?;
    let captured_at = utils::now_timestamp();

    Ok(Token {
        access_token: payload.access_token,
        refresh_token: payload
            .refresh_token
            .unwrap_or_else(|| current.refresh_token.clone()),
        expires_at: utils::expires_at(captured_at, payload.expires_in),
        token_type: payload.token_type.unwrap_or_else(|| "Bearer".to_string()),
        scope: payload.scope.unwrap_or_else(|| current.scope.clone()),
    })
}

async fn parse_token_response(response: Response) -> Result<TokenResponse> {
    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| Error::InvalidTokenResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn test_config() -> Config {
        Config {
            client_id: "client-123".to_string(),
            client_secret: "secret".to_string(),
            port: 8000,
            playlist_name: "gopro".to_string(),
            token_path: ".token".into(),
            playlist_path: ".playlist".into(),
            auth_url: crate::config::DEFAULT_AUTH_URL.to_string(),
            token_url: crate::config::DEFAULT_TOKEN_URL.to_string(),
            api_url: crate::config::DEFAULT_API_URL.to_string(),
            scope: crate::config::DEFAULT_SCOPE.to_string(),
            auth_timeout: Duration::from_secs(300),
            open_browser: false,
        }
    }

    #[test]
    fn test_authorization_url_contains_required_parameters() {
        let url = authorization_url(&test_config(), "challenge", "xyz").unwrap();
        let parsed = Url::parse(&url).unwrap();
        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert_eq!(get("client_id"), Some("client-123"));
        assert_eq!(get("redirect_uri"), Some("http://localhost:8000/oauth/callback"));
        assert_eq!(get("scope"), Some("https://www.googleapis.com/auth/youtube"));
        assert_eq!(get("response_type"), Some("code"));
        assert_eq!(get("access_type"), Some("offline"));
        assert_eq!(get("code_challenge"), Some("challenge"));
        assert_eq!(get("code_challenge_method"), Some("S256"));
        assert_eq!(get("state"), Some("xyz"));
    }

    #[test]
    fn test_invalid_authorization_endpoint_is_configuration_error() {
        let mut config = test_config();
        config.auth_url = "not a url".to_string();
        let err = authorization_url(&config, "c", "s").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
