use crate::{config::Config, error::Result, management::CredentialStore, success, youtube};

pub async fn auth(config: &Config, store: CredentialStore) -> Result<()> {
    youtube::auth::begin_authorization(config, store).await?;
    success!("Authentication successful! Run again to resolve the playlist.");
    Ok(())
}
