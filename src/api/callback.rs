use std::sync::Arc;

use axum::{Extension, extract::Query, http::StatusCode};

use crate::{server::CallbackState, types::CallbackParams, warning, youtube::auth};

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<Arc<CallbackState>>,
) -> (StatusCode, String) {
    let Some((request, done)) = state.take().await else {
        return (
            StatusCode::GONE,
            "Authorization already completed. Close your web browser.".to_string(),
        );
    };

    let result = auth::handle_callback(&request, params).await;
    let reply = match &result {
        Ok(_) => (
            StatusCode::OK,
            "Auth complete. Close your web browser.".to_string(),
        ),
        Err(e) => {
            warning!("Authorization callback failed: {}", e);
            (
                StatusCode::BAD_REQUEST,
                format!("Authorization failed: {e}. Close your web browser."),
            )
        }
    };

    // receiver is gone only if the listener future was dropped
    let _ = done.send(result);
    reply
}
