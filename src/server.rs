use std::{sync::Arc, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::{
    net::TcpListener,
    sync::{Mutex, oneshot},
};

use crate::{
    api,
    config::CALLBACK_PATH,
    error::{Error, Result},
    types::Token,
    warning,
    youtube::auth::AuthorizationRequest,
};

enum CallbackPhase {
    Awaiting {
        request: AuthorizationRequest,
        done: oneshot::Sender<Result<Token>>,
    },
    Completed,
}

/// Shared state of the single-shot callback listener.
///
/// Starts out awaiting a callback; the first request to the callback route
/// takes the pending authorization and moves it to completed. Later requests
/// find nothing to take.
pub struct CallbackState {
    phase: Mutex<CallbackPhase>,
}

impl CallbackState {
    pub fn new(request: AuthorizationRequest, done: oneshot::Sender<Result<Token>>) -> Self {
        Self {
            phase: Mutex::new(CallbackPhase::Awaiting { request, done }),
        }
    }

    /// Transitions to completed, yielding the pending authorization once.
    pub async fn take(&self) -> Option<(AuthorizationRequest, oneshot::Sender<Result<Token>>)> {
        let mut phase = self.phase.lock().await;
        match std::mem::replace(&mut *phase, CallbackPhase::Completed) {
            CallbackPhase::Awaiting { request, done } => Some((request, done)),
            CallbackPhase::Completed => None,
        }
    }
}

/// Serves the callback route on `listener` until one request has been
/// handled or `timeout` elapses, then shuts the listener down.
///
/// The outcome of that one request (token or error) is returned, even when
/// its token exchange completes after the deadline. A timeout with no
/// callback received yields [`Error::AuthorizationTimeout`].
pub async fn serve_callback(
    listener: TcpListener,
    request: AuthorizationRequest,
    timeout: Duration,
) -> Result<Token> {
    let (done_tx, mut done_rx) = oneshot::channel();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let state = Arc::new(CallbackState::new(request, done_tx));
    let app = Router::new()
        .route(CALLBACK_PATH, get(api::callback))
        .layer(Extension(state));

    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    let outcome = tokio::time::timeout(timeout, &mut done_rx).await;

    // in-flight response is flushed before the listener closes
    let _ = shutdown_tx.send(());
    match server.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(e.into()),
        Err(e) => warning!("Callback listener task failed: {}", e),
    }

    match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Err(Error::Io(std::io::Error::other(
            "callback listener stopped before a request was handled",
        ))),
        // a callback accepted before the deadline finishes during shutdown
        Err(_) => match done_rx.try_recv() {
            Ok(result) => result,
            Err(_) => Err(Error::AuthorizationTimeout(timeout.as_secs())),
        },
    }
}
