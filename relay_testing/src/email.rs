use std::{
    net::{IpAddr, Ipv4Addr},
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use anyhow::Context;
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{error, info};
use url::Url;
use uuid::Uuid;

pub const SEND_ROUTE: &str = "/emails";

/// An email accepted by the testing email api.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceivedEmail {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    pub reply_to: Option<String>,
}

/// Shared list of all emails the testing email api accepted.
#[derive(Debug, Clone, Default)]
pub struct Outbox(Arc<Mutex<Vec<ReceivedEmail>>>);

impl Outbox {
    /// Removes and returns all received emails.
    pub fn take(&self) -> Vec<ReceivedEmail> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn push(&self, email: ReceivedEmail) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(email);
    }
}

/// Handle to a testing email api running in the background.
#[derive(Debug, Clone)]
pub struct TestingEmailProvider {
    pub endpoint: Url,
    pub outbox: Outbox,
}

#[derive(Clone)]
struct ProviderState {
    api_key: Arc<str>,
    outbox: Outbox,
    response_delay: Duration,
}

/// Router of the testing email api. Every accepted email is answered only
/// after `response_delay` has passed.
pub fn router(api_key: &str, outbox: Outbox, response_delay: Duration) -> Router<()> {
    Router::new()
        .route(SEND_ROUTE, routing::post(send))
        .with_state(ProviderState {
            api_key: api_key.into(),
            outbox,
            response_delay,
        })
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    api_key: String,
    response_delay: Duration,
) -> anyhow::Result<()> {
    info!("Starting email api testing server on {host}:{port}");
    info!("Send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!("Api key: {api_key:?}");

    let outbox = Outbox::default();
    let router = router(&api_key, outbox, response_delay);

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router)
        .await
        .context("Failed to start HTTP server")
}

/// Starts a testing email api on a random local port.
pub async fn spawn(api_key: &str) -> anyhow::Result<TestingEmailProvider> {
    spawn_with_delay(api_key, Duration::ZERO).await
}

/// Like [`spawn`], but accepted emails are answered after `response_delay`.
pub async fn spawn_with_delay(
    api_key: &str,
    response_delay: Duration,
) -> anyhow::Result<TestingEmailProvider> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .context("Failed to bind to a local port")?;
    let addr = listener.local_addr()?;

    let outbox = Outbox::default();
    let router = router(api_key, outbox.clone(), response_delay);
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            error!("email api testing server failed: {err}");
        }
    });

    let endpoint = format!("http://{addr}{SEND_ROUTE}")
        .parse()
        .context("Failed to build endpoint url")?;

    Ok(TestingEmailProvider { endpoint, outbox })
}

#[derive(Deserialize)]
struct SendRequest {
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: String,
    #[serde(default)]
    subject: String,
    html: Option<String>,
    text: Option<String>,
    reply_to: Option<String>,
}

#[derive(Serialize)]
struct SendResponse {
    id: Uuid,
}

#[derive(Serialize)]
struct ErrorResponse {
    message: &'static str,
}

async fn send(
    State(state): State<ProviderState>,
    headers: HeaderMap,
    Json(request): Json<SendRequest>,
) -> Response {
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|x| x.to_str().ok())
        .and_then(|x| x.strip_prefix("Bearer "))
        .is_some_and(|x| x == &*state.api_key);
    if !authorized {
        return error(StatusCode::UNAUTHORIZED, "API key is invalid");
    }

    if request.from.is_empty() || request.to.is_empty() || request.subject.is_empty() {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "Missing required field");
    }
    if request.html.is_none() && request.text.is_none() {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "Missing email body");
    }

    let id = Uuid::new_v4();
    info!(%id, to = %request.to, subject = %request.subject, "received email");
    state.outbox.push(ReceivedEmail {
        id,
        from: request.from,
        to: request.to,
        subject: request.subject,
        html: request.html,
        text: request.text,
        reply_to: request.reply_to,
    });

    tokio::time::sleep(state.response_delay).await;

    Json(SendResponse { id }).into_response()
}

fn error(status: StatusCode, message: &'static str) -> Response {
    (status, Json(ErrorResponse { message })).into_response()
}
