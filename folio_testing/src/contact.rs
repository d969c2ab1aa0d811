use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock, task::JoinHandle};
use tracing::info;

const CONTACT_ROUTE: &str = "/api/contact";
const CONTACTS_ROUTE: &str = "/api/contacts";

pub const REJECTED_DOMAIN: &str = "rejected.test";
pub const MALFORMED_DOMAIN: &str = "malformed.test";
pub const UNAVAILABLE_DOMAIN: &str = "unavailable.test";

pub const SUCCESS_MESSAGE: &str = "Message Sent!";
pub const REJECTED_MESSAGE: &str = "Invalid email";
pub const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable";

pub async fn start_server(host: IpAddr, port: u16) -> anyhow::Result<()> {
    info!("Starting contact backend testing server on {host}:{port}");
    info!("Backend base url: http://{host}:{port}");
    info!("Contact endpoint: http://{host}:{port}{CONTACT_ROUTE}");
    info!(
        "Submissions from @{REJECTED_DOMAIN} are rejected, @{MALFORMED_DOMAIN} receive a \
         malformed response and @{UNAVAILABLE_DOMAIN} receive a 503, all other valid \
         submissions are accepted"
    );

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    axum::serve(listener, router(Default::default()))
        .await
        .context("Failed to start HTTP server")
}

/// A testing server running in the background on an ephemeral port. The
/// server is stopped when this handle is dropped.
pub struct TestingServer {
    addr: SocketAddr,
    state: Arc<StateInner>,
    handle: JoinHandle<()>,
}

impl TestingServer {
    pub async fn spawn() -> anyhow::Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .context("Failed to bind testing server")?;
        let addr = listener.local_addr()?;
        let state = Arc::new(StateInner::default());

        let router = router(Arc::clone(&state));
        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, router).await {
                tracing::error!("Testing server failed: {err}");
            }
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// All submissions that passed validation, in arrival order.
    pub async fn submissions(&self) -> Vec<ContactSubmission> {
        self.state.submissions.read().await.clone()
    }
}

impl Drop for TestingServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn router(state: Arc<StateInner>) -> Router<()> {
    Router::new()
        .route("/api/", routing::get(hello))
        .route(CONTACT_ROUTE, routing::post(submit))
        .route(CONTACTS_ROUTE, routing::get(list))
        .with_state(state)
}

type State = axum::extract::State<Arc<StateInner>>;

#[derive(Debug, Default)]
struct StateInner {
    submissions: RwLock<Vec<ContactSubmission>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Serialize)]
struct ContactResponse {
    success: bool,
    message: &'static str,
}

async fn hello() -> Response {
    Json(json!({ "message": "Hello World" })).into_response()
}

async fn submit(state: State, body: Result<Json<ContactSubmission>, JsonRejection>) -> Response {
    let submission = match body {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            return (
                rejection.status(),
                Json(json!({ "detail": rejection.body_text() })),
            )
                .into_response()
        }
    };

    let violations = validate(&submission);
    if !violations.is_empty() {
        let detail = violations
            .into_iter()
            .map(|(field, msg)| json!({ "loc": ["body", field], "msg": msg }))
            .collect::<Vec<_>>();
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": detail })),
        )
            .into_response();
    }

    let domain = submission
        .email
        .rsplit_once('@')
        .map(|(_, domain)| domain.to_owned())
        .unwrap_or_default();

    info!(email = %submission.email, subject = %submission.subject, "received contact submission");
    state.submissions.write().await.push(submission);

    match domain.as_str() {
        REJECTED_DOMAIN => Json(ContactResponse {
            success: false,
            message: REJECTED_MESSAGE,
        })
        .into_response(),
        MALFORMED_DOMAIN => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html")],
            "<html><body>Bad Gateway</body></html>",
        )
            .into_response(),
        UNAVAILABLE_DOMAIN => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ContactResponse {
                success: false,
                message: UNAVAILABLE_MESSAGE,
            }),
        )
            .into_response(),
        _ => Json(ContactResponse {
            success: true,
            message: SUCCESS_MESSAGE,
        })
        .into_response(),
    }
}

async fn list(state: State) -> Response {
    let submissions = state.submissions.read().await;
    Json(json!({ "success": true, "data": *submissions })).into_response()
}

fn validate(submission: &ContactSubmission) -> Vec<(&'static str, String)> {
    let mut violations = Vec::new();

    for (field, value, min, max) in [
        ("name", &submission.name, 2, 100),
        ("subject", &submission.subject, 5, 200),
        ("message", &submission.message, 10, 2000),
    ] {
        let len = value.chars().count();
        if !(min..=max).contains(&len) {
            violations.push((
                field,
                format!("length must be between {min} and {max} characters"),
            ));
        }
    }

    let email_ok = submission
        .email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        });
    if !email_ok {
        violations.push(("email", "value is not a valid email address".into()));
    }

    violations
}
