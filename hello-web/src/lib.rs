//! # Hello Web
//!
//! Three stateless text endpoints:
//!
//! | Route | Method | Body |
//! |---|---|---|
//! | `/` | GET | `index` |
//! | `/hello/{param}` | GET | `hello <param>` |
//! | `/hello/{user}` | POST | `hello <user>`, `user` taken from the urlencoded form |
//!
//! The routing table is an explicit [`Router`] returned by [`router`] and moved into [`serve`].
//! Echoed values are bounded by [`EchoLimits`] and always returned as `text/plain`.
pub mod fetch;

use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, Path, State, rejection::FormRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Default bound on an echoed value, in characters.
pub const DEFAULT_MAX_CHARS: usize = 10_000;

/// Largest request body accepted by the router.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Bounds on the values the endpoints echo back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoLimits {
    /// Longest accepted value, counted in Unicode scalar values.
    pub max_chars: usize,
}

impl Default for EchoLimits {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl EchoLimits {
    fn admits(&self, value: &str) -> bool {
        value.chars().count() <= self.max_chars
    }
}

/// Rejections produced by the hello endpoints themselves.
#[derive(Debug, thiserror::Error)]
pub enum EchoError {
    #[error("path segment is longer than {limit} characters")]
    PathTooLong { limit: usize },
    #[error("form field 'user' is longer than {limit} characters")]
    FieldTooLong { limit: usize },
    #[error(transparent)]
    Form(#[from] FormRejection),
}

impl IntoResponse for EchoError {
    fn into_response(self) -> Response {
        let status = match self {
            EchoError::PathTooLong { .. } => StatusCode::URI_TOO_LONG,
            EchoError::FieldTooLong { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            EchoError::Form(rejection) => {
                tracing::debug!(error = %rejection, "rejected form body");
                return rejection.into_response();
            }
        };

        tracing::debug!(%status, error = %self, "rejected echo");

        (status, self.to_string()).into_response()
    }
}

/// Form data for `POST /hello/{user}`
#[derive(Debug, Deserialize)]
struct HelloForm {
    user: Option<String>,
}

/// Builds the routing table.
pub fn router(limits: EchoLimits) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/hello/", get(hello_get_empty).post(hello_post_empty))
        .route("/hello/{param}", get(hello_get).post(hello_post))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(limits)
}

/// Serves `router` on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutting down"),
        Err(err) => {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}

async fn index() -> &'static str {
    "index"
}

async fn hello_get(
    State(limits): State<EchoLimits>,
    Path(param): Path<String>,
) -> Result<String, EchoError> {
    echo_path(&param, &limits)
}

async fn hello_get_empty() -> String {
    greeting("")
}

async fn hello_post(
    State(limits): State<EchoLimits>,
    Path(user): Path<String>,
    headers: HeaderMap,
    form: Result<Form<HelloForm>, FormRejection>,
) -> Result<String, EchoError> {
    echo_form_or_path(form, has_body(&headers), &user, &limits)
}

async fn hello_post_empty(
    State(limits): State<EchoLimits>,
    headers: HeaderMap,
    form: Result<Form<HelloForm>, FormRejection>,
) -> Result<String, EchoError> {
    echo_form_or_path(form, has_body(&headers), "", &limits)
}

// A request without a content type carries no form at all.
fn has_body(headers: &HeaderMap) -> bool {
    headers.contains_key(header::CONTENT_TYPE)
}

fn echo_path(param: &str, limits: &EchoLimits) -> Result<String, EchoError> {
    if !limits.admits(param) {
        return Err(EchoError::PathTooLong {
            limit: limits.max_chars,
        });
    }

    Ok(greeting(param))
}

/// Echoes the posted `user` field, or the path segment when nothing was posted.
///
/// A urlencoded body without a `user` field also falls back to the path. Any other rejected
/// body (wrong content type, over the body limit, undecodable) is returned as an error.
fn echo_form_or_path(
    form: Result<Form<HelloForm>, FormRejection>,
    has_body: bool,
    path: &str,
    limits: &EchoLimits,
) -> Result<String, EchoError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(FormRejection::InvalidFormContentType(_)) if !has_body => {
            return echo_path(path, limits);
        }
        Err(rejection) => return Err(rejection.into()),
    };

    match form.user {
        Some(user) if limits.admits(&user) => Ok(greeting(&user)),
        Some(_) => Err(EchoError::FieldTooLong {
            limit: limits.max_chars,
        }),
        None => echo_path(path, limits),
    }
}

fn greeting(value: &str) -> String {
    format!("hello {value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_count_characters_not_bytes() {
        let limits = EchoLimits { max_chars: 3 };

        assert!(limits.admits("äöü"));
        assert!(!limits.admits("abcd"));
        assert!(limits.admits(""));
    }

    #[test]
    fn test_echo_path_bounds() {
        let limits = EchoLimits { max_chars: 2 };

        assert_eq!(echo_path("ab", &limits).unwrap(), "hello ab");
        assert!(matches!(
            echo_path("abc", &limits),
            Err(EchoError::PathTooLong { limit: 2 })
        ));
    }

    #[test]
    fn test_form_field_wins_over_path() {
        let limits = EchoLimits::default();
        let form = Ok(Form(HelloForm {
            user: Some("alice".to_string()),
        }));

        assert_eq!(echo_form_or_path(form, true, "bob", &limits).unwrap(), "hello alice");
    }

    #[test]
    fn test_missing_form_field_falls_back_to_path() {
        let limits = EchoLimits::default();
        let form = Ok(Form(HelloForm { user: None }));

        assert_eq!(echo_form_or_path(form, true, "bob", &limits).unwrap(), "hello bob");
    }

    #[test]
    fn test_error_status_codes() {
        let path = EchoError::PathTooLong { limit: 1 }.into_response();
        let field = EchoError::FieldTooLong { limit: 1 }.into_response();

        assert_eq!(path.status(), StatusCode::URI_TOO_LONG);
        assert_eq!(field.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
