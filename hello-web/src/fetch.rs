//! One-shot HTTP client for the hello endpoints.
use reqwest::StatusCode;

/// Default URL fetched by the `hello-fetch` binary.
pub const DEFAULT_URL: &str = "http://127.0.0.1:5000/hello/world";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request to '{url}' failed: '{source}'")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("'{url}' answered with status {status}")]
    Status { url: String, status: StatusCode },
}

/// Sends `GET url` and returns the response body as text.
///
/// Any non-success status is an error; the request is sent once.
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let transport = |source| FetchError::Transport {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(transport)?;

    let status = response.status();
    tracing::debug!(url, %status, "received response");

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(transport)
}
