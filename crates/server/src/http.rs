//! Shared plumbing for the outbound HTTP adapters.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::sync::RemoteError;

/// Build the `reqwest` client shared by all remote adapters.
///
/// # Errors
///
/// Returns `RemoteError::Http` if the client cannot be built.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, RemoteError> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("catalog-sync/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Join a base URL and a path, then append query pairs.
///
/// # Errors
///
/// Returns `RemoteError::Parse` if the base URL is not a valid URL.
pub fn endpoint(
    system: &'static str,
    base: &str,
    path: &str,
    query: &[(&str, &str)],
) -> Result<url::Url, RemoteError> {
    let joined = format!("{}{path}", base.trim_end_matches('/'));
    let mut url = url::Url::parse(&joined).map_err(|e| RemoteError::Parse {
        system,
        message: format!("invalid URL {joined}: {e}"),
    })?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

/// Check the status and parse a JSON body.
pub async fn handle_response<T: DeserializeOwned>(
    system: &'static str,
    response: reqwest::Response,
) -> Result<T, RemoteError> {
    let status = response.status();

    if status.is_success() {
        return response.json().await.map_err(|e| RemoteError::Parse {
            system,
            message: format!("Failed to parse response: {e}"),
        });
    }

    Err(parse_error(system, response).await)
}

/// Turn a non-success response into `RemoteError::Api`.
pub async fn parse_error(system: &'static str, response: reqwest::Response) -> RemoteError {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    RemoteError::Api {
        system,
        status,
        message,
    }
}
