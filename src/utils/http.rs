use once_cell::sync::Lazy;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::api::ApiError;
use crate::models::{ApiResponse, ErrorBody};
use crate::utils::config::ApiConfig;

pub const API_KEY_HEADER: &str = "X-Noroff-API-Key";

pub static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .pool_max_idle_per_host(8)
        .tcp_keepalive(Duration::from_secs(60))
        .timeout(Duration::from_secs(30)) // 30 second timeout for API requests
        .build()
        .expect("failed to build reqwest client")
});

pub fn client() -> &'static Client {
    &CLIENT
}

/// Request against the API with the vendor key and, when present, the bearer token
pub fn request(config: &ApiConfig, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
    let url = config.url(path);
    log::debug!("[HTTP] {} {}", method, url);

    let builder = client()
        .request(method, url)
        .header(API_KEY_HEADER, &config.api_key);

    match token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Send and decode the `{ data, meta }` envelope
pub async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<ApiResponse<T>, ApiError> {
    let response = check_status(builder.send().await?).await?;
    let bytes = response.bytes().await?;
    log::debug!("[HTTP] Decoding {} byte response", bytes.len());
    Ok(serde_json::from_slice(&bytes)?)
}

/// Send a request whose success response has no body (204 on delete)
pub async fn send_empty(builder: RequestBuilder) -> Result<(), ApiError> {
    check_status(builder.send().await?).await.map(|_| ())
}

/// Turn non-2xx responses into `ApiError::Status` carrying the server's message
pub async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status.as_u16(), &body);
    log::warn!("[HTTP] API error {}: {}", status, message);

    Err(ApiError::Status { status: status.as_u16(), message })
}

pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.first_message().map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_body() {
        let body = r#"{"errors":[{"message":"Profile already exists"}],"statusCode":400}"#;
        assert_eq!(error_message(400, body), "Profile already exists");
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(error_message(502, "<html>Bad gateway</html>"), "Request failed with status 502");
        assert_eq!(error_message(500, r#"{"errors":[]}"#), "Request failed with status 500");
    }
}
