// ==================== RESOURCE CLIENT ====================
// Generic JSON accessor the presentation layer uses to reach the API.
// Transport failures surface as one fixed message; the cause is logged,
// never returned. No retries, no backoff.

use crate::models::AuthUser;
use crate::session;
use serde::{de::DeserializeOwned, Serialize};

/// Fixed message surfaced for any transport-level failure.
pub const NETWORK_ERROR: &str = "Network request failed";

pub struct ResourceClient {
    base_url: String,
    http: reqwest::Client,
    bearer: Option<String>,
}

impl ResourceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            bearer: None,
        }
    }

    /// Attaches the demo session token so mutating calls pass the policy
    /// guard.
    pub fn with_session(mut self, user: &AuthUser) -> Self {
        self.bearer = Some(session::to_bearer_token(user));
        self
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        self.send(self.request(reqwest::Method::GET, path)).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        self.send(self.request(reqwest::Method::POST, path).json(body))
            .await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        self.send(self.request(reqwest::Method::PUT, path).json(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        self.send(self.request(reqwest::Method::DELETE, path)).await
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.bearer {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<T, String> {
        let response = builder.send().await.map_err(|e| {
            log::error!("❌ Transport error: {}", e);
            NETWORK_ERROR.to_string()
        })?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the server's own error message when the body carries one
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .get("error")
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            return Err(message);
        }

        response.json::<T>().await.map_err(|e| {
            log::error!("❌ Unreadable response body: {}", e);
            NETWORK_ERROR.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ResourceClient::new("http://localhost:3001/");
        assert_eq!(client.base_url, "http://localhost:3001");
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_fixed_message() {
        // Nothing listens on port 9; the cause stays in the logs
        let client = ResourceClient::new("http://127.0.0.1:9");
        let err = client
            .get::<serde_json::Value>("/api/team")
            .await
            .unwrap_err();
        assert_eq!(err, NETWORK_ERROR);
    }

    #[test]
    fn test_with_session_attaches_token() {
        let user = AuthUser {
            id: "1".to_string(),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            role: None,
        };
        let client = ResourceClient::new("http://localhost:3001").with_session(&user);
        let token = client.bearer.expect("token attached");
        assert_eq!(session::parse_bearer_token(&token), Some(user));
    }
}
