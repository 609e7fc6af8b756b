use serde::{Deserialize, Serialize};

/// The demo principal. Persisted client-side as the session record and
/// carried as the bearer token on mutating API calls. A parseable record
/// means "logged in"; nothing here is verified server-side.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
