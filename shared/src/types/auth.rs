//! Authentication payloads

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub token: String,
}

/// Decoded JWT as returned by the token info endpoint
#[derive(Deserialize, Debug, Clone)]
pub struct TokenInfo {
    pub header: TokenHeader,
    pub payload: TokenPayload,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TokenHeader {
    pub typ: String,
    #[serde(default)]
    pub alg: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TokenPayload {
    /// User id of the token owner
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
