//! User management payloads

use super::Attributes;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "type", default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Serialize, Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct UserUpdate {
    pub attributes: Attributes,
}

#[derive(Serialize, Debug, Clone)]
pub struct ActivateUserRequest {
    pub token: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct EmailRequest {
    pub email: String,
}

/// Password reset with the token mailed to the user
#[derive(Serialize, Debug, Clone)]
pub struct PasswordResetRequest {
    pub token: String,
    pub password: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct PasswordChangeRequest {
    pub currentpwd: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PasswordChangeResponse {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
