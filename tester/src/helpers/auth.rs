//! Authentication helpers

use shared::{TokenInfo, User};

use crate::error::TesterResult;
use crate::runtime::ApiClient;
use crate::testing::{ensure_eq, ensure_not_empty, ensure_some};

/// Log in and return the user token
pub async fn login(api: &ApiClient, username: &str, password: &str) -> TesterResult<String> {
    let response = api.login(username, password).await?;
    ensure_not_empty(&response.token, "user token")?;
    Ok(response.token)
}

/// Decode the token; returns it together with the user id it belongs to
pub async fn token_info(api: &ApiClient, token: &str) -> TesterResult<(TokenInfo, String)> {
    let info = api.token_info(token).await?;
    ensure_eq(info.header.typ.as_str(), "JWT", "token type")?;
    let user_id = ensure_some(info.payload.sub.clone(), "token subject")?;
    Ok((info, user_id))
}

pub async fn user_info(api: &ApiClient, token: &str) -> TesterResult<User> {
    api.me(token).await
}
