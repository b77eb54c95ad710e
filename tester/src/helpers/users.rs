//! User lifecycle helpers

use shared::{
    ActivateUserRequest, Attributes, EmailRequest, NewUser, PasswordChangeRequest, PasswordChangeResponse,
    PasswordResetRequest, StatusResponse, User, UserUpdate,
};

use crate::error::TesterResult;
use crate::runtime::ApiClient;
use crate::testing::{ensure, ensure_eq, ensure_not_empty, ensure_some};

pub async fn get_user_info(api: &ApiClient, token: &str, user_id: &str) -> TesterResult<User> {
    let user = api.get_user(token, user_id).await?;
    ensure_not_empty(&user.id, "user id")?;
    Ok(user)
}

pub async fn update_user_info(
    api: &ApiClient,
    token: &str,
    user_id: &str,
    attributes: Attributes,
) -> TesterResult<StatusResponse> {
    let response = api.update_user(token, user_id, &UserUpdate { attributes }).await?;
    ensure(response.is_ok(), format!("update user status {}", response.status))?;
    Ok(response)
}

/// Create a user; the backend mails an activation link to `email`
pub async fn add_user(api: &ApiClient, token: &str, email: &str, password: &str) -> TesterResult<User> {
    ensure_not_empty(email, "receiver email")?;
    ensure_not_empty(password, "receiver password")?;

    let user = api
        .add_user(
            token,
            &NewUser {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await?;
    ensure_eq(user.user_type.as_deref(), Some("user"), "new user type")?;
    ensure_not_empty(&user.id, "new user id")?;
    Ok(user)
}

pub async fn activate_user(api: &ApiClient, activation_token: &str) -> TesterResult<serde_json::Value> {
    ensure_not_empty(activation_token, "activation token")?;
    api.activate_user(&ActivateUserRequest {
        token: activation_token.to_string(),
    })
    .await
}

/// Ask for a password reset mail
pub async fn request_password_change(api: &ApiClient, email: &str) -> TesterResult<StatusResponse> {
    let response = api
        .request_password_reset(&EmailRequest {
            email: email.to_string(),
        })
        .await?;
    ensure(response.is_ok(), format!("password reset request status {}", response.status))?;
    Ok(response)
}

/// Set a new password using the token from the reset mail
pub async fn update_password(api: &ApiClient, mail_token: &str, password: &str) -> TesterResult<serde_json::Value> {
    api.reset_password(&PasswordResetRequest {
        token: mail_token.to_string(),
        password: password.to_string(),
    })
    .await
}

pub async fn change_password(
    api: &ApiClient,
    token: &str,
    username: &str,
    current_password: &str,
    new_password: &str,
) -> TesterResult<PasswordChangeResponse> {
    let response = api
        .change_password(
            token,
            username,
            &PasswordChangeRequest {
                currentpwd: current_password.to_string(),
                password: new_password.to_string(),
            },
        )
        .await?;
    let echoed = ensure_some(response.password.as_deref(), "changed password")?;
    ensure_eq(echoed, new_password, "changed password")?;
    Ok(response)
}

pub async fn request_user_activation(api: &ApiClient, email: &str) -> TesterResult<serde_json::Value> {
    api.request_user_activation(&EmailRequest {
        email: email.to_string(),
    })
    .await
}

pub async fn delete_user(api: &ApiClient, token: &str, user_id: &str) -> TesterResult<StatusResponse> {
    api.delete_user(token, user_id).await
}
