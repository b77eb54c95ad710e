//! Account helpers

use shared::{Account, AccountRoleUpdate, ActivationCode, Attributes, NewAccount, StatusResponse, User};

use crate::error::TesterResult;
use crate::runtime::ApiClient;
use crate::testing::{ensure_eq, ensure_not_empty};

pub async fn create_account(api: &ApiClient, token: &str, name: &str) -> TesterResult<Account> {
    let account = api
        .create_account(token, &NewAccount { name: name.to_string() })
        .await?;
    ensure_eq(account.name.as_str(), name, "account name")?;
    ensure_not_empty(&account.id, "account id")?;
    Ok(account)
}

pub async fn get_account_info(api: &ApiClient, token: &str, account_id: &str) -> TesterResult<Account> {
    api.get_account(token, account_id).await
}

/// Replace the account attributes and check they come back unchanged
pub async fn update_account(
    api: &ApiClient,
    token: &str,
    mut account: Account,
    attributes: Attributes,
) -> TesterResult<Account> {
    account.attributes = attributes;
    let updated = api.update_account(token, &account).await?;
    ensure_eq(&updated.attributes, &account.attributes, "account attributes")?;
    Ok(updated)
}

pub async fn get_activation_code(api: &ApiClient, token: &str, account_id: &str) -> TesterResult<ActivationCode> {
    let code = api.activation_code(token, account_id).await?;
    ensure_not_empty(&code.activation_code, "activation code")?;
    Ok(code)
}

pub async fn refresh_activation_code(api: &ApiClient, token: &str, account_id: &str) -> TesterResult<ActivationCode> {
    let code = api.refresh_activation_code(token, account_id).await?;
    ensure_not_empty(&code.activation_code, "refreshed activation code")?;
    Ok(code)
}

pub async fn get_account_users(api: &ApiClient, token: &str, account_id: &str) -> TesterResult<Vec<User>> {
    api.account_users(token, account_id).await
}

/// Grant `user_id` the admin role on `account_id`
pub async fn change_account_user(
    api: &ApiClient,
    token: &str,
    account_id: &str,
    user_id: &str,
) -> TesterResult<serde_json::Value> {
    api.update_account_user(token, account_id, &AccountRoleUpdate::admin(user_id, account_id))
        .await
}

pub async fn delete_account(api: &ApiClient, token: &str, account_id: &str) -> TesterResult<StatusResponse> {
    api.delete_account(token, account_id).await
}
