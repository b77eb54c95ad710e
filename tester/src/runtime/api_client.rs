//! REST API Client for the platform
//!
//! Thin typed wrapper over the platform's `/v1/api` endpoints. Each method is
//! a single round trip: no retries, no caching. Non-2xx responses become
//! [`TesterError::Api`] carrying the status and body.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::error::{TesterError, TesterResult};
use shared::{
    Account, AccountRoleUpdate, ActivateUserRequest, ActivationCode, Actuation, ActuationRequest,
    AdvancedSearchRequest, Alert, AlertComment, CatalogEntry, ComplexCommandRequest, Component,
    Device, DeviceActivation, DeviceActivationRequest, DeviceUpdate, DraftRuleRequest, EmailRequest,
    LoginRequest, NewAccount, NewComponent, NewDevice, NewUser, PasswordChangeRequest,
    PasswordChangeResponse, PasswordResetRequest, Rule, RuleRequest, RuleStatusUpdate,
    SearchDataRequest, SearchDataResponse, StatusResponse, SubmitDataRequest, TokenInfo,
    TokenResponse, User, UserUpdate,
};

/// REST API client for communicating with the platform
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client for an API root such as `http://host/v1/api`
    pub fn new(api_url: &str, timeout: Duration) -> TesterResult<Self> {
        let base_url = if api_url.starts_with("http") {
            api_url.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", api_url.trim_end_matches('/'))
        };
        url::Url::parse(&base_url).map_err(|e| TesterError::Config {
            message: format!("invalid API url {api_url}: {e}"),
        })?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    fn authed(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.request(method, path).bearer_auth(token)
    }

    /// Send and decode a JSON body; an empty body decodes as JSON `null`
    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> TesterResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!("❌ {} -> HTTP {}: {}", operation, status, body);
            return Err(TesterError::Api {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }

    /// Send a call whose success may come back without a body
    async fn send_ack(&self, operation: &str, request: RequestBuilder) -> TesterResult<StatusResponse> {
        let value: serde_json::Value = self.send_json(operation, request).await?;
        Ok(serde_json::from_value(value).unwrap_or_else(|_| StatusResponse::ok()))
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        token: &str,
        body: &B,
    ) -> TesterResult<T> {
        let request = self.authed(Method::POST, path, token).json(body);
        self.send_json(operation, request).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        token: &str,
        body: &B,
    ) -> TesterResult<T> {
        let request = self.authed(Method::PUT, path, token).json(body);
        self.send_json(operation, request).await
    }

    async fn get<T: DeserializeOwned>(&self, operation: &str, path: &str, token: &str) -> TesterResult<T> {
        let request = self.authed(Method::GET, path, token);
        self.send_json(operation, request).await
    }

    // ---- auth -------------------------------------------------------------

    pub async fn login(&self, username: &str, password: &str) -> TesterResult<TokenResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = self.request(Method::POST, "/auth/token").json(&body);
        self.send_json("auth.login", request).await
    }

    pub async fn token_info(&self, token: &str) -> TesterResult<TokenInfo> {
        self.get("auth.tokenInfo", "/auth/tokenInfo", token).await
    }

    pub async fn me(&self, token: &str) -> TesterResult<User> {
        self.get("auth.me", "/auth/me", token).await
    }

    // ---- users ------------------------------------------------------------

    pub async fn get_user(&self, token: &str, user_id: &str) -> TesterResult<User> {
        self.get("users.get", &format!("/users/{user_id}"), token).await
    }

    pub async fn update_user(&self, token: &str, user_id: &str, update: &UserUpdate) -> TesterResult<StatusResponse> {
        self.put("users.update", &format!("/users/{user_id}"), token, update).await
    }

    pub async fn add_user(&self, token: &str, user: &NewUser) -> TesterResult<User> {
        self.post("users.add", "/users", token, user).await
    }

    pub async fn activate_user(&self, activation: &ActivateUserRequest) -> TesterResult<serde_json::Value> {
        let request = self.request(Method::POST, "/users/activate").json(activation);
        self.send_json("users.activate", request).await
    }

    pub async fn request_password_reset(&self, email: &EmailRequest) -> TesterResult<StatusResponse> {
        let request = self.request(Method::POST, "/users/forgot_password").json(email);
        self.send_ack("users.forgotPassword", request).await
    }

    pub async fn reset_password(&self, reset: &PasswordResetRequest) -> TesterResult<serde_json::Value> {
        let request = self.request(Method::PUT, "/users/forgot_password").json(reset);
        self.send_json("users.resetPassword", request).await
    }

    pub async fn change_password(
        &self,
        token: &str,
        username: &str,
        change: &PasswordChangeRequest,
    ) -> TesterResult<PasswordChangeResponse> {
        let path = format!("/users/{username}/change_password");
        let response: Option<PasswordChangeResponse> = self.put("users.changePassword", &path, token, change).await?;
        Ok(response.unwrap_or_default())
    }

    pub async fn request_user_activation(&self, email: &EmailRequest) -> TesterResult<serde_json::Value> {
        let request = self.request(Method::POST, "/users/request_user_activation").json(email);
        self.send_json("users.requestActivation", request).await
    }

    pub async fn delete_user(&self, token: &str, user_id: &str) -> TesterResult<StatusResponse> {
        let request = self.authed(Method::DELETE, &format!("/users/{user_id}"), token);
        self.send_ack("users.delete", request).await
    }

    // ---- accounts ---------------------------------------------------------

    pub async fn create_account(&self, token: &str, account: &NewAccount) -> TesterResult<Account> {
        self.post("accounts.create", "/accounts", token, account).await
    }

    pub async fn get_account(&self, token: &str, account_id: &str) -> TesterResult<Account> {
        self.get("accounts.get", &format!("/accounts/{account_id}"), token).await
    }

    pub async fn update_account(&self, token: &str, account: &Account) -> TesterResult<Account> {
        let path = format!("/accounts/{}", account.id);
        self.put("accounts.update", &path, token, account).await
    }

    pub async fn activation_code(&self, token: &str, account_id: &str) -> TesterResult<ActivationCode> {
        let path = format!("/accounts/{account_id}/activationcode");
        self.get("accounts.activationCode", &path, token).await
    }

    pub async fn refresh_activation_code(&self, token: &str, account_id: &str) -> TesterResult<ActivationCode> {
        let path = format!("/accounts/{account_id}/activationcode/refresh");
        let request = self.authed(Method::PUT, &path, token);
        self.send_json("accounts.refreshActivationCode", request).await
    }

    pub async fn account_users(&self, token: &str, account_id: &str) -> TesterResult<Vec<User>> {
        self.get("accounts.users", &format!("/accounts/{account_id}/users"), token).await
    }

    pub async fn update_account_user(
        &self,
        token: &str,
        account_id: &str,
        update: &AccountRoleUpdate,
    ) -> TesterResult<serde_json::Value> {
        let path = format!("/accounts/{account_id}/users/{}", update.id);
        self.put("accounts.updateUser", &path, token, update).await
    }

    pub async fn delete_account(&self, token: &str, account_id: &str) -> TesterResult<StatusResponse> {
        let request = self.authed(Method::DELETE, &format!("/accounts/{account_id}"), token);
        self.send_ack("accounts.delete", request).await
    }

    // ---- devices ----------------------------------------------------------

    pub async fn create_device(&self, token: &str, account_id: &str, device: &NewDevice) -> TesterResult<Device> {
        let path = format!("/accounts/{account_id}/devices");
        self.post("devices.create", &path, token, device).await
    }

    pub async fn list_devices(&self, token: &str, account_id: &str) -> TesterResult<Vec<Device>> {
        self.get("devices.list", &format!("/accounts/{account_id}/devices"), token).await
    }

    pub async fn get_device(&self, token: &str, account_id: &str, device_id: &str) -> TesterResult<Device> {
        let path = format!("/accounts/{account_id}/devices/{device_id}");
        self.get("devices.get", &path, token).await
    }

    pub async fn update_device(
        &self,
        token: &str,
        account_id: &str,
        device_id: &str,
        update: &DeviceUpdate,
    ) -> TesterResult<Device> {
        let path = format!("/accounts/{account_id}/devices/{device_id}");
        self.put("devices.update", &path, token, update).await
    }

    pub async fn device_tags(&self, token: &str, account_id: &str) -> TesterResult<Vec<String>> {
        self.get("devices.tags", &format!("/accounts/{account_id}/devices/tags"), token).await
    }

    pub async fn device_attributes(&self, token: &str, account_id: &str) -> TesterResult<serde_json::Value> {
        let path = format!("/accounts/{account_id}/devices/attributes");
        self.get("devices.attributes", &path, token).await
    }

    pub async fn count_devices(
        &self,
        token: &str,
        account_id: &str,
        filter: &serde_json::Value,
    ) -> TesterResult<serde_json::Value> {
        let path = format!("/accounts/{account_id}/devices/count");
        self.post("devices.count", &path, token, filter).await
    }

    pub async fn search_devices(
        &self,
        token: &str,
        account_id: &str,
        filter: &serde_json::Value,
    ) -> TesterResult<Vec<Device>> {
        let path = format!("/accounts/{account_id}/devices/search");
        self.post("devices.search", &path, token, filter).await
    }

    pub async fn activate_device(
        &self,
        token: &str,
        account_id: &str,
        device_id: &str,
        activation: &DeviceActivationRequest,
    ) -> TesterResult<DeviceActivation> {
        let path = format!("/accounts/{account_id}/devices/{device_id}/activation");
        self.put("devices.activate", &path, token, activation).await
    }

    pub async fn add_component(
        &self,
        token: &str,
        account_id: &str,
        device_id: &str,
        component: &NewComponent,
    ) -> TesterResult<Component> {
        let path = format!("/accounts/{account_id}/devices/{device_id}/components");
        self.post("devices.addComponent", &path, token, component).await
    }

    pub async fn delete_component(
        &self,
        token: &str,
        account_id: &str,
        device_id: &str,
        component_id: &str,
    ) -> TesterResult<StatusResponse> {
        let path = format!("/accounts/{account_id}/devices/{device_id}/components/{component_id}");
        let request = self.authed(Method::DELETE, &path, token);
        self.send_ack("devices.deleteComponent", request).await
    }

    pub async fn delete_device(&self, token: &str, account_id: &str, device_id: &str) -> TesterResult<StatusResponse> {
        let path = format!("/accounts/{account_id}/devices/{device_id}");
        let request = self.authed(Method::DELETE, &path, token);
        self.send_ack("devices.delete", request).await
    }

    // ---- data -------------------------------------------------------------

    /// Submit observations with the device token
    pub async fn submit_data(
        &self,
        device_token: &str,
        device_id: &str,
        data: &SubmitDataRequest,
    ) -> TesterResult<StatusResponse> {
        let request = self
            .authed(Method::POST, &format!("/data/{device_id}"), device_token)
            .json(data);
        self.send_ack("data.submit", request).await
    }

    pub async fn search_data(
        &self,
        token: &str,
        account_id: &str,
        search: &SearchDataRequest,
    ) -> TesterResult<SearchDataResponse> {
        let path = format!("/accounts/{account_id}/data/search");
        let response: Option<SearchDataResponse> = self.post("data.search", &path, token, search).await?;
        Ok(response.unwrap_or_default())
    }

    pub async fn search_data_advanced(
        &self,
        token: &str,
        account_id: &str,
        search: &AdvancedSearchRequest,
    ) -> TesterResult<serde_json::Value> {
        let path = format!("/accounts/{account_id}/data/search/advanced");
        self.post("data.searchAdvanced", &path, token, search).await
    }

    // ---- control ----------------------------------------------------------

    pub async fn save_complex_command(
        &self,
        token: &str,
        account_id: &str,
        name: &str,
        command: &ComplexCommandRequest,
    ) -> TesterResult<StatusResponse> {
        let path = format!("/accounts/{account_id}/control/commands/{name}");
        let request = self.authed(Method::POST, &path, token).json(command);
        self.send_ack("control.saveComplexCommand", request).await
    }

    pub async fn send_actuation(
        &self,
        token: &str,
        account_id: &str,
        actuation: &ActuationRequest,
    ) -> TesterResult<StatusResponse> {
        let path = format!("/accounts/{account_id}/control");
        let request = self.authed(Method::POST, &path, token).json(actuation);
        self.send_ack("control.sendActuation", request).await
    }

    pub async fn pull_actuations(
        &self,
        token: &str,
        account_id: &str,
        device_id: &str,
        from: i64,
    ) -> TesterResult<Vec<Actuation>> {
        let path = format!("/accounts/{account_id}/control/devices/{device_id}");
        let request = self
            .authed(Method::GET, &path, token)
            .query(&[("from", from.to_string())]);
        self.send_json("control.pullActuations", request).await
    }

    // ---- component catalog ------------------------------------------------

    pub async fn list_catalog(&self, token: &str, account_id: &str) -> TesterResult<Vec<CatalogEntry>> {
        let path = format!("/accounts/{account_id}/cmpcatalog");
        let request = self.authed(Method::GET, &path, token).query(&[("full", "true")]);
        self.send_json("cmpcatalog.list", request).await
    }

    pub async fn create_catalog(&self, token: &str, account_id: &str, entry: &CatalogEntry) -> TesterResult<CatalogEntry> {
        let path = format!("/accounts/{account_id}/cmpcatalog");
        self.post("cmpcatalog.create", &path, token, entry).await
    }

    // ---- rules ------------------------------------------------------------

    pub async fn create_rule(&self, token: &str, account_id: &str, rule: &RuleRequest) -> TesterResult<Rule> {
        self.post("rules.create", &format!("/accounts/{account_id}/rules"), token, rule).await
    }

    pub async fn list_rules(&self, token: &str, account_id: &str) -> TesterResult<Vec<Rule>> {
        self.get("rules.list", &format!("/accounts/{account_id}/rules"), token).await
    }

    pub async fn get_rule(&self, token: &str, account_id: &str, rule_id: &str) -> TesterResult<Rule> {
        let path = format!("/accounts/{account_id}/rules/{rule_id}");
        self.get("rules.get", &path, token).await
    }

    pub async fn update_rule(&self, token: &str, account_id: &str, rule_id: &str, rule: &RuleRequest) -> TesterResult<Rule> {
        let path = format!("/accounts/{account_id}/rules/{rule_id}");
        self.put("rules.update", &path, token, rule).await
    }

    pub async fn update_rule_status(
        &self,
        token: &str,
        account_id: &str,
        rule_id: &str,
        status: &RuleStatusUpdate,
    ) -> TesterResult<Rule> {
        let path = format!("/accounts/{account_id}/rules/{rule_id}/status");
        self.put("rules.updateStatus", &path, token, status).await
    }

    pub async fn clone_rule(&self, token: &str, account_id: &str, rule_id: &str) -> TesterResult<Rule> {
        let path = format!("/accounts/{account_id}/rules/clone/{rule_id}");
        let request = self.authed(Method::POST, &path, token);
        self.send_json("rules.clone", request).await
    }

    pub async fn create_draft_rule(&self, token: &str, account_id: &str, draft: &DraftRuleRequest) -> TesterResult<Rule> {
        let path = format!("/accounts/{account_id}/rules/draft");
        self.put("rules.createDraft", &path, token, draft).await
    }

    pub async fn delete_rule(&self, token: &str, account_id: &str, rule_id: &str) -> TesterResult<StatusResponse> {
        let path = format!("/accounts/{account_id}/rules/delete_rule_with_alerts/{rule_id}");
        let request = self.authed(Method::DELETE, &path, token);
        self.send_ack("rules.delete", request).await
    }

    // ---- alerts -----------------------------------------------------------

    pub async fn list_alerts(&self, token: &str, account_id: &str) -> TesterResult<Vec<Alert>> {
        self.get("alerts.list", &format!("/accounts/{account_id}/alerts"), token).await
    }

    pub async fn get_alert(&self, token: &str, account_id: &str, alert_id: &str) -> TesterResult<Alert> {
        let path = format!("/accounts/{account_id}/alerts/{alert_id}");
        self.get("alerts.get", &path, token).await
    }

    pub async fn update_alert_status(
        &self,
        token: &str,
        account_id: &str,
        alert_id: &str,
        status: &str,
    ) -> TesterResult<Alert> {
        let path = format!("/accounts/{account_id}/alerts/{alert_id}/status/{status}");
        let request = self.authed(Method::PUT, &path, token);
        self.send_json("alerts.updateStatus", request).await
    }

    pub async fn add_alert_comments(
        &self,
        token: &str,
        account_id: &str,
        alert_id: &str,
        comments: &[AlertComment],
    ) -> TesterResult<StatusResponse> {
        let path = format!("/accounts/{account_id}/alerts/{alert_id}/comments");
        let request = self.authed(Method::POST, &path, token).json(comments);
        self.send_ack("alerts.addComments", request).await
    }

    pub async fn close_alert(&self, token: &str, account_id: &str, alert_id: &str) -> TesterResult<Alert> {
        let path = format!("/accounts/{account_id}/alerts/{alert_id}/reset");
        let request = self.authed(Method::PUT, &path, token);
        self.send_json("alerts.reset", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalisation() {
        let client = ApiClient::new("localhost:4001/v1/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:4001/v1/api");

        let client = ApiClient::new("https://oisp.example.com/v1/api", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "https://oisp.example.com/v1/api");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiClient::new("http://", Duration::from_secs(1));
        assert!(matches!(result, Err(TesterError::Config { .. })));
    }
}
