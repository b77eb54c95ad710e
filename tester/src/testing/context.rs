//! State handed from one suite step to the next

use std::collections::HashMap;

use shared::{Alert, Rule};

use crate::error::{TesterError, TesterResult};
use crate::pollers::ObservationRun;

/// Ids and tokens produced by earlier steps.
///
/// Every field starts empty; a step that needs a value an earlier step
/// never produced fails with [`TesterError::MissingContext`].
#[derive(Debug, Default)]
pub struct SuiteContext {
    pub user_token: Option<String>,
    pub user_id: Option<String>,
    pub account_id: Option<String>,
    pub activation_code: Option<String>,
    pub device_id: Option<String>,
    pub device_token: Option<String>,
    pub component_id: Option<String>,
    pub actuator_id: Option<String>,
    /// Rule ids keyed by the actuation command they trigger
    pub rules: HashMap<String, String>,
    /// Rules as listed by the backend after creation
    pub rule_list: Vec<Rule>,
    pub cloned_rule_id: Option<String>,
    pub observations: Option<ObservationRun>,
    pub alerts: Vec<Alert>,
    pub receiver_token: Option<String>,
    pub receiver_id: Option<String>,
}

fn require<'a>(value: &'a Option<String>, field: &'static str) -> TesterResult<&'a str> {
    value.as_deref().ok_or(TesterError::MissingContext { field })
}

impl SuiteContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_token(&self) -> TesterResult<&str> {
        require(&self.user_token, "user token")
    }

    pub fn user_id(&self) -> TesterResult<&str> {
        require(&self.user_id, "user id")
    }

    pub fn account_id(&self) -> TesterResult<&str> {
        require(&self.account_id, "account id")
    }

    pub fn activation_code(&self) -> TesterResult<&str> {
        require(&self.activation_code, "activation code")
    }

    pub fn device_id(&self) -> TesterResult<&str> {
        require(&self.device_id, "device id")
    }

    pub fn device_token(&self) -> TesterResult<&str> {
        require(&self.device_token, "device token")
    }

    pub fn component_id(&self) -> TesterResult<&str> {
        require(&self.component_id, "component id")
    }

    pub fn actuator_id(&self) -> TesterResult<&str> {
        require(&self.actuator_id, "actuator id")
    }

    pub fn cloned_rule_id(&self) -> TesterResult<&str> {
        require(&self.cloned_rule_id, "cloned rule id")
    }

    pub fn receiver_token(&self) -> TesterResult<&str> {
        require(&self.receiver_token, "receiver token")
    }

    pub fn rule_for(&self, actuation_cmd: &str) -> TesterResult<&str> {
        self.rules
            .get(actuation_cmd)
            .map(String::as_str)
            .ok_or(TesterError::MissingContext { field: "rule id" })
    }

    /// Rule at `index` of the listing taken after rule creation
    pub fn listed_rule(&self, index: usize) -> TesterResult<&Rule> {
        self.rule_list
            .get(index)
            .ok_or(TesterError::MissingContext { field: "rule list" })
    }

    pub fn alert(&self, index: usize) -> TesterResult<&Alert> {
        self.alerts
            .get(index)
            .ok_or(TesterError::MissingContext { field: "alert list" })
    }

    pub fn observations(&self) -> TesterResult<&ObservationRun> {
        self.observations
            .as_ref()
            .ok_or(TesterError::MissingContext { field: "observation run" })
    }
}
