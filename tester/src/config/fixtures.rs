//! Fixture data the suite creates on the platform

pub const ACCOUNT_NAME: &str = "oisp-tests";
pub const DEVICE_NAME: &str = "oisp-tests-device";
pub const DEVICE_ID: &str = "00-11-22-33-44-55";

pub const COMPONENT_NAME: &str = "temperature-sensor";
pub const COMPONENT_TYPE: &str = "temperature.v1.0";
pub const ACTUATOR_NAME: &str = "powerswitch-actuator";
pub const ACTUATOR_TYPE: &str = "powerswitch.v1.0";

pub const SWITCH_ON_CMD: &str = "switch-on";
pub const SWITCH_OFF_CMD: &str = "switch-off";

/// Actuator parameter carrying the switch state
pub const COMPONENT_PARAM_NAME: &str = "LED";

pub const DRAFT_RULE_NAME: &str = "Draftrule";

/// Condition + actuation of one test rule
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDefinition {
    pub name: String,
    pub condition_component: String,
    pub operator: String,
    pub value: String,
    pub actuation_cmd: String,
}

impl RuleDefinition {
    fn new(name: &str, operator: &str, value: &str, actuation_cmd: &str) -> Self {
        Self {
            name: name.to_string(),
            condition_component: COMPONENT_NAME.to_string(),
            operator: operator.to_string(),
            value: value.to_string(),
            actuation_cmd: actuation_cmd.to_string(),
        }
    }

    /// Readable condition as the backend echoes it on alerts
    pub fn condition_text(&self) -> String {
        format!("{} {} {}", self.condition_component, self.operator, self.value)
    }
}

/// `temperature <= 15` switches the actuator on
pub fn switch_on_rule() -> RuleDefinition {
    RuleDefinition::new("oisp-tests-rule-low-temp", "<=", "15", SWITCH_ON_CMD)
}

/// `temperature > 25` switches the actuator off
pub fn switch_off_rule() -> RuleDefinition {
    RuleDefinition::new("oisp-tests-rule-high-temp", ">", "25", SWITCH_OFF_CMD)
}

/// Replacement applied to the cloned high temperature rule
pub fn updated_high_temp_rule() -> RuleDefinition {
    RuleDefinition::new("oisp-tests-rule-high-temp-new", ">", "28", SWITCH_OFF_CMD)
}

/// One observation and the actuation it must trigger, if any
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureStep {
    pub value: i64,
    /// `1` = switch on, `0` = switch off, `None` = no push expected
    pub expected_actuation: Option<u8>,
}

impl TemperatureStep {
    pub const fn new(value: i64, expected_actuation: Option<u8>) -> Self {
        Self {
            value,
            expected_actuation,
        }
    }
}

/// Observation sequence driven through the two switch rules
pub fn temperature_sequence() -> Vec<TemperatureStep> {
    vec![
        TemperatureStep::new(-15, Some(1)),
        TemperatureStep::new(-5, Some(1)),
        TemperatureStep::new(5, Some(1)),
        TemperatureStep::new(15, Some(1)),
        TemperatureStep::new(25, None),
        TemperatureStep::new(30, Some(0)),
        TemperatureStep::new(20, None),
        TemperatureStep::new(14, Some(1)),
        TemperatureStep::new(20, None),
        TemperatureStep::new(28, Some(0)),
    ]
}

/// Each fired rule raises one alert
pub fn expected_alert_count(steps: &[TemperatureStep]) -> usize {
    steps.iter().filter(|s| s.expected_actuation.is_some()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Evaluate the two switch rules locally
    fn actuation_for(value: i64) -> Option<u8> {
        let on: i64 = switch_on_rule().value.parse().unwrap();
        let off: i64 = switch_off_rule().value.parse().unwrap();
        if value <= on {
            Some(1)
        } else if value > off {
            Some(0)
        } else {
            None
        }
    }

    #[test]
    fn test_sequence_matches_rule_thresholds() {
        for step in temperature_sequence() {
            assert_eq!(
                step.expected_actuation,
                actuation_for(step.value),
                "value {} maps to the wrong actuation",
                step.value
            );
        }
    }

    #[test]
    fn test_expected_alert_count() {
        assert_eq!(expected_alert_count(&temperature_sequence()), 7);
    }

    #[test]
    fn test_condition_text() {
        assert_eq!(switch_off_rule().condition_text(), "temperature-sensor > 25");
    }
}
