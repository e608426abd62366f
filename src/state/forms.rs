// Form state for agent configuration, the gate log and the ROI calculators

use serde_json::{Map, Number, Value};
use warehouse_studio_backend::gate_log::NewGateEntry;
use warehouse_studio_backend::roi::{AmrRoiEstimate, AmrRoiInput, FieldKind, WmsRoiEstimate, WmsRoiInput};
use warehouse_studio_backend::state::{Agent, AgentId};

/// Strip characters a field of `kind` does not accept
pub fn sanitize(kind: FieldKind, text: &str) -> String {
    let mut seen_point = false;
    text.chars()
        .filter(|c| match (kind, c) {
            (_, '0'..='9') => true,
            (FieldKind::Decimal, '.') if !seen_point => {
                seen_point = true;
                true
            }
            _ => false,
        })
        .collect()
}

/// Editable value of one configuration key
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigInput {
    /// Checkbox
    Flag(bool),
    /// Numeric text box
    Number(String),
    /// Plain text box
    Text(String),
    /// Lists and objects, edited as JSON
    Json(String),
}

impl ConfigInput {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Bool(b) => ConfigInput::Flag(*b),
            Value::Number(n) => ConfigInput::Number(n.to_string()),
            Value::String(s) => ConfigInput::Text(s.clone()),
            other => ConfigInput::Json(other.to_string()),
        }
    }

    fn to_value(&self, key: &str) -> Result<Value, String> {
        match self {
            ConfigInput::Flag(b) => Ok(Value::Bool(*b)),
            ConfigInput::Text(s) => Ok(Value::String(s.clone())),
            ConfigInput::Number(text) => {
                let text = text.trim();
                if let Ok(n) = text.parse::<i64>() {
                    return Ok(Value::Number(n.into()));
                }
                text.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| format!("{key} must be a number"))
            }
            ConfigInput::Json(text) => {
                serde_json::from_str(text).map_err(|e| format!("{key} is not valid JSON: {e}"))
            }
        }
    }
}

/// Configuration editor for the selected agent
#[derive(Debug, Clone, Default)]
pub struct ConfigForm {
    /// Agent the fields were loaded from
    pub agent_id: Option<AgentId>,
    /// Keys in display order
    pub fields: Vec<(String, ConfigInput)>,
    /// A save is in flight
    pub saving: bool,
}

impl ConfigForm {
    /// Editor pre-filled with `agent`'s configuration
    pub fn load(agent: &Agent) -> Self {
        Self {
            agent_id: Some(agent.id.clone()),
            fields: agent
                .config
                .iter()
                .map(|(key, value)| (key.clone(), ConfigInput::from_value(value)))
                .collect(),
            saving: false,
        }
    }

    /// Fields were loaded from this agent
    pub fn is_for(&self, id: &str) -> bool {
        self.agent_id.as_deref() == Some(id)
    }

    /// Rebuild the configuration map from the edited fields
    pub fn to_config(&self) -> Result<Map<String, Value>, String> {
        self.fields
            .iter()
            .map(|(key, input)| Ok((key.clone(), input.to_value(key)?)))
            .collect()
    }
}

/// Gate entry form plus the panic message box
#[derive(Debug, Clone, Default)]
pub struct GateForm {
    /// Fields of the entry being typed
    pub entry: NewGateEntry,
    /// Panic dialog text
    pub panic_message: String,
    /// Panic dialog is open
    pub panic_open: bool,
    /// Entry form is open
    pub adding: bool,
}

/// Locus AMR calculator
#[derive(Debug, Clone, Default)]
pub struct AmrForm {
    /// Orders per day
    pub daily_order_volume: String,
    /// Picks per hour
    pub current_pick_rate: String,
    /// Square feet
    pub warehouse_size: String,
    /// Pickers
    pub current_headcount: String,
    /// Last calculation
    pub result: Option<Result<AmrRoiEstimate, String>>,
}

impl AmrForm {
    /// Every field has a value
    pub fn is_complete(&self) -> bool {
        [
            &self.daily_order_volume,
            &self.current_pick_rate,
            &self.warehouse_size,
            &self.current_headcount,
        ]
        .iter()
        .all(|f| !f.is_empty())
    }

    /// Run the estimate over the current fields
    pub fn calculate(&mut self) {
        let estimate = AmrRoiInput::from_form(
            &self.daily_order_volume,
            &self.current_pick_rate,
            &self.warehouse_size,
            &self.current_headcount,
        )
        .and_then(|input| input.estimate());
        self.result = Some(estimate.map_err(|e| e.to_string()));
    }
}

/// Logiwa WMS calculator
#[derive(Debug, Clone, Default)]
pub struct WmsForm {
    /// Orders per day
    pub daily_order_volume: String,
    /// Error rate in percent
    pub current_error_rate: String,
    /// WMS seats
    pub number_of_users: String,
    /// Yearly cost per user
    pub avg_labor_cost: String,
    /// Last calculation
    pub result: Option<Result<WmsRoiEstimate, String>>,
}

impl WmsForm {
    /// Every field has a value
    pub fn is_complete(&self) -> bool {
        [
            &self.daily_order_volume,
            &self.current_error_rate,
            &self.number_of_users,
            &self.avg_labor_cost,
        ]
        .iter()
        .all(|f| !f.is_empty())
    }

    /// Run the estimate over the current fields
    pub fn calculate(&mut self) {
        let estimate = WmsRoiInput::from_form(
            &self.daily_order_volume,
            &self.current_error_rate,
            &self.number_of_users,
            &self.avg_labor_cost,
        )
        .and_then(|input| input.estimate());
        self.result = Some(estimate.map_err(|e| e.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize(FieldKind::Integer, "12a3.4"), "1234");
        assert_eq!(sanitize(FieldKind::Decimal, "1.2.3x"), "1.23");
        assert_eq!(sanitize(FieldKind::Decimal, "-0.5"), "0.5");
    }

    fn agent_with_config(config: Value) -> Agent {
        let mut agent = warehouse_studio_backend::state::seed::seed_agents().remove(0);
        agent.config = config.as_object().cloned().unwrap();
        agent
    }

    #[test]
    fn test_config_form_round_trips_unedited() {
        let agent = agent_with_config(serde_json::json!({
            "checkInterval": 30,
            "detectionThreshold": 0.8,
            "autoEscalate": true,
            "region": "west",
            "alertChannels": ["slack", "email"]
        }));
        let form = ConfigForm::load(&agent);
        assert!(form.is_for(&agent.id));
        assert_eq!(form.to_config().unwrap(), agent.config);
    }

    #[test]
    fn test_config_form_edits() {
        let agent = agent_with_config(serde_json::json!({
            "checkInterval": 30,
            "alertChannels": ["slack"]
        }));
        let mut form = ConfigForm::load(&agent);
        for (key, input) in form.fields.iter_mut() {
            match key.as_str() {
                "checkInterval" => *input = ConfigInput::Number("45".into()),
                _ => *input = ConfigInput::Json(r#"["slack","sms"]"#.into()),
            }
        }
        let config = form.to_config().unwrap();
        assert_eq!(config["checkInterval"], serde_json::json!(45));
        assert_eq!(config["alertChannels"], serde_json::json!(["slack", "sms"]));
    }

    #[test]
    fn test_config_form_rejects_bad_input() {
        let agent = agent_with_config(serde_json::json!({ "checkInterval": 30 }));
        let mut form = ConfigForm::load(&agent);
        form.fields[0].1 = ConfigInput::Number("soon".into());
        assert_eq!(form.to_config().unwrap_err(), "checkInterval must be a number");

        form.fields[0].1 = ConfigInput::Json("[1,".into());
        assert!(form.to_config().is_err());
    }

    #[test]
    fn test_amr_form() {
        let mut form = AmrForm {
            daily_order_volume: "5000".into(),
            current_pick_rate: "100".into(),
            warehouse_size: "250000".into(),
            current_headcount: "40".into(),
            result: None,
        };
        assert!(form.is_complete());
        form.calculate();
        let estimate = form.result.unwrap().unwrap();
        assert_eq!(estimate.robots_needed, 6);
    }

    #[test]
    fn test_wms_form_reports_errors() {
        let mut form = WmsForm {
            daily_order_volume: "1000".into(),
            current_error_rate: "2".into(),
            number_of_users: "0".into(),
            avg_labor_cost: "50000".into(),
            result: None,
        };
        form.calculate();
        assert!(form.result.unwrap().is_err());
        assert!(!WmsForm::default().is_complete());
    }
}
