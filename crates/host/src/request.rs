//! Request and response envelopes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One call into the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginRequest {
    /// Protocol version sent by the caller. Informational.
    pub version: String,
    /// Cloud provider the caller targets. Informational.
    pub provider: String,
    /// Plugin name, e.g. `"vm"`.
    pub plugin: String,
    /// Action name within the plugin, e.g. `"create"`.
    pub action: String,
    /// Opaque payload decoded by the action.
    pub parameters: Value,
}

impl PluginRequest {
    /// Request for `plugin`/`action` with the given payload.
    pub fn new(plugin: impl Into<String>, action: impl Into<String>, parameters: Value) -> Self {
        Self {
            plugin: plugin.into(),
            action: action.into(),
            parameters,
            ..Self::default()
        }
    }
}

/// Outcome marker of a [`PluginResponse`], `"0"` or `"1"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultCode {
    /// Every stage succeeded.
    #[serde(rename = "0")]
    Success,
    /// Some stage failed; see the message.
    #[serde(rename = "1")]
    Failure,
}

impl ResultCode {
    /// Wire form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "0",
            Self::Failure => "1",
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform answer to every [`PluginRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginResponse {
    /// Success or failure.
    pub result_code: ResultCode,
    /// `"success"`, or the error's description.
    pub result_message: String,
    /// The action's output; absent on failure.
    pub results: Option<Value>,
}

impl PluginResponse {
    /// Message of every successful response.
    pub const SUCCESS_MESSAGE: &'static str = "success";

    /// A successful response carrying `results`.
    pub fn success(results: Value) -> Self {
        Self {
            result_code: ResultCode::Success,
            result_message: Self::SUCCESS_MESSAGE.to_owned(),
            results: Some(results),
        }
    }

    /// A failure response described by `error`.
    pub fn failure(error: &impl fmt::Display) -> Self {
        Self {
            result_code: ResultCode::Failure,
            result_message: error.to_string(),
            results: None,
        }
    }

    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        self.result_code == ResultCode::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn response_wire_form() {
        let ok = PluginResponse::success(json!({"outputs": []}));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"result_code": "0", "result_message": "success", "results": {"outputs": []}})
        );

        let failed = PluginResponse::failure(&"plugin `x` not found");
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"result_code": "1", "result_message": "plugin `x` not found", "results": null})
        );
        assert!(!failed.is_success());
    }

    #[test]
    fn request_fields_default() {
        let request: PluginRequest =
            serde_json::from_value(json!({"plugin": "vm", "action": "start"})).unwrap();
        assert_eq!(request, PluginRequest::new("vm", "start", Value::Null));
    }
}
