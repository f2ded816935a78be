use serde::Serialize;
use serde_json::Value;

/// One `{code, value}` pair of an outgoing command batch.
#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct DeviceCommand {
    pub code: String,
    pub value: Value,
}

impl DeviceCommand {
    pub fn new(code: impl Into<String>, value: impl Into<Value>) -> Self {
        DeviceCommand {
            code: code.into(),
            value: value.into(),
        }
    }
}
