use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(PartialEq, Debug, Clone, Deserialize)]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub category: DeviceCategory,
    #[serde(default)]
    pub status: Vec<StatusItem>,
}

impl Device {
    pub fn status_value(&self, code: &str) -> Option<&Value> {
        self.status.iter().find(|item| item.code == code).map(|item| &item.value)
    }

    pub fn is_light(&self) -> bool {
        self.category == DeviceCategory::Light
    }
}

#[derive(PartialEq, Debug, Clone, Deserialize)]
pub struct StatusItem {
    pub code: String,
    #[serde(default)]
    pub value: Value,
}

impl StatusItem {
    pub fn new(code: impl Into<String>, value: impl Into<Value>) -> Self {
        StatusItem {
            code: code.into(),
            value: value.into(),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub enum DeviceCategory {
    Light,
    Switch,
    #[default]
    Other,
}

impl DeviceCategory {
    pub fn from_code(code: &str) -> Self {
        match code {
            "dj" => DeviceCategory::Light,
            "kg" => DeviceCategory::Switch,
            _ => DeviceCategory::Other,
        }
    }
}

impl<'de> Deserialize<'de> for DeviceCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Ok(DeviceCategory::from_code(&code))
    }
}
