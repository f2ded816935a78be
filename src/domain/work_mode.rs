use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    #[default]
    White,
    Colour,
    Scene,
}

impl WorkMode {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkMode::White => "white",
            WorkMode::Colour => "colour",
            WorkMode::Scene => "scene",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        match value {
            "white" => Some(WorkMode::White),
            "colour" => Some(WorkMode::Colour),
            "scene" => Some(WorkMode::Scene),
            _ => None,
        }
    }
}

impl Display for WorkMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
