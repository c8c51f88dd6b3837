//! Model value object representing a text-generation model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text-generation models (Value Object)
///
/// The pricing used for cost reporting is calibrated for the Gemini 2.0
/// Flash family; other ids are passed through to the service verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gemini20Flash001,
    Gemini20FlashLite001,
    Gemini25Flash,
    Gemini25Pro,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini20Flash001 => "gemini-2.0-flash-001",
            Model::Gemini20FlashLite001 => "gemini-2.0-flash-lite-001",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Custom(s) => s,
        }
    }

    /// Parse an optional caller override, treating blank strings as absent
    pub fn from_override(value: Option<&str>) -> Option<Model> {
        value
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Model::from_id)
    }

    /// Build a model from its string identifier (unknown ids become `Custom`)
    pub fn from_id(id: &str) -> Model {
        match id.parse::<Model>() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Default for Model {
    /// Returns the default model (Gemini 2.0 Flash 001)
    fn default() -> Self {
        Model::Gemini20Flash001
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gemini-2.0-flash-001" => Model::Gemini20Flash001,
            "gemini-2.0-flash-lite-001" => Model::Gemini20FlashLite001,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from_id(&s))
    }
}
