use serde::{Deserialize, Serialize};

/// Whatever the profile source holds, embedded whole into the system prompt.
///
/// The matcher never looks inside it. A list of records is the usual shape,
/// but any JSON document is accepted and the model decides what is relevant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorProfiles(pub serde_json::Value);

impl DoctorProfiles {
    /// `null`, `[]` and `{}` give the model nothing to choose from.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            serde_json::Value::Null => true,
            serde_json::Value::Array(items) => items.is_empty(),
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}

impl From<serde_json::Value> for DoctorProfiles {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl From<Vec<serde_json::Value>> for DoctorProfiles {
    fn from(profiles: Vec<serde_json::Value>) -> Self {
        Self(serde_json::Value::Array(profiles))
    }
}

impl From<ProfileList> for DoctorProfiles {
    fn from(list: ProfileList) -> Self {
        Self(serde_json::Value::Array(list.0))
    }
}

/// Stored volunteer records. The store appends to it, so it is always an array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileList(pub Vec<serde_json::Value>);

impl ProfileList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &serde_json::Value> {
        self.0.iter()
    }
}

impl From<Vec<serde_json::Value>> for ProfileList {
    fn from(profiles: Vec<serde_json::Value>) -> Self {
        Self(profiles)
    }
}

/// The single structured field the model is asked to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorMatch {
    pub name: String,
}

/// A sign-up submitted by a volunteer before it is stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    pub fullname: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "user")]
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// How the hosted service is asked to constrain its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// Strict JSON schema with a single required `name` string.
    #[default]
    JsonSchema,
    /// Free-form JSON object; the shape is requested in the prompt only.
    JsonObject,
}

impl std::str::FromStr for ResponseMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json_schema" => Ok(ResponseMode::JsonSchema),
            "json_object" => Ok(ResponseMode::JsonObject),
            other => Err(format!(
                "unknown response format '{}', expected json_schema or json_object",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub mode: ResponseMode,
}
