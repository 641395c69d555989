//! OpenAI-compatible wire types

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::GenerationParams;

/// Body of `/v1/completions` and `/v1/chat/completions`.
///
/// Every field is optional; zero values mean "not supplied".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAIRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub model: String,

    /// Read only by completion calls
    #[serde(deserialize_with = "null_as_empty")]
    pub prompt: String,

    /// Extra stop sequence appended to the profile's list
    #[serde(deserialize_with = "null_as_empty")]
    pub stop: String,

    /// Read only by chat calls
    pub messages: Vec<Message>,

    /// Number of samples to generate (0 = 1)
    pub n: usize,

    #[serde(flatten)]
    pub parameters: GenerationParams,
}

impl OpenAIRequest {
    /// Number of samples to generate
    pub fn samples(&self) -> usize {
        self.n.max(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

/// Read a JSON `null` string field as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    pub finish_reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub object: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub object: String,
    pub data: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
}
