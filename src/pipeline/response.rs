//! Response envelopes

use std::collections::HashSet;

use crate::openai::{Choice, CompletionResponse, Message, ModelInfo, ModelsResponse};

use super::Mode;

const FINISH_REASON: &str = "stop";

/// Wrap cleaned samples into the response for `mode`.
///
/// `model` is echoed back as the caller sent it.
pub fn assemble(mode: Mode, model: &str, samples: Vec<String>) -> CompletionResponse {
    let choices = samples
        .into_iter()
        .enumerate()
        .map(|(index, sample)| match mode {
            Mode::Chat => Choice {
                index,
                text: None,
                message: Some(Message {
                    role: "assistant".to_string(),
                    content: sample,
                }),
                finish_reason: FINISH_REASON.to_string(),
            },
            Mode::Completion => Choice {
                index,
                text: Some(sample),
                message: None,
                finish_reason: FINISH_REASON.to_string(),
            },
        })
        .collect();

    let (prefix, object) = match mode {
        Mode::Chat => ("chatcmpl", "chat.completion"),
        Mode::Completion => ("cmpl", "text_completion"),
    };

    CompletionResponse {
        id: format!("{}-{}", prefix, uuid::Uuid::new_v4()),
        object: object.to_string(),
        created: chrono::Utc::now().timestamp(),
        model: model.to_string(),
        choices,
    }
}

/// Model files first, then profile names not already listed.
pub fn model_list(models: Vec<String>, profiles: Vec<String>) -> ModelsResponse {
    let mut seen = HashSet::new();
    let data = models
        .into_iter()
        .chain(profiles)
        .filter(|id| seen.insert(id.clone()))
        .map(|id| ModelInfo {
            id,
            object: "model".to_string(),
        })
        .collect();

    ModelsResponse {
        object: "list".to_string(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_completion() {
        let response = assemble(Mode::Completion, "gpt", vec!["a".into(), "b".into()]);
        assert_eq!(response.object, "text_completion");
        assert!(response.id.starts_with("cmpl-"));
        assert_eq!(response.model, "gpt");
        assert_eq!(response.choices.len(), 2);
        assert_eq!(response.choices[1].index, 1);
        assert_eq!(response.choices[1].text.as_deref(), Some("b"));
        assert!(response.choices[0].message.is_none());
        assert_eq!(response.choices[0].finish_reason, "stop");
    }

    #[test]
    fn test_assemble_chat() {
        let response = assemble(Mode::Chat, "", vec!["hi".into()]);
        assert_eq!(response.object, "chat.completion");
        assert!(response.id.starts_with("chatcmpl-"));
        assert_eq!(response.model, "");
        let message = response.choices[0].message.as_ref().unwrap();
        assert_eq!(message.role, "assistant");
        assert_eq!(message.content, "hi");
        assert!(response.choices[0].text.is_none());
    }

    #[test]
    fn test_model_list_dedup() {
        let response = model_list(
            vec!["a.bin".into(), "b.bin".into()],
            vec!["a.bin".into(), "gpt-3.5-turbo".into()],
        );
        let ids: Vec<&str> = response.data.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a.bin", "b.bin", "gpt-3.5-turbo"]);
        assert!(response.data.iter().all(|m| m.object == "model"));
        assert_eq!(response.object, "list");
    }
}
