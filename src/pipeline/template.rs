//! Prompt construction and templating

use crate::config::Profile;
use crate::model::TemplateExpander;
use crate::openai::Message;

use super::Mode;

/// Join chat messages into a prompt, one `"<label> <content>"` line each.
pub fn chat_prompt(messages: &[Message], config: &Profile) -> String {
    messages
        .iter()
        .map(|m| format!("{} {}", config.role_label(&m.role), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Template key for a request: the mode's template, else the model name.
pub fn template_key(config: &Profile, mode: Mode) -> &str {
    let configured = match mode {
        Mode::Chat => &config.template.chat,
        Mode::Completion => &config.template.completion,
    };
    if configured.is_empty() {
        &config.model
    } else {
        configured
    }
}

/// Expand `input` with the template `key`, or return it unchanged.
pub fn apply_template(templates: &dyn TemplateExpander, key: &str, input: String) -> String {
    match templates.template_prefix(key, &input) {
        Ok(expanded) => {
            tracing::debug!("Template found, input modified to: {}", expanded);
            expanded
        }
        Err(e) => {
            tracing::debug!("No template applied for {}: {:#}", key, e);
            input
        }
    }
}
