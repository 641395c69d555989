//! Named model profiles
//!
//! A profile is the YAML record that binds a public model name to an
//! engine model file plus its generation defaults and text cleanup rules.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::GenerationParams;

/// Template references for the two API flavors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template key used by `/v1/completions`
    pub completion: String,
    /// Template key used by `/v1/chat/completions`
    pub chat: String,
}

/// A named configuration record.
///
/// A resolved request configuration has the same shape: it is the stored
/// profile (or [`Profile::fallback`]) after request overrides and server
/// flags have been layered on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Lookup key; profiles without a name are never stored
    pub name: String,

    pub path: String,

    /// Model file handed to the inference engine
    pub model: String,

    #[serde(flatten)]
    pub parameters: GenerationParams,

    /// Thread count hint (0 = engine default)
    pub threads: usize,

    /// Context window size hint (0 = engine default)
    pub context_size: usize,

    pub debug: bool,

    /// Stop sequences
    pub stopwords: Vec<String>,

    /// Regular expressions whose matches are removed from each sample
    pub cutstrings: Vec<String>,

    /// Literal prefixes stripped from each sample before whitespace trimming
    pub trimspace: Vec<String>,

    /// Chat role -> prompt label
    pub roles: HashMap<String, String>,

    pub template: TemplateConfig,
}

impl Profile {
    /// Profile synthesized for a model that has no stored configuration.
    pub fn fallback(model: &str) -> Self {
        Self {
            model: model.to_string(),
            parameters: GenerationParams::fallback(),
            ..Default::default()
        }
    }

    /// Whether this record can be stored under a name.
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// Prompt label for a chat role, falling back to the role itself.
    pub fn role_label<'a>(&'a self, role: &'a str) -> &'a str {
        match self.roles.get(role) {
            Some(label) if !label.is_empty() => label.as_str(),
            _ => role,
        }
    }
}
