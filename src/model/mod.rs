//! Model discovery and prompt templates.
//!
//! The pipeline only sees the [`ModelLister`] and [`TemplateExpander`]
//! traits; [`ModelDir`] implements both on top of a models directory.

mod dir;

pub use dir::ModelDir;
pub(crate) use dir::is_plain_name;

use std::path::Path;

use anyhow::Result;

/// Lists the models the engine can load.
pub trait ModelLister: Send + Sync {
    /// Model identifiers, in a stable order
    fn list_models(&self) -> Result<Vec<String>>;

    /// Check whether a model file with this name exists
    fn exists_in_path(&self, name: &str) -> bool;

    /// Directory holding models and their companion files
    fn model_path(&self) -> &Path;
}

/// Expands a named prompt template around the request input.
pub trait TemplateExpander: Send + Sync {
    /// Render template `key` with `input`. A missing template is an error.
    fn template_prefix(&self, key: &str, input: &str) -> Result<String>;
}
