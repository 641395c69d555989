//! Inference engine seam
//!
//! The pipeline asks an [`InferenceEngine`] for a [`Predictor`] bound to one
//! prompt and one resolved configuration, then calls it once per sample.
//! - CommandEngine: runs a llama.cpp-style binary per sample

mod command;

pub use command::{command_args, CommandEngine};

use anyhow::Result;

use crate::config::Profile;

/// Produces one completion sample per call.
pub type Predictor = Box<dyn FnMut() -> Result<String> + Send>;

/// Creates predictors for resolved configurations.
pub trait InferenceEngine: Send + Sync {
    /// Bind `input` and `config` into a sample producer.
    fn create_inference(&self, input: &str, config: &Profile) -> Result<Predictor>;
}
