//! Request pipeline
//!
//! Turns one API request into a response:
//! - resolve: pick the model and layer profile, request and server values
//! - template: build the prompt and expand the model's template
//! - postprocess: echo, cut-strings and trim prefixes per sample
//! - response: wrap samples into the OpenAI envelope
//!
//! Everything here is synchronous; the server runs it on a blocking task.

mod postprocess;
mod resolve;
mod response;
mod template;

pub use postprocess::{clean_sample, PatternCache};
pub use resolve::{
    apply_forced, apply_overrides, companion_file, resolve_config, select_model,
};
pub use response::{assemble, model_list};
pub use template::{apply_template, chat_prompt, template_key};

use std::sync::Arc;

use crate::config::{ForcedParams, Profile, ProfileStore};
use crate::engine::InferenceEngine;
use crate::error::{Error, Result};
use crate::model::{ModelLister, TemplateExpander};
use crate::openai::{CompletionResponse, ModelsResponse, OpenAIRequest};

/// API flavor of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Completion,
    Chat,
}

/// Shared state and collaborators for serving requests.
pub struct Pipeline {
    store: Arc<ProfileStore>,
    patterns: PatternCache,
    models: Arc<dyn ModelLister>,
    templates: Arc<dyn TemplateExpander>,
    engine: Arc<dyn InferenceEngine>,
    forced: ForcedParams,
}

impl Pipeline {
    pub fn new(
        store: Arc<ProfileStore>,
        models: Arc<dyn ModelLister>,
        templates: Arc<dyn TemplateExpander>,
        engine: Arc<dyn InferenceEngine>,
        forced: ForcedParams,
    ) -> Self {
        Self {
            store,
            patterns: PatternCache::new(),
            models,
            templates,
            engine,
            forced,
        }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Serve one completion or chat request.
    pub fn run(
        &self,
        mode: Mode,
        request: &OpenAIRequest,
        bearer: Option<&str>,
    ) -> Result<CompletionResponse> {
        let model = select_model(&request.model, bearer, self.models.as_ref())?;

        // Companion files are re-read on every request so edits apply live
        if let Some(path) = companion_file(self.models.model_path(), &model) {
            self.store.load_companion(&path)?;
        }

        let config = resolve_config(&model, request, &self.store, &self.forced);
        tracing::debug!("Parameter config: {:?}", config);

        let input = match mode {
            Mode::Chat => chat_prompt(&request.messages, &config),
            Mode::Completion => request.prompt.clone(),
        };
        let input = apply_template(self.templates.as_ref(), template_key(&config, mode), input);

        let samples = self.generate(&input, &config, request.samples())?;
        Ok(assemble(mode, &request.model, samples))
    }

    /// Generate and clean `n` samples in order; the first failure aborts.
    pub fn generate(&self, input: &str, config: &Profile, n: usize) -> Result<Vec<String>> {
        let mut predict = self
            .engine
            .create_inference(input, config)
            .map_err(Error::Inference)?;

        let mut samples = Vec::with_capacity(n);
        for _ in 0..n.max(1) {
            let sample = predict().map_err(Error::Inference)?;
            samples.push(clean_sample(sample, input, config, &self.patterns)?);
        }
        Ok(samples)
    }

    /// Model files plus stored profile names.
    pub fn list_models(&self) -> Result<ModelsResponse> {
        let models = self.models.list_models().map_err(Error::ModelList)?;
        Ok(model_list(models, self.store.names()))
    }
}
