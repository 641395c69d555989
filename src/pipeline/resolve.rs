//! Model selection and configuration layering

use std::path::{Path, PathBuf};

use crate::config::{ForcedParams, GenerationParams, Profile, ProfileStore};
use crate::error::{Error, Result};
use crate::model::ModelLister;
use crate::openai::OpenAIRequest;

/// Pick the model identifier for a request.
///
/// A bearer token naming an existing model wins over the request's `model`
/// field; with neither, the first listed model is used.
pub fn select_model(
    requested: &str,
    bearer: Option<&str>,
    models: &dyn ModelLister,
) -> Result<String> {
    if let Some(bearer) = bearer.filter(|b| !b.is_empty() && models.exists_in_path(b)) {
        tracing::debug!("Using model from bearer token: {}", bearer);
        return Ok(bearer.to_string());
    }

    if !requested.is_empty() {
        return Ok(requested.to_string());
    }

    let listed = models.list_models().unwrap_or_else(|e| {
        tracing::warn!("Cannot list models: {:#}", e);
        Vec::new()
    });
    match listed.into_iter().next() {
        Some(first) => {
            tracing::debug!("No model specified, using: {}", first);
            Ok(first)
        }
        None => Err(Error::NoModel),
    }
}

/// Path of the companion profile file for a model, if it exists.
pub fn companion_file(model_path: &Path, model: &str) -> Option<PathBuf> {
    if !crate::model::is_plain_name(model) {
        return None;
    }
    let path = model_path.join(format!("{}.yaml", model));
    path.is_file().then_some(path)
}

/// Build the configuration for one request.
///
/// Starts from the stored profile for `model` (or the fallback profile),
/// then applies request overrides and finally the server-wide values.
pub fn resolve_config(
    model: &str,
    request: &OpenAIRequest,
    store: &ProfileStore,
    forced: &ForcedParams,
) -> Profile {
    let mut config = store
        .get(model)
        .unwrap_or_else(|| Profile::fallback(model));
    apply_overrides(&mut config, request);
    apply_forced(&mut config, forced);
    config
}

/// Layer request values onto a profile: non-zero wins.
///
/// A non-empty `stop` is appended to the stop list instead of replacing it.
pub fn apply_overrides(config: &mut Profile, request: &OpenAIRequest) {
    let input: &GenerationParams = &request.parameters;
    let params = &mut config.parameters;

    if input.echo {
        params.echo = true;
    }
    if input.top_k != 0 {
        params.top_k = input.top_k;
    }
    if input.top_p != 0.0 {
        params.top_p = input.top_p;
    }
    if input.temperature != 0.0 {
        params.temperature = input.temperature;
    }
    if input.max_tokens != 0 {
        params.max_tokens = input.max_tokens;
    }
    if input.repeat_penalty != 0.0 {
        params.repeat_penalty = input.repeat_penalty;
    }
    if input.n_keep != 0 {
        params.n_keep = input.n_keep;
    }
    if input.batch != 0 {
        params.batch = input.batch;
    }
    if input.f16 {
        params.f16 = true;
    }
    if input.ignore_eos {
        params.ignore_eos = true;
    }
    if input.seed != 0 {
        params.seed = input.seed;
    }

    if !request.stop.is_empty() {
        config.stopwords.push(request.stop.clone());
    }
}

/// Apply server-wide values; zero and `false` leave the config untouched.
pub fn apply_forced(config: &mut Profile, forced: &ForcedParams) {
    if forced.threads != 0 {
        config.threads = forced.threads;
    }
    if forced.context_size != 0 {
        config.context_size = forced.context_size;
    }
    if forced.f16 {
        config.parameters.f16 = true;
    }
}
