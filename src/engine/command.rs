//! External llama.cpp binary as inference engine

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, Context, Result};

use super::{InferenceEngine, Predictor};
use crate::config::Profile;

/// Runs a llama.cpp-compatible CLI once per sample.
///
/// The resolved configuration is mapped onto command-line flags; zero
/// values are left out so the binary's own defaults apply.
pub struct CommandEngine {
    binary: PathBuf,
    models_path: PathBuf,
}

impl CommandEngine {
    pub fn new<B: Into<PathBuf>, M: Into<PathBuf>>(binary: B, models_path: M) -> Self {
        Self {
            binary: binary.into(),
            models_path: models_path.into(),
        }
    }
}

impl InferenceEngine for CommandEngine {
    fn create_inference(&self, input: &str, config: &Profile) -> Result<Predictor> {
        if config.model.is_empty() {
            return Err(anyhow!("no model file configured"));
        }
        let binary = self.binary.clone();
        let args = command_args(input, config, &self.models_path);

        tracing::debug!("Inference command: {} {:?}", binary.display(), args);

        Ok(Box::new(move || {
            let output = Command::new(&binary)
                .args(&args)
                .output()
                .with_context(|| format!("cannot run {}", binary.display()))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(anyhow!(
                    "{} exited with {}: {}",
                    binary.display(),
                    output.status,
                    stderr.trim()
                ));
            }

            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        }))
    }
}

/// Build the argument list for one generation call.
pub fn command_args(input: &str, config: &Profile, models_path: &Path) -> Vec<String> {
    let params = &config.parameters;
    let mut args = vec![
        "-m".to_string(),
        models_path.join(&config.model).to_string_lossy().into_owned(),
        "-p".to_string(),
        input.to_string(),
        "--no-display-prompt".to_string(),
    ];

    let mut push = |flag: &str, value: String| {
        args.push(flag.to_string());
        args.push(value);
    };

    if params.max_tokens != 0 {
        push("-n", params.max_tokens.to_string());
    }
    if params.temperature != 0.0 {
        push("--temp", params.temperature.to_string());
    }
    if params.top_p != 0.0 {
        push("--top-p", params.top_p.to_string());
    }
    if params.top_k != 0 {
        push("--top-k", params.top_k.to_string());
    }
    if params.repeat_penalty != 0.0 {
        push("--repeat-penalty", params.repeat_penalty.to_string());
    }
    if params.n_keep != 0 {
        push("--keep", params.n_keep.to_string());
    }
    if params.seed != 0 {
        push("--seed", params.seed.to_string());
    }
    if params.batch != 0 {
        push("-b", params.batch.to_string());
    }
    if config.threads != 0 {
        push("-t", config.threads.to_string());
    }
    if config.context_size != 0 {
        push("-c", config.context_size.to_string());
    }
    for stop in &config.stopwords {
        push("-r", stop.clone());
    }

    if params.ignore_eos {
        args.push("--ignore-eos".to_string());
    }
    if params.f16 {
        args.push("--memory-f16".to_string());
    }

    args
}
