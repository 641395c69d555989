//! Generation parameters shared by profiles and requests

use serde::{Deserialize, Serialize};

/// Sampling and runtime knobs for one generation call.
///
/// The same keys are accepted at the top level of a profile YAML file and
/// in the JSON body of an API request. A zero value means "unset": request
/// overrides only take effect when non-zero (see
/// [`crate::pipeline::apply_overrides`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Temperature for sampling (higher = more random)
    pub temperature: f32,

    /// Top-p nucleus sampling threshold
    pub top_p: f32,

    /// Top-k sampling
    pub top_k: usize,

    /// Maximum number of tokens to generate
    pub max_tokens: usize,

    /// Repetition penalty
    pub repeat_penalty: f32,

    /// Random seed
    pub seed: i64,

    /// Prompt processing batch size
    pub batch: usize,

    /// Number of prompt tokens kept when the context is rotated
    pub n_keep: usize,

    /// Keep generating past the end-of-sequence token
    pub ignore_eos: bool,

    /// Prepend the prompt to every generated sample
    pub echo: bool,

    /// Use half precision for the KV cache
    pub f16: bool,
}

impl GenerationParams {
    /// Defaults used when a model has no stored profile.
    pub fn fallback() -> Self {
        Self {
            top_p: 0.7,
            top_k: 80,
            max_tokens: 512,
            temperature: 0.9,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_values() {
        let params = GenerationParams::fallback();
        assert_eq!(params.top_p, 0.7);
        assert_eq!(params.top_k, 80);
        assert_eq!(params.max_tokens, 512);
        assert_eq!(params.temperature, 0.9);
        assert_eq!(params.seed, 0);
        assert!(!params.echo);
    }

    #[test]
    fn test_missing_keys_are_zero() {
        let params: GenerationParams = serde_json::from_str(r#"{"top_k": 40}"#).unwrap();
        assert_eq!(params.top_k, 40);
        assert_eq!(params.temperature, 0.0);
        assert!(!params.f16);
    }
}
