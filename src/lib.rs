//! promptd - OpenAI-compatible front end for local LLM inference
//!
//! promptd resolves each API request against named YAML profiles, runs
//! the inference engine the requested number of times and cleans up the
//! generated text before answering in the OpenAI response format.
//!
//! # Architecture
//!
//! - **config**: profiles, the shared profile store, server settings
//! - **pipeline**: model selection, config layering, templating,
//!   post-processing and response assembly
//! - **model** / **engine**: the collaborator seams (model directory,
//!   templates, inference) with filesystem and llama.cpp implementations
//! - **server** / **cli**: HTTP surface and command line
//!
//! # Example
//!
//! ```bash
//! # Serve every model in ./models, forcing 8 threads
//! promptd serve --models-path ./models --threads 8
//!
//! # Show models and profiles
//! promptd list --models-path ./models
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod openai;
pub mod pipeline;
pub mod server;

// Re-export key types
pub use config::{GenerationParams, Profile, ProfileStore, ServerConfig};
pub use engine::{InferenceEngine, Predictor};
pub use error::{Error, Result};
pub use pipeline::{Mode, Pipeline};
