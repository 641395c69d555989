//! Configuration system for promptd
//!
//! Profiles are YAML records naming a model and its generation defaults.
//! They live in a [`ProfileStore`] shared by all requests.

mod generation;
mod profile;
mod server;
mod store;

pub use generation::GenerationParams;
pub use profile::{Profile, TemplateConfig};
pub use server::{ForcedParams, ServerConfig};
pub use store::ProfileStore;
