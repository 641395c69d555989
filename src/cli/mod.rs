//! CLI commands

mod list;
mod serve;

pub use list::list;
pub use serve::serve;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ForcedParams, ProfileStore, ServerConfig};

/// promptd - OpenAI-compatible front end for local LLM inference
#[derive(Parser)]
#[command(name = "promptd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (request and response bodies)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Address to bind to
        #[arg(long, default_value = "0.0.0.0:8080")]
        address: String,

        #[command(flatten)]
        profiles: ProfileArgs,

        /// Thread count forced on every request (0 = per profile)
        #[arg(long, short, default_value = "0")]
        threads: usize,

        /// Context size forced on every request (0 = per profile)
        #[arg(long, default_value = "0")]
        context_size: usize,

        /// Force half precision on every request
        #[arg(long)]
        f16: bool,

        /// llama.cpp-compatible binary used for inference
        #[arg(long, env = "LLAMA_BIN", default_value = "llama-cli")]
        engine_bin: PathBuf,

        /// Disable CORS headers
        #[arg(long)]
        no_cors: bool,
    },

    /// List the models and profiles the server would advertise
    List {
        #[command(flatten)]
        profiles: ProfileArgs,
    },
}

/// Where models and profiles are read from
#[derive(Args, Clone)]
pub struct ProfileArgs {
    /// Directory holding models, templates and profile files
    #[arg(long, env = "MODELS_PATH", default_value = "./models")]
    pub models_path: PathBuf,

    /// File holding a list of profiles, loaded before the directory scan
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,
}

impl ProfileArgs {
    /// Server configuration for these paths
    pub fn server_config(&self, address: String, forced: ForcedParams, debug: bool) -> ServerConfig {
        ServerConfig {
            address,
            models_path: self.models_path.clone(),
            config_file: self.config_file.clone(),
            forced,
            debug,
            ..Default::default()
        }
    }
}

/// Build the profile store from the config file and the models directory.
pub fn load_profiles(config: &ServerConfig) -> anyhow::Result<ProfileStore> {
    let store = ProfileStore::new();

    if let Some(ref file) = config.config_file {
        let count = store.load_list(file)?;
        tracing::info!("Loaded {} profiles from {}", count, file.display());
    }

    if config.models_path.is_dir() {
        let count = store.load_dir(&config.models_path)?;
        tracing::info!(
            "Loaded {} profiles from {}",
            count,
            config.models_path.display()
        );
    } else {
        tracing::warn!(
            "Models path {} does not exist",
            config.models_path.display()
        );
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "promptd",
            "--debug",
            "serve",
            "--models-path",
            "/srv/models",
            "--threads",
            "6",
            "--f16",
        ])
        .unwrap();
        assert!(cli.debug);
        match cli.command {
            Commands::Serve {
                profiles,
                threads,
                f16,
                context_size,
                ..
            } => {
                assert_eq!(profiles.models_path, PathBuf::from("/srv/models"));
                assert_eq!(threads, 6);
                assert_eq!(context_size, 0);
                assert!(f16);
            }
            Commands::List { .. } => panic!("expected serve"),
        }
    }

    #[test]
    fn test_load_profiles_order() {
        let dir = tempfile::tempdir().unwrap();
        let models = dir.path().join("models");
        std::fs::create_dir(&models).unwrap();
        std::fs::write(models.join("gpt.yaml"), "name: gpt\nmodel: from-dir.bin\n").unwrap();
        let list = dir.path().join("profiles.yaml");
        std::fs::write(
            &list,
            "configs:\n  - name: gpt\n    model: from-list.bin\n  - name: alpaca\n    model: alpaca.bin\n",
        )
        .unwrap();

        let config = ServerConfig {
            models_path: models,
            config_file: Some(list),
            ..Default::default()
        };
        let store = load_profiles(&config).unwrap();
        assert_eq!(store.names(), vec!["alpaca", "gpt"]);
        // the directory scan runs last
        assert_eq!(store.get("gpt").unwrap().model, "from-dir.bin");
    }

    #[test]
    fn test_load_profiles_missing_models_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            models_path: dir.path().join("missing"),
            ..Default::default()
        };
        assert!(load_profiles(&config).unwrap().is_empty());
    }
}
