//! List models command

use anyhow::Result;

use super::load_profiles;
use crate::config::ServerConfig;
use crate::model::{ModelDir, ModelLister};
use crate::pipeline::model_list;

/// Print the models and profiles served from `config.models_path`
pub async fn list(config: ServerConfig) -> Result<()> {
    if !config.models_path.exists() {
        println!(
            "No models directory found at: {}",
            config.models_path.display()
        );
        println!("\nSet MODELS_PATH or pass --models-path.");
        return Ok(());
    }

    let store = load_profiles(&config)?;
    let models = ModelDir::new(&config.models_path).list_models()?;
    let listing = model_list(models, store.names());

    println!("Models in {}:\n", config.models_path.display());
    if listing.data.is_empty() {
        println!("  No models found.");
        return Ok(());
    }

    for model in &listing.data {
        match store.get(&model.id) {
            Some(profile) if !profile.model.is_empty() && profile.model != model.id => {
                println!("  {} (profile -> {})", model.id, profile.model)
            }
            Some(_) => println!("  {} (profile)", model.id),
            None => println!("  {}", model.id),
        }
    }

    Ok(())
}
