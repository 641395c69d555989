//! HTTP server command

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use super::load_profiles;
use crate::config::ServerConfig;
use crate::engine::CommandEngine;
use crate::model::ModelDir;
use crate::pipeline::Pipeline;
use crate::server;

/// Start the API server
pub async fn serve(config: ServerConfig, engine_bin: PathBuf) -> Result<()> {
    let store = Arc::new(load_profiles(&config)?);

    let models = Arc::new(ModelDir::new(&config.models_path));
    let engine = Arc::new(CommandEngine::new(engine_bin, &config.models_path));
    let pipeline = Arc::new(Pipeline::new(
        store,
        models.clone(),
        models,
        engine,
        config.forced,
    ));

    tracing::info!("Starting server at http://{}", config.addr());
    if config.forced != Default::default() {
        tracing::info!("Forcing on every request: {:?}", config.forced);
    }

    server::start(pipeline, config).await?;

    Ok(())
}
