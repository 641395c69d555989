use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promptd::cli::{Cli, Commands};
use promptd::config::ForcedParams;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.debug {
        "promptd=debug,tower_http=debug"
    } else {
        "promptd=info,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve {
            address,
            profiles,
            threads,
            context_size,
            f16,
            engine_bin,
            no_cors,
        } => {
            let forced = ForcedParams {
                threads,
                context_size,
                f16,
            };
            let mut config = profiles.server_config(address, forced, cli.debug);
            config.cors_enabled = !no_cors;
            promptd::cli::serve(config, engine_bin).await?;
        }
        Commands::List { profiles } => {
            let config = profiles.server_config(String::new(), ForcedParams::default(), cli.debug);
            promptd::cli::list(config).await?;
        }
    }

    Ok(())
}
