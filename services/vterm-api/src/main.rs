//! Virtual terminal API process

use std::path::PathBuf;

use clap::Parser;
use figment::{providers::Serialized, Figment};
use vterm_api::{default_config, routes, ApiState};
use vterm_service::prelude::*;

/// Virtual terminal payment API
#[derive(Debug, Parser)]
#[command(name = "vterm-api", version, about, long_about = None)]
struct Args {
    /// Server port to listen on [default: 4001]
    #[arg(long)]
    port: Option<u16>,

    /// Application environment {development|production|maintenance} [default: development]
    #[arg(long)]
    env: Option<String>,

    /// Read configuration from this file instead of the standard locations
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Args {
    /// Layer the flags that were given on top of `figment`.
    fn merge_into(&self, mut figment: Figment) -> Figment {
        if let Some(port) = self.port {
            figment = figment.merge(Serialized::global("service.port", port));
        }
        if let Some(ref env) = self.env {
            figment = figment.merge(Serialized::global("service.environment", env));
        }
        figment
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let figment = match args.config {
        Some(ref path) => Config::figment_from(default_config(), path),
        None => Config::figment(default_config()),
    };

    Config::extract(args.merge_into(figment))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;

    init_tracing(&config);

    let state = ApiState {
        info: ServiceInfo::new(config.service.name.clone()).with_version(env!("CARGO_PKG_VERSION")),
    };

    if let Err(e) = Server::new(config).serve(routes(state)).await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
