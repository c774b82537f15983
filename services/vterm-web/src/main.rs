//! Virtual terminal web process

use std::path::PathBuf;

use clap::Parser;
use figment::{providers::Serialized, Figment};
use vterm_service::prelude::*;
use vterm_web::{build_renderer, routes, WebSettings, WebState};

/// Virtual terminal web front end
#[derive(Debug, Parser)]
#[command(name = "vterm-web", version, about, long_about = None)]
struct Args {
    /// Server port to listen on [default: 4000]
    #[arg(long)]
    port: Option<u16>,

    /// Application environment {development|production|maintenance} [default: development]
    #[arg(long)]
    env: Option<String>,

    /// URL to the API [default: http://localhost:4001]
    #[arg(long)]
    api: Option<String>,

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
        if let Some(ref api) = self.api {
            figment = figment.merge(Serialized::global("app.api_url", api));
        }
        figment
    }
}

fn load_config(args: &Args) -> Result<Config<WebSettings>> {
    let defaults = Config::<WebSettings>::with_service(ServiceConfig::new("vterm-web", 4000));

    let figment = match args.config {
        Some(ref path) => Config::figment_from(defaults, path),
        None => Config::figment(defaults),
    };

    Config::extract(args.merge_into(figment))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;

    init_tracing(&config);

    let renderer = build_renderer(&config)?;
    let info = ServiceInfo::new(config.service.name.clone()).with_version(env!("CARGO_PKG_VERSION"));
    let app = routes(WebState::new(renderer, info));

    if let Err(e) = Server::new(config).serve(app).await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "vterm-web",
            "--port",
            "4100",
            "--api",
            "https://api.example.com",
            "--config",
            "/nonexistent/vterm-web.toml",
        ]);

        let config = load_config(&args).unwrap();
        assert_eq!(config.service.name, "vterm-web");
        assert_eq!(config.service.port, 4100);
        assert_eq!(config.app.api_url, "https://api.example.com");
        assert_eq!(config.app.css_version, "1");
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = Args::parse_from(["vterm-web", "--config", "/nonexistent/vterm-web.toml"]);

        let config = load_config(&args).unwrap();
        assert_eq!(config.service.timeout_secs, 30);
        assert_eq!(config.service.read_timeout_secs, 10);
        assert!(config.middleware.cors.is_none());
    }
}
