//! Postee UI
//!
//! Command-line entry point:
//! - Serve the dashboard in history mode
//! - Print the active route table
//! - Resolve a URL against the route table
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use postee_ui::api::{serve, AppState};
use postee_ui::app::{bootstrap, router_from_config, SharedState};
use postee_ui::config::{generate_default_config, Config};
use postee_ui::router::{Revision, RouteTarget};

#[derive(Parser)]
#[command(name = "postee-ui")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Route table and history-mode server for the Postee dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Route table revision, overrides the config file
    #[arg(long, value_enum, global = true)]
    pub revision: Option<Revision>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the UI server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory holding the dashboard bundle
        #[arg(short, long)]
        web_root: Option<PathBuf>,
    },

    /// Print the active route table
    Routes,

    /// Resolve a URL and print the result as JSON
    Resolve {
        /// Path or absolute URL, e.g. /plugin/slack
        url: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {:?}", path))?,
        None => Config::load_default().context("loading config")?,
    };
    if let Some(revision) = cli.revision {
        config.router.revision = revision;
    }

    match cli.command {
        Commands::Serve {
            host,
            port,
            web_root,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(web_root) = web_root {
                config.server.web_root = web_root;
            }
            run_server(config).await?;
        }

        Commands::Routes => {
            let router = router_from_config(&config.router).context("building route table")?;

            println!("Revision: {}", config.router.revision);
            println!("{:<15} {:<20} TARGET", "NAME", "PATH");
            println!("{}", "-".repeat(60));
            for route in router.routes() {
                let target = match &route.target {
                    RouteTarget::Component(view) => view.component_name().to_string(),
                    RouteTarget::Redirect(to) => format!("-> {}", to),
                };
                println!("{:<15} {:<20} {}", route.name, route.path, target);
            }
        }

        Commands::Resolve { url } => {
            let router = router_from_config(&config.router).context("building route table")?;
            let resolution = router
                .resolve(&url)
                .with_context(|| format!("resolving {}", url))?;
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing config to {:?}", path))?;
                    eprintln!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    postee_ui::logging::init(&config.logging);

    tracing::info!("Starting Postee UI v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Web root: {:?}", config.server.web_root);
    tracing::info!("Route revision: {}", config.router.revision);

    let app = bootstrap(&config, SharedState::new()).context("bootstrapping application")?;
    let state = AppState::new(app, config.router.revision, config.server.clone());

    serve(state, &config.server).await?;

    tracing::info!("Postee UI stopped");
    Ok(())
}
