//! Plinth - Minimal production-ready HTTP service scaffold
//!
//! Entry point for the Plinth server.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use clap::{Parser, Subcommand};
use plinth::server::{init_metrics, init_tracing, route_table, App};
use plinth::{Config, Error, Profile, Result};

/// Plinth - Minimal production-ready HTTP service scaffold
#[derive(Parser, Debug)]
#[command(name = "plinth")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Configuration profile (development, testing, production)
    #[arg(long, env = "PLINTH_PROFILE")]
    profile: Option<String>,

    /// Host address to bind to
    #[arg(long, env = "PLINTH_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PLINTH_PORT")]
    port: Option<u16>,

    /// Platform-injected port (Render, Heroku); forces 0.0.0.0 binding
    #[arg(long = "platform-port", env = "PORT", hide = true)]
    platform_port: Option<u16>,

    /// Number of runtime worker threads
    #[arg(short, long, env = "PLINTH_WORKERS")]
    workers: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, env = "PLINTH_TIMEOUT")]
    timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PLINTH_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging output
    ///
    /// The env value is truthy unless empty, "0", "false", "f", "no",
    /// "n", or "off", so platform-injected values like "1" work.
    #[arg(
        long,
        env = "PLINTH_LOG_JSON",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    log_json: bool,

    /// Secret key for signing cookies/tokens
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Directory holding the optional instance config file
    #[arg(long, env = "PLINTH_INSTANCE_DIR")]
    instance_dir: Option<std::path::PathBuf>,

    /// Directory served under /static
    #[arg(long, env = "PLINTH_STATIC_DIR")]
    static_dir: Option<std::path::PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the server (default)
    Serve,
    /// List registered routes and exit
    Routes,
}

/// Resolve the full configuration.
///
/// Override order, later wins: defaults, profile, instance file,
/// environment/CLI arguments.
fn build_config(cli: &Cli) -> Result<Config> {
    let profile = cli
        .profile
        .as_deref()
        .map(str::parse::<Profile>)
        .transpose()?;

    let instance_file = cli.instance_dir.as_ref().map(|dir| dir.join("config.json"));

    let mut config = Config::build(profile, instance_file.as_deref())?;

    if let Some(host) = &cli.host {
        config.host.clone_from(host);
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    config.platform_port = cli.platform_port.or(config.platform_port);
    if let Some(workers) = cli.workers {
        config.worker_threads = workers;
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level.clone_from(log_level);
    }
    if cli.log_json {
        config.log_json = true;
    }
    if let Some(secret_key) = &cli.secret_key {
        config.secret_key.clone_from(secret_key);
    }
    if let Some(instance_dir) = &cli.instance_dir {
        config.instance_dir.clone_from(instance_dir);
    }
    if let Some(static_dir) = &cli.static_dir {
        config.static_dir.clone_from(static_dir);
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Routes) => {
            for (method, path) in route_table() {
                println!("{method:<6} {path}");
            }
            Ok(())
        }
        Some(Command::Serve) | None => {
            let config = build_config(&cli)?;

            init_tracing(&config.log_level, config.log_json);

            tracing::info!("Plinth v{} starting...", env!("CARGO_PKG_VERSION"));
            tracing::debug!(?config, "Configuration loaded");

            if config.profile == Profile::Production
                && config.secret_key == "dev-secret-change-me"
            {
                tracing::warn!("Running in production with the default secret key");
            }

            tracing::info!(
                "Server will bind to {}, {} worker threads",
                config.bind_addr(),
                config.worker_threads
            );

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(config.worker_threads)
                .enable_all()
                .build()
                .map_err(Error::from)?;

            runtime.block_on(async {
                init_metrics();

                let app = App::new(config);
                app.run().await
            })
        }
    }
}
