use std::path::PathBuf;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tuicher_config::Config;

pub mod bridge;
pub mod controller;
pub mod profile;
pub mod search;
pub mod window;

use self::controller::AppController;
use self::profile::ProfileStore;

/// Quick launcher driven over JSON lines on stdin/stdout
#[derive(Parser, Debug)]
#[command(name = "tuicher", version)]
struct Cli {
    /// Profile to load from the user config dir
    #[arg(long, default_value = "main")]
    profile: String,

    /// Load this config file instead of a profile
    #[arg(long)]
    config: Option<PathBuf>,

    /// Create a profile cloned from main and exit
    #[arg(long, value_name = "NAME", conflicts_with = "config")]
    new_profile: Option<String>,

    /// Print the theme stylesheet and exit
    #[arg(long)]
    print_css: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    init_logging(cli.json_logs);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => {
            let store = ProfileStore::from_env()?;
            store.init()?;

            if let Some(name) = &cli.new_profile {
                let path = store.add_from_main(name)?;
                println!("{}", path.display());
                return Ok(());
            }

            store.load(&cli.profile)?
        }
    };

    if cli.print_css {
        println!("{}", config.theme.css());
        return Ok(());
    }

    let mut app = AppController::new(config);
    let mut tasks = app.spawn_tasks();

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("Task exited"),
                Some(Ok(Err(e))) => tracing::error!("Task failed: {e:#}"),
                Some(Err(e)) => tracing::error!("Task panicked: {e}"),
                None => {}
            }
        }
    }

    app.shutdown();
    tasks.shutdown().await;

    Ok(())
}

/// Logs go to stderr, stdout carries the view protocol
fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
