use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use dosa_server::config::AppConfig;
use dosa_server::startup;

#[derive(Parser, Debug)]
#[command(name = "dosa-server")]
#[command(about = "Customer, menu item and order records over SQLite")]
struct Args {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config file)
    #[arg(long)]
    host: Option<String>,

    /// Database URL (overrides config file)
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Drop and recreate all tables, then bulk-load an orders document
    Load {
        #[arg(default_value = "example_orders.json")]
        file: PathBuf,
    },
}

fn load_config(args: &Args) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut app_config =
        if args.config == "config.yaml" && !std::path::Path::new("config.yaml").exists() {
            tracing::info!("no config.yaml found, using defaults");
            AppConfig::default_config()
        } else {
            AppConfig::load_from_file(&args.config)
                .map_err(|e| format!("Failed to load configuration: {}", e))?
        };

    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    if let Some(host) = &args.host {
        app_config.server.host = host.clone();
    }
    if let Some(url) = &args.database_url {
        app_config.database.url = url.clone();
    }

    Ok(app_config)
}

async fn serve(app_config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let backend = startup::setup_backend(&app_config).await?;

    let host: std::net::IpAddr = app_config.server.host.parse().unwrap_or_else(|_| {
        tracing::warn!(
            host = %app_config.server.host,
            "invalid host address, using 127.0.0.1"
        );
        [127, 0, 0, 1].into()
    });
    let addr = SocketAddr::from((host, app_config.server.port));

    let app = startup::build_router(backend, Arc::new(app_config));

    tracing::info!(%addr, "dosa-server listening");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt::init();

    let app_config = load_config(&args)?;
    tracing::info!(
        database = %app_config.database.url,
        foreign_keys = app_config.database.foreign_keys,
        strict_writes = app_config.api.strict_writes,
        "configuration loaded"
    );

    match args.command {
        Some(Command::Load { file }) => {
            let backend = startup::setup_backend(&app_config).await?;
            let summary = startup::run_bulk_load(backend.as_ref(), &file).await?;
            tracing::info!(
                file = %file.display(),
                customers = summary.customers,
                items = summary.items,
                orders = summary.orders,
                "database initialized"
            );
            Ok(())
        }
        Some(Command::Serve) | None => serve(app_config).await,
    }
}
