use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use fyc_registry::{
    config::{Config, LogFormat},
    database::Database,
    services::Registry,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "fyc-registry")]
#[command(version)]
#[command(about = "Carpark, zone and camera registry with reference validation")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Database URL (overrides config file)
    #[arg(short = 'd', long, value_name = "URL")]
    database_url: Option<String>,

    /// Log level (overrides config file)
    #[arg(short = 'v', long)]
    log_level: Option<String>,
}

fn init_logging(format: LogFormat, level: &str) {
    let log_filter = if level == "trace" {
        format!("fyc_registry={},tower_http=trace", level)
    } else {
        format!("fyc_registry={}", level)
    };

    let fmt_layer = match format {
        LogFormat::Text => tracing_subscriber::fmt::layer().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_from_file(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_logging(config.logging.format, &config.logging.level);

    info!("Starting fyc-registry v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from: {}", cli.config);

    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(database_url) = cli.database_url {
        config.database.url = database_url;
    }

    info!("Using database: {}", config.database.url);

    let database = Database::new(&config.database).await?;
    database.migrate().await?;
    info!("Database connection established and migrations applied");

    let registry = Registry::new(database.connection(), &config);

    // Traffic is accepted even when a set could not be loaded; it stays degraded until refreshed.
    match registry.cache.load_all().await {
        Ok(()) => info!("Reference cache loaded"),
        Err(e) => warn!("Reference cache started degraded: {}", e),
    }

    let web_server = WebServer::new(&config, database, registry)?;
    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve_with_shutdown().await?;

    info!("Shutdown complete");
    Ok(())
}
