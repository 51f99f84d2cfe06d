//! Shelf Gateway - upload and listing gateway for object storage

use clap::Parser;
use shelf_gateway::{server, GatewayConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "shelf-gateway")]
#[command(about = "Upload and listing gateway for object storage")]
#[command(version)]
struct Args {
    /// TOML configuration file; flags below override it
    #[arg(short, long, env = "SHELF_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind to [default: 0.0.0.0]
    #[arg(short = 'H', long, env = "SHELF_HOST")]
    host: Option<String>,

    /// Port to listen on [default: 8787]
    #[arg(short, long, env = "SHELF_PORT")]
    port: Option<u16>,

    /// Base of public object URLs
    #[arg(long, env = "SHELF_BASE_URL")]
    base_url: Option<String>,

    /// Directory for the local object store [default: ./data]
    #[arg(long, env = "SHELF_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Maximum upload body size in bytes [default: 1048576]
    #[arg(long, env = "SHELF_MAX_UPLOAD_SIZE")]
    max_upload_size: Option<usize>,

    /// Use in-memory storage (for testing, data will not persist)
    #[arg(long, env = "SHELF_MEMORY_STORE")]
    memory_store: bool,

    /// Enable debug logging
    #[arg(short, long, env = "SHELF_DEBUG")]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "SHELF_LOG_JSON")]
    log_json: bool,
}

impl Args {
    /// Merge the optional config file with explicit flags
    fn into_config(self) -> anyhow::Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::from_file(path)?,
            None => GatewayConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }
        if let Some(max_upload_size) = self.max_upload_size {
            config.max_upload_size = max_upload_size;
        }
        if self.memory_store {
            config.use_memory_store = true;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Parse arguments
    let args = Args::parse();

    // Setup logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("shelf_gateway={0},shelf_store={0},tower_http=debug", log_level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if args.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let config = args.into_config()?;

    tracing::info!("Starting Shelf Gateway on {}", config.bind_addr());
    tracing::info!("Public URL base: {}", config.base_url);

    if config.use_memory_store {
        tracing::warn!("⚠️  Using in-memory storage - data will NOT persist!");
    } else {
        tracing::info!("Data directory: {}", config.data_dir.display());
    }

    server::run_server_with_shutdown(config, server::ctrl_c()).await
}
