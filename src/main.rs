//! Opal Tools Server Entry Point
//!
//! Initializes logging, loads configuration, and serves the registered tools
//! over HTTP.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use opal_tools_server::core::{Config, HttpTransport, ToolServer, config::LoggingConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging first so configuration diagnostics are emitted
    init_logging(&LoggingConfig::from_env());

    // Load configuration from environment
    let config = Config::from_env()?;
    config.validate()?;

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Starting transport: {}", config.transport.description());

    let server = ToolServer::new(config.clone())?;
    HttpTransport::new(config.transport).run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(logging: &LoggingConfig) {
    let level = match logging.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if logging.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
