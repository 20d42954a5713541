use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use memory_mcp::config::{load_config, Config, ConfigLoader};
use memory_mcp::mcp::McpServer;
use memory_mcp::MemoryScanner;

#[tokio::main]
async fn main() -> Result<()> {
    let loader = ConfigLoader::from_env();
    let (config, config_problem) = match load_config(&loader) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // stdout carries responses, so logs go to stderr
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!("Starting Memory-MCP server v{}", memory_mcp::VERSION);
    if let Some(problem) = config_problem {
        warn!(
            "Ignoring configuration {}: {}",
            loader.path().display(),
            problem
        );
    }
    info!("Architecture: {}", std::env::consts::ARCH);

    let scanner = Arc::new(MemoryScanner::new().with_limits(config.scanner.limits()));
    let server = Arc::new(
        McpServer::new(scanner).with_default_max_count(config.scanner.default_max_count),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    info!("Memory-MCP ready. Press Ctrl+C to shutdown.");
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read request")?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        };

        let Some(line) = line else {
            info!("Input closed");
            break;
        };

        let handler = Arc::clone(&server);
        let response = match tokio::task::spawn_blocking(move || handler.handle_line(&line)).await {
            Ok(response) => response,
            Err(e) => {
                error!("Request handler failed: {}", e);
                continue;
            }
        };

        if let Some(mut response) = response {
            response.push('\n');
            stdout.write_all(response.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    info!("Shutting down Memory-MCP server");
    Ok(())
}
