//! Unitary MCP Server
//!
//! MCP server (protocol 2025-11-25) over line-delimited stdio.
//!
//! Tools:
//! - list_categories: Categories grouped for menus
//! - list_units: Units of a category
//! - convert: Convert a value between two units
//! - refresh_rates: Fetch exchange rates from the configured source
//! - toggle_favorite / list_favorites / clear_favorites: Favorite pairs
//!
//! Configuration comes from `UNITARY_*` environment variables, see [`config`].

mod config;
mod server;

use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use unitary::{CurrencyConverter, Engine, RateSource};
use crate::config::Config;
use crate::server::{McpError, McpRequest, McpResponse, Server, PARSE_ERROR, PROTOCOL_VERSION, SERVER_VERSION};

#[tokio::main]
async fn main() {
    // stdout carries the protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = Config::from_env();

    let mut currency = CurrencyConverter::new();
    if let Some(max_age) = config.max_age {
        currency = currency.with_max_age(max_age);
    }
    let engine = match Engine::new() {
        Ok(engine) => engine.with_currency_converter(Arc::new(currency)),
        Err(e) => {
            error!(error = %e, "unit tables failed validation");
            std::process::exit(1);
        }
    };

    let source = match config.rate_source() {
        Ok(source) => source,
        Err(e) => {
            warn!(error = %e, "rate source unavailable; currency stays on placeholder rates");
            None
        }
    };

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, locale = %config.locale_tag, "Unitary MCP Server started");

    match &source {
        Some(source) => {
            info!(source = %source.describe(), "refreshing exchange rates in the background");
            let handle = engine.spawn_refresh(Arc::clone(source));
            tokio::spawn(async move {
                if let Err(e) = handle.await {
                    warn!(error = %e, "background rate refresh did not finish");
                }
            });
        }
        None => info!("no rate source configured; currency uses placeholder rates"),
    }

    let server = Server::new(engine, source, config.locale());
    serve(&server).await;

    info!("Server shutting down");
}

async fn serve(server: &Server) {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    info!("Server ready, waiting for requests...");

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("Client disconnected (EOF)");
                break;
            }
            Err(e) => {
                error!(error = %e, "error reading input");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(bytes = line.len(), "received");

        let response = match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => {
                debug!(method = %request.method, "processing");
                let response = server.handle_request(&request).await;

                // Notifications (no id) should NOT receive a response
                if request.id.is_none() {
                    debug!(method = %request.method, "notification processed");
                    continue;
                }
                response
            }
            Err(e) => {
                warn!(error = %e, "error parsing request");
                McpResponse::failure(None, McpError::new(PARSE_ERROR, format!("Parse error: {}", e)))
            }
        };

        let response_json = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "error encoding response");
                continue;
            }
        };

        if let Err(e) = write_line(&mut stdout, &response_json).await {
            error!(error = %e, "error writing response");
            break;
        }
    }
}

async fn write_line(stdout: &mut io::Stdout, line: &str) -> std::io::Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
