use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::io;
use std::sync::Arc;
use tracing::{info, warn};
mod api;
use crate::api::{board::board_config, health::health_config, validation};
mod board;
mod cli;
mod config;
mod domain;
mod email;
mod form;
mod shutdown;
mod store;
mod telemetry;
use crate::board::JobBoard;
use crate::cli::{Cli, Command};
use crate::email::EmailClient;
use crate::shutdown::ShutdownCoordinator;
use crate::store::HttpJobStore;

fn startup_error(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment, then let flags override it
    let mut config = config::Config::from_env().map_err(startup_error)?;
    cli.apply(&mut config);

    let command = cli.command.clone().unwrap_or(Command::Serve);
    telemetry::init(&config.log_dir, matches!(command, Command::Serve))?;

    let store = HttpJobStore::new(&config.store_url, config.request_timeout).map_err(startup_error)?;
    let email = EmailClient::new(&config.email_url, config.request_timeout).map_err(startup_error)?;
    let board = web::Data::new(JobBoard::new(
        Arc::new(store),
        Arc::new(email),
        config.roster.clone(),
    ));

    if let Command::List { assignees, statuses } = command {
        let filter = cli::list_filter(&assignees, &statuses).map_err(startup_error)?;
        return cli::run_list(&board, filter).await.map_err(startup_error);
    }

    info!("Starting job-board application");
    info!("Configuration loaded successfully:");
    info!("  - Job store: {}", config.store_url);
    info!("  - Email endpoint: {}", config.email_url);
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Request timeout: {:?}", config.request_timeout);
    info!("  - Team members: {}", config.roster.members().len());

    // Initial load; the board stays usable and shows the failure if the store is down
    if let Err(e) = board.reload().await {
        warn!("Initial job list load failed: {}", e);
    }

    let max_payload_size = config.max_payload_size;
    let server = HttpServer::new(move || {
        // Configure payload size limits globally
        let payload_config = web::PayloadConfig::default().limit(max_payload_size);

        App::new()
            .app_data(board.clone())
            .app_data(payload_config)
            .app_data(validation::json_config(max_payload_size)) // Global JSON body config
            .configure(health_config) // Health check endpoints
            .configure(board_config)
    });

    info!("Server starting on http://{}:{}", config.bind_addr, config.port);

    let server = server.bind((config.bind_addr.as_str(), config.port))?.run();

    // Get server handle for graceful shutdown
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task)
        .wait_for_shutdown()
        .await
}
