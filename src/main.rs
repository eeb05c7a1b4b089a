//! # Account Manager Bot Main Entry Point
//!
//! Initializes logging, loads configuration, builds the spreadsheet
//! client and owner registry, starts the reminder service, and runs the
//! Telegram bot alongside the health check server.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bot;
mod catalog;
mod config;
mod domain;
mod owner;
mod services;
mod store;
mod utils;

use crate::bot::handlers::BotHandler;
use crate::bot::AppContext;
use crate::config::Config;
use crate::domain::session::Sessions;
use crate::owner::FileOwnerRegistry;
use crate::services::health::HealthService;
use crate::services::reminder::ReminderService;
use crate::store::sheets::SheetsClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_manager_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Account Manager Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Spreadsheet: {}, HTTP Port: {}",
        config.spreadsheet_id, config.http_port
    );

    // Build the store client and shared context
    let sheets = SheetsClient::new(&config.spreadsheet_id, &config.gsheet_creds_json)?;
    let ctx = Arc::new(AppContext {
        store: Arc::new(sheets),
        owner: Arc::new(FileOwnerRegistry::new(&config.owner_file)),
        sessions: Arc::new(Sessions::new(config.wizard_timeout_secs)),
        monthly_min_days: config.monthly_min_days,
    });

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(ctx.clone());

    // Initialize and start reminder service
    info!("Initializing reminder service...");
    let mut reminder_service = match ReminderService::new(bot.clone(), ctx.clone()).await {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Failed to create reminder service: {}", e);
            return Err(anyhow::anyhow!("Failed to create reminder service: {}", e));
        }
    };

    if let Err(e) = reminder_service.start().await {
        tracing::error!("Failed to start reminder service: {}", e);
    } else {
        info!("Reminder service started successfully");
    }

    // Initialize health service
    let health_service = HealthService::new(reminder_service.last_pass());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result = health_task => {
            if let Err(e) = result {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    // Stop reminder service on shutdown
    if let Err(e) = reminder_service.stop().await {
        tracing::warn!("Error stopping reminder service: {}", e);
    }

    info!("Application stopped");
    Ok(())
}
