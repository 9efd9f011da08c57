//! tgnotify - Telegram notification backend for cluster events.
//!
//! CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use tgnotify::{Commands, Config, ConsoleNotifier, Notifier, TelegramNotifier};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("tgnotify=debug,info")
    } else {
        EnvFilter::new("tgnotify=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let notifier = match build_notifier(&config) {
        Ok(n) => n,
        Err(code) => return code,
    };

    let result = match &config.command {
        Commands::Message(args) => notifier.send_message(&args.text).await,
        Commands::Event(args) => match args.load_event() {
            Ok(event) => notifier.send_event(&event).await,
            Err(e) => {
                error!("Failed to load event: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    match result {
        Ok(()) => {
            info!("Notification delivered via {}", notifier.name());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to send notification: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_notifier(config: &Config) -> Result<Box<dyn Notifier>, ExitCode> {
    if config.dry_run {
        return Ok(Box::new(ConsoleNotifier::new(config.mode)));
    }

    match config.notifier_config() {
        Some(notifier_config) => Ok(Box::new(TelegramNotifier::new(notifier_config))),
        None => {
            error!(
                "Telegram delivery requires TGNOTIFY_TELEGRAM_TOKEN and TGNOTIFY_TELEGRAM_CHAT_ID (or --token/--chat-id)"
            );
            Err(ExitCode::FAILURE)
        }
    }
}
