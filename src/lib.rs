//! tgnotify - Telegram notification backend for cluster events.
//!
//! This library turns structured cluster events into Telegram messages:
//! - Formatting events as short summaries or long field dumps
//! - Delivering text through the Telegram Bot API
//! - Exposing both behind the [`Notifier`] trait so a dispatcher can mix backends
//!
//! # Example
//!
//! ```no_run
//! use tgnotify::{Event, NotifType, Notifier, NotifierConfig, TelegramNotifier};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = NotifierConfig::new("123456:ABC-DEF", "-1001234567890", NotifType::Long);
//!     let notifier = TelegramNotifier::new(config);
//!     let event = Event {
//!         title: "Pod Created".to_string(),
//!         kind: "Pod".to_string(),
//!         name: "nginx-1".to_string(),
//!         ..Default::default()
//!     };
//!     notifier.send_event(&event).await.unwrap();
//! }
//! ```

pub mod config;
pub mod notify;
pub mod types;

pub use config::{Commands, Config, NotifierConfig};
pub use notify::{
    format_message, format_short_message, ConsoleNotifier, Notifier, TelegramNotifier,
};
pub use types::{ChatId, Event, EventType, NotifType, NotifyError, Result};
