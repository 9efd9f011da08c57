//! Notification backends.
//!
//! This module handles:
//! - Event formatting (short and long Markdown messages)
//! - Telegram Bot API delivery
//! - Colored console output for dry runs
//!
//! The [`Notifier`] trait is the seam the enclosing dispatcher works against;
//! each backend is one implementation of it.

pub mod console;
pub mod format;
pub mod telegram;

pub use console::ConsoleNotifier;
pub use format::{format_message, format_short_message};
pub use telegram::TelegramNotifier;

use crate::types::{Event, Result};

/// A notification backend.
///
/// Implementations must be `Send + Sync` so one instance can serve
/// concurrent sends.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Send raw Markdown text.
    async fn send_message(&self, text: &str) -> Result<()>;
    /// Format an event with the backend's verbosity and send it.
    async fn send_event(&self, event: &Event) -> Result<()>;
    /// Backend name (e.g. `"telegram"`).
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NotifType;
    use std::sync::{Arc, Mutex};

    /// Collects sent text instead of delivering it.
    struct MockNotifier {
        mode: NotifType,
        sent: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl Notifier for MockNotifier {
        async fn send_message(&self, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }

        async fn send_event(&self, event: &Event) -> Result<()> {
            self.send_message(&format_message(event, self.mode)).await
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    #[tokio::test]
    async fn test_backends_behind_trait_object() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let notifiers: Vec<Box<dyn Notifier>> = vec![
            Box::new(MockNotifier {
                mode: NotifType::Long,
                sent: sent.clone(),
            }),
            Box::new(ConsoleNotifier::new(NotifType::Short)),
        ];

        let event = Event {
            title: "Deployment Updated".to_string(),
            kind: "Deployment".to_string(),
            name: "web".to_string(),
            ..Default::default()
        };

        for notifier in &notifiers {
            notifier.send_event(&event).await.unwrap();
        }

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], "**Deployment Updated**\nKind: Deployment\nName: web");
        assert_eq!(notifiers[1].name(), "console");
    }
}
