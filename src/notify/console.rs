//! Colored console output standing in for a real backend.

use crate::notify::format::format_message;
use crate::notify::Notifier;
use crate::types::{Event, NotifType, Result};
use colored::Colorize;

/// Prints notifications to stdout instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    mode: NotifType,
}

impl ConsoleNotifier {
    pub fn new(mode: NotifType) -> Self {
        Self { mode }
    }

    /// Render text with the first (title) line highlighted.
    fn render(&self, text: &str) -> String {
        let mut lines = text.lines();
        let mut rendered = match lines.next() {
            Some(title) => format!("{} {}", "[tg]".bright_blue(), title.bright_white().bold()),
            None => "[tg]".bright_blue().to_string(),
        };
        for line in lines {
            rendered.push('\n');
            rendered.push_str(&format!("     {}", line));
        }
        rendered
    }
}

#[async_trait::async_trait]
impl Notifier for ConsoleNotifier {
    async fn send_message(&self, text: &str) -> Result<()> {
        println!("{}", self.render(text));
        Ok(())
    }

    async fn send_event(&self, event: &Event) -> Result<()> {
        self.send_message(&format_message(event, self.mode)).await
    }

    fn name(&self) -> &str {
        "console"
    }
}
