//! Configuration handling for the notifier and its CLI.

use crate::types::{Event, EventType, NotifType, Result};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::PathBuf;

/// Default Telegram Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for one Telegram notifier.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Bot token from @BotFather.
    pub token: String,

    /// Target chat: numeric id or `@channelusername`.
    #[serde(alias = "channel")]
    pub chat_id: String,

    /// Message verbosity.
    #[serde(default, alias = "notif_type")]
    pub mode: NotifType,

    /// Bot API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Transport timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl NotifierConfig {
    /// Config with the default endpoint and timeout.
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>, mode: NotifType) -> Self {
        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            mode,
            api_url: default_api_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Point the notifier at a different Bot API server.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

// The token is a secret and must stay out of logs.
impl fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("mode", &self.mode)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Send cluster event notifications to Telegram.
#[derive(Parser, Debug, Clone)]
#[command(name = "tgnotify")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Telegram bot token
    #[arg(long, env = "TGNOTIFY_TELEGRAM_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Telegram chat ID or @channelusername
    #[arg(long, env = "TGNOTIFY_TELEGRAM_CHAT_ID", global = true)]
    pub chat_id: Option<String>,

    /// Notification verbosity (short, long); unknown values mean short
    #[arg(long, env = "TGNOTIFY_NOTIF_TYPE", default_value = "short", global = true)]
    pub mode: NotifType,

    /// Telegram Bot API base URL
    #[arg(long, default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    pub timeout: u64,

    /// Print messages to the console instead of sending them
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Send a raw Markdown message
    Message(MessageArgs),
    /// Format and send a cluster event
    Event(EventArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MessageArgs {
    /// Message text
    pub text: String,
}

/// Event given on the command line or as a JSON file.
#[derive(Args, Debug, Clone, Default)]
pub struct EventArgs {
    /// JSON file holding the event ("-" for stdin)
    #[arg(short, long, conflicts_with_all = ["title", "kind", "name"])]
    pub file: Option<PathBuf>,

    /// Event title
    #[arg(long, required_unless_present = "file")]
    pub title: Option<String>,

    /// Resource kind (Pod, Deployment, ...)
    #[arg(long, required_unless_present = "file")]
    pub kind: Option<String>,

    /// Resource name
    #[arg(long, required_unless_present = "file")]
    pub name: Option<String>,

    #[arg(long)]
    pub namespace: Option<String>,

    #[arg(long)]
    pub reason: Option<String>,

    /// Event message (repeatable)
    #[arg(long = "message")]
    pub messages: Vec<String>,

    #[arg(long)]
    pub action: Option<String>,

    /// Recommendation (repeatable)
    #[arg(long = "recommendation")]
    pub recommendations: Vec<String>,

    /// Warning (repeatable)
    #[arg(long = "warning")]
    pub warnings: Vec<String>,

    /// Event type (create, update, delete, error, warning, normal, info)
    #[arg(long = "type")]
    pub event_type: Option<EventType>,

    /// Cluster name
    #[arg(long)]
    pub cluster: Option<String>,
}

impl Config {
    /// Build the notifier settings from flags and environment.
    pub fn notifier_config(&self) -> Option<NotifierConfig> {
        let token = self.token.clone()?;
        let chat_id = self.chat_id.clone()?;
        Some(
            NotifierConfig::new(token, chat_id, self.mode)
                .with_api_url(self.api_url.clone())
                .with_timeout(self.timeout),
        )
    }
}

impl EventArgs {
    /// Load the event from the file if given, otherwise from the flags.
    pub fn load_event(&self) -> Result<Event> {
        if let Some(ref path) = self.file {
            let content = if path.as_os_str() == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                std::fs::read_to_string(path)?
            };
            return Ok(serde_json::from_str(&content)?);
        }

        Ok(Event {
            title: self.title.clone().unwrap_or_default(),
            kind: self.kind.clone().unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            namespace: self.namespace.clone(),
            reason: self.reason.clone(),
            messages: self.messages.clone(),
            action: self.action.clone(),
            recommendations: self.recommendations.clone(),
            warnings: self.warnings.clone(),
            event_type: self.event_type,
            cluster: self.cluster.clone(),
        })
    }
}
