//! Core types and errors for the Telegram notifier.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while notifying.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Telegram session error: {0}")]
    SessionError(String),

    #[error("Telegram {operation} to chat {chat_id} failed: {reason}")]
    SendError {
        chat_id: String,
        operation: &'static str,
        reason: String,
    },

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NotifyError>;

/// Notification verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NotifType {
    /// Bold title plus a one-line description.
    #[default]
    Short,
    /// Bold title plus every populated event field.
    Long,
}

impl FromStr for NotifType {
    type Err = Infallible;

    /// Anything other than `long` falls back to [`NotifType::Short`].
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("long") {
            Ok(NotifType::Long)
        } else {
            Ok(NotifType::Short)
        }
    }
}

impl From<String> for NotifType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(mode) => mode,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for NotifType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifType::Short => f.write_str("short"),
            NotifType::Long => f.write_str("long"),
        }
    }
}

/// What happened to the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Create,
    Update,
    Delete,
    Error,
    Warning,
    Normal,
    Info,
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(EventType::Create),
            "update" => Ok(EventType::Update),
            "delete" => Ok(EventType::Delete),
            "error" => Ok(EventType::Error),
            "warning" => Ok(EventType::Warning),
            "normal" => Ok(EventType::Normal),
            "info" => Ok(EventType::Info),
            other => Err(format!("unknown event type '{}'", other)),
        }
    }
}

/// A structured cluster event to report.
///
/// Optional text fields treat `None` and `""` the same way: absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub title: String,
    pub kind: String,
    pub name: String,
    pub namespace: Option<String>,
    pub reason: Option<String>,
    pub messages: Vec<String>,
    pub action: Option<String>,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub cluster: Option<String>,
}

impl Event {
    pub fn namespace(&self) -> Option<&str> {
        non_empty(&self.namespace)
    }

    pub fn reason(&self) -> Option<&str> {
        non_empty(&self.reason)
    }

    pub fn action(&self) -> Option<&str> {
        non_empty(&self.action)
    }

    pub fn cluster(&self) -> Option<&str> {
        non_empty(&self.cluster)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// A resolved Telegram chat address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChatId {
    /// User, group or supergroup id (supergroups are `-100...`).
    Id(i64),
    /// Public channel username, including the leading `@`.
    Username(String),
}

impl FromStr for ChatId {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(id) = trimmed.parse::<i64>() {
            return Ok(ChatId::Id(id));
        }

        if let Some(username) = trimmed.strip_prefix('@') {
            let valid = (5..=32).contains(&username.len())
                && username
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_');
            if valid {
                return Ok(ChatId::Username(trimmed.to_string()));
            }
        }

        Err(NotifyError::ConfigError(format!(
            "invalid chat identifier '{}': expected a numeric id or @channelusername",
            s
        )))
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{}", id),
            ChatId::Username(name) => f.write_str(name),
        }
    }
}
