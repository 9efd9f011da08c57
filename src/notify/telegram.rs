//! Telegram Bot API notifications for cluster events.

use crate::config::NotifierConfig;
use crate::notify::format::format_message;
use crate::notify::Notifier;
use crate::types::{ChatId, Event, NotifyError, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

/// Parse mode for every outgoing message.
const PARSE_MODE: &str = "Markdown";

/// Longest slice of an unexpected response body kept in error messages.
const MAX_ERROR_BODY: usize = 200;

/// Telegram message request body.
#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a ChatId,
    text: &'a str,
    parse_mode: &'a str,
}

/// Bot API response envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<u16>,
}

/// `getMe` result.
#[derive(Debug, Deserialize)]
struct BotUser {
    id: i64,
    username: Option<String>,
}

/// `sendMessage` result.
#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

/// An authenticated Bot API session, opened for a single send.
struct Session {
    client: Client,
    base: Url,
}

impl Session {
    fn method_url(&self, method: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(method);
        }
        url
    }
}

/// Telegram notification handler.
///
/// Holds only immutable settings. Every send opens its own session, so one
/// notifier can be shared freely across tasks.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    config: NotifierConfig,
}

impl TelegramNotifier {
    /// Create a new Telegram notifier. Performs no I/O.
    pub fn new(config: NotifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Open a session: check the token, build a client and call `getMe`.
    async fn open_session(&self) -> Result<Session> {
        validate_token(&self.config.token)?;
        let base = bot_base_url(&self.config.api_url, &self.config.token)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()
            .map_err(|e| {
                NotifyError::SessionError(format!("failed to build HTTP client: {}", e))
            })?;
        let session = Session { client, base };

        let response = session
            .client
            .get(session.method_url("getMe"))
            .send()
            .await
            .map_err(|e| {
                NotifyError::SessionError(format!("getMe request failed: {}", e.without_url()))
            })?;

        let bot: BotUser = read_result(response)
            .await
            .map_err(|reason| NotifyError::SessionError(format!("getMe rejected: {}", reason)))?;

        debug!(
            "Telegram session opened for bot {} (@{})",
            bot.id,
            bot.username.as_deref().unwrap_or("unknown")
        );
        Ok(session)
    }

    /// Open a session and post one message to the configured chat.
    async fn deliver(&self, text: &str, operation: &'static str) -> Result<()> {
        let session = self.open_session().await?;
        let chat_id: ChatId = self.config.chat_id.parse()?;

        let body = SendMessageRequest {
            chat_id: &chat_id,
            text,
            parse_mode: PARSE_MODE,
        };

        let response = session
            .client
            .post(session.method_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.send_error(operation, e.without_url().to_string()))?;

        let sent: SentMessage = read_result(response)
            .await
            .map_err(|reason| self.send_error(operation, reason))?;

        debug!(
            "Message {} successfully sent to chat {}",
            sent.message_id, chat_id
        );
        Ok(())
    }

    fn send_error(&self, operation: &'static str, reason: String) -> NotifyError {
        NotifyError::SendError {
            chat_id: self.config.chat_id.clone(),
            operation,
            reason,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<()> {
        debug!(">> Sending to Telegram chat {}", self.config.chat_id);
        trace!("Message text: {}", text);
        self.deliver(text, "send_message").await
    }

    async fn send_event(&self, event: &Event) -> Result<()> {
        debug!(
            ">> Sending {} event for {} to Telegram chat {}",
            event.kind, event.name, self.config.chat_id
        );
        let text = format_message(event, self.config.mode);
        trace!("Formatted event: {}", text);
        self.deliver(&text, "send_event").await
    }

    fn name(&self) -> &str {
        "telegram"
    }
}

/// Check the `<bot id>:<secret>` token shape before it goes into a URL.
fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(NotifyError::SessionError("bot token is empty".to_string()));
    }

    let well_formed = token.split_once(':').is_some_and(|(id, secret)| {
        !id.is_empty()
            && id.chars().all(|c| c.is_ascii_digit())
            && !secret.is_empty()
            && secret
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    });

    if well_formed {
        Ok(())
    } else {
        Err(NotifyError::SessionError(
            "bot token is malformed, expected <bot id>:<secret>".to_string(),
        ))
    }
}

/// `{api_url}/bot{token}`, the base every method URL extends.
fn bot_base_url(api_url: &str, token: &str) -> Result<Url> {
    let mut url = Url::parse(api_url).map_err(|e| {
        NotifyError::ConfigError(format!("invalid Bot API URL '{}': {}", api_url, e))
    })?;

    url.path_segments_mut()
        .map_err(|_| {
            NotifyError::ConfigError(format!("Bot API URL '{}' cannot be a base", api_url))
        })?
        .pop_if_empty()
        .push(&format!("bot{}", token));

    Ok(url)
}

/// Unwrap a Bot API envelope, turning rejections into a readable reason.
async fn read_result<T: DeserializeOwned>(response: Response) -> std::result::Result<T, String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| e.without_url().to_string())?;

    match serde_json::from_str::<ApiResponse<T>>(&body) {
        Ok(ApiResponse {
            ok: true,
            result: Some(result),
            ..
        }) => Ok(result),
        Ok(api) => Err(format!(
            "{} {}",
            api.error_code.unwrap_or_else(|| status.as_u16()),
            api.description
                .unwrap_or_else(|| "response carried no result".to_string())
        )),
        Err(_) => {
            let snippet: String = body.chars().take(MAX_ERROR_BODY).collect();
            Err(format!("unexpected response ({}): {}", status, snippet))
        }
    }
}
