//! Telegram notification channel.
//!
//! Delivery is best-effort and at-most-one-attempt: a failed send is logged
//! and otherwise ignored, the next scheduled run will notice the (still
//! unpersisted) change and try again.

use crate::error::{Result, WatchError};
use crate::status::{BROWSER_USER_AGENT, StatusSnapshot};

/// Production Telegram Bot API base URL.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Public status page a notification links the application number to.
const STATUS_PAGE_URL: &str = "https://info.midpass.ru/?id=";

/// Telegram Bot API adapter.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    bot_token: String,
    chat_id: i64,
    base_url: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    /// Create a notifier for the given bot token and chat.
    #[must_use]
    pub fn new(bot_token: impl Into<String>, chat_id: i64) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id,
            base_url: TELEGRAM_API_BASE.to_owned(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the API base URL (tests point this at a mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send `text` as one HTML-formatted message. Exactly one attempt.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Notify`] on transport failure or a non-success
    /// API response.
    pub async fn send(&self, text: &str) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            return Err(WatchError::Notify("bot token is empty".to_owned()));
        }

        let url = format!(
            "{}/bot{}/sendMessage?chat_id={}&text={}&parse_mode=HTML",
            self.base_url,
            self.bot_token,
            self.chat_id,
            urlencoding::encode(text)
        );

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|e| WatchError::Notify(format!("connection error: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WatchError::Notify(format!(
                "telegram send failed ({status}): {body}"
            )));
        }

        tracing::info!(chat_id = self.chat_id, "sent notification");
        Ok(())
    }

    /// Best-effort send: failures are logged at error level and swallowed.
    pub async fn notify(&self, text: &str) {
        if let Err(e) = self.send(text).await {
            tracing::error!(error = %e, "notification was not delivered");
        }
    }
}

/// Render the status-change message (Telegram HTML).
#[must_use]
pub fn format_status_message(snapshot: &StatusSnapshot) -> String {
    let mut message = format!(
        "📑 <b>Заявление</b>: №<a href=\"{STATUS_PAGE_URL}{uid}\">{uid}</a>\n\
         📆 <b>Дата подачи</b>: {reception_date}\n\
         🔍 <b>Текущий статус</b>: {status_name}\n\
         🔒 <b>Внутренний статус</b>: {internal_status}\n\
         🔋 <b>Готовность</b>: {percent}%",
        uid = snapshot.uid,
        reception_date = snapshot.reception_date,
        status_name = snapshot.status_name,
        internal_status = snapshot.internal_status,
        percent = snapshot.percent,
    );
    if let Some(description) = snapshot
        .status_description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
    {
        message.push_str(&format!("\n📝 <b>Описание</b>: {description}"));
    }
    message
}

/// Render the rejected-identifier message.
#[must_use]
pub fn format_invalid_id_message(request_id: &str) -> String {
    format!(
        "⚠️ <b>Заявление</b> №{request_id}: сервис отклонил номер как некорректный. \
         Проверьте номер заявления в config.toml."
    )
}
