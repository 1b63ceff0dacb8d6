use anyhow::Context;
use async_trait::async_trait;
use common::error::RelayError;
use teloxide::RequestError;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::debug;

use crate::config::{Destination, RelayConfig};

/// Outbound delivery of a rendered message to the configured destination.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_text(&self, text: &str) -> Result<(), RelayError>;
}

pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
    token: String,
}

impl TelegramNotifier {
    pub fn new(config: &RelayConfig) -> anyhow::Result<Self> {
        let client = teloxide::net::default_reqwest_settings()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build Telegram HTTP client")?;

        let bot = Bot::with_client(config.bot_token.expose(), client)
            .set_api_url(config.api_url.clone());

        Ok(Self {
            bot,
            recipient: recipient_for(&config.destination),
            token: config.bot_token.expose().to_string(),
        })
    }

    /// Network errors echo the request URL, which carries the token.
    fn classify(&self, err: RequestError) -> RelayError {
        let scrub = |msg: String| msg.replace(&self.token, "<redacted>");
        match err {
            RequestError::Network(e) => RelayError::TransportError(scrub(e.to_string())),
            RequestError::Io(e) => RelayError::TransportError(scrub(e.to_string())),
            other => RelayError::DeliveryFailed(scrub(other.to_string())),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_text(&self, text: &str) -> Result<(), RelayError> {
        let sent = self
            .bot
            .send_message(self.recipient.clone(), text)
            .await
            .map_err(|e| self.classify(e))?;

        debug!("Telegram accepted message {}", sent.id.0);
        Ok(())
    }
}

fn recipient_for(destination: &Destination) -> Recipient {
    match destination {
        Destination::ChatId(id) => Recipient::Id(ChatId(*id)),
        Destination::Channel(name) => Recipient::ChannelUsername(name.clone()),
    }
}
