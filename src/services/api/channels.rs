//! Telegram channel endpoints.

use async_trait::async_trait;
use serde::Serialize;

use super::{ApiError, BodyEnvelope, ItemEnvelope, ListEnvelope, StrapiClient};
use crate::models::channel::TelegramChannel;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChannelColorPatch<'a> {
    calendar_color: &'a str,
}

/// Channel directory seam.
#[async_trait]
pub trait ChannelApi: Send + Sync {
    async fn list_channels(&self) -> Result<Vec<TelegramChannel>, ApiError>;

    /// Persist a channel's calendar color; the saved value is authoritative
    /// for the color resolver from the next projection on.
    async fn update_channel_color(
        &self,
        document_id: &str,
        calendar_color: &str,
    ) -> Result<TelegramChannel, ApiError>;
}

#[async_trait]
impl ChannelApi for StrapiClient {
    async fn list_channels(&self) -> Result<Vec<TelegramChannel>, ApiError> {
        let response = self.get("/telegram-channels").send().await?;
        let envelope: ListEnvelope<TelegramChannel> = Self::parse(response).await?;
        Ok(envelope.data)
    }

    async fn update_channel_color(
        &self,
        document_id: &str,
        calendar_color: &str,
    ) -> Result<TelegramChannel, ApiError> {
        let response = self
            .put(&format!("/telegram-channels/{document_id}"))
            .json(&BodyEnvelope {
                data: ChannelColorPatch { calendar_color },
            })
            .send()
            .await?;
        let envelope: ItemEnvelope<TelegramChannel> = Self::parse(response).await?;
        Ok(envelope.data)
    }
}
