// Telegram channel model

use serde::{Deserialize, Serialize};

/// A Telegram channel posts can be scheduled into.
///
/// Channel identity across the API is the opaque `document_id` string,
/// not the numeric row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramChannel {
    #[serde(default)]
    pub id: i64,
    pub document_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_color: Option<String>,
}

impl TelegramChannel {
    pub fn new(document_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            document_id: document_id.into(),
            title: title.into(),
            username: None,
            calendar_color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.calendar_color = Some(color.into());
        self
    }
}

/// Which channel's posts the calendar is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelFilter {
    /// The "all channels" pseudo-view.
    All,
    /// A concrete channel, identified by `document_id`.
    Channel(String),
}

impl ChannelFilter {
    /// Whether a post with the given channel passes this filter.
    ///
    /// Posts without a channel are always visible, even under a concrete
    /// channel filter.
    pub fn includes(&self, post_channel: Option<&TelegramChannel>) -> bool {
        match self {
            ChannelFilter::All => true,
            ChannelFilter::Channel(document_id) => post_channel
                .map(|channel| &channel.document_id == document_id)
                .unwrap_or(true),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ChannelFilter::All)
    }
}
