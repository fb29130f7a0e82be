// Scheduled post model
// Server-owned entity, accessed over the Strapi API but never mutated locally

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::channel::TelegramChannel;
use crate::models::idea::Idea;

/// Publication status of a scheduled post, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Scheduled,
    Published,
    Failed,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Scheduled => "scheduled",
            PostStatus::Published => "published",
            PostStatus::Failed => "failed",
        }
    }
}

/// A post scheduled for publication to a Telegram channel.
///
/// Instances mirror the server state verbatim; the client replaces them
/// wholesale on every range re-fetch rather than patching individual rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPost {
    #[serde(default)]
    pub id: i64,
    pub document_id: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub idea: Option<Idea>,
    #[serde(default)]
    pub channel: Option<TelegramChannel>,
    pub status: PostStatus,
}

impl ScheduledPost {
    /// Display title, falling back when the idea relation was not populated.
    pub fn title(&self) -> &str {
        self.idea
            .as_ref()
            .map(|idea| idea.title.as_str())
            .unwrap_or("Scheduled Post")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_lowercase() {
        assert_eq!(
            serde_json::to_string(&PostStatus::Scheduled).unwrap(),
            "\"scheduled\""
        );
        let status: PostStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(status, PostStatus::Failed);
    }

    #[test]
    fn test_post_deserializes_with_missing_relations() {
        let json = r#"{
            "id": 3,
            "documentId": "post-3",
            "scheduledAt": "2025-01-07T14:00:00.000Z",
            "status": "scheduled"
        }"#;
        let post: ScheduledPost = serde_json::from_str(json).unwrap();
        assert!(post.idea.is_none());
        assert!(post.channel.is_none());
        assert_eq!(post.title(), "Scheduled Post");
    }

    #[test]
    fn test_post_title_uses_idea() {
        let json = r#"{
            "documentId": "post-4",
            "scheduledAt": "2025-01-07T14:00:00.000Z",
            "idea": { "documentId": "idea-1", "title": "Launch teaser" },
            "status": "published"
        }"#;
        let post: ScheduledPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.title(), "Launch teaser");
    }
}
