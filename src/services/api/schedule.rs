//! Scheduled-post endpoints.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::{ApiError, BodyEnvelope, ItemEnvelope, ListEnvelope, StrapiClient};
use crate::models::post::{PostStatus, ScheduledPost};

/// Request body for creating or updating a scheduled post. Relations are
/// referenced by `document_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduledPost {
    pub idea: String,
    pub scheduled_at: DateTime<Utc>,
    pub channel: String,
    pub status: PostStatus,
}

/// Persistence seam for scheduled posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleApi: Send + Sync {
    /// All posts with `scheduled_at` inside the inclusive range.
    async fn list_scheduled_posts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ScheduledPost>, ApiError>;

    async fn create_scheduled_post(
        &self,
        request: CreateScheduledPost,
    ) -> Result<ScheduledPost, ApiError>;

    async fn update_scheduled_post(
        &self,
        document_id: &str,
        request: CreateScheduledPost,
    ) -> Result<ScheduledPost, ApiError>;

    async fn delete_scheduled_post(&self, document_id: &str) -> Result<(), ApiError>;
}

/// Strapi date-range filter for the list query, with relations populated.
pub(crate) fn schedule_query(start: DateTime<Utc>, end: DateTime<Utc>) -> [(String, String); 3] {
    [
        (
            "filters[scheduledAt][$gte]".to_string(),
            start.to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        (
            "filters[scheduledAt][$lte]".to_string(),
            end.to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        ("populate".to_string(), "*".to_string()),
    ]
}

#[async_trait]
impl ScheduleApi for StrapiClient {
    async fn list_scheduled_posts(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ScheduledPost>, ApiError> {
        let response = self
            .get("/scheduled-posts")
            .query(&schedule_query(start, end))
            .send()
            .await?;
        let envelope: ListEnvelope<ScheduledPost> = Self::parse(response).await?;
        Ok(envelope.data)
    }

    async fn create_scheduled_post(
        &self,
        request: CreateScheduledPost,
    ) -> Result<ScheduledPost, ApiError> {
        let response = self
            .post("/scheduled-posts")
            .json(&BodyEnvelope { data: request })
            .send()
            .await?;
        let envelope: ItemEnvelope<ScheduledPost> = Self::parse(response).await?;
        Ok(envelope.data)
    }

    async fn update_scheduled_post(
        &self,
        document_id: &str,
        request: CreateScheduledPost,
    ) -> Result<ScheduledPost, ApiError> {
        let response = self
            .put(&format!("/scheduled-posts/{document_id}"))
            .json(&BodyEnvelope { data: request })
            .send()
            .await?;
        let envelope: ItemEnvelope<ScheduledPost> = Self::parse(response).await?;
        Ok(envelope.data)
    }

    async fn delete_scheduled_post(&self, document_id: &str) -> Result<(), ApiError> {
        let response = self
            .delete(&format!("/scheduled-posts/{document_id}"))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}
