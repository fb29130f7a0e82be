//! Optimistic commit pipeline for dropped ideas.
//!
//! A drop inserts a loading placeholder in the same tick, then persists the
//! post. Success is reconciled by re-fetching the whole visible window; the
//! authoritative list supersedes the placeholder; the two are never matched
//! by id. Overlapping commits therefore race and the last re-fetch wins.
//! TODO: reconcile the placeholder against the created post's document_id so
//! concurrent commits cannot flicker.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};

use crate::models::idea::Idea;
use crate::models::post::PostStatus;
use crate::scheduler::events::project_posts;
use crate::scheduler::state::SharedCalendarState;
use crate::services::api::{CreateScheduledPost, ScheduleApi};
use crate::utils::date::fetch_window;

/// Persist a dropped idea as a scheduled post, with optimistic feedback.
pub async fn commit_scheduled_post(
    state: SharedCalendarState,
    api: Arc<dyn ScheduleApi>,
    idea: Idea,
    target: DateTime<Local>,
    channel_id: String,
) {
    let loading_id = state.with(|s| {
        let channel = s.find_channel(&channel_id).cloned();
        s.board.add_loading_event(
            &idea,
            target.timestamp_millis(),
            channel.as_ref(),
            &s.channels,
        )
    });

    let request = CreateScheduledPost {
        idea: idea.document_id.clone(),
        scheduled_at: target.with_timezone(&Utc),
        channel: channel_id.clone(),
        status: PostStatus::Scheduled,
    };

    match api.create_scheduled_post(request).await {
        Ok(created) => {
            log::debug!(
                "scheduled post {} created for channel {}",
                created.document_id,
                channel_id
            );
            refresh_events(&state, api.as_ref()).await;
        }
        Err(err) => {
            log::error!("Failed to create scheduled post: {err}");
            state.with(|s| {
                s.board.remove_event(&loading_id);
                s.toasts.error("Failed to schedule post. Please try again.");
            });
        }
    }
}

/// Re-fetch the visible window and replace the event list wholesale.
///
/// No selected filter means the calendar is not ready yet; the call is a
/// no-op. On fetch failure the stale list stays displayed and an error toast
/// is raised.
pub async fn refresh_events(state: &SharedCalendarState, api: &dyn ScheduleApi) {
    let context = state.with(|s| s.filter.clone().map(|filter| (filter, s.focus)));
    let Some((filter, focus)) = context else {
        return;
    };

    let (start, end) = fetch_window(focus);
    match api
        .list_scheduled_posts(start.with_timezone(&Utc), end.with_timezone(&Utc))
        .await
    {
        Ok(posts) => state.with(|s| {
            let events = project_posts(&posts, &filter, &s.channels);
            s.board.replace_events(events);
        }),
        Err(err) => {
            log::error!("Failed to fetch scheduled posts: {err}");
            state.with(|s| s.toasts.error("Failed to load scheduled posts"));
        }
    }
}
