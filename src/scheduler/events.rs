//! Projection of scheduled posts into calendar events, and the board that
//! owns the displayed list.
//!
//! The board holds two kinds of state: the persisted event list (replaced
//! wholesale on every re-fetch) and the singleton shadow event shown under
//! the cursor during a drag. Loading placeholders live inside the persisted
//! list until a re-fetch supersedes them or a failed commit removes them.

use chrono::Utc;

use crate::models::calendar_event::{
    CalendarEvent, EventStatus, EVENT_DURATION_MS, LOADING_EVENT_PREFIX, SHADOW_EVENT_ID,
};
use crate::models::channel::{ChannelFilter, TelegramChannel};
use crate::models::idea::Idea;
use crate::models::post::ScheduledPost;
use crate::scheduler::palette::{channel_color, status_color, DEFAULT_EVENT_COLOR};

/// Project server posts into display events.
///
/// Every event gets the fixed 30-minute display duration. Colors are
/// resolved against the live channel list at projection time, so a channel
/// recolor takes effect on the next projection without a server round-trip.
/// Under a concrete channel filter, posts with no channel remain visible.
pub fn project_posts(
    posts: &[ScheduledPost],
    filter: &ChannelFilter,
    channels: &[TelegramChannel],
) -> Vec<CalendarEvent> {
    posts
        .iter()
        .filter(|post| filter.includes(post.channel.as_ref()))
        .map(|post| {
            let start = post.scheduled_at.timestamp_millis();
            let color = post
                .channel
                .as_ref()
                .and_then(|post_channel| {
                    channels
                        .iter()
                        .find(|c| c.document_id == post_channel.document_id)
                })
                .map(|live| channel_color(Some(live), channels))
                .unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string());

            CalendarEvent {
                id: post.document_id.clone(),
                title: post.title().to_string(),
                start,
                end: start + EVENT_DURATION_MS,
                color,
                timed: true,
                is_loading: false,
                is_shadow: false,
                status: post.status.into(),
                channel: post.channel.clone(),
            }
        })
        .collect()
}

/// Build the drop-preview shadow event for a dragged idea.
///
/// The channel is not known during the shadow phase, so the status gray is
/// used for the block.
pub fn build_shadow_event(idea: &Idea, start_ms: i64) -> CalendarEvent {
    CalendarEvent {
        id: SHADOW_EVENT_ID.to_string(),
        title: idea.title.clone(),
        start: start_ms,
        end: start_ms + EVENT_DURATION_MS,
        color: status_color(EventStatus::Preview).to_string(),
        timed: true,
        is_loading: false,
        is_shadow: true,
        status: EventStatus::Preview,
        channel: None,
    }
}

/// Build an optimistic loading placeholder for a just-dropped idea.
pub fn build_loading_event(
    idea: &Idea,
    start_ms: i64,
    channel: Option<&TelegramChannel>,
    channels: &[TelegramChannel],
) -> CalendarEvent {
    let color = channel
        .map(|c| channel_color(Some(c), channels))
        .unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string());

    CalendarEvent {
        id: format!("{}{}", LOADING_EVENT_PREFIX, Utc::now().timestamp_millis()),
        title: idea.title.clone(),
        start: start_ms,
        end: start_ms + EVENT_DURATION_MS,
        color,
        timed: true,
        is_loading: true,
        is_shadow: false,
        status: EventStatus::Loading,
        channel: channel.cloned(),
    }
}

/// The displayed event list plus the singleton shadow slot.
#[derive(Debug, Default)]
pub struct EventBoard {
    events: Vec<CalendarEvent>,
    shadow: Option<CalendarEvent>,
}

impl EventBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn shadow(&self) -> Option<&CalendarEvent> {
        self.shadow.as_ref()
    }

    /// Persisted events plus the shadow overlay, ready for rendering.
    pub fn display_events(&self) -> Vec<CalendarEvent> {
        let mut all = self.events.clone();
        if let Some(shadow) = &self.shadow {
            all.push(shadow.clone());
        }
        all
    }

    /// Replace the persisted list wholesale (re-fetch path).
    pub fn replace_events(&mut self, events: Vec<CalendarEvent>) {
        self.events = events;
    }

    pub fn set_shadow(&mut self, event: CalendarEvent) {
        self.shadow = Some(event);
    }

    pub fn clear_shadow(&mut self) {
        self.shadow = None;
    }

    /// Append a loading placeholder and return its id for later rollback.
    pub fn add_loading_event(
        &mut self,
        idea: &Idea,
        start_ms: i64,
        channel: Option<&TelegramChannel>,
        channels: &[TelegramChannel],
    ) -> String {
        let event = build_loading_event(idea, start_ms, channel, channels);
        let id = event.id.clone();
        self.events.push(event);
        id
    }

    /// Remove an event by id (failed-commit rollback).
    pub fn remove_event(&mut self, id: &str) {
        self.events.retain(|event| event.id != id);
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.shadow = None;
    }
}
