// Calendar event model
// One visual block on the calendar grid

use crate::models::channel::TelegramChannel;
use crate::models::post::PostStatus;

/// Fixed id of the singleton shadow (drop preview) event.
pub const SHADOW_EVENT_ID: &str = "shadow-event";

/// Id prefix of transient loading placeholder events.
pub const LOADING_EVENT_PREFIX: &str = "loading-";

/// Display duration of every event block. Posts have a start instant but no
/// duration concept, so the calendar renders a fixed 30-minute block.
pub const EVENT_DURATION_MS: i64 = 30 * 60 * 1000;

/// Display status of a calendar event.
///
/// Extends the server-side [`PostStatus`] with the two client-only states
/// used during a drag gesture and an in-flight commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Scheduled,
    Published,
    Failed,
    /// Shadow event shown under the cursor while dragging.
    Preview,
    /// Optimistic placeholder awaiting server confirmation.
    Loading,
}

impl From<PostStatus> for EventStatus {
    fn from(status: PostStatus) -> Self {
        match status {
            PostStatus::Scheduled => EventStatus::Scheduled,
            PostStatus::Published => EventStatus::Published,
            PostStatus::Failed => EventStatus::Failed,
        }
    }
}

/// One visual block on the calendar.
///
/// Three lifecycles intersect here: persisted events mirror a server-side
/// [`ScheduledPost`](crate::models::post::ScheduledPost) and are replaced on
/// every re-fetch; the shadow event is a singleton recomputed on every
/// pointer move; loading events are optimistic placeholders that live from
/// drop until re-fetch or rollback.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    /// Start instant, epoch milliseconds.
    pub start: i64,
    /// End instant, epoch milliseconds.
    pub end: i64,
    /// Hex display color, resolved at projection time.
    pub color: String,
    pub timed: bool,
    pub is_loading: bool,
    pub is_shadow: bool,
    pub status: EventStatus,
    pub channel: Option<TelegramChannel>,
}

impl CalendarEvent {
    pub fn duration_ms(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_loading_placeholder(&self) -> bool {
        self.is_loading && self.id.starts_with(LOADING_EVENT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_status_from_post_status() {
        assert_eq!(
            EventStatus::from(PostStatus::Scheduled),
            EventStatus::Scheduled
        );
        assert_eq!(
            EventStatus::from(PostStatus::Published),
            EventStatus::Published
        );
        assert_eq!(EventStatus::from(PostStatus::Failed), EventStatus::Failed);
    }

    #[test]
    fn test_loading_placeholder_detection() {
        let event = CalendarEvent {
            id: "loading-1736258400000".to_string(),
            title: "Idea".to_string(),
            start: 0,
            end: EVENT_DURATION_MS,
            color: "#1976D2".to_string(),
            timed: true,
            is_loading: true,
            is_shadow: false,
            status: EventStatus::Loading,
            channel: None,
        };
        assert!(event.is_loading_placeholder());
        assert_eq!(event.duration_ms(), EVENT_DURATION_MS);
    }
}
