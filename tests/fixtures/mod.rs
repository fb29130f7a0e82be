// Test fixtures - reusable test data
// Provides consistent test data across all test files

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use egui::{pos2, Rect};

use content_calendar::models::channel::{ChannelFilter, TelegramChannel};
use content_calendar::models::idea::Idea;
use content_calendar::models::post::{PostStatus, ScheduledPost};
use content_calendar::scheduler::grid::GridGeometry;
use content_calendar::scheduler::state::{CalendarState, SharedCalendarState};
use content_calendar::services::api::{ApiError, CreateScheduledPost, ScheduleApi};

/// One pixel row per minute makes y coordinates read as times.
pub const ROW_HEIGHT: f32 = 60.0;
pub const TIME_LABEL_WIDTH: f32 = 50.0;

/// Tuesday, Jan 7 2025, the focused date used across the drag tests.
pub fn focus_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 7).unwrap()
}

pub fn idea() -> Idea {
    Idea::new("idea-1", "Idea A")
}

/// Three channels: one with a saved color, two relying on palette fallback.
pub fn channels() -> Vec<TelegramChannel> {
    vec![
        TelegramChannel::new("chan-123", "News").with_color("#ABC123"),
        TelegramChannel::new("chan-456", "Digest"),
        TelegramChannel::new("chan-789", "Memes"),
    ]
}

/// A week grid over Jan 6–12 2025, 100px columns after a 50px time gutter.
pub fn week_grid() -> GridGeometry {
    GridGeometry::week_layout(
        Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(750.0, 1500.0)),
        focus_date(),
        TIME_LABEL_WIDTH,
        0.0,
        ROW_HEIGHT,
    )
}

/// Pointer position over the Tuesday column at the given wall-clock time.
pub fn over_tuesday(hour: u32, minute: u32) -> egui::Pos2 {
    pos2(200.0, (hour as f32 + minute as f32 / 60.0) * ROW_HEIGHT)
}

pub fn shared_state(filter: Option<ChannelFilter>) -> SharedCalendarState {
    let mut state = CalendarState::new(focus_date());
    state.channels = channels();
    state.filter = filter;
    SharedCalendarState::new(state)
}

/// Recording stub for the schedule API, in place of a live Strapi instance.
///
/// Records every create request and serves them back from the list endpoint,
/// so a successful commit's re-fetch sees the authoritative post.
pub struct StubScheduleApi {
    created: Mutex<Vec<CreateScheduledPost>>,
    posts: Mutex<Vec<ScheduledPost>>,
    fail_create: AtomicBool,
}

impl StubScheduleApi {
    pub fn new() -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            posts: Mutex::new(Vec::new()),
            fail_create: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        let stub = Self::new();
        stub.fail_create.store(true, Ordering::SeqCst);
        stub
    }

    pub fn with_posts(posts: Vec<ScheduledPost>) -> Self {
        let stub = Self::new();
        *stub.posts.lock().unwrap() = posts;
        stub
    }

    pub fn created_requests(&self) -> Vec<CreateScheduledPost> {
        self.created.lock().unwrap().clone()
    }
}

impl Default for StubScheduleApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleApi for StubScheduleApi {
    async fn list_scheduled_posts(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<ScheduledPost>, ApiError> {
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn create_scheduled_post(
        &self,
        request: CreateScheduledPost,
    ) -> Result<ScheduledPost, ApiError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                message: "internal server error".to_string(),
            });
        }

        let mut created = self.created.lock().unwrap();
        created.push(request.clone());

        let post = ScheduledPost {
            id: created.len() as i64,
            document_id: format!("post-{}", created.len()),
            scheduled_at: request.scheduled_at,
            idea: Some(idea()),
            channel: channels()
                .into_iter()
                .find(|c| c.document_id == request.channel),
            status: PostStatus::Scheduled,
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update_scheduled_post(
        &self,
        _document_id: &str,
        _request: CreateScheduledPost,
    ) -> Result<ScheduledPost, ApiError> {
        Err(ApiError::Status {
            status: 501,
            message: "not supported by the stub".to_string(),
        })
    }

    async fn delete_scheduled_post(&self, document_id: &str) -> Result<(), ApiError> {
        self.posts
            .lock()
            .unwrap()
            .retain(|post| post.document_id != document_id);
        Ok(())
    }
}
