//! Shared display state for the scheduling calendar.
//!
//! One owned context struct threaded through the core instead of ambient
//! globals. The interaction controller and the commit tasks share it behind
//! a mutex; [`SharedCalendarState::with`] scopes every access so the lock is
//! structurally never held across an await point.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::models::channel::{ChannelFilter, TelegramChannel};
use crate::scheduler::events::EventBoard;
use crate::scheduler::grid::CalendarView;
use crate::scheduler::toast::ToastManager;

/// Everything the calendar view reads: the event board, notifications, the
/// channel list, and the current viewing context.
#[derive(Debug)]
pub struct CalendarState {
    pub board: EventBoard,
    pub toasts: ToastManager,
    pub channels: Vec<TelegramChannel>,
    /// Selected channel filter. `None` until the channel list has loaded;
    /// fetches and drops are no-ops without it.
    pub filter: Option<ChannelFilter>,
    /// A channel designated as the default drop target in the
    /// "all channels" view, bypassing the picker dialog.
    pub pinned_channel_id: Option<String>,
    /// The date the calendar is centered on.
    pub focus: NaiveDate,
    pub view: CalendarView,
}

impl CalendarState {
    pub fn new(focus: NaiveDate) -> Self {
        Self {
            board: EventBoard::new(),
            toasts: ToastManager::new(),
            channels: Vec::new(),
            filter: None,
            pinned_channel_id: None,
            focus,
            view: CalendarView::Week,
        }
    }

    pub fn find_channel(&self, document_id: &str) -> Option<&TelegramChannel> {
        self.channels
            .iter()
            .find(|channel| channel.document_id == document_id)
    }
}

/// Cloneable handle to the state shared between the interaction loop and
/// in-flight commit tasks.
#[derive(Debug, Clone)]
pub struct SharedCalendarState {
    inner: Arc<Mutex<CalendarState>>,
}

impl SharedCalendarState {
    pub fn new(state: CalendarState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Run `f` with exclusive access to the state.
    pub fn with<R>(&self, f: impl FnOnce(&mut CalendarState) -> R) -> R {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}
