//! Drag-and-drop interaction state machine.
//!
//! A drag gesture runs Idle → Dragging → {Committing | AwaitingChannelChoice}
//! → Idle. [`DragController`] owns the gesture's working memory and is the
//! only writer of the shadow event; pointer events reach it through a bounded
//! channel drained by [`InteractionLoop`], one event per iteration, so
//! handlers never re-enter.
//!
//! Every exit path (invalid drop, picker cancel, loop shutdown) converges
//! on [`DragController::reset_drag_state`].

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use egui::{CursorIcon, Pos2, Vec2};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::idea::Idea;
use crate::scheduler::commit::commit_scheduled_post;
use crate::scheduler::events::build_shadow_event;
use crate::scheduler::grid::GridGeometry;
use crate::scheduler::state::SharedCalendarState;
use crate::scheduler::time::{round_time, TimeSlot};
use crate::services::api::ScheduleApi;
use crate::utils::date::format_date_time_with_weekday;
use crate::models::channel::ChannelFilter;

/// Offset of the cursor-following ghost card from the pointer.
pub const GHOST_OFFSET: Vec2 = Vec2 { x: 10.0, y: 10.0 };

/// Cursor and text-selection styling applied while a drag is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorState {
    pub icon: CursorIcon,
    pub text_selection_enabled: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            icon: CursorIcon::Default,
            text_selection_enabled: true,
        }
    }
}

impl CursorState {
    fn grabbing() -> Self {
        Self {
            icon: CursorIcon::Grabbing,
            text_selection_enabled: false,
        }
    }
}

/// Working memory of a single drag gesture. Created on press, torn down on
/// every exit path; never outlives the gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub idea: Idea,
    /// The last slot the pointer resolved to. This is the sole truth
    /// consulted on release; cleared whenever the pointer leaves the grid,
    /// which is what makes an outside drop a no-op.
    pub last_slot: Option<TimeSlot>,
    /// Ghost card position (pointer + [`GHOST_OFFSET`]).
    pub ghost: Pos2,
}

/// A drop waiting on channel selection in the two-step creation flow.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDrop {
    pub idea: Idea,
    pub time: DateTime<Local>,
}

/// Observable interaction phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    AwaitingChannelChoice,
}

/// Pointer events fed to the interaction loop.
#[derive(Debug, Clone)]
pub enum PointerEvent {
    /// Press on a draggable idea card.
    Pressed { pos: Pos2, idea: Idea },
    Moved { pos: Pos2 },
    Released,
    /// The view re-measured the calendar layout.
    GridChanged(GridGeometry),
}

/// Owner and single mutator of the drag state.
pub struct DragController {
    state: SharedCalendarState,
    api: Arc<dyn ScheduleApi>,
    grid: GridGeometry,
    session: Option<DragSession>,
    pending: Option<PendingDrop>,
    picker_open: bool,
    cursor: CursorState,
}

impl DragController {
    pub fn new(state: SharedCalendarState, api: Arc<dyn ScheduleApi>, grid: GridGeometry) -> Self {
        Self {
            state,
            api,
            grid,
            session: None,
            pending: None,
            picker_open: false,
            cursor: CursorState::default(),
        }
    }

    pub fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            DragPhase::Dragging
        } else if self.picker_open {
            DragPhase::AwaitingChannelChoice
        } else {
            DragPhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn pending_drop(&self) -> Option<&PendingDrop> {
        self.pending.as_ref()
    }

    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    pub fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    pub fn set_grid(&mut self, grid: GridGeometry) {
        self.grid = grid;
    }

    /// Formatted drop-target time shown on the ghost card.
    pub fn drop_target_time(&self) -> Option<String> {
        let slot = self.session.as_ref()?.last_slot?;
        let instant = slot.to_local()?;
        Some(format_date_time_with_weekday(instant))
    }

    /// Dispatch one pointer event.
    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Pressed { pos, idea } => self.press(pos, idea),
            PointerEvent::Moved { pos } => self.motion(pos),
            PointerEvent::Released => {
                // Commit tasks run detached; the loop keeps draining events
                // while they are in flight.
                let _ = self.release();
            }
            PointerEvent::GridChanged(grid) => self.set_grid(grid),
        }
    }

    /// Idle → Dragging: press on an idea card.
    pub fn press(&mut self, pos: Pos2, idea: Idea) {
        self.session = Some(DragSession {
            idea,
            last_slot: None,
            ghost: pos + GHOST_OFFSET,
        });
        self.cursor = CursorState::grabbing();
    }

    /// Dragging: pointer moved. Updates the ghost and the shadow event.
    pub fn motion(&mut self, pos: Pos2) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.ghost = pos + GHOST_OFFSET;

        let resolved = self
            .grid
            .slot_at(pos)
            .and_then(|slot| slot.timestamp_ms().map(|ms| (slot, ms)));

        match resolved {
            Some((slot, start_ms)) => {
                session.last_slot = Some(slot);
                let shadow = build_shadow_event(&session.idea, start_ms);
                self.state.with(|s| s.board.set_shadow(shadow));
            }
            None => {
                // Pointer left the calendar.
                session.last_slot = None;
                self.state.with(|s| s.board.clear_shadow());
            }
        }
    }

    /// Dragging → {Committing | AwaitingChannelChoice | Idle}: pointer
    /// released. Returns the commit task handle when a commit was started.
    pub fn release(&mut self) -> Option<JoinHandle<()>> {
        self.cursor = CursorState::default();

        let Some(session) = self.session.take() else {
            self.reset_drag_state();
            return None;
        };
        let Some(slot) = session.last_slot else {
            self.reset_drag_state();
            return None;
        };
        let context = self
            .state
            .with(|s| s.filter.clone().map(|f| (f, s.pinned_channel_id.clone())));
        let Some((filter, pinned)) = context else {
            self.reset_drag_state();
            return None;
        };
        let Some(target) = snap_to_instant(slot) else {
            log::warn!("drop slot {slot:?} did not resolve to an instant; drag cancelled");
            self.reset_drag_state();
            return None;
        };

        let target_channel = match &filter {
            ChannelFilter::Channel(document_id) => Some(document_id.clone()),
            ChannelFilter::All => pinned,
        };

        match target_channel {
            Some(channel_id) => {
                // Clear the visual drag state before the async call starts.
                let idea = session.idea;
                self.reset_drag_state();
                Some(self.spawn_commit(idea, target, channel_id))
            }
            None => {
                // Two-step creation: remember the drop, open the picker, and
                // free the drag state so another gesture can start.
                self.pending = Some(PendingDrop {
                    idea: session.idea,
                    time: target,
                });
                self.picker_open = true;
                self.reset_drag_state();
                None
            }
        }
    }

    /// AwaitingChannelChoice → Committing: the picker confirmed a channel.
    pub fn confirm_channel_selection(&mut self, channel_id: &str) -> Option<JoinHandle<()>> {
        let pending = self.pending.take()?;
        self.picker_open = false;
        Some(self.spawn_commit(pending.idea, pending.time, channel_id.to_string()))
    }

    /// AwaitingChannelChoice → Idle: picker dismissed, no server call.
    pub fn cancel_channel_selection(&mut self) {
        self.picker_open = false;
        self.pending = None;
    }

    /// Full reset of the gesture state. Safe to call in any phase.
    pub fn reset_drag_state(&mut self) {
        self.session = None;
        self.state.with(|s| s.board.clear_shadow());
    }

    /// Loop-shutdown / unmount path: restore cursor styling and drop any
    /// in-progress gesture.
    pub fn teardown(&mut self) {
        self.cursor = CursorState::default();
        self.reset_drag_state();
    }

    fn spawn_commit(
        &self,
        idea: Idea,
        target: DateTime<Local>,
        channel_id: String,
    ) -> JoinHandle<()> {
        let state = self.state.clone();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            commit_scheduled_post(state, api, idea, target, channel_id).await;
        })
    }
}

/// Floor a slot to the 15-minute grid and return it as a local instant.
fn snap_to_instant(slot: TimeSlot) -> Option<DateTime<Local>> {
    let ms = slot.timestamp_ms()?;
    Local.timestamp_millis_opt(round_time(ms, true)).single()
}

/// Single consumer of the pointer-event channel.
///
/// Runs until every sender is dropped (the view unmounted), then tears the
/// controller down and returns it for inspection.
pub struct InteractionLoop {
    controller: DragController,
    rx: mpsc::Receiver<PointerEvent>,
}

impl InteractionLoop {
    /// Bounded channel: high-frequency pointer motion applies backpressure
    /// instead of queueing unboundedly.
    pub fn new(controller: DragController, capacity: usize) -> (mpsc::Sender<PointerEvent>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self { controller, rx })
    }

    pub async fn run(mut self) -> DragController {
        while let Some(event) = self.rx.recv().await {
            self.controller.handle(event);
        }
        self.controller.teardown();
        self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use egui::{pos2, Rect};

    use crate::models::calendar_event::SHADOW_EVENT_ID;
    use crate::models::channel::TelegramChannel;
    use crate::scheduler::state::CalendarState;
    use crate::services::api::schedule::MockScheduleApi;

    const ROW_HEIGHT: f32 = 60.0;

    fn week_grid() -> GridGeometry {
        GridGeometry::week_layout(
            Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(750.0, 1500.0)),
            NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
            50.0,
            0.0,
            ROW_HEIGHT,
        )
    }

    fn test_state(filter: Option<ChannelFilter>) -> SharedCalendarState {
        let mut state = CalendarState::new(NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
        state.channels = vec![TelegramChannel::new("chan-1", "News")];
        state.filter = filter;
        SharedCalendarState::new(state)
    }

    fn controller(filter: Option<ChannelFilter>) -> (DragController, SharedCalendarState) {
        let state = test_state(filter);
        let controller = DragController::new(
            state.clone(),
            Arc::new(MockScheduleApi::new()),
            week_grid(),
        );
        (controller, state)
    }

    fn over_tuesday_at(hour: u32) -> Pos2 {
        // Tuesday Jan 7 is the second column of the focused week.
        pos2(200.0, hour as f32 * ROW_HEIGHT)
    }

    #[test]
    fn test_press_enters_dragging_with_grabbing_cursor() {
        let (mut controller, _) = controller(Some(ChannelFilter::All));
        controller.press(pos2(5.0, 5.0), Idea::new("idea-1", "Idea A"));

        assert_eq!(controller.phase(), DragPhase::Dragging);
        assert_eq!(controller.cursor().icon, CursorIcon::Grabbing);
        assert!(!controller.cursor().text_selection_enabled);
        assert_eq!(controller.session().unwrap().ghost, pos2(15.0, 15.0));
    }

    #[test]
    fn test_motion_over_grid_sets_shadow_and_slot() {
        let (mut controller, state) = controller(Some(ChannelFilter::All));
        controller.press(pos2(5.0, 5.0), Idea::new("idea-1", "Idea A"));
        controller.motion(over_tuesday_at(14));

        let slot = controller.session().unwrap().last_slot.unwrap();
        assert_eq!((slot.day, slot.hour), (7, 14));
        state.with(|s| {
            let shadow = s.board.shadow().unwrap();
            assert_eq!(shadow.id, SHADOW_EVENT_ID);
            assert_eq!(shadow.title, "Idea A");
        });
        assert!(controller.drop_target_time().unwrap().contains("14:00"));
    }

    #[test]
    fn test_motion_outside_clears_shadow_and_slot() {
        let (mut controller, state) = controller(Some(ChannelFilter::All));
        controller.press(pos2(5.0, 5.0), Idea::new("idea-1", "Idea A"));
        controller.motion(over_tuesday_at(14));
        controller.motion(pos2(-100.0, -100.0));

        assert!(controller.session().unwrap().last_slot.is_none());
        state.with(|s| assert!(s.board.shadow().is_none()));
        assert!(controller.drop_target_time().is_none());
    }

    #[test]
    fn test_release_without_slot_returns_to_idle() {
        let (mut controller, state) = controller(Some(ChannelFilter::All));
        controller.press(pos2(5.0, 5.0), Idea::new("idea-1", "Idea A"));
        controller.motion(pos2(-100.0, -100.0));

        assert!(controller.release().is_none());
        assert_eq!(controller.phase(), DragPhase::Idle);
        assert_eq!(controller.cursor(), CursorState::default());
        state.with(|s| assert!(s.board.shadow().is_none()));
    }

    #[test]
    fn test_release_without_filter_context_cancels() {
        let (mut controller, _) = controller(None);
        controller.press(pos2(5.0, 5.0), Idea::new("idea-1", "Idea A"));
        controller.motion(over_tuesday_at(14));

        assert!(controller.release().is_none());
        assert_eq!(controller.phase(), DragPhase::Idle);
    }

    #[test]
    fn test_release_in_all_view_without_pin_opens_picker() {
        let (mut controller, state) = controller(Some(ChannelFilter::All));
        controller.press(pos2(5.0, 5.0), Idea::new("idea-1", "Idea A"));
        controller.motion(over_tuesday_at(14));

        assert!(controller.release().is_none());
        assert_eq!(controller.phase(), DragPhase::AwaitingChannelChoice);
        assert!(controller.picker_open());

        let pending = controller.pending_drop().unwrap();
        assert_eq!(pending.idea.title, "Idea A");
        assert_eq!(pending.time.timestamp_millis() % (15 * 60 * 1000), 0);

        // The drag state itself is free for another gesture.
        assert!(!controller.is_dragging());
        state.with(|s| assert!(s.board.shadow().is_none()));
    }

    #[test]
    fn test_cancel_channel_selection_discards_pending() {
        let (mut controller, _) = controller(Some(ChannelFilter::All));
        controller.press(pos2(5.0, 5.0), Idea::new("idea-1", "Idea A"));
        controller.motion(over_tuesday_at(14));
        controller.release();

        controller.cancel_channel_selection();
        assert_eq!(controller.phase(), DragPhase::Idle);
        assert!(controller.pending_drop().is_none());
    }

    #[test]
    fn test_confirm_without_pending_is_a_no_op() {
        let (mut controller, _) = controller(Some(ChannelFilter::All));
        assert!(controller.confirm_channel_selection("chan-1").is_none());
    }

    #[test]
    fn test_teardown_resets_mid_drag() {
        let (mut controller, state) = controller(Some(ChannelFilter::All));
        controller.press(pos2(5.0, 5.0), Idea::new("idea-1", "Idea A"));
        controller.motion(over_tuesday_at(14));

        controller.teardown();
        assert_eq!(controller.phase(), DragPhase::Idle);
        assert_eq!(controller.cursor(), CursorState::default());
        state.with(|s| assert!(s.board.shadow().is_none()));
    }

    #[tokio::test]
    async fn test_loop_drains_events_and_tears_down_on_close() {
        let (controller, state) = controller(Some(ChannelFilter::All));
        let (tx, interaction_loop) = InteractionLoop::new(controller, 64);
        let run = tokio::spawn(interaction_loop.run());

        tx.send(PointerEvent::Pressed {
            pos: pos2(5.0, 5.0),
            idea: Idea::new("idea-1", "Idea A"),
        })
        .await
        .unwrap();
        tx.send(PointerEvent::Moved {
            pos: over_tuesday_at(9),
        })
        .await
        .unwrap();
        drop(tx);

        let controller = run.await.unwrap();
        assert_eq!(controller.phase(), DragPhase::Idle);
        assert_eq!(controller.cursor(), CursorState::default());
        state.with(|s| assert!(s.board.shadow().is_none()));
    }
}
