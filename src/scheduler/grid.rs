//! Pointer-to-slot geometry for the calendar grid.
//!
//! The grid is an explicit model: day columns and the hour-row metric are
//! data supplied by the view layer on every layout pass. Resolving a pointer
//! position therefore never inspects rendered widgets: [`GridGeometry`]
//! carries everything needed to map screen coordinates to a [`TimeSlot`].
//!
//! Resolution never fails hard: a pointer inside the container always yields
//! a slot, degrading to the focused date and noon when column or row
//! information is missing. Month view has no time axis and yields no slot.

use chrono::{Datelike, Duration, Local, NaiveDate, TimeZone};
use egui::{Pos2, Rect};

use crate::scheduler::time::{round_time, TimeSlot};
use crate::utils::date::get_week_start;

/// Which calendar layout is currently rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarView {
    Day,
    Week,
    Month,
}

/// Default hour when the grid exposes no row metric.
const DEFAULT_HOUR: u32 = 12;

/// Upper clamp for the fractional-hour axis, just short of midnight.
const MAX_FRACTIONAL_HOURS: f32 = 23.99;

/// One rendered day column: its date plus horizontal pixel bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub left: f32,
    pub right: f32,
}

impl DayColumn {
    pub fn new(date: NaiveDate, left: f32, right: f32) -> Self {
        Self { date, left, right }
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left && x < self.right
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

/// Explicit geometry of the rendered calendar grid.
///
/// `first_row_top` is the top edge of the 00:00 row in the container's
/// scrollable coordinate space (screen offset from the container top plus
/// the scroll position at layout time). `row_height` is pixels per hour.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    /// Container bounds in screen coordinates.
    pub bounds: Rect,
    pub view: CalendarView,
    /// The focused date, used by every fallback path.
    pub focus: NaiveDate,
    pub columns: Vec<DayColumn>,
    pub first_row_top: f32,
    pub row_height: f32,
    pub scroll_offset: f32,
}

impl GridGeometry {
    /// Build a week layout with evenly spaced columns starting at the Monday
    /// of the focused week.
    pub fn week_layout(
        bounds: Rect,
        focus: NaiveDate,
        time_label_width: f32,
        first_row_top: f32,
        row_height: f32,
    ) -> Self {
        let monday = get_week_start(focus, 1);
        let grid_left = bounds.left() + time_label_width;
        let col_width = (bounds.width() - time_label_width) / 7.0;
        let columns = (0..7)
            .map(|i| {
                let left = grid_left + i as f32 * col_width;
                DayColumn::new(monday + Duration::days(i), left, left + col_width)
            })
            .collect();

        Self {
            bounds,
            view: CalendarView::Week,
            focus,
            columns,
            first_row_top,
            row_height,
            scroll_offset: 0.0,
        }
    }

    /// Build a single-column day layout for the focused date.
    pub fn day_layout(
        bounds: Rect,
        focus: NaiveDate,
        time_label_width: f32,
        first_row_top: f32,
        row_height: f32,
    ) -> Self {
        let grid_left = bounds.left() + time_label_width;
        let columns = vec![DayColumn::new(focus, grid_left, bounds.right())];
        Self {
            bounds,
            view: CalendarView::Day,
            focus,
            columns,
            first_row_top,
            row_height,
            scroll_offset: 0.0,
        }
    }

    /// Resolve the time slot under the pointer, snapped down to the
    /// 15-minute grid. `None` means the position is not a valid drop target
    /// (outside the container, or a view without a time axis).
    pub fn slot_at(&self, pointer: Pos2) -> Option<TimeSlot> {
        if self.view == CalendarView::Month {
            return None;
        }
        if !self.bounds.contains(pointer) {
            return None;
        }

        let date = self.resolve_date(pointer.x);
        let (hour, minute) = self.resolve_time(pointer.y);

        let slot = TimeSlot::new(date.year(), date.month(), date.day(), hour, minute);
        let instant = slot.to_local()?;
        let snapped_ms = round_time(instant.timestamp_millis(), true);
        let snapped = Local.timestamp_millis_opt(snapped_ms).single()?;
        Some(TimeSlot::from_local(snapped))
    }

    /// Horizontal axis: which day the pointer is over.
    fn resolve_date(&self, x: f32) -> NaiveDate {
        if let Some(column) = self.columns.iter().find(|c| c.contains_x(x)) {
            return column.date;
        }
        if self.view == CalendarView::Day {
            return self.focus;
        }
        self.estimate_column_date(x)
    }

    /// Column estimate for pointers inside the container but outside every
    /// column's bounds (e.g. over the time-label gutter): project the
    /// position onto the uniform column width and clamp to the week.
    fn estimate_column_date(&self, x: f32) -> NaiveDate {
        let Some(first) = self.columns.first() else {
            log::debug!("grid has no day columns; falling back to focused date");
            return self.focus;
        };
        let width = first.width();
        if width <= 0.0 {
            return self.focus;
        }

        let index = (((x - first.left) / width).floor() as i64)
            .clamp(0, self.columns.len() as i64 - 1);
        let monday = get_week_start(self.focus, 1);
        monday + Duration::days(index)
    }

    /// Vertical axis: fractional hours from the pointer's position in the
    /// grid's scrollable coordinate space.
    fn resolve_time(&self, y: f32) -> (u32, u32) {
        if self.row_height <= 0.0 {
            log::debug!("grid has no hour-row metric; defaulting to noon");
            return (DEFAULT_HOUR, 0);
        }

        let scroll_y = y - self.bounds.top() + self.scroll_offset;
        let relative = scroll_y - self.first_row_top;
        let hours_exact = (relative / self.row_height).clamp(0.0, MAX_FRACTIONAL_HOURS);
        let hour = hours_exact.floor();
        let minute = ((hours_exact - hour) * 60.0).floor();
        (hour as u32, minute as u32)
    }
}
