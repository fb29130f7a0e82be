//! Channel and status color resolution.
//!
//! Channel colors are authoritative when saved on the server
//! (`calendar_color`); otherwise a deterministic palette fallback is derived
//! from the channel's position in the channel list. The fallback can shift
//! when the list order changes between renders, a documented limitation of
//! index-based assignment, kept as-is.

use egui::Color32;

use crate::models::calendar_event::EventStatus;
use crate::models::channel::TelegramChannel;

/// Default color palette for channels without a saved color.
pub const DEFAULT_COLORS: [&str; 8] = [
    "#1976D2", // Blue
    "#388E3C", // Green
    "#F57C00", // Orange
    "#7B1FA2", // Purple
    "#C2185B", // Pink
    "#00796B", // Teal
    "#5D4037", // Brown
    "#455A64", // Blue Grey
];

/// Swatch rows offered by the channel color picker.
pub const COLOR_SWATCHES: [[&str; 3]; 4] = [
    ["#1976D2", "#388E3C", "#F57C00"],
    ["#7B1FA2", "#C2185B", "#00796B"],
    ["#5D4037", "#455A64", "#E64A19"],
    ["#0097A7", "#689F38", "#FFA000"],
];

/// Neutral gray for the "all channels" pseudo-channel.
pub const NEUTRAL_CHANNEL_COLOR: &str = "#757575";

/// Fallback event color when no channel is known yet.
pub const DEFAULT_EVENT_COLOR: &str = "#1976D2";

/// Resolve the display color for a channel.
///
/// Precedence: no channel / the "all" pseudo-channel → neutral gray; a saved
/// `calendar_color` → returned verbatim; otherwise the channel's index in
/// `channels` modulo the default palette.
pub fn channel_color(channel: Option<&TelegramChannel>, channels: &[TelegramChannel]) -> String {
    let Some(channel) = channel else {
        return NEUTRAL_CHANNEL_COLOR.to_string();
    };
    if channel.document_id == "all" {
        return NEUTRAL_CHANNEL_COLOR.to_string();
    }
    if let Some(saved) = channel.calendar_color.as_deref().filter(|c| !c.is_empty()) {
        return saved.to_string();
    }

    let index = channels
        .iter()
        .position(|c| c.document_id == channel.document_id)
        .unwrap_or(0);
    DEFAULT_COLORS[index % DEFAULT_COLORS.len()].to_string()
}

/// Hex color for an event status dot. Total over all statuses.
pub fn status_color(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Scheduled => "#2196F3",
        EventStatus::Published => "#4CAF50",
        EventStatus::Failed => "#F44336",
        EventStatus::Preview | EventStatus::Loading => "#9E9E9E",
    }
}

/// Parse a hex color string to Color32.
///
/// # Arguments
/// * `hex` - A hex color string, optionally prefixed with '#' (e.g. "#FF5500")
///
/// # Returns
/// * `Some(Color32)` if parsing succeeds
/// * `None` if the input is empty or invalid
pub fn parse_color(hex: &str) -> Option<Color32> {
    if hex.is_empty() {
        return None;
    }

    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}
