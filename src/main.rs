// Content Calendar
// Main entry point: fetch the channel list and the scheduled posts around
// today, and print the upcoming schedule.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};

use content_calendar::models::channel::ChannelFilter;
use content_calendar::scheduler::commit::refresh_events;
use content_calendar::scheduler::palette::status_color;
use content_calendar::scheduler::state::{CalendarState, SharedCalendarState};
use content_calendar::services::api::{ChannelApi, StrapiClient};
use content_calendar::services::config::AppConfig;
use content_calendar::utils::date::format_date_time_with_weekday;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Content Calendar");

    let config = AppConfig::load()?;
    let client = Arc::new(
        StrapiClient::new(
            &config.api_base_url,
            config.api_token.as_deref(),
            Duration::from_secs(config.request_timeout_secs),
        )
        .context("Failed to build Strapi client")?,
    );

    let mut initial = CalendarState::new(Local::now().date_naive());
    initial.filter = Some(ChannelFilter::All);
    let state = SharedCalendarState::new(initial);

    match client.list_channels().await {
        Ok(channels) => {
            log::info!("Loaded {} channels", channels.len());
            state.with(|s| s.channels = channels);
        }
        Err(err) => log::warn!("Failed to load channels: {err}"),
    }

    refresh_events(&state, client.as_ref()).await;

    state.with(|s| {
        if s.board.events().is_empty() {
            println!("No scheduled posts in the current window.");
        }
        for event in s.board.events() {
            let when = Local
                .timestamp_millis_opt(event.start)
                .single()
                .map(format_date_time_with_weekday)
                .unwrap_or_else(|| "??".to_string());
            let channel = event
                .channel
                .as_ref()
                .map(|c| c.title.as_str())
                .unwrap_or("(no channel)");
            println!(
                "{}  {}  {}  [{}]",
                when,
                status_color(event.status),
                event.title,
                channel
            );
        }
        for toast in s.toasts.active() {
            eprintln!("{} {}", toast.level.icon(), toast.message);
        }
    });

    Ok(())
}
