// Date utility functions

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone};

pub fn is_same_day(date1: DateTime<Local>, date2: DateTime<Local>) -> bool {
    date1.date_naive() == date2.date_naive()
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Local> {
    Local
        .from_local_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
        .unwrap()
}

pub fn end_of_day(date: NaiveDate) -> DateTime<Local> {
    Local
        .from_local_datetime(&date.and_hms_opt(23, 59, 59).unwrap())
        .unwrap()
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// First day of the month `delta` calendar months away from `date`'s month.
fn month_start_offset(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = date.year() * 12 + date.month0() as i32 + delta;
    let year = months.div_euclid(12);
    let month0 = months.rem_euclid(12) as u32;
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap()
}

/// The event fetch window centered on the focused date: from the first day
/// of the previous month through the last day of the next month, in local
/// wall-clock time.
pub fn fetch_window(focus: NaiveDate) -> (DateTime<Local>, DateTime<Local>) {
    let start = month_start_offset(focus, -1);
    let end = month_start_offset(focus, 2) - Duration::days(1);
    (start_of_day(start), end_of_day(end))
}

/// Format an instant with its weekday for the drag ghost label,
/// e.g. "Tue, 07 Jan 14:00".
pub fn format_date_time_with_weekday(date: DateTime<Local>) -> String {
    date.format("%a, %d %b %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_get_week_start_sunday() {
        // Wednesday, Dec 4, 2024
        let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let start = get_week_start(date, 0);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    }

    #[test]
    fn test_get_week_start_monday() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let start = get_week_start(date, 1);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 2).unwrap());
    }

    #[test]
    fn test_fetch_window_spans_three_months() {
        let focus = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let (start, end) = fetch_window(focus);
        assert_eq!(
            start.date_naive(),
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
        );
        assert_eq!(
            end.date_naive(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert_eq!(start.hour(), 0);
        assert_eq!(end.hour(), 23);
    }

    #[test]
    fn test_fetch_window_wraps_year_boundary() {
        let focus = NaiveDate::from_ymd_opt(2024, 12, 10).unwrap();
        let (start, end) = fetch_window(focus);
        assert_eq!(
            start.date_naive(),
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()
        );
        assert_eq!(
            end.date_naive(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_is_same_day() {
        let morning = start_of_day(NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
        let evening = end_of_day(NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
        assert!(is_same_day(morning, evening));
    }

    #[test]
    fn test_format_with_weekday() {
        let date = start_of_day(NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
        let formatted = format_date_time_with_weekday(date);
        assert!(formatted.starts_with("Tue"));
        assert!(formatted.contains("07 Jan"));
    }
}
