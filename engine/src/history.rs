//! Rows for the history screen.

use chrono::{DateTime, Utc};

use pomo_types::{Cycle, CycleStatus};

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 1_440;
const MINUTES_PER_MONTH: i64 = 43_200;
const MINUTES_PER_YEAR: i64 = 525_600;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub task: String,
    pub duration: String,
    pub started: String,
    pub status: CycleStatus,
}

/// One row per cycle, in creation order.
#[must_use]
pub fn history_rows(cycles: &[Cycle], now: DateTime<Utc>) -> Vec<HistoryRow> {
    cycles
        .iter()
        .map(|cycle| HistoryRow {
            task: cycle.task.to_string(),
            duration: format!("{} minutes", cycle.minutes_amount.get()),
            started: relative_time(cycle.start_date, now),
            status: cycle.status(),
        })
        .collect()
}

/// Human distance from `then` to `now`, e.g. "about 2 hours ago".
///
/// Future instants are treated as "now".
#[must_use]
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    let minutes = (seconds + 30) / 60;

    if seconds < 30 {
        "less than a minute ago".to_string()
    } else if minutes < 2 {
        "1 minute ago".to_string()
    } else if minutes < 45 {
        format!("{minutes} minutes ago")
    } else if minutes < 90 {
        "about 1 hour ago".to_string()
    } else if minutes < MINUTES_PER_DAY {
        let hours = (minutes + MINUTES_PER_HOUR / 2) / MINUTES_PER_HOUR;
        format!("about {hours} hours ago")
    } else if minutes < 42 * MINUTES_PER_HOUR {
        "1 day ago".to_string()
    } else if minutes < 30 * MINUTES_PER_DAY {
        let days = (minutes + MINUTES_PER_DAY / 2) / MINUTES_PER_DAY;
        format!("{days} days ago")
    } else if minutes < 45 * MINUTES_PER_DAY {
        "about 1 month ago".to_string()
    } else if minutes < MINUTES_PER_YEAR {
        let months = ((minutes + MINUTES_PER_MONTH / 2) / MINUTES_PER_MONTH).clamp(2, 11);
        format!("{months} months ago")
    } else {
        match minutes / MINUTES_PER_YEAR {
            1 => "about 1 year ago".to_string(),
            years => format!("{years} years ago"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use pomo_types::{Cycle, CycleStatus, NewCycleFormData};

    use super::{history_rows, relative_time};

    #[test]
    fn relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let ago = |d: Duration| relative_time(now - d, now);

        assert_eq!(ago(Duration::seconds(0)), "less than a minute ago");
        assert_eq!(ago(Duration::seconds(29)), "less than a minute ago");
        assert_eq!(ago(Duration::seconds(30)), "1 minute ago");
        assert_eq!(ago(Duration::seconds(89)), "1 minute ago");
        assert_eq!(ago(Duration::seconds(90)), "2 minutes ago");
        assert_eq!(ago(Duration::minutes(44)), "44 minutes ago");
        assert_eq!(ago(Duration::minutes(45)), "about 1 hour ago");
        assert_eq!(ago(Duration::minutes(90)), "about 2 hours ago");
        assert_eq!(ago(Duration::hours(23)), "about 23 hours ago");
        assert_eq!(ago(Duration::hours(30)), "1 day ago");
        assert_eq!(ago(Duration::days(3)), "3 days ago");
        assert_eq!(ago(Duration::days(35)), "about 1 month ago");
        assert_eq!(ago(Duration::days(100)), "3 months ago");
        assert_eq!(ago(Duration::days(400)), "about 1 year ago");
        assert_eq!(ago(Duration::days(800)), "2 years ago");
    }

    #[test]
    fn future_start_reads_as_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(
            relative_time(now + Duration::minutes(5), now),
            "less than a minute ago"
        );
    }

    #[test]
    fn rows_follow_creation_order() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut first = Cycle::start(
            NewCycleFormData::new("Emails", 15).validate().expect("valid"),
            now - Duration::minutes(40),
        );
        first.finished_date = Some(now - Duration::minutes(25));
        let second = Cycle::start(
            NewCycleFormData::new("Deep work", 50)
                .validate()
                .expect("valid"),
            now - Duration::minutes(10),
        );

        let rows = history_rows(&[first, second], now);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].task, "Emails");
        assert_eq!(rows[0].duration, "15 minutes");
        assert_eq!(rows[0].started, "40 minutes ago");
        assert_eq!(rows[0].status, CycleStatus::Finished);
        assert_eq!(rows[1].status, CycleStatus::InProgress);
    }
}
