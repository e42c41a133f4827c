use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::utils::time::{format_duration, round_hours};

/// One row of the `time_entries` table. `clock_out = NULL` means the
/// shift is still open. Rows are never updated in place except to set
/// `clock_out` once.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "7d6f2f5e-6a3b-4c59-9d55-1f0a2f9c9b10",
        "employee": "Alice Example",
        "clock_in": "2024-01-01T09:00:00Z",
        "clock_out": "2024-01-01T17:30:00Z",
        "created_at": "2024-01-01T09:00:00Z"
    })
)]
pub struct TimeEntry {
    #[schema(example = "7d6f2f5e-6a3b-4c59-9d55-1f0a2f9c9b10", value_type = String)]
    pub id: Uuid,

    #[schema(example = "Alice Example")]
    pub employee: String,

    #[schema(example = "2024-01-01T09:00:00Z", format = "date-time", value_type = String)]
    pub clock_in: DateTime<Utc>,

    #[schema(example = "2024-01-01T17:30:00Z", format = "date-time", value_type = String)]
    pub clock_out: Option<DateTime<Utc>>,

    #[schema(example = "2024-01-01T09:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TimeEntry {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Elapsed time of a closed shift; `None` while the shift is open.
    pub fn duration(&self) -> Option<Duration> {
        self.clock_out.map(|out| out - self.clock_in)
    }

    /// Shift length in hours, rounded to two decimals.
    pub fn duration_hours(&self) -> Option<f64> {
        self.duration().map(round_hours)
    }
}

/// API shape of an entry: the row plus its derived duration fields,
/// shared by the clock, timesheet and dashboard responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EntryView {
    #[schema(example = "7d6f2f5e-6a3b-4c59-9d55-1f0a2f9c9b10", value_type = String)]
    pub id: Uuid,

    #[schema(example = "Alice Example")]
    pub employee: String,

    #[schema(example = "2024-01-01T09:00:00Z", format = "date-time", value_type = String)]
    pub clock_in: DateTime<Utc>,

    #[schema(example = "2024-01-01T17:30:00Z", format = "date-time", value_type = String)]
    pub clock_out: Option<DateTime<Utc>>,

    #[schema(example = "2024-01-01T09:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,

    /// `"8h 30m"` for closed shifts, `null` while open.
    #[schema(example = "8h 30m")]
    pub duration: Option<String>,

    #[schema(example = 8.5)]
    pub duration_hours: Option<f64>,
}

impl From<TimeEntry> for EntryView {
    fn from(entry: TimeEntry) -> Self {
        let duration = entry.duration().map(format_duration);
        let duration_hours = entry.duration_hours();
        Self {
            id: entry.id,
            employee: entry.employee,
            clock_in: entry.clock_in,
            clock_out: entry.clock_out,
            created_at: entry.created_at,
            duration,
            duration_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn entry(employee: &str, clock_in: &str, clock_out: Option<&str>) -> TimeEntry {
        let parse = |s: &str| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
                .unwrap()
                .and_utc()
        };
        TimeEntry {
            id: Uuid::new_v4(),
            employee: employee.to_string(),
            clock_in: parse(clock_in),
            clock_out: clock_out.map(parse),
            created_at: None,
        }
    }

    #[test]
    fn closed_shift_has_duration() {
        let e = entry("Alice", "2024-01-01 09:00", Some("2024-01-01 17:30"));
        assert!(!e.is_open());
        assert_eq!(e.duration(), Some(Duration::minutes(510)));
        assert_eq!(e.duration_hours(), Some(8.5));
    }

    #[test]
    fn open_shift_has_no_duration() {
        let e = entry("Bob", "2024-01-01 09:00", None);
        assert!(e.is_open());
        assert_eq!(e.duration(), None);
        assert_eq!(e.duration_hours(), None);
    }

    #[test]
    fn view_formats_the_duration() {
        let view = EntryView::from(entry("Alice", "2024-01-01 09:00", Some("2024-01-01 17:30")));
        assert_eq!(view.duration.as_deref(), Some("8h 30m"));
        assert_eq!(view.duration_hours, Some(8.5));

        let open = EntryView::from(entry("Bob", "2024-01-01 09:00", None));
        assert_eq!(open.duration, None);
        assert_eq!(open.duration_hours, None);
    }

    #[test]
    fn hours_round_to_two_decimals() {
        // 7h 47m = 7.7833... hours
        let e = entry("Alice", "2024-01-01 09:00", Some("2024-01-01 16:47"));
        assert_eq!(e.duration_hours(), Some(7.78));
    }
}
