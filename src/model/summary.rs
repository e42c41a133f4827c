use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::time_entry::TimeEntry;
use crate::utils::time::round_2dp;

/// Aggregate figures for one employee name.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StaffSummary {
    #[schema(example = "Alice Example")]
    pub employee: String,
    #[schema(example = 8.5)]
    pub total_hours: f64,
    #[schema(example = 1)]
    pub total_shifts: i64,
    #[schema(example = 0)]
    pub open_shifts: i64,
}

/// Dashboard roll-up over a set of entries: per-employee figures plus
/// overall totals. Open shifts count as shifts but contribute no hours.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OverallSummary {
    #[schema(example = 8.5)]
    pub total_hours: f64,
    #[schema(example = 2)]
    pub total_shifts: i64,
    #[schema(example = 2)]
    pub unique_employees: i64,
    pub staff: Vec<StaffSummary>,
}

impl OverallSummary {
    pub fn from_entries(entries: &[TimeEntry]) -> Self {
        let mut staff: BTreeMap<&str, StaffSummary> = BTreeMap::new();

        for entry in entries {
            let row = staff
                .entry(entry.employee.as_str())
                .or_insert_with(|| StaffSummary {
                    employee: entry.employee.clone(),
                    total_hours: 0.0,
                    total_shifts: 0,
                    open_shifts: 0,
                });
            row.total_shifts += 1;
            if entry.is_open() {
                row.open_shifts += 1;
            } else {
                row.total_hours += entry.duration_hours().unwrap_or(0.0);
            }
        }

        let staff: Vec<StaffSummary> = staff
            .into_values()
            .map(|mut row| {
                row.total_hours = round_2dp(row.total_hours);
                row
            })
            .collect();

        Self {
            total_hours: round_2dp(staff.iter().map(|s| s.total_hours).sum()),
            total_shifts: staff.iter().map(|s| s.total_shifts).sum(),
            unique_employees: staff.len() as i64,
            staff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use uuid::Uuid;

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
    fn empty_input_yields_zeroes() {
        let summary = OverallSummary::from_entries(&[]);
        assert_eq!(summary.total_hours, 0.0);
        assert_eq!(summary.total_shifts, 0);
        assert_eq!(summary.unique_employees, 0);
        assert!(summary.staff.is_empty());
    }

    #[test]
    fn open_shifts_count_as_shifts_without_hours() {
        // Alice worked 09:00-17:30; Bob clocked in and never out.
        let entries = vec![
            entry("Alice", "2024-01-01 09:00", Some("2024-01-01 17:30")),
            entry("Bob", "2024-01-01 10:00", None),
        ];
        let summary = OverallSummary::from_entries(&entries);

        assert_eq!(summary.total_hours, 8.5);
        assert_eq!(summary.total_shifts, 2);
        assert_eq!(summary.unique_employees, 2);

        let alice = &summary.staff[0];
        assert_eq!(alice.employee, "Alice");
        assert_eq!(alice.total_hours, 8.5);
        assert_eq!(alice.total_shifts, 1);
        assert_eq!(alice.open_shifts, 0);

        let bob = &summary.staff[1];
        assert_eq!(bob.employee, "Bob");
        assert_eq!(bob.total_hours, 0.0);
        assert_eq!(bob.total_shifts, 1);
        assert_eq!(bob.open_shifts, 1);
    }

    #[test]
    fn staff_rows_accumulate_and_sort_by_name() {
        let entries = vec![
            entry("Zoe", "2024-01-01 09:00", Some("2024-01-01 13:00")),
            entry("Amir", "2024-01-01 09:00", Some("2024-01-01 11:15")),
            entry("Zoe", "2024-01-02 09:00", Some("2024-01-02 12:30")),
        ];
        let summary = OverallSummary::from_entries(&entries);

        assert_eq!(summary.unique_employees, 2);
        assert_eq!(summary.staff[0].employee, "Amir");
        assert_eq!(summary.staff[0].total_hours, 2.25);
        assert_eq!(summary.staff[1].employee, "Zoe");
        assert_eq!(summary.staff[1].total_hours, 7.5);
        assert_eq!(summary.staff[1].total_shifts, 2);
        assert_eq!(summary.total_hours, 9.75);
    }

    #[test]
    fn names_differing_in_case_stay_separate() {
        let entries = vec![
            entry("alice", "2024-01-01 09:00", Some("2024-01-01 10:00")),
            entry("Alice", "2024-01-01 09:00", Some("2024-01-01 10:00")),
        ];
        let summary = OverallSummary::from_entries(&entries);
        assert_eq!(summary.unique_employees, 2);
    }
}
