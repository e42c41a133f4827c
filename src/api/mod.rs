use chrono::NaiveDate;

use crate::error::AppError;

pub mod clock;
pub mod dashboard;
pub mod timesheet;

/// Trims an employee name from user input and rejects empty results
/// before anything touches the database. Interior case and spacing are
/// preserved: "Alice", "alice" and "Alice  B" are three employees.
pub fn validate_employee(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Employee name cannot be empty".into()));
    }
    Ok(name.to_string())
}

/// An inverted date range is caller error, not an empty result set.
pub fn validate_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), AppError> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(AppError::Validation(
                "End date cannot be before start date".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_but_otherwise_untouched() {
        assert_eq!(validate_employee("  Alice  ").unwrap(), "Alice");
        assert_eq!(validate_employee("aLiCe").unwrap(), "aLiCe");
        assert_eq!(validate_employee("Alice  B").unwrap(), "Alice  B");
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(validate_employee("").is_err());
        assert!(validate_employee("   ").is_err());
        assert!(validate_employee("\t\n").is_err());
    }

    #[test]
    fn inverted_date_ranges_are_rejected() {
        let jan = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        assert!(validate_date_range(Some(jan(10)), Some(jan(1))).is_err());
        assert!(validate_date_range(Some(jan(1)), Some(jan(10))).is_ok());
        assert!(validate_date_range(Some(jan(1)), Some(jan(1))).is_ok());
        assert!(validate_date_range(None, Some(jan(1))).is_ok());
        assert!(validate_date_range(Some(jan(1)), None).is_ok());
        assert!(validate_date_range(None, None).is_ok());
    }
}
