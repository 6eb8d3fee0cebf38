//! Date-window legality checks.

use chrono::NaiveDate;

use crate::reports::error::ValidationError;
use crate::reports::types::DateWindow;

/// Longest window a single report may cover, in days between start and end.
pub const MAX_SPAN_DAYS: i64 = 31;

/// Validates a requested window against the operational floor and the
/// current day, producing a [`DateWindow`] the engine can trust.
///
/// Rules, first violation wins:
/// 1. `start >= min_allowed`
/// 2. `end >= start`
/// 3. `end - start <= 31 days`
/// 4. `end < today` — same-day and future end dates are rejected since
///    their telemetry is still incomplete.
pub fn validate_window(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
    min_allowed: NaiveDate,
) -> Result<DateWindow, ValidationError> {
    if start < min_allowed {
        return Err(ValidationError::BelowMinimumStart {
            start,
            min: min_allowed,
        });
    }

    if end < start {
        return Err(ValidationError::EndBeforeStart { start, end });
    }

    let days = (end - start).num_days();
    if days > MAX_SPAN_DAYS {
        return Err(ValidationError::SpanTooLong {
            days,
            max: MAX_SPAN_DAYS,
        });
    }

    if end >= today {
        return Err(ValidationError::EndNotInPast { end, today });
    }

    Ok(DateWindow { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_accepts_legal_window() {
        let window = validate_window(
            d("2025-02-01"),
            d("2025-02-15"),
            d("2025-03-01"),
            d("2025-01-01"),
        )
        .unwrap();
        assert_eq!(window.start, d("2025-02-01"));
        assert_eq!(window.end, d("2025-02-15"));
    }

    #[test]
    fn test_single_day_window_is_legal() {
        let window = validate_window(
            d("2025-02-01"),
            d("2025-02-01"),
            d("2025-03-01"),
            d("2025-01-01"),
        )
        .unwrap();
        assert!(window.contains(d("2025-02-01")));
        assert!(!window.contains(d("2025-02-02")));
    }

    #[test]
    fn test_below_minimum_start() {
        // start before the floor, even though the rest of the query is fine
        let err = validate_window(
            d("2025-01-10"),
            d("2025-01-20"),
            d("2025-01-25"),
            d("2025-01-15"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::BelowMinimumStart {
                start: d("2025-01-10"),
                min: d("2025-01-15"),
            }
        );
    }

    #[test]
    fn test_end_before_start() {
        let err = validate_window(
            d("2025-02-10"),
            d("2025-02-05"),
            d("2025-03-01"),
            d("2025-01-01"),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::EndBeforeStart { .. }));
    }

    #[test]
    fn test_span_too_long() {
        let err = validate_window(
            d("2025-01-01"),
            d("2025-02-02"),
            d("2025-03-01"),
            d("2025-01-01"),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::SpanTooLong { days: 32, max: 31 });
    }

    #[test]
    fn test_span_of_exactly_31_days_is_legal() {
        assert!(
            validate_window(
                d("2025-01-01"),
                d("2025-02-01"),
                d("2025-03-01"),
                d("2025-01-01"),
            )
            .is_ok()
        );
    }

    #[test]
    fn test_end_today_rejected() {
        let err = validate_window(
            d("2025-02-01"),
            d("2025-02-10"),
            d("2025-02-10"),
            d("2025-01-01"),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::EndNotInPast { .. }));
    }

    #[test]
    fn test_end_in_future_rejected() {
        let err = validate_window(
            d("2025-02-01"),
            d("2025-02-20"),
            d("2025-02-10"),
            d("2025-01-01"),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::EndNotInPast { .. }));
    }

    #[test]
    fn test_rule_order_first_violation_wins() {
        // Violates every rule at once; the floor check must win.
        let err = validate_window(
            d("2024-01-01"),
            d("2023-01-01"),
            d("2023-06-01"),
            d("2025-01-01"),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::BelowMinimumStart { .. }));
    }
}
