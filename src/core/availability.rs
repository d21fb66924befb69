//! Category availability windows.
//!
//! A window is a same-day `HH:MM`–`HH:MM` range. Overnight ranges are not
//! supported and are rejected when parsed.

use crate::errors::{Error, Result};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Raw window as shown to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityHours {
    /// Opening time, `HH:MM`
    pub start: String,
    /// Closing time, `HH:MM`
    pub end: String,
}

/// Parsed, validated window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl AvailabilityWindow {
    /// Parses `start` and `end` as `HH:MM` and checks `start < end`.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] for malformed times or a window that does
    /// not end after it starts.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start_time = parse_hhmm(start)?;
        let end_time = parse_hhmm(end)?;

        if start_time >= end_time {
            return Err(Error::validation(format!(
                "Availability window {start}-{end} must end after it starts"
            )));
        }

        Ok(Self {
            start: start_time,
            end: end_time,
        })
    }

    /// True when `time` falls inside the window, both ends inclusive.
    #[must_use]
    pub fn contains(&self, time: NaiveTime) -> bool {
        // Compare at minute precision, as the bounds are
        let minute = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
        self.start <= minute && minute <= self.end
    }
}

fn parse_hhmm(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| Error::validation(format!("Invalid time '{value}': {e}")))
}

/// Builds the client-facing window when both ends are set.
#[must_use]
pub fn availability_hours(start: Option<&str>, end: Option<&str>) -> Option<AvailabilityHours> {
    match (start, end) {
        (Some(s), Some(e)) if !s.is_empty() && !e.is_empty() => Some(AvailabilityHours {
            start: s.to_string(),
            end: e.to_string(),
        }),
        _ => None,
    }
}

/// Whether a category with these hours is open at `now`.
///
/// No window means always open. A window that fails to parse is logged and
/// treated as no window, so a typo in the admin data never hides a category.
#[must_use]
pub fn is_open(hours: Option<&AvailabilityHours>, now: NaiveTime) -> bool {
    let Some(hours) = hours else {
        return true;
    };

    match AvailabilityWindow::parse(&hours.start, &hours.end) {
        Ok(window) => window.contains(now),
        Err(e) => {
            tracing::warn!("Ignoring availability window: {e}");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_contains_is_inclusive() {
        let window = AvailabilityWindow::parse("07:00", "12:00").unwrap();
        assert!(window.contains(at(7, 0)));
        assert!(window.contains(at(9, 30)));
        assert!(window.contains(at(12, 0)));
        assert!(window.contains(NaiveTime::from_hms_opt(12, 0, 45).unwrap()));
        assert!(!window.contains(at(6, 59)));
        assert!(!window.contains(at(12, 1)));
    }

    #[test]
    fn test_overnight_window_rejected() {
        assert!(matches!(
            AvailabilityWindow::parse("22:00", "02:00"),
            Err(Error::Validation { .. })
        ));
        assert!(AvailabilityWindow::parse("10:00", "10:00").is_err());
    }

    #[test]
    fn test_malformed_time_rejected() {
        assert!(AvailabilityWindow::parse("7am", "12:00").is_err());
        assert!(AvailabilityWindow::parse("07:00", "25:00").is_err());
    }

    #[test]
    fn test_availability_hours_needs_both_ends() {
        assert!(availability_hours(Some("07:00"), None).is_none());
        assert!(availability_hours(None, Some("12:00")).is_none());
        assert!(availability_hours(Some(""), Some("12:00")).is_none());
        assert_eq!(
            availability_hours(Some("07:00"), Some("12:00")),
            Some(AvailabilityHours {
                start: "07:00".to_string(),
                end: "12:00".to_string()
            })
        );
    }

    #[test]
    fn test_is_open() {
        let hours = availability_hours(Some("07:00"), Some("12:00"));
        assert!(is_open(hours.as_ref(), at(8, 0)));
        assert!(!is_open(hours.as_ref(), at(13, 0)));
        assert!(is_open(None, at(3, 0)));

        let broken = availability_hours(Some("late"), Some("12:00"));
        assert!(is_open(broken.as_ref(), at(13, 0)));
    }
}
