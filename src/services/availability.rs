use crate::models::slot_status::SlotStatus;
use crate::services::constants::{SLOT_TIME_FORMAT, UPCOMING_WINDOW_MINUTES};
use chrono::NaiveTime;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid slot time {value:?}, expected HH:MM:SS")]
pub struct SlotTimeError {
    pub value: String,
    #[source]
    pub source: chrono::ParseError,
}

pub fn parse_slot_time(value: &str) -> Result<NaiveTime, SlotTimeError> {
    NaiveTime::parse_from_str(value, SLOT_TIME_FORMAT).map_err(|source| SlotTimeError {
        value: value.to_string(),
        source,
    })
}

/// Classifies a slot against the current time of day.
///
/// A slot whose end is before its start runs past midnight. Such a slot is
/// available from its start until midnight and again from midnight until its
/// end, and is never reported as passed.
pub fn classify_slot(current: NaiveTime, start: NaiveTime, end: NaiveTime) -> SlotStatus {
    let minutes_until = (start - current).num_milliseconds() as f64 / 60_000.0;
    let starts_soon = minutes_until > 0.0 && minutes_until < UPCOMING_WINDOW_MINUTES;

    if end < start {
        return if current >= start || current <= end {
            SlotStatus::Available
        } else if starts_soon {
            SlotStatus::Upcoming
        } else {
            SlotStatus::Unavailable
        };
    }

    if starts_soon {
        SlotStatus::Upcoming
    } else if start <= current && current <= end {
        SlotStatus::Available
    } else if current > end {
        SlotStatus::Passed
    } else {
        SlotStatus::Unavailable
    }
}

/// Parses both slot times and classifies the slot
pub fn slot_status(current: NaiveTime, start: &str, end: &str) -> Result<SlotStatus, SlotTimeError> {
    Ok(classify_slot(
        current,
        parse_slot_time(start)?,
        parse_slot_time(end)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(value: &str) -> NaiveTime {
        parse_slot_time(value).unwrap()
    }

    fn classify(current: &str, start: &str, end: &str) -> SlotStatus {
        classify_slot(time(current), time(start), time(end))
    }

    #[test]
    fn inside_slot_is_available() {
        assert_eq!(classify("10:00:00", "09:00:00", "17:00:00"), SlotStatus::Available);
        assert_eq!(classify("09:00:00", "09:00:00", "17:00:00"), SlotStatus::Available);
        assert_eq!(classify("17:00:00", "09:00:00", "17:00:00"), SlotStatus::Available);
    }

    #[test]
    fn slot_starting_soon_is_upcoming() {
        assert_eq!(classify("08:50:00", "09:00:00", "17:00:00"), SlotStatus::Upcoming);
        assert_eq!(classify("08:40:01", "09:00:00", "17:00:00"), SlotStatus::Upcoming);
    }

    #[test]
    fn last_second_before_start_is_upcoming() {
        let current = NaiveTime::from_hms_milli_opt(8, 59, 59, 500).unwrap();
        assert_eq!(
            classify_slot(current, time("09:00:00"), time("17:00:00")),
            SlotStatus::Upcoming
        );
    }

    #[test]
    fn upcoming_window_is_exclusive() {
        assert_eq!(classify("08:40:00", "09:00:00", "17:00:00"), SlotStatus::Unavailable);
        assert_eq!(classify("07:00:00", "09:00:00", "17:00:00"), SlotStatus::Unavailable);
    }

    #[test]
    fn after_end_is_passed() {
        assert_eq!(classify("17:00:01", "09:00:00", "17:00:00"), SlotStatus::Passed);
        assert_eq!(classify("23:59:59", "00:00:00", "01:00:00"), SlotStatus::Passed);
    }

    #[test]
    fn slot_past_midnight_is_available_on_both_sides() {
        assert_eq!(classify("23:30:00", "22:00:00", "02:00:00"), SlotStatus::Available);
        assert_eq!(classify("01:00:00", "22:00:00", "02:00:00"), SlotStatus::Available);
        assert_eq!(classify("21:45:00", "22:00:00", "02:00:00"), SlotStatus::Upcoming);
        assert_eq!(classify("12:00:00", "22:00:00", "02:00:00"), SlotStatus::Unavailable);
    }

    // Kept as observed behavior: a slot past midnight never counts as passed,
    // even right after it closed.
    #[test]
    fn slot_past_midnight_is_never_passed() {
        for hour in 0..24 {
            let current = NaiveTime::from_hms_opt(hour, 30, 0).unwrap();
            let status = classify_slot(current, time("22:00:00"), time("02:00:00"));
            assert_ne!(status, SlotStatus::Passed, "at {current}");
        }
        assert_eq!(classify("02:00:01", "22:00:00", "02:00:00"), SlotStatus::Unavailable);
    }

    #[test]
    fn parses_strings_before_classifying() {
        let current = time("10:00:00");
        assert_eq!(
            slot_status(current, "09:00:00", "17:00:00").unwrap(),
            SlotStatus::Available
        );
    }

    #[test]
    fn rejects_malformed_times() {
        let current = time("10:00:00");
        let err = slot_status(current, "9am", "17:00:00").unwrap_err();
        assert_eq!(err.value, "9am");
        assert!(slot_status(current, "09:00:00", "25:00:00").is_err());
        assert!(slot_status(current, "09:00", "17:00:00").is_err());
    }
}
