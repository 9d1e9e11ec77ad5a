//! Time of day within a single business day.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::Serialize;

use crate::types::ValidationError;

/// A minute-resolution time of day, `00:00` through `23:59`.
///
/// There is no date and no wraparound: `23:59` is the latest value and
/// differences are plain minute arithmetic.
///
/// Serializes as its `HH:MM` text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Creates a time from an hour (0-23) and minute (0-59).
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidTime {
                value: format!("{hour}:{minute}"),
            })
    }

    /// Signed number of minutes from `earlier` to `self`.
    ///
    /// Negative when `self` precedes `earlier`.
    pub fn minutes_since(self, earlier: Self) -> i64 {
        (self.0 - earlier.0).num_minutes()
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    /// Parses the strict `HH:MM` form: two digits, a colon, two digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime {
            value: s.to_string(),
        };

        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        let (hh, mm) = (&s[..2], &s[3..]);
        if !hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour = hh.parse().map_err(|_| invalid())?;
        let minute = mm.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_displays_canonical_form() {
        assert_eq!(t("09:05"), ClockTime::new(9, 5).unwrap());
        assert_eq!(t("09:05").to_string(), "09:05");
        assert_eq!(t("00:00").to_string(), "00:00");
        assert_eq!(t("23:59").to_string(), "23:59");
    }

    #[test]
    fn rejects_non_canonical_forms() {
        for s in ["9:05", "09:5", "0905", "09-05", "09:05 ", "+9:05", "ab:cd", ""] {
            assert!(s.parse::<ClockTime>().is_err(), "{s:?} should be rejected");
        }
    }

    #[test]
    fn rejects_out_of_range_values() {
        for s in ["24:00", "12:60", "99:99"] {
            assert!(s.parse::<ClockTime>().is_err(), "{s:?} should be rejected");
        }
        assert!(ClockTime::new(24, 0).is_err());
    }

    #[test]
    fn ordering_is_by_hour_then_minute() {
        assert!(t("09:59") < t("10:00"));
        assert!(t("10:00") < t("10:01"));
        assert_eq!(t("12:30").cmp(&t("12:30")), std::cmp::Ordering::Equal);
    }

    #[test]
    fn minutes_since_is_signed() {
        assert_eq!(t("11:35").minutes_since(t("09:54")), 101);
        assert_eq!(t("09:54").minutes_since(t("11:35")), -101);
        assert_eq!(t("10:00").minutes_since(t("10:00")), 0);
    }

    #[test]
    fn serializes_as_text_form() {
        let json = serde_json::to_string(&t("08:48")).unwrap();
        assert_eq!(json, r#""08:48""#);
    }
}
