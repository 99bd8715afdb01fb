//! Time of day with minute resolution.
//!
//! Accepts both `HH:MM` (24-hour) and `H:MM AM/PM` input.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SchedulingError};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Minutes since midnight, always below 24:00.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Clock(u16);

impl Clock {
    pub const MIDNIGHT: Clock = Clock(0);
    pub const LAST_MINUTE: Clock = Clock(MINUTES_PER_DAY - 1);

    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(SchedulingError::Configuration(format!(
                "Invalid time of day {:02}:{:02}",
                hour, minute
            )));
        }
        Ok(Clock(hour as u16 * 60 + minute as u16))
    }

    /// Compile-time constructor for known-valid times.
    pub(crate) const fn at(hour: u16, minute: u16) -> Self {
        Clock(hour * 60 + minute)
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes < MINUTES_PER_DAY as u32).then_some(Clock(minutes as u16))
    }

    pub fn minutes(self) -> u32 {
        self.0 as u32
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Adds `minutes`, or returns `None` when the result would pass midnight.
    pub fn checked_add(self, minutes: u32) -> Option<Self> {
        Self::from_minutes(self.minutes() + minutes)
    }

    /// Formats as zero-padded `hh:MM AM`.
    pub fn format_12h(self) -> String {
        let (hour, suffix) = match self.hour() {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        format!("{:02}:{:02} {}", hour, self.minute(), suffix)
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for Clock {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SchedulingError::Configuration(format!("Invalid time of day '{}'", s));

        let text = s.trim().to_ascii_uppercase();
        let (body, meridiem) = if let Some(rest) = text.strip_suffix("AM") {
            (rest.trim_end(), Some(false))
        } else if let Some(rest) = text.strip_suffix("PM") {
            (rest.trim_end(), Some(true))
        } else {
            (text.as_str(), None)
        };

        let (h, m) = body.split_once(':').ok_or_else(invalid)?;
        if m.len() != 2 || h.is_empty() || h.len() > 2 {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;

        let hour = match meridiem {
            None => hour,
            Some(_) if hour == 0 || hour > 12 => return Err(invalid()),
            Some(false) => hour % 12,
            Some(true) => hour % 12 + 12,
        };
        Clock::new(hour, minute).map_err(|_| invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_24h() {
        let clock: Clock = "08:00".parse().unwrap();
        assert_eq!(clock.minutes(), 480);
        assert_eq!("13:05".parse::<Clock>().unwrap().minutes(), 785);
        assert_eq!("7:30".parse::<Clock>().unwrap().to_string(), "07:30");
    }

    #[test]
    fn test_parse_12h() {
        assert_eq!("8:00 AM".parse::<Clock>().unwrap().to_string(), "08:00");
        assert_eq!("1:00 PM".parse::<Clock>().unwrap().to_string(), "13:00");
        assert_eq!("12:15 AM".parse::<Clock>().unwrap().to_string(), "00:15");
        assert_eq!("12:45pm".parse::<Clock>().unwrap().to_string(), "12:45");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "8", "25:00", "10:60", "13:00 PM", "0:30 AM", "ab:cd", "9:5"] {
            assert!(bad.parse::<Clock>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_format_12h() {
        assert_eq!(Clock::new(8, 0).unwrap().format_12h(), "08:00 AM");
        assert_eq!(Clock::new(13, 10).unwrap().format_12h(), "01:10 PM");
        assert_eq!(Clock::MIDNIGHT.format_12h(), "12:00 AM");
        assert_eq!(Clock::new(12, 0).unwrap().format_12h(), "12:00 PM");
    }

    #[test]
    fn test_checked_add() {
        let clock = Clock::new(23, 0).unwrap();
        assert_eq!(clock.checked_add(59), Some(Clock::LAST_MINUTE));
        assert_eq!(clock.checked_add(60), None);
    }
}
