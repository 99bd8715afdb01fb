//! Typed records supplied by the data-entry side.
//!
//! Text fields arrive as typed by a user; an empty or whitespace-only field
//! counts as missing.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SchedulingError};

use super::clock::Clock;

/// Teaching shift of a class section.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    Morning,
    Evening,
}

impl Shift {
    /// Default daily teaching window of the shift.
    pub fn default_window(self) -> (Clock, Clock) {
        match self {
            Shift::Morning => (Clock::at(8, 0), Clock::at(13, 0)),
            Shift::Evening => (Clock::at(13, 0), Clock::at(17, 0)),
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shift::Morning => f.write_str("Morning"),
            Shift::Evening => f.write_str("Evening"),
        }
    }
}

impl FromStr for Shift {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Shift::Morning),
            "evening" => Ok(Shift::Evening),
            _ => Err(SchedulingError::Configuration(format!(
                "Shift must be either 'Morning' or 'Evening', got '{}'",
                s
            ))),
        }
    }
}

/// Semester number, 1 through 8.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Semester(u8);

impl Semester {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 8;

    pub fn new(value: u8) -> Result<Self> {
        if !(Self::FIRST..=Self::LAST).contains(&value) {
            return Err(SchedulingError::Configuration(format!(
                "Semester must be a number between {} and {}, got {}",
                Self::FIRST,
                Self::LAST,
                value
            )));
        }
        Ok(Semester(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Semester {
    type Error = SchedulingError;

    fn try_from(value: u8) -> Result<Self> {
        Semester::new(value)
    }
}

impl From<Semester> for u8 {
    fn from(value: Semester) -> u8 {
        value.0
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One course taught to one class section.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableEntry {
    pub teacher: String,
    pub course: String,
    pub room: String,
    pub class_section: String,
    pub semester: Semester,
    pub shift: Shift,
}

impl TimetableEntry {
    pub fn new(
        teacher: impl Into<String>,
        course: impl Into<String>,
        room: impl Into<String>,
        class_section: impl Into<String>,
        semester: Semester,
        shift: Shift,
    ) -> Self {
        Self {
            teacher: teacher.into(),
            course: course.into(),
            room: room.into(),
            class_section: class_section.into(),
            semester,
            shift,
        }
    }

    /// First required field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("teacher", &self.teacher),
            ("course", &self.course),
            ("room", &self.room),
            ("class_section", &self.class_section),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// One exam with its pre-seeded date and room.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatesheetEntry {
    pub date: String,
    pub time: String,
    pub subject: String,
    pub room: String,
}

impl DatesheetEntry {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        subject: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            subject: subject.into(),
            room: room.into(),
        }
    }

    /// First required field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("date", &self.date),
            ("time", &self.time),
            ("subject", &self.subject),
            ("room", &self.room),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_parse() {
        assert_eq!("Morning".parse::<Shift>().unwrap(), Shift::Morning);
        assert_eq!(" evening ".parse::<Shift>().unwrap(), Shift::Evening);
        assert!("Night".parse::<Shift>().is_err());
    }

    #[test]
    fn test_shift_windows() {
        let (start, end) = Shift::Evening.default_window();
        assert_eq!(start.to_string(), "13:00");
        assert_eq!(end.to_string(), "17:00");
    }

    #[test]
    fn test_semester_bounds() {
        assert!(Semester::new(0).is_err());
        assert!(Semester::new(9).is_err());
        assert_eq!(Semester::new(8).unwrap().get(), 8);
        assert!(Semester::try_from(1).is_ok());
    }

    #[test]
    fn test_missing_fields() {
        let semester = Semester::new(3).unwrap();
        let entry = TimetableEntry::new("Ali", "Physics", "", "B", semester, Shift::Morning);
        assert_eq!(entry.missing_field(), Some("room"));

        let entry = TimetableEntry::new("Ali", "Physics", "101", "B", semester, Shift::Morning);
        assert_eq!(entry.missing_field(), None);

        let exam = DatesheetEntry::new("2025-06-02", "09:00", "  ", "Hall");
        assert_eq!(exam.missing_field(), Some("subject"));
    }
}
