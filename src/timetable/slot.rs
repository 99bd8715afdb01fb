//! Bookable time slots.
//!
//! [`generate_slots`] lays out, for every day in order, as many
//! `[start, start + duration)` intervals as fit in the daily window when each
//! is followed by a fixed break. The resulting [`SlotUniverse`] is fixed for
//! the whole run; slot ids follow `(day, index)` order.

use crate::error::{Result, SchedulingError};

use super::clock::Clock;

/// Break inserted after every lecture, in minutes.
pub const DEFAULT_BREAK_MINUTES: u32 = 10;

/// Monday to Friday, the default teaching week.
pub const WEEKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Identifier of a slot: its position in [`SlotUniverse::slots`].
pub type SlotId = usize;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Position of the day in [`SlotUniverse::days`].
    pub day: usize,
    /// Position of the slot within its day.
    pub index: usize,
    pub start: Clock,
    pub end: Clock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotUniverse {
    days: Vec<String>,
    slots: Vec<Slot>,
    by_day: Vec<Vec<SlotId>>,
}

impl SlotUniverse {
    fn from_parts(days: Vec<String>, slots: Vec<Slot>) -> Self {
        let mut by_day = vec![Vec::new(); days.len()];
        for (id, slot) in slots.iter().enumerate() {
            by_day[slot.day].push(id);
        }
        Self {
            days,
            slots,
            by_day,
        }
    }

    /// One slot spanning each whole day, used when only the date is searched.
    pub fn whole_days<I, S>(days: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let days = checked_days(days)?;
        let slots = (0..days.len())
            .map(|day| Slot {
                day,
                index: 0,
                start: Clock::MIDNIGHT,
                end: Clock::LAST_MINUTE,
            })
            .collect();
        Ok(Self::from_parts(days, slots))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> &Slot {
        &self.slots[id]
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn day_of(&self, id: SlotId) -> usize {
        self.slots[id].day
    }

    pub fn day_label(&self, day: usize) -> &str {
        &self.days[day]
    }

    /// Slot ids of one day, in time order.
    pub fn slots_on(&self, day: usize) -> &[SlotId] {
        &self.by_day[day]
    }
}

fn checked_days<I, S>(days: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let days: Vec<String> = days.into_iter().map(Into::into).collect();
    if days.is_empty() {
        return Err(SchedulingError::Configuration(
            "At least one day is required".to_string(),
        ));
    }
    for (i, day) in days.iter().enumerate() {
        if day.trim().is_empty() {
            return Err(SchedulingError::Configuration(format!(
                "Day #{} has an empty label",
                i
            )));
        }
        if days[..i].contains(day) {
            return Err(SchedulingError::Configuration(format!(
                "Day '{}' is listed twice",
                day
            )));
        }
    }
    Ok(days)
}

/// Generates the slot universe for a week.
///
/// Slots per day is `floor((end - start) / (duration + break))`.
///
/// # Errors
///
/// Returns [`SchedulingError::Configuration`] when the day list is empty or
/// has duplicates, when `duration` is zero, or when not a single slot fits in
/// the daily window.
///
/// # Example
///
/// ```rust
/// use timetable_ga::timetable::{generate_slots, Clock, WEEKDAYS};
///
/// let start: Clock = "08:00".parse().unwrap();
/// let end: Clock = "13:00".parse().unwrap();
/// let universe = generate_slots(WEEKDAYS, start, end, 60, 10).unwrap();
///
/// assert_eq!(universe.len(), 20);
/// assert_eq!(universe.slots_on(0).len(), 4);
/// ```
pub fn generate_slots<I, S>(
    days: I,
    start: Clock,
    end: Clock,
    duration: u32,
    break_minutes: u32,
) -> Result<SlotUniverse>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let days = checked_days(days)?;
    if duration == 0 {
        return Err(SchedulingError::Configuration(
            "Lecture duration must be positive".to_string(),
        ));
    }

    let window = end.minutes() as i64 - start.minutes() as i64;
    let Some(step) = duration.checked_add(break_minutes) else {
        return Err(SchedulingError::Configuration(format!(
            "A {} minute slot plus a {} minute break is out of range",
            duration, break_minutes
        )));
    };
    let per_day = window.div_euclid(step as i64);
    if per_day <= 0 {
        return Err(SchedulingError::Configuration(format!(
            "No slot of {} minutes plus a {} minute break fits between {} and {}",
            duration, break_minutes, start, end
        )));
    }

    let mut slots = Vec::with_capacity(days.len() * per_day as usize);
    for day in 0..days.len() {
        for index in 0..per_day as usize {
            let offset = index as u32 * step;
            // Both stay within [start, end] because per_day * step <= end - start.
            let (Some(slot_start), Some(slot_end)) = (
                start.checked_add(offset),
                start.checked_add(offset + duration),
            ) else {
                return Err(SchedulingError::Configuration(format!(
                    "Slot {} of day '{}' runs past midnight",
                    index, days[day]
                )));
            };
            slots.push(Slot {
                day,
                index,
                start: slot_start,
                end: slot_end,
            });
        }
    }

    Ok(SlotUniverse::from_parts(days, slots))
}
