//! The normalized problem: activities, their instances and the fixed
//! universes (slots, rooms, teachers, sections) a search draws from.
//!
//! Names are interned once here, so candidates and the cost evaluator work on
//! dense indices only.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, SchedulingError};

use super::slot::SlotUniverse;

/// Which historical problem the instance models.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Weekly lectures: only the slot is searched, room and teacher are fixed.
    Timetable,
    /// Exams: date and room are both searched.
    Datesheet,
}

impl Variant {
    pub fn room_is_free(self) -> bool {
        matches!(self, Variant::Datesheet)
    }
}

/// How children inherit assignments from their parents.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossoverKind {
    /// Cut the instance list once; prefix from one parent, suffix from the other.
    SinglePoint,
    /// Independent fair coin per instance.
    #[default]
    Uniform,
}

/// How the initial population is built.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedingPolicy {
    /// Prefer the day least used by the same activity that is still under its daily cap.
    #[default]
    DistributionAware,
    /// Uniform draws over the whole slot (and room) universe.
    Uniform,
}

/// Soft-constraint thresholds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Instances of one activity allowed on a single day.
    pub max_per_day: usize,
    /// Instances of one section allowed on a single day.
    pub max_section_per_day: usize,
    /// Instances of one teacher allowed on a single day.
    pub max_teacher_per_day: usize,
    /// Distinct days an activity should span, capped by the number of
    /// available days. Zero disables the spread term.
    pub min_spread_days: usize,
    /// Also cap the spread target by the activity's instance count, so an
    /// activity with fewer instances than `min_spread_days` can still be perfect.
    pub spread_capped_by_occurrences: bool,
    /// Also reward spreading all instances over as many distinct days as possible.
    pub spread_all_days: bool,
}

impl Rules {
    pub fn timetable(max_per_day: usize) -> Self {
        Self {
            max_per_day,
            ..Self::default()
        }
    }

    pub fn datesheet() -> Self {
        Self {
            max_per_day: 1,
            spread_capped_by_occurrences: true,
            spread_all_days: true,
            ..Self::default()
        }
    }

    /// Spread target of an activity with `occurrences` instances over `days` days.
    pub fn spread_target(&self, days: usize, occurrences: usize) -> usize {
        let target = self.min_spread_days.min(days);
        if self.spread_capped_by_occurrences {
            target.min(occurrences)
        } else {
            target
        }
    }

    /// Rejects daily caps of zero, which no schedule could satisfy.
    pub fn validate(&self) -> Result<()> {
        for (name, cap) in [
            ("Max instances per day", self.max_per_day),
            ("Max section instances per day", self.max_section_per_day),
            ("Max teacher instances per day", self.max_teacher_per_day),
        ] {
            if cap == 0 {
                return Err(SchedulingError::Configuration(format!(
                    "{} must be positive",
                    name
                )));
            }
        }
        Ok(())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            max_per_day: 4,
            max_section_per_day: 3,
            max_teacher_per_day: 3,
            min_spread_days: 3,
            spread_capped_by_occurrences: false,
            spread_all_days: false,
        }
    }
}

/// One subject or course of one section, needing `occurrences` assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub key: String,
    pub section: Option<usize>,
    pub teacher: Option<usize>,
    /// Fixed room, or the pre-seeded room when rooms are searched.
    pub room: usize,
    pub occurrences: usize,
    /// Time carried through unchanged, such as an exam's sitting time.
    pub time_label: Option<String>,
}

/// Identity of one activity instance.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceKey {
    pub activity: usize,
    pub occurrence: usize,
}

/// Something dropped while the problem was being built.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemWarning {
    MalformedEntry { index: usize, field: &'static str },
    DuplicateActivity { index: usize, key: String },
}

impl fmt::Display for ProblemWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemWarning::MalformedEntry { index, field } => {
                write!(f, "entry #{} skipped: missing '{}'", index, field)
            }
            ProblemWarning::DuplicateActivity { index, key } => {
                write!(f, "entry #{} skipped: '{}' is already scheduled", index, key)
            }
        }
    }
}

/// Input description of an activity for [`ProblemBuilder::add_activity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySpec {
    pub key: String,
    pub section: Option<String>,
    pub teacher: Option<String>,
    pub room: String,
    pub occurrences: usize,
    pub time_label: Option<String>,
}

impl ActivitySpec {
    pub fn new(key: impl Into<String>, room: impl Into<String>, occurrences: usize) -> Self {
        Self {
            key: key.into(),
            section: None,
            teacher: None,
            room: room.into(),
            occurrences,
            time_label: None,
        }
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = Some(teacher.into());
        self
    }

    pub fn time_label(mut self, time: impl Into<String>) -> Self {
        self.time_label = Some(time.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
struct Interner {
    names: Vec<String>,
    ids: HashMap<String, usize>,
}

impl Interner {
    fn intern(&mut self, name: &str) -> usize {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }
}

/// Collects activities and produces an immutable [`ProblemInstance`].
#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    variant: Variant,
    slots: SlotUniverse,
    rules: Rules,
    crossover: CrossoverKind,
    seeding: SeedingPolicy,
    activities: Vec<Activity>,
    identities: HashMap<(String, Option<usize>), usize>,
    rooms: Interner,
    teachers: Interner,
    sections: Interner,
    warnings: Vec<ProblemWarning>,
}

impl ProblemBuilder {
    pub fn new(variant: Variant, slots: SlotUniverse) -> Self {
        let (rules, crossover, seeding) = match variant {
            Variant::Timetable => (
                Rules::default(),
                CrossoverKind::Uniform,
                SeedingPolicy::DistributionAware,
            ),
            Variant::Datesheet => (
                Rules::datesheet(),
                CrossoverKind::SinglePoint,
                SeedingPolicy::Uniform,
            ),
        };
        Self {
            variant,
            slots,
            rules,
            crossover,
            seeding,
            activities: Vec::new(),
            identities: HashMap::new(),
            rooms: Interner::default(),
            teachers: Interner::default(),
            sections: Interner::default(),
            warnings: Vec::new(),
        }
    }

    pub fn rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn crossover(mut self, crossover: CrossoverKind) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn seeding(mut self, seeding: SeedingPolicy) -> Self {
        self.seeding = seeding;
        self
    }

    /// Adds a room to the universe without attaching it to an activity.
    pub fn room(&mut self, name: &str) -> usize {
        self.rooms.intern(name)
    }

    /// Adds an activity. Returns `false`, and adds nothing, when an activity
    /// with the same key and section already exists.
    pub fn add_activity(&mut self, spec: ActivitySpec) -> bool {
        let section = spec.section.as_deref().map(|s| self.sections.intern(s));
        let identity = (spec.key.clone(), section);
        if self.identities.contains_key(&identity) {
            return false;
        }
        self.identities.insert(identity, self.activities.len());

        let teacher = spec.teacher.as_deref().map(|t| self.teachers.intern(t));
        let room = self.rooms.intern(&spec.room);
        self.activities.push(Activity {
            key: spec.key,
            section,
            teacher,
            room,
            occurrences: spec.occurrences,
            time_label: spec.time_label,
        });
        true
    }

    /// Records a non-fatal problem with the input.
    pub fn warn(&mut self, warning: ProblemWarning) {
        self.warnings.push(warning);
    }

    /// # Errors
    ///
    /// - [`SchedulingError::EmptyProblem`] when no activity was added.
    /// - [`SchedulingError::Configuration`] when an activity needs zero
    ///   occurrences, the slot universe is empty, or a daily cap in the
    ///   rules is zero.
    pub fn build(self) -> Result<ProblemInstance> {
        if self.activities.is_empty() {
            return Err(SchedulingError::EmptyProblem);
        }
        if self.slots.is_empty() {
            return Err(SchedulingError::Configuration(
                "Slot universe is empty".to_string(),
            ));
        }
        if let Some(activity) = self.activities.iter().find(|a| a.occurrences == 0) {
            return Err(SchedulingError::Configuration(format!(
                "Activity '{}' needs at least one occurrence",
                activity.key
            )));
        }
        self.rules.validate()?;

        let mut offsets = Vec::with_capacity(self.activities.len());
        let mut instances = Vec::new();
        for (activity, a) in self.activities.iter().enumerate() {
            offsets.push(instances.len());
            instances.extend((0..a.occurrences).map(|occurrence| InstanceKey {
                activity,
                occurrence,
            }));
        }

        Ok(ProblemInstance {
            variant: self.variant,
            activities: self.activities,
            instances,
            offsets,
            slots: self.slots,
            rooms: self.rooms.names,
            teachers: self.teachers.names,
            sections: self.sections.names,
            rules: self.rules,
            crossover: self.crossover,
            seeding: self.seeding,
            warnings: self.warnings,
        })
    }
}

/// Immutable description of one search.
///
/// Instances are stored grouped by activity, in activity order then
/// occurrence order. That order is the gene order of every candidate.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    variant: Variant,
    activities: Vec<Activity>,
    instances: Vec<InstanceKey>,
    offsets: Vec<usize>,
    slots: SlotUniverse,
    rooms: Vec<String>,
    teachers: Vec<String>,
    sections: Vec<String>,
    rules: Rules,
    crossover: CrossoverKind,
    seeding: SeedingPolicy,
    warnings: Vec<ProblemWarning>,
}

impl ProblemInstance {
    pub fn builder(variant: Variant, slots: SlotUniverse) -> ProblemBuilder {
        ProblemBuilder::new(variant, slots)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn activity(&self, index: usize) -> &Activity {
        &self.activities[index]
    }

    pub fn instances(&self) -> &[InstanceKey] {
        &self.instances
    }

    /// Gene position of `key`, if it belongs to this problem.
    pub fn position(&self, key: InstanceKey) -> Option<usize> {
        let activity = self.activities.get(key.activity)?;
        (key.occurrence < activity.occurrences).then(|| self.offsets[key.activity] + key.occurrence)
    }

    /// Gene positions of all instances of one activity.
    pub fn positions_of(&self, activity: usize) -> std::ops::Range<usize> {
        let start = self.offsets[activity];
        start..start + self.activities[activity].occurrences
    }

    pub fn slots(&self) -> &SlotUniverse {
        &self.slots
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub fn teachers(&self) -> &[String] {
        &self.teachers
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn crossover_kind(&self) -> CrossoverKind {
        self.crossover
    }

    pub fn seeding_policy(&self) -> SeedingPolicy {
        self.seeding
    }

    pub fn warnings(&self) -> &[ProblemWarning] {
        &self.warnings
    }
}
