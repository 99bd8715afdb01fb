//! Entry points for both scheduling variants.
//!
//! A [`Solver`] validates the configuration, turns typed entries into a
//! [`ProblemInstance`], runs the generational search and packages the best
//! schedule it saw as a [`Solution`].

use tracing::{debug, info, warn};

use crate::error::{Result, SchedulingError};
use crate::evolution::{EvolutionLauncher, EvolutionOptions, LogLevel, StopReason, StopToken};
use crate::rng::RandomNumberGenerator;
use crate::selection::ParentSelection;
use crate::strategy::GenerationalStrategy;

use super::clock::Clock;
use super::cost::{CostBreakdown, CostEvaluator, CostWeights};
use super::entry::{DatesheetEntry, Semester, Shift, TimetableEntry};
use super::problem::{
    ActivitySpec, CrossoverKind, ProblemInstance, ProblemWarning, Rules, SeedingPolicy, Variant,
};
use super::schedule::Schedule;
use super::slot::{generate_slots, SlotUniverse, DEFAULT_BREAK_MINUTES, WEEKDAYS};

/// How parents are drawn for the non-elite part of each generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionScheme {
    /// Tournament of [`EvolutionOptions::get_tournament_size`] candidates.
    #[default]
    Tournament,
    /// Uniform pairs from the better half.
    TopHalf,
}

impl SelectionScheme {
    fn parent_selection(self, options: &EvolutionOptions) -> Result<ParentSelection> {
        match self {
            SelectionScheme::Tournament => ParentSelection::tournament(options.get_tournament_size()),
            SelectionScheme::TopHalf => Ok(ParentSelection::top_half()),
        }
    }
}

/// Settings of a weekly timetable run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct TimetableConfig {
    /// Only entries of this semester are scheduled when set.
    pub semester: Option<Semester>,
    /// Only entries of this shift are scheduled when set. Also picks the
    /// default daily window.
    pub shift: Option<Shift>,
    pub lectures_per_course: usize,
    pub max_lectures_per_day: usize,
    /// Lecture length in minutes.
    pub lecture_duration: u32,
    /// Overrides the shift's window start.
    pub daily_start: Option<Clock>,
    /// Overrides the shift's window end.
    pub daily_end: Option<Clock>,
    pub days: Vec<String>,
    pub break_minutes: u32,
    pub max_section_per_day: usize,
    pub max_teacher_per_day: usize,
    pub min_spread_days: usize,
    /// Lets a course with fewer lectures than `min_spread_days` reach zero cost.
    pub spread_capped_by_occurrences: bool,
    pub selection: SelectionScheme,
    pub crossover: CrossoverKind,
    pub seeding: SeedingPolicy,
    pub weights: CostWeights,
    pub evolution: EvolutionOptions,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        let rules = Rules::default();
        Self {
            semester: None,
            shift: None,
            lectures_per_course: 1,
            max_lectures_per_day: rules.max_per_day,
            lecture_duration: 60,
            daily_start: None,
            daily_end: None,
            days: WEEKDAYS.iter().map(|d| d.to_string()).collect(),
            break_minutes: DEFAULT_BREAK_MINUTES,
            max_section_per_day: rules.max_section_per_day,
            max_teacher_per_day: rules.max_teacher_per_day,
            min_spread_days: rules.min_spread_days,
            spread_capped_by_occurrences: rules.spread_capped_by_occurrences,
            selection: SelectionScheme::Tournament,
            crossover: CrossoverKind::Uniform,
            seeding: SeedingPolicy::DistributionAware,
            weights: CostWeights::default(),
            evolution: EvolutionOptions::default(),
        }
    }
}

impl TimetableConfig {
    /// Daily window: explicit bounds first, then the shift default, then Morning.
    pub fn window(&self) -> (Clock, Clock) {
        let (start, end) = self.shift.unwrap_or(Shift::Morning).default_window();
        (self.daily_start.unwrap_or(start), self.daily_end.unwrap_or(end))
    }

    pub fn rules(&self) -> Rules {
        Rules {
            max_per_day: self.max_lectures_per_day,
            max_section_per_day: self.max_section_per_day,
            max_teacher_per_day: self.max_teacher_per_day,
            min_spread_days: self.min_spread_days,
            spread_capped_by_occurrences: self.spread_capped_by_occurrences,
            spread_all_days: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.evolution.validate()?;
        if self.lectures_per_course == 0 {
            return Err(SchedulingError::Configuration(
                "Lectures per course must be positive".to_string(),
            ));
        }
        self.rules().validate()?;
        self.weights.validate()
    }

    /// Slot universe described by this configuration.
    pub fn slots(&self) -> Result<SlotUniverse> {
        let (start, end) = self.window();
        generate_slots(
            self.days.iter().cloned(),
            start,
            end,
            self.lecture_duration,
            self.break_minutes,
        )
    }
}

/// Settings of an examination datesheet run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct DatesheetConfig {
    /// Dates exams may be moved to. When `None`, the dates found in the
    /// entries are used, in lexicographic order.
    pub dates: Option<Vec<String>>,
    pub selection: SelectionScheme,
    pub crossover: CrossoverKind,
    pub seeding: SeedingPolicy,
    pub weights: CostWeights,
    pub evolution: EvolutionOptions,
}

impl Default for DatesheetConfig {
    fn default() -> Self {
        Self {
            dates: None,
            selection: SelectionScheme::TopHalf,
            crossover: CrossoverKind::SinglePoint,
            seeding: SeedingPolicy::Uniform,
            weights: CostWeights::default(),
            evolution: EvolutionOptions::builder()
                .population_size(50)
                .max_generations(100)
                .mutation_rate(0.1)
                .build(),
        }
    }
}

impl DatesheetConfig {
    pub fn validate(&self) -> Result<()> {
        self.evolution.validate()?;
        self.weights.validate()
    }
}

/// One lecture of the best timetable.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledLecture {
    pub course: String,
    pub section: String,
    /// Zero-based occurrence within the week.
    pub occurrence: usize,
    pub day: String,
    pub start: Clock,
    pub end: Clock,
    pub room: String,
    pub teacher: String,
}

/// One exam of the best datesheet.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledExam {
    pub subject: String,
    pub date: String,
    pub time: String,
    pub room: String,
}

/// Best schedule of a run with how it was reached.
#[derive(Debug, Clone)]
pub struct Solution {
    pub problem: ProblemInstance,
    pub schedule: Schedule,
    pub cost: f64,
    pub breakdown: CostBreakdown,
    /// Generation in which the schedule was first seen.
    pub generation: usize,
    pub generations_run: usize,
    pub stop_reason: StopReason,
    pub history: Vec<f64>,
}

impl Solution {
    pub fn is_perfect(&self) -> bool {
        self.cost == 0.0
    }

    pub fn warnings(&self) -> &[ProblemWarning] {
        self.problem.warnings()
    }

    /// Lectures ordered by day, then slot, then input order.
    pub fn lectures(&self) -> Vec<ScheduledLecture> {
        let problem = &self.problem;
        let slots = problem.slots();
        let mut rows: Vec<_> = self.schedule.iter(problem).collect();
        rows.sort_by_key(|(_, assignment)| assignment.slot);
        rows.into_iter()
            .map(|(key, assignment)| {
                let activity = problem.activity(key.activity);
                let slot = slots.slot(assignment.slot);
                ScheduledLecture {
                    course: activity.key.clone(),
                    section: activity
                        .section
                        .map(|s| problem.sections()[s].clone())
                        .unwrap_or_default(),
                    occurrence: key.occurrence,
                    day: slots.day_label(slot.day).to_string(),
                    start: slot.start,
                    end: slot.end,
                    room: problem.rooms()[assignment.room].clone(),
                    teacher: activity
                        .teacher
                        .map(|t| problem.teachers()[t].clone())
                        .unwrap_or_default(),
                }
            })
            .collect()
    }

    /// Exams ordered by date, then input order.
    pub fn exams(&self) -> Vec<ScheduledExam> {
        let problem = &self.problem;
        let mut rows: Vec<_> = self.schedule.iter(problem).collect();
        rows.sort_by_key(|(_, assignment)| assignment.slot);
        rows.into_iter()
            .map(|(key, assignment)| {
                let activity = problem.activity(key.activity);
                ScheduledExam {
                    subject: activity.key.clone(),
                    date: problem
                        .slots()
                        .day_label(problem.slots().day_of(assignment.slot))
                        .to_string(),
                    time: activity.time_label.clone().unwrap_or_default(),
                    room: problem.rooms()[assignment.room].clone(),
                }
            })
            .collect()
    }
}

/// Runs timetable and datesheet searches.
///
/// # Example
///
/// ```rust
/// use timetable_ga::rng::RandomNumberGenerator;
/// use timetable_ga::timetable::{Semester, Shift, Solver, TimetableConfig, TimetableEntry};
///
/// let semester = Semester::new(1).unwrap();
/// let entries = vec![
///     TimetableEntry::new("Ahmed", "Calculus", "R1", "A", semester, Shift::Morning),
///     TimetableEntry::new("Sara", "Physics", "R2", "A", semester, Shift::Morning),
/// ];
/// let mut rng = RandomNumberGenerator::from_seed(42);
/// let solution = Solver::new()
///     .timetable(&entries, &TimetableConfig::default(), &mut rng)
///     .unwrap();
///
/// assert_eq!(solution.lectures().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    stop_token: Option<StopToken>,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets a caller cancel running searches between generations.
    pub fn with_stop_token(mut self, token: StopToken) -> Self {
        self.stop_token = Some(token);
        self
    }

    /// Schedules weekly lectures.
    ///
    /// # Errors
    ///
    /// - [`SchedulingError::Configuration`] for invalid options or a daily
    ///   window that fits no lecture.
    /// - [`SchedulingError::MalformedEntry`] for the first entry with a blank field.
    /// - [`SchedulingError::EmptyProblem`] when no entry survives filtering.
    pub fn timetable(
        &self,
        entries: &[TimetableEntry],
        config: &TimetableConfig,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Solution> {
        config.validate()?;
        let slots = config.slots()?;

        let mut builder = ProblemInstance::builder(Variant::Timetable, slots)
            .rules(config.rules())
            .crossover(config.crossover)
            .seeding(config.seeding);

        for (index, entry) in entries.iter().enumerate() {
            if let Some(field) = entry.missing_field() {
                return Err(SchedulingError::MalformedEntry { index, field });
            }
            if config.semester.is_some_and(|s| s != entry.semester)
                || config.shift.is_some_and(|s| s != entry.shift)
            {
                debug!(index, course = %entry.course, "entry outside selected semester or shift");
                continue;
            }

            let spec = ActivitySpec::new(&entry.course, &entry.room, config.lectures_per_course)
                .section(&entry.class_section)
                .teacher(&entry.teacher);
            if !builder.add_activity(spec) {
                let key = format!("{} ({})", entry.course, entry.class_section);
                warn!(index, %key, "duplicate course for section skipped");
                builder.warn(ProblemWarning::DuplicateActivity { index, key });
            }
        }

        let problem = builder.build()?;
        self.run(problem, config.selection, config.weights, &config.evolution, rng)
    }

    /// Re-optimizes exam dates and rooms.
    ///
    /// Entries with a blank field are skipped and reported as warnings.
    ///
    /// # Errors
    ///
    /// - [`SchedulingError::Configuration`] for invalid options or an empty
    ///   date list.
    /// - [`SchedulingError::EmptyProblem`] when no valid entry remains.
    pub fn datesheet(
        &self,
        entries: &[DatesheetEntry],
        config: &DatesheetConfig,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Solution> {
        config.validate()?;

        let mut warnings = Vec::new();
        let valid: Vec<(usize, &DatesheetEntry)> = entries
            .iter()
            .enumerate()
            .filter(|(index, entry)| match entry.missing_field() {
                Some(field) => {
                    warn!(index, field, "malformed exam entry skipped");
                    warnings.push(ProblemWarning::MalformedEntry {
                        index: *index,
                        field,
                    });
                    false
                }
                None => true,
            })
            .collect();
        if valid.is_empty() {
            return Err(SchedulingError::EmptyProblem);
        }

        let dates = match &config.dates {
            Some(dates) => dates.clone(),
            None => {
                let mut dates: Vec<String> = valid.iter().map(|(_, e)| e.date.clone()).collect();
                dates.sort();
                dates.dedup();
                dates
            }
        };
        let slots = SlotUniverse::whole_days(dates)?;

        let mut builder = ProblemInstance::builder(Variant::Datesheet, slots)
            .rules(Rules::datesheet())
            .crossover(config.crossover)
            .seeding(config.seeding);
        for warning in warnings {
            builder.warn(warning);
        }
        for (_, entry) in &valid {
            builder.room(&entry.room);
        }
        for (index, entry) in valid {
            let spec = ActivitySpec::new(&entry.subject, &entry.room, 1).time_label(&entry.time);
            if !builder.add_activity(spec) {
                warn!(index, subject = %entry.subject, "duplicate exam skipped");
                builder.warn(ProblemWarning::DuplicateActivity {
                    index,
                    key: entry.subject.clone(),
                });
            }
        }

        let problem = builder.build()?;
        self.run(problem, config.selection, config.weights, &config.evolution, rng)
    }

    fn run(
        &self,
        problem: ProblemInstance,
        selection: SelectionScheme,
        weights: CostWeights,
        options: &EvolutionOptions,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Solution> {
        if options.get_log_level() != LogLevel::None {
            info!(
                variant = ?problem.variant(),
                activities = problem.activities().len(),
                instances = problem.instances().len(),
                slots = problem.slots().len(),
                rooms = problem.rooms().len(),
                warnings = problem.warnings().len(),
                "problem ready"
            );
        }

        let strategy = GenerationalStrategy::new(selection.parent_selection(options)?);
        let mut launcher: EvolutionLauncher<Schedule, _, _> =
            EvolutionLauncher::new(strategy, CostEvaluator::new(weights));
        if let Some(token) = &self.stop_token {
            launcher = launcher.with_stop_token(token.clone());
        }

        let result = launcher.evolve(options, &problem, rng)?;
        let breakdown = launcher.challenge().breakdown(&result.pheno, &problem);

        Ok(Solution {
            schedule: result.pheno,
            cost: result.score,
            breakdown,
            generation: result.generation,
            generations_run: result.generations_run,
            stop_reason: result.stop_reason,
            history: result.history,
            problem,
        })
    }
}
