//! Penalty-based cost of a [`Schedule`].
//!
//! All terms are additive and independent. Each counts excess occurrences:
//! three instances sharing a `(slot, room)` pair are two room clashes.

use crate::error::{Result, SchedulingError};
use crate::evolution::Challenge;

use super::problem::ProblemInstance;
use super::schedule::Schedule;

/// Penalty per counted violation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostWeights {
    pub room_clash: f64,
    pub teacher_clash: f64,
    pub section_clash: f64,
    pub activity_overload: f64,
    pub section_overload: f64,
    pub teacher_overload: f64,
    /// Per day an activity falls short of its spread target.
    pub spread_shortfall: f64,
    /// Per instance missing from, or surplus to, an activity's required count.
    pub count_mismatch: f64,
    /// Per distinct date the whole schedule falls short of.
    pub date_spread_shortfall: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            room_clash: 20.0,
            teacher_clash: 15.0,
            section_clash: 25.0,
            activity_overload: 15.0,
            section_overload: 10.0,
            teacher_overload: 5.0,
            spread_shortfall: 20.0,
            count_mismatch: 30.0,
            date_spread_shortfall: 20.0,
        }
    }
}

impl CostWeights {
    /// Every weight must be finite and non-negative, or the cost stops being a cost.
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("room_clash", self.room_clash),
            ("teacher_clash", self.teacher_clash),
            ("section_clash", self.section_clash),
            ("activity_overload", self.activity_overload),
            ("section_overload", self.section_overload),
            ("teacher_overload", self.teacher_overload),
            ("spread_shortfall", self.spread_shortfall),
            ("count_mismatch", self.count_mismatch),
            ("date_spread_shortfall", self.date_spread_shortfall),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(SchedulingError::Configuration(format!(
                    "Cost weight '{}' must be finite and non-negative, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}

/// Violation counts of one schedule.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CostBreakdown {
    pub room_clashes: usize,
    pub teacher_clashes: usize,
    pub section_clashes: usize,
    pub activity_overloads: usize,
    pub section_overloads: usize,
    pub teacher_overloads: usize,
    pub spread_shortfall: usize,
    pub count_mismatch: usize,
    pub date_spread_shortfall: usize,
    /// Distinct days used by the whole schedule.
    pub distinct_days: usize,
    /// Scheduled instances.
    pub instances: usize,
}

impl CostBreakdown {
    pub fn total(&self, weights: &CostWeights) -> f64 {
        self.room_clashes as f64 * weights.room_clash
            + self.teacher_clashes as f64 * weights.teacher_clash
            + self.section_clashes as f64 * weights.section_clash
            + self.activity_overloads as f64 * weights.activity_overload
            + self.section_overloads as f64 * weights.section_overload
            + self.teacher_overloads as f64 * weights.teacher_overload
            + self.spread_shortfall as f64 * weights.spread_shortfall
            + self.count_mismatch as f64 * weights.count_mismatch
            + self.date_spread_shortfall as f64 * weights.date_spread_shortfall
    }

    /// Hard conflicts: double bookings plus an activity exceeding its daily cap.
    pub fn conflicts(&self) -> usize {
        self.room_clashes + self.teacher_clashes + self.section_clashes + self.activity_overloads
    }

    /// Distinct days used per scheduled instance, in `[0, 1]`.
    pub fn spread_ratio(&self) -> f64 {
        if self.instances == 0 {
            0.0
        } else {
            self.distinct_days as f64 / self.instances as f64
        }
    }

    /// Fitness in the historical datesheet sense: higher is better, at most 1.
    pub fn legacy_fitness(&self) -> f64 {
        self.spread_ratio() / (1 + self.conflicts()) as f64
    }

    pub fn is_perfect(&self) -> bool {
        *self == CostBreakdown {
            distinct_days: self.distinct_days,
            instances: self.instances,
            ..CostBreakdown::default()
        }
    }
}

/// Counts how far `count` goes over `cap`.
fn excess(count: usize, cap: usize) -> usize {
    count.saturating_sub(cap)
}

/// Dense counter over a `rows x cols` grid, used for every clash and overload term.
struct Grid {
    cols: usize,
    cells: Vec<usize>,
}

impl Grid {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            cells: vec![0; rows * cols],
        }
    }

    fn bump(&mut self, row: usize, col: usize) {
        self.cells[row * self.cols + col] += 1;
    }

    fn excess(&self, cap: usize) -> usize {
        self.cells.iter().map(|&c| excess(c, cap)).sum()
    }
}

/// Scores schedules against a [`ProblemInstance`].
#[derive(Debug, Clone, Default)]
pub struct CostEvaluator {
    weights: CostWeights,
}

impl CostEvaluator {
    pub fn new(weights: CostWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &CostWeights {
        &self.weights
    }

    pub fn cost(&self, schedule: &Schedule, problem: &ProblemInstance) -> f64 {
        self.breakdown(schedule, problem).total(&self.weights)
    }

    pub fn breakdown(&self, schedule: &Schedule, problem: &ProblemInstance) -> CostBreakdown {
        let slots = problem.slots();
        let rules = problem.rules();
        let days = slots.day_count();
        let activities = problem.activities();
        let assignments = schedule.assignments();

        let mut by_room = Grid::new(slots.len(), problem.rooms().len());
        let mut by_teacher = Grid::new(slots.len(), problem.teachers().len());
        let mut by_section = Grid::new(slots.len(), problem.sections().len());
        let mut activity_days = Grid::new(activities.len(), days);
        let mut section_days = Grid::new(problem.sections().len(), days);
        let mut teacher_days = Grid::new(problem.teachers().len(), days);
        let mut used_days = vec![false; days];

        let mut breakdown = CostBreakdown {
            instances: assignments.len(),
            ..CostBreakdown::default()
        };

        for (index, activity) in activities.iter().enumerate() {
            let positions = problem.positions_of(index);
            let present: Vec<usize> = positions.filter(|&i| i < assignments.len()).collect();
            breakdown.count_mismatch += activity.occurrences.abs_diff(present.len());

            let mut spans = vec![false; days];
            for &i in &present {
                let assignment = assignments[i];
                let day = slots.day_of(assignment.slot);
                spans[day] = true;
                used_days[day] = true;

                by_room.bump(assignment.slot, assignment.room);
                activity_days.bump(index, day);
                if let Some(teacher) = activity.teacher {
                    by_teacher.bump(assignment.slot, teacher);
                    teacher_days.bump(teacher, day);
                }
                if let Some(section) = activity.section {
                    by_section.bump(assignment.slot, section);
                    section_days.bump(section, day);
                }
            }

            let target = rules.spread_target(days, activity.occurrences);
            let spanned = spans.iter().filter(|&&d| d).count();
            breakdown.spread_shortfall += target.saturating_sub(spanned);
        }

        breakdown.room_clashes = by_room.excess(1);
        breakdown.teacher_clashes = by_teacher.excess(1);
        breakdown.section_clashes = by_section.excess(1);
        breakdown.activity_overloads = activity_days.excess(rules.max_per_day);
        breakdown.section_overloads = section_days.excess(rules.max_section_per_day);
        breakdown.teacher_overloads = teacher_days.excess(rules.max_teacher_per_day);
        breakdown.distinct_days = used_days.iter().filter(|&&d| d).count();
        if rules.spread_all_days {
            let target = days.min(problem.instances().len());
            breakdown.date_spread_shortfall = target.saturating_sub(breakdown.distinct_days);
        }

        breakdown
    }
}

impl Challenge<Schedule> for CostEvaluator {
    fn score(&self, schedule: &Schedule, problem: &ProblemInstance) -> f64 {
        self.cost(schedule, problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::problem::{ActivitySpec, Rules, Variant};
    use crate::timetable::schedule::Assignment;
    use crate::timetable::slot::{generate_slots, SlotUniverse};
    use crate::timetable::Clock;

    /// Two days of two slots each: ids 0, 1 on day 0 and 2, 3 on day 1.
    fn two_by_two() -> SlotUniverse {
        generate_slots(["Mon", "Tue"], Clock::at(8, 0), Clock::at(10, 20), 60, 10).unwrap()
    }

    fn at(slot: usize, room: usize) -> Assignment {
        Assignment { slot, room }
    }

    #[test]
    fn test_clashes_count_excess() {
        let rules = Rules {
            min_spread_days: 1,
            ..Default::default()
        };
        let mut builder = ProblemInstance::builder(Variant::Timetable, two_by_two()).rules(rules);
        builder.add_activity(ActivitySpec::new("Math", "R1", 1).section("A").teacher("T"));
        builder.add_activity(ActivitySpec::new("Math", "R1", 1).section("B").teacher("T"));
        builder.add_activity(ActivitySpec::new("Art", "R1", 1).section("A").teacher("T"));
        let problem = builder.build().unwrap();

        let schedule = Schedule::from_assignments(&problem, vec![at(0, 0); 3]).unwrap();
        let breakdown = CostEvaluator::default().breakdown(&schedule, &problem);

        assert_eq!(breakdown.room_clashes, 2);
        assert_eq!(breakdown.teacher_clashes, 2);
        assert_eq!(breakdown.section_clashes, 1);
        assert_eq!(breakdown.spread_shortfall, 0);
        assert_eq!(breakdown.total(&CostWeights::default()), 2.0 * 20.0 + 2.0 * 15.0 + 25.0);
    }

    #[test]
    fn test_day_overload_and_spread() {
        let rules = Rules {
            max_per_day: 1,
            ..Default::default()
        };
        let mut builder = ProblemInstance::builder(Variant::Timetable, two_by_two()).rules(rules);
        builder.add_activity(ActivitySpec::new("Math", "R1", 2).section("A").teacher("T"));
        let problem = builder.build().unwrap();
        let evaluator = CostEvaluator::default();

        let crowded = Schedule::from_assignments(&problem, vec![at(0, 0), at(1, 0)]).unwrap();
        let breakdown = evaluator.breakdown(&crowded, &problem);
        assert_eq!(breakdown.activity_overloads, 1);
        assert_eq!(breakdown.spread_shortfall, 1);
        assert_eq!(evaluator.cost(&crowded, &problem), 15.0 + 20.0);

        let spread = Schedule::from_assignments(&problem, vec![at(1, 0), at(2, 0)]).unwrap();
        assert_eq!(evaluator.cost(&spread, &problem), 0.0);
        assert!(evaluator.breakdown(&spread, &problem).is_perfect());
    }

    #[test]
    fn test_spread_target_ignores_instance_count_by_default() {
        let week = SlotUniverse::whole_days(["Mon", "Tue", "Wed", "Thu", "Fri"]).unwrap();
        let build = |rules: Rules| {
            let mut builder = ProblemInstance::builder(Variant::Timetable, week.clone()).rules(rules);
            builder.add_activity(ActivitySpec::new("Math", "R1", 2).section("A").teacher("T"));
            builder.build().unwrap()
        };
        let evaluator = CostEvaluator::default();

        let strict = build(Rules::default());
        let schedule = Schedule::from_assignments(&strict, vec![at(0, 0), at(1, 0)]).unwrap();
        let breakdown = evaluator.breakdown(&schedule, &strict);
        assert_eq!(breakdown.spread_shortfall, 1);
        assert_eq!(evaluator.cost(&schedule, &strict), 20.0);

        let capped = build(Rules {
            spread_capped_by_occurrences: true,
            ..Default::default()
        });
        let schedule = Schedule::from_assignments(&capped, vec![at(0, 0), at(1, 0)]).unwrap();
        assert_eq!(evaluator.cost(&schedule, &capped), 0.0);

        let off = build(Rules {
            min_spread_days: 0,
            ..Default::default()
        });
        let schedule = Schedule::from_assignments(&off, vec![at(0, 0), at(0, 0)]).unwrap();
        assert_eq!(evaluator.breakdown(&schedule, &off).spread_shortfall, 0);
    }

    #[test]
    fn test_weights_must_be_finite_and_non_negative() {
        assert!(CostWeights::default().validate().is_ok());
        let zero = CostWeights {
            teacher_overload: 0.0,
            ..Default::default()
        };
        assert!(zero.validate().is_ok());

        for weights in [
            CostWeights {
                section_clash: -5.0,
                ..Default::default()
            },
            CostWeights {
                spread_shortfall: f64::NAN,
                ..Default::default()
            },
            CostWeights {
                date_spread_shortfall: f64::INFINITY,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                weights.validate(),
                Err(SchedulingError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_section_and_teacher_day_caps() {
        let days = generate_slots(["Mon"], Clock::at(8, 0), Clock::at(13, 0), 50, 10).unwrap();
        let mut builder = ProblemInstance::builder(Variant::Timetable, days);
        for course in ["A", "B", "C", "D", "E"] {
            builder.add_activity(ActivitySpec::new(course, "R", 1).section("S").teacher("T"));
        }
        let problem = builder.build().unwrap();
        let assignments = (0..5).map(|slot| at(slot, 0)).collect();
        let schedule = Schedule::from_assignments(&problem, assignments).unwrap();
        let breakdown = CostEvaluator::default().breakdown(&schedule, &problem);

        assert_eq!(breakdown.section_overloads, 2);
        assert_eq!(breakdown.teacher_overloads, 2);
        assert_eq!(breakdown.conflicts(), 0);
    }

    #[test]
    fn test_datesheet_terms_and_legacy_fitness() {
        let dates = SlotUniverse::whole_days(["d1", "d2", "d3"]).unwrap();
        let mut builder = ProblemInstance::builder(Variant::Datesheet, dates);
        builder.add_activity(ActivitySpec::new("Math", "Hall", 1));
        builder.add_activity(ActivitySpec::new("Physics", "Hall", 1));
        builder.add_activity(ActivitySpec::new("Chemistry", "Hall", 1));
        let problem = builder.build().unwrap();
        let evaluator = CostEvaluator::default();

        let packed = Schedule::from_assignments(&problem, vec![at(0, 0); 3]).unwrap();
        let breakdown = evaluator.breakdown(&packed, &problem);
        assert_eq!(breakdown.room_clashes, 2);
        assert_eq!(breakdown.date_spread_shortfall, 2);
        assert_eq!(evaluator.cost(&packed, &problem), 2.0 * 20.0 + 2.0 * 20.0);
        assert!((breakdown.legacy_fitness() - (1.0 / 3.0) / 3.0).abs() < 1e-12);

        let spread = Schedule::from_assignments(&problem, vec![at(0, 0), at(1, 0), at(2, 0)]).unwrap();
        let breakdown = evaluator.breakdown(&spread, &problem);
        assert_eq!(breakdown.total(evaluator.weights()), 0.0);
        assert_eq!(breakdown.legacy_fitness(), 1.0);
    }

    #[test]
    fn test_cost_is_deterministic() {
        let mut builder = ProblemInstance::builder(Variant::Timetable, two_by_two());
        builder.add_activity(ActivitySpec::new("Math", "R1", 3).section("A").teacher("T"));
        let problem = builder.build().unwrap();
        let schedule = Schedule::from_assignments(&problem, vec![at(0, 0), at(0, 0), at(3, 0)]).unwrap();
        let evaluator = CostEvaluator::default();
        assert_eq!(
            evaluator.cost(&schedule, &problem),
            evaluator.score(&schedule, &problem)
        );
        assert_eq!(
            evaluator.breakdown(&schedule, &problem),
            evaluator.breakdown(&schedule, &problem)
        );
    }
}
