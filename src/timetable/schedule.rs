//! Candidate schedules and their genetic operators.

use crate::phenotype::Phenotype;
use crate::rng::RandomNumberGenerator;

use super::problem::{CrossoverKind, InstanceKey, ProblemInstance, SeedingPolicy};
use super::slot::SlotId;

/// Where and when one activity instance takes place.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Assignment {
    pub slot: SlotId,
    pub room: usize,
}

/// A complete assignment for every instance of a [`ProblemInstance`].
///
/// `assignments[i]` belongs to `problem.instances()[i]`; every operator keeps
/// that alignment, so the key set of a schedule always equals the problem's.
/// Only serialized: rebuild one from data with [`Schedule::from_assignments`],
/// which checks it against the problem.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    assignments: Vec<Assignment>,
}

impl Schedule {
    /// Wraps explicit assignments. Returns `None` unless there is exactly one
    /// valid assignment per instance.
    pub fn from_assignments(problem: &ProblemInstance, assignments: Vec<Assignment>) -> Option<Self> {
        let valid = assignments.len() == problem.instances().len()
            && assignments
                .iter()
                .all(|a| a.slot < problem.slots().len() && a.room < problem.rooms().len());
        valid.then_some(Self { assignments })
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn get(&self, problem: &ProblemInstance, key: InstanceKey) -> Option<&Assignment> {
        problem.position(key).and_then(|i| self.assignments.get(i))
    }

    pub fn iter<'a>(
        &'a self,
        problem: &'a ProblemInstance,
    ) -> impl Iterator<Item = (InstanceKey, &'a Assignment)> + 'a {
        problem.instances().iter().copied().zip(self.assignments.iter())
    }

    fn seed_uniform(problem: &ProblemInstance, rng: &mut RandomNumberGenerator) -> Self {
        let slot_count = problem.slots().len();
        let room_count = problem.rooms().len();
        let free_room = problem.variant().room_is_free();
        let assignments = problem
            .instances()
            .iter()
            .map(|key| Assignment {
                slot: rng.gen_index(slot_count),
                room: if free_room {
                    rng.gen_index(room_count)
                } else {
                    problem.activity(key.activity).room
                },
            })
            .collect();
        Self { assignments }
    }

    /// Spreads each activity over its least-used days, earliest day first on
    /// ties, and falls back to a uniform slot once every day is at its cap.
    fn seed_distributed(problem: &ProblemInstance, rng: &mut RandomNumberGenerator) -> Self {
        let slots = problem.slots();
        let cap = problem.rules().max_per_day;
        let mut assignments = Vec::with_capacity(problem.instances().len());

        for (index, activity) in problem.activities().iter().enumerate() {
            let mut per_day = vec![0usize; slots.day_count()];
            for _ in problem.positions_of(index) {
                let day = (0..per_day.len())
                    .filter(|&d| per_day[d] < cap && !slots.slots_on(d).is_empty())
                    .min_by_key(|&d| per_day[d]);
                let slot = match day.and_then(|d| rng.choose(slots.slots_on(d))) {
                    Some(&slot) => slot,
                    None => rng.gen_index(slots.len()),
                };
                per_day[slots.day_of(slot)] += 1;
                assignments.push(Assignment {
                    slot,
                    room: activity.room,
                });
            }
        }
        Self { assignments }
    }

    fn redraw(&mut self, position: usize, problem: &ProblemInstance, rng: &mut RandomNumberGenerator) {
        let gene = &mut self.assignments[position];
        gene.slot = rng.gen_index(problem.slots().len());
        if problem.variant().room_is_free() {
            gene.room = rng.gen_index(problem.rooms().len());
        }
    }
}

impl Phenotype for Schedule {
    type Context = ProblemInstance;

    fn seed(problem: &ProblemInstance, rng: &mut RandomNumberGenerator) -> Self {
        match problem.seeding_policy() {
            SeedingPolicy::DistributionAware => Self::seed_distributed(problem, rng),
            SeedingPolicy::Uniform => Self::seed_uniform(problem, rng),
        }
    }

    fn crossover(
        &self,
        other: &Self,
        problem: &ProblemInstance,
        rng: &mut RandomNumberGenerator,
    ) -> (Self, Self) {
        let len = self.assignments.len().min(other.assignments.len());
        if len == 0 {
            return (self.clone(), other.clone());
        }

        let (first, second) = match problem.crossover_kind() {
            CrossoverKind::SinglePoint => {
                let cut = rng.gen_index(len);
                let mut first = self.assignments[..cut].to_vec();
                first.extend_from_slice(&other.assignments[cut..]);
                let mut second = other.assignments[..cut].to_vec();
                second.extend_from_slice(&self.assignments[cut..]);
                (first, second)
            }
            CrossoverKind::Uniform => self
                .assignments
                .iter()
                .zip(other.assignments.iter())
                .map(|(&a, &b)| if rng.gen_bool(0.5) { (a, b) } else { (b, a) })
                .unzip(),
        };

        (
            Self { assignments: first },
            Self {
                assignments: second,
            },
        )
    }

    fn mutate(&mut self, problem: &ProblemInstance, rate: f64, rng: &mut RandomNumberGenerator) {
        if rate <= 0.0 {
            return;
        }
        for position in 0..self.assignments.len() {
            if rng.gen_bool(rate) {
                self.redraw(position, problem, rng);
            }
        }
    }
}
