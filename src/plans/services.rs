use std::{fmt, str::FromStr};

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::plans::catalog::{goal_exercises, Exercise, EQUIPMENT_FREE, REFERENCES};
use crate::profiles::repo_types::{Equipment, Experience, Gender, Goal, UserProfile};

pub const MAX_PLAN_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStrategy {
    /// Goal lookup table, filtered by equipment.
    Table,
    /// Closest hard-coded reference profile.
    Nearest,
}

impl FromStr for PlanStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(PlanStrategy::Table),
            "nearest" => Ok(PlanStrategy::Nearest),
            other => Err(format!("unknown plan strategy: {other}")),
        }
    }
}

impl fmt::Display for PlanStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStrategy::Table => f.write_str("table"),
            PlanStrategy::Nearest => f.write_str("nearest"),
        }
    }
}

/// Candidates for the table variant, before shuffling.
pub fn table_candidates(goal: Goal, equipment: Equipment) -> Vec<Exercise> {
    goal_exercises(goal)
        .iter()
        .copied()
        .filter(|e| equipment != Equipment::None || EQUIPMENT_FREE.contains(e))
        .collect()
}

pub fn encode_profile(profile: &UserProfile) -> [i64; 5] {
    let gender = match profile.gender {
        Gender::Male => 0,
        Gender::Female => 1,
        Gender::Other => 2,
    };
    let goal = match profile.goal {
        Goal::WeightLoss => 0,
        Goal::MuscleGain => 1,
        Goal::Endurance => 2,
    };
    let experience = match profile.experience {
        Experience::Beginner => 0,
        Experience::Intermediate => 1,
        Experience::Advanced => 2,
    };
    let equipment = match profile.equipment {
        Equipment::None => 0,
        Equipment::Basic => 1,
        Equipment::Full => 2,
    };
    [i64::from(profile.age), gender, goal, experience, equipment]
}

fn squared_distance(a: &[i64; 5], b: &[i64; 5]) -> i64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the closest reference profile. The first minimum wins ties.
pub fn nearest_reference(vector: &[i64; 5]) -> usize {
    let mut best = 0;
    let mut best_dist = i64::MAX;
    for (i, r) in REFERENCES.iter().enumerate() {
        let d = squared_distance(vector, &r.vector);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

fn shuffle_and_truncate<R: Rng + ?Sized>(mut exercises: Vec<Exercise>, rng: &mut R) -> Vec<Exercise> {
    exercises.shuffle(rng);
    exercises.truncate(MAX_PLAN_LEN);
    exercises
}

/// Table variant. Needs only goal and equipment.
pub fn table_plan<R: Rng + ?Sized>(goal: Goal, equipment: Equipment, rng: &mut R) -> Vec<Exercise> {
    shuffle_and_truncate(table_candidates(goal, equipment), rng)
}

pub fn nearest_plan<R: Rng + ?Sized>(profile: &UserProfile, rng: &mut R) -> Vec<Exercise> {
    let vector = encode_profile(profile);
    let idx = nearest_reference(&vector);
    debug!(?vector, reference = idx, "nearest reference profile");
    shuffle_and_truncate(REFERENCES[idx].plan.to_vec(), rng)
}

#[derive(Debug, Clone, Copy)]
pub struct PlanGenerator {
    pub default_strategy: PlanStrategy,
}

impl PlanGenerator {
    pub fn new(default_strategy: PlanStrategy) -> Self {
        Self { default_strategy }
    }

    pub fn generate(&self, profile: &UserProfile, strategy: Option<PlanStrategy>) -> (PlanStrategy, Vec<Exercise>) {
        let mut rng = rand::thread_rng();
        self.generate_with_rng(profile, strategy, &mut rng)
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        profile: &UserProfile,
        strategy: Option<PlanStrategy>,
        rng: &mut R,
    ) -> (PlanStrategy, Vec<Exercise>) {
        let strategy = strategy.unwrap_or(self.default_strategy);
        let plan = match strategy {
            PlanStrategy::Table => table_plan(profile.goal, profile.equipment, rng),
            PlanStrategy::Nearest => nearest_plan(profile, rng),
        };
        (strategy, plan)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::plans::catalog::{Exercise::*, ALL_EXERCISES};

    fn profile(age: u8, gender: Gender, goal: Goal, experience: Experience, equipment: Equipment) -> UserProfile {
        UserProfile { age, gender, goal, experience, equipment }
    }

    fn alice() -> UserProfile {
        profile(25, Gender::Female, Goal::WeightLoss, Experience::Beginner, Equipment::None)
    }

    fn all_profiles() -> Vec<UserProfile> {
        let mut out = Vec::new();
        for age in [10, 22, 25, 31, 40, 64, 100] {
            for gender in [Gender::Male, Gender::Female, Gender::Other] {
                for goal in [Goal::WeightLoss, Goal::MuscleGain, Goal::Endurance] {
                    for experience in [Experience::Beginner, Experience::Intermediate, Experience::Advanced] {
                        for equipment in [Equipment::None, Equipment::Basic, Equipment::Full] {
                            out.push(profile(age, gender, goal, experience, equipment));
                        }
                    }
                }
            }
        }
        out
    }

    #[test]
    fn table_plans_respect_goal_and_equipment() {
        let mut rng = StdRng::seed_from_u64(7);
        for p in all_profiles() {
            let plan = table_plan(p.goal, p.equipment, &mut rng);
            assert!(plan.len() <= MAX_PLAN_LEN);
            assert!(plan.iter().all(|e| goal_exercises(p.goal).contains(e)));
            if p.equipment == Equipment::None {
                assert!(plan.iter().all(|e| EQUIPMENT_FREE.contains(e)));
            }
            let mut dedup = plan.clone();
            dedup.sort_by_key(|e| e.name());
            dedup.dedup();
            assert_eq!(dedup.len(), plan.len());
        }
    }

    #[test]
    fn alice_table_plan_excludes_cycling() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let plan = table_plan(Goal::WeightLoss, Equipment::None, &mut rng);
            assert_eq!(plan.len(), 4);
            assert!(!plan.contains(&Cycling));
            for e in [JumpingJacks, Burpees, MountainClimbers, Running] {
                assert!(plan.contains(&e));
            }
        }
    }

    #[test]
    fn muscle_gain_with_equipment_is_truncated_to_five() {
        let mut rng = StdRng::seed_from_u64(3);
        let plan = table_plan(Goal::MuscleGain, Equipment::Full, &mut rng);
        assert_eq!(plan.len(), MAX_PLAN_LEN);
    }

    #[test]
    fn endurance_without_equipment_is_short() {
        let candidates = table_candidates(Goal::Endurance, Equipment::None);
        assert_eq!(candidates, vec![Running, Plank]);
    }

    #[test]
    fn encoding_is_deterministic() {
        let p = alice();
        assert_eq!(encode_profile(&p), [25, 1, 0, 0, 0]);
        assert_eq!(encode_profile(&p), encode_profile(&p));
        assert_eq!(nearest_reference(&encode_profile(&p)), 0);
    }

    #[test]
    fn nearest_matches_reference_vectors_exactly() {
        for (i, r) in REFERENCES.iter().enumerate() {
            assert_eq!(nearest_reference(&r.vector), i);
        }
    }

    #[test]
    fn nearest_ties_pick_first_reference() {
        // squared distance 5 to both reference 0 and reference 3
        let tie = [23, 0, 0, 0, 0];
        assert_eq!(nearest_reference(&tie), 0);
        let near_third = [22, 1, 0, 0, 0];
        assert_eq!(nearest_reference(&near_third), 3);
    }

    #[test]
    fn age_dominates_nearest_match() {
        let p = profile(39, Gender::Female, Goal::WeightLoss, Experience::Beginner, Equipment::None);
        assert_eq!(nearest_reference(&encode_profile(&p)), 2);
    }

    #[test]
    fn nearest_plan_is_permutation_of_reference() {
        let mut rng = StdRng::seed_from_u64(11);
        for p in all_profiles() {
            let idx = nearest_reference(&encode_profile(&p));
            let plan = nearest_plan(&p, &mut rng);
            assert_eq!(plan.len(), MAX_PLAN_LEN);
            assert!(plan.iter().all(|e| REFERENCES[idx].plan.contains(e)));
            assert!(plan.iter().all(|e| ALL_EXERCISES.contains(e)));
        }
        // shuffling works on a copy
        assert_eq!(REFERENCES[0].plan, [JumpingJacks, Burpees, MountainClimbers, Running, Plank]);
    }

    #[test]
    fn generator_uses_default_unless_overridden() {
        let gen = PlanGenerator::new(PlanStrategy::Nearest);
        let mut rng = StdRng::seed_from_u64(1);
        let (s, plan) = gen.generate_with_rng(&alice(), None, &mut rng);
        assert_eq!(s, PlanStrategy::Nearest);
        assert!(plan.contains(&Plank));

        let (s, plan) = gen.generate_with_rng(&alice(), Some(PlanStrategy::Table), &mut rng);
        assert_eq!(s, PlanStrategy::Table);
        assert!(!plan.contains(&Plank));
    }

    #[test]
    fn strategy_parses() {
        assert_eq!("table".parse::<PlanStrategy>(), Ok(PlanStrategy::Table));
        assert_eq!("nearest".parse::<PlanStrategy>(), Ok(PlanStrategy::Nearest));
        assert!("random".parse::<PlanStrategy>().is_err());
    }
}
