//! Closed exercise vocabulary and the hand-written tables plans are drawn from.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::profiles::repo_types::Goal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exercise {
    #[serde(rename = "Jumping Jacks")]
    JumpingJacks,
    Burpees,
    #[serde(rename = "Mountain Climbers")]
    MountainClimbers,
    Running,
    Cycling,
    Plank,
    #[serde(rename = "Push-ups")]
    PushUps,
    #[serde(rename = "Pull-ups")]
    PullUps,
    Squats,
    Deadlifts,
    #[serde(rename = "Bench Press")]
    BenchPress,
    Lunges,
    Swimming,
    Rowing,
}

use Exercise::*;

pub const ALL_EXERCISES: &[Exercise] = &[
    JumpingJacks,
    Burpees,
    MountainClimbers,
    Running,
    Cycling,
    Plank,
    PushUps,
    PullUps,
    Squats,
    Deadlifts,
    BenchPress,
    Lunges,
    Swimming,
    Rowing,
];

/// Exercises that need no equipment at all.
pub const EQUIPMENT_FREE: &[Exercise] = &[
    JumpingJacks,
    Burpees,
    MountainClimbers,
    Running,
    PushUps,
    Squats,
    Lunges,
    Plank,
];

pub const WEIGHT_LOSS: &[Exercise] = &[JumpingJacks, Burpees, MountainClimbers, Running, Cycling];
pub const MUSCLE_GAIN: &[Exercise] = &[PushUps, PullUps, Squats, Deadlifts, BenchPress, Lunges];
pub const ENDURANCE: &[Exercise] = &[Running, Cycling, Swimming, Rowing, Plank];

pub fn goal_exercises(goal: Goal) -> &'static [Exercise] {
    match goal {
        Goal::WeightLoss => WEIGHT_LOSS,
        Goal::MuscleGain => MUSCLE_GAIN,
        Goal::Endurance => ENDURANCE,
    }
}

/// Reference profile for nearest-neighbor matching:
/// `[age, gender, goal, experience, equipment]` and its plan.
pub struct Reference {
    pub vector: [i64; 5],
    pub plan: [Exercise; 5],
}

pub const REFERENCES: &[Reference] = &[
    // young female, weight loss, beginner, no equipment
    Reference {
        vector: [25, 1, 0, 0, 0],
        plan: [JumpingJacks, Burpees, MountainClimbers, Running, Plank],
    },
    // male, muscle gain, intermediate, basic equipment
    Reference {
        vector: [30, 0, 1, 1, 1],
        plan: [PushUps, PullUps, Squats, Deadlifts, BenchPress],
    },
    // male, endurance, advanced, full equipment
    Reference {
        vector: [40, 0, 2, 2, 2],
        plan: [Plank, Running, Swimming, Cycling, Rowing],
    },
    // other, weight loss, beginner, no equipment
    Reference {
        vector: [22, 2, 0, 0, 0],
        plan: [JumpingJacks, Burpees, Running, Plank, PushUps],
    },
    // female, muscle gain, advanced, full equipment
    Reference {
        vector: [35, 1, 1, 2, 2],
        plan: [Squats, Deadlifts, BenchPress, PullUps, PushUps],
    },
];

impl Exercise {
    pub fn name(&self) -> &'static str {
        match self {
            JumpingJacks => "Jumping Jacks",
            Burpees => "Burpees",
            MountainClimbers => "Mountain Climbers",
            Running => "Running",
            Cycling => "Cycling",
            Plank => "Plank",
            PushUps => "Push-ups",
            PullUps => "Pull-ups",
            Squats => "Squats",
            Deadlifts => "Deadlifts",
            BenchPress => "Bench Press",
            Lunges => "Lunges",
            Swimming => "Swimming",
            Rowing => "Rowing",
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Exercise {
    type Err = String;

    /// Exact match on the display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_EXERCISES
            .iter()
            .copied()
            .find(|e| e.name() == s)
            .ok_or_else(|| format!("unknown exercise: {s}"))
    }
}
