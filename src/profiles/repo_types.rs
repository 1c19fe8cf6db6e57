use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    #[serde(alias = "weight loss")]
    WeightLoss,
    #[serde(alias = "muscle gain")]
    MuscleGain,
    Endurance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equipment {
    None,
    Basic,
    Full,
}

/// Attributes describing a user for plan and advice purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u8,
    pub gender: Gender,
    pub goal: Goal,
    pub experience: Experience,
    pub equipment: Equipment,
}

pub const MIN_AGE: u8 = 10;
pub const MAX_AGE: u8 = 100;

impl UserProfile {
    pub fn age_in_range(&self) -> bool {
        (MIN_AGE..=MAX_AGE).contains(&self.age)
    }
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight_loss",
            Goal::MuscleGain => "muscle_gain",
            Goal::Endurance => "endurance",
        }
    }

    /// Spelling used in natural-language prompts.
    pub fn phrase(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight loss",
            Goal::MuscleGain => "muscle gain",
            Goal::Endurance => "endurance",
        }
    }
}

impl Experience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::Beginner => "beginner",
            Experience::Intermediate => "intermediate",
            Experience::Advanced => "advanced",
        }
    }
}

impl Equipment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::None => "none",
            Equipment::Basic => "basic",
            Equipment::Full => "full",
        }
    }
}

macro_rules! text_enum {
    ($ty:ident { $($text:literal $(| $alias:literal)* => $variant:ident),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text $(| $alias)* => Ok($ty::$variant),)+
                    other => Err(format!("invalid {}: {other}", stringify!($ty).to_lowercase())),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(Gender { "male" => Male, "female" => Female, "other" => Other });
text_enum!(Goal {
    "weight_loss" | "weight loss" => WeightLoss,
    "muscle_gain" | "muscle gain" => MuscleGain,
    "endurance" => Endurance,
});
text_enum!(Experience { "beginner" => Beginner, "intermediate" => Intermediate, "advanced" => Advanced });
text_enum!(Equipment { "none" => None, "basic" => Basic, "full" => Full });

/// Profile row as stored in the `profiles` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub age: i16,
    pub gender: String,
    pub goal: String,
    pub experience: String,
    pub equipment: String,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = anyhow::Error;

    fn try_from(r: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Self {
            age: u8::try_from(r.age)?,
            gender: r.gender.parse().map_err(anyhow::Error::msg)?,
            goal: r.goal.parse().map_err(anyhow::Error::msg)?,
            experience: r.experience.parse().map_err(anyhow::Error::msg)?,
            equipment: r.equipment.parse().map_err(anyhow::Error::msg)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_accepts_spaced_alias() {
        let goal: Goal = serde_json::from_str("\"weight loss\"").unwrap();
        assert_eq!(goal, Goal::WeightLoss);
        let goal: Goal = serde_json::from_str("\"muscle_gain\"").unwrap();
        assert_eq!(goal, Goal::MuscleGain);
        assert_eq!(serde_json::to_string(&Goal::WeightLoss).unwrap(), "\"weight_loss\"");
    }

    #[test]
    fn text_round_trips_through_from_str() {
        assert_eq!("female".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("endurance".parse::<Goal>(), Ok(Goal::Endurance));
        assert_eq!("advanced".parse::<Experience>(), Ok(Experience::Advanced));
        assert_eq!("none".parse::<Equipment>(), Ok(Equipment::None));
        assert!("yoga".parse::<Goal>().unwrap_err().contains("invalid goal"));
    }

    #[test]
    fn age_bounds_are_inclusive() {
        let mut p = UserProfile {
            age: 10,
            gender: Gender::Other,
            goal: Goal::Endurance,
            experience: Experience::Beginner,
            equipment: Equipment::Basic,
        };
        assert!(p.age_in_range());
        p.age = 100;
        assert!(p.age_in_range());
        p.age = 9;
        assert!(!p.age_in_range());
        p.age = 101;
        assert!(!p.age_in_range());
    }

    #[test]
    fn row_converts_to_profile() {
        let row = ProfileRow {
            age: 25,
            gender: "female".into(),
            goal: "weight_loss".into(),
            experience: "beginner".into(),
            equipment: "none".into(),
        };
        let p = UserProfile::try_from(row).expect("valid row");
        assert_eq!(p.goal, Goal::WeightLoss);
        assert_eq!(p.equipment, Equipment::None);
    }

    #[test]
    fn row_with_bad_enum_is_rejected() {
        let row = ProfileRow {
            age: 25,
            gender: "robot".into(),
            goal: "weight_loss".into(),
            experience: "beginner".into(),
            equipment: "none".into(),
        };
        assert!(UserProfile::try_from(row).is_err());
    }
}
