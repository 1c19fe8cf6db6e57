use serde::{Deserialize, Serialize};

use crate::profiles::repo_types::{Equipment, Experience, Gender, Goal, UserProfile};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub age: u8,
    pub gender: Gender,
    pub goal: Goal,
    pub experience: Experience,
    pub equipment: Equipment,
}

impl RegisterRequest {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            age: self.age,
            gender: self.gender,
            goal: self.goal,
            experience: self.experience,
            equipment: self.equipment,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub profile: UserProfile,
}
