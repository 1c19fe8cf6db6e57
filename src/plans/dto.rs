use serde::{Deserialize, Serialize};

use crate::plans::{catalog::Exercise, services::PlanStrategy};
use crate::profiles::repo_types::{Equipment, Experience, Goal};

#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub strategy: Option<PlanStrategy>,
}

/// Body for an anonymous table plan.
#[derive(Debug, Deserialize)]
pub struct AnonymousPlanRequest {
    pub goal: Goal,
    pub experience: Experience,
    pub equipment: Equipment,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub strategy: PlanStrategy,
    pub exercises: Vec<Exercise>,
}
