use std::{sync::Arc, time::Duration};

use serde::Serialize;
use tracing::{debug, warn};

use crate::advice::generator::TextGenerator;
use crate::error::GenerationError;
use crate::plans::catalog::Exercise;
use crate::profiles::repo_types::UserProfile;

pub const FALLBACK_TIP: &str = "Focus on controlled movement and steady breathing.";

/// Fixed tip for a known exercise name; unknown names get [`FALLBACK_TIP`].
pub fn static_tip(exercise: &str) -> &'static str {
    let Ok(exercise) = exercise.parse::<Exercise>() else {
        return FALLBACK_TIP;
    };
    match exercise {
        Exercise::JumpingJacks => "Land softly on the balls of your feet and keep a steady rhythm.",
        Exercise::Burpees => "Keep your core tight and land softly when you jump.",
        Exercise::MountainClimbers => "Keep your hips level with your shoulders and drive the knees forward.",
        Exercise::Running => "Maintain a steady pace and breathe rhythmically.",
        Exercise::Cycling => "Set the saddle so your knee is slightly bent at the bottom of the stroke.",
        Exercise::Plank => "Keep your body in a straight line from head to heels.",
        Exercise::PushUps => "Keep your elbows at about 45 degrees and your body straight.",
        Exercise::PullUps => "Start from a dead hang and pull your chest toward the bar.",
        Exercise::Squats => "Keep your back straight, knees behind toes.",
        Exercise::Deadlifts => "Hinge at the hips and keep the bar close to your shins.",
        Exercise::BenchPress => "Plant your feet and lower the bar to mid-chest under control.",
        Exercise::Lunges => "Step far enough that your front knee stays over the ankle.",
        Exercise::Swimming => "Rotate your body with each stroke and exhale underwater.",
        Exercise::Rowing => "Drive with the legs first, then lean back and pull with the arms.",
    }
}

pub fn advice_prompt(exercise: &str, profile: &UserProfile) -> String {
    format!(
        "Give a personalized tip for doing {exercise} for a {} {} whose goal is {}.",
        profile.experience,
        profile.gender,
        profile.goal.phrase()
    )
}

/// Removes the echoed prompt from generated text.
pub fn strip_prompt(generated: &str, prompt: &str) -> String {
    match generated.strip_prefix(prompt) {
        Some(rest) => rest.trim().to_string(),
        None => generated.replace(prompt, "").trim().to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceSource {
    Static,
    Generated,
    /// Generation failed or timed out; a static tip was used instead.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub tip: String,
    pub source: AdviceSource,
}

pub struct AdviceProvider {
    generator: Option<Arc<dyn TextGenerator>>,
    max_length: usize,
    timeout: Duration,
}

impl AdviceProvider {
    pub fn static_only() -> Self {
        Self {
            generator: None,
            max_length: 0,
            timeout: Duration::ZERO,
        }
    }

    pub fn generative(generator: Arc<dyn TextGenerator>, max_length: usize, timeout: Duration) -> Self {
        Self {
            generator: Some(generator),
            max_length,
            timeout,
        }
    }

    /// Advice for `exercise`. Generation is only attempted when a profile is
    /// given and a generator is configured; it never fails the caller.
    pub async fn advise(&self, exercise: &str, profile: Option<&UserProfile>) -> Advice {
        let (Some(generator), Some(profile)) = (&self.generator, profile) else {
            return Advice {
                tip: static_tip(exercise).to_string(),
                source: AdviceSource::Static,
            };
        };

        match self.generate(generator.as_ref(), exercise, profile).await {
            Ok(tip) => Advice {
                tip,
                source: AdviceSource::Generated,
            },
            Err(e) => {
                warn!(error = %e, %exercise, "advice generation failed; using static tip");
                Advice {
                    tip: static_tip(exercise).to_string(),
                    source: AdviceSource::Fallback,
                }
            }
        }
    }

    async fn generate(
        &self,
        generator: &dyn TextGenerator,
        exercise: &str,
        profile: &UserProfile,
    ) -> Result<String, GenerationError> {
        let prompt = advice_prompt(exercise, profile);
        debug!(%prompt, max_length = self.max_length, "requesting advice");

        let candidates = tokio::time::timeout(self.timeout, generator.generate(&prompt, self.max_length))
            .await
            .map_err(|_| GenerationError::Timeout(self.timeout))??;

        let first = candidates.first().ok_or(GenerationError::Empty)?;
        let tip = strip_prompt(first, &prompt);
        if tip.is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(tip)
    }
}
