use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::domain::error::GenerationError;
use crate::infrastructure::openai::CompletionApi;

/// Top-level keys a completion must carry to count as a recipe.
pub const REQUIRED_KEYS: [&str; 6] = [
    "recipe_name",
    "cooking_time",
    "ingredients",
    "instructions",
    "nutritional_info",
    "cooking_tips",
];

const DEFAULT_RETRIES: u32 = 3;
// Fixed inter-attempt delay, deliberately not exponential.
const DEFAULT_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Copy)]
enum SoftFailure {
    Transport,
    Malformed,
}

#[derive(Clone)]
pub struct GenerationService {
    client: Arc<dyn CompletionApi>,
    retries: u32,
    delay: Duration,
}

impl GenerationService {
    pub fn new(client: Arc<dyn CompletionApi>) -> Self {
        Self {
            client,
            retries: DEFAULT_RETRIES,
            delay: DEFAULT_DELAY,
        }
    }

    pub fn with_retry_policy(mut self, retries: u32, delay: Duration) -> Self {
        self.retries = retries.max(1);
        self.delay = delay;
        self
    }

    pub fn build_prompt(ingredients: &[String], dietary_concerns: Option<&str>) -> String {
        let mut prompt = format!(
            "Generate a recipe using the following ingredients: {}. \
             Respond with only a JSON object, no surrounding text, containing exactly \
             these keys: recipe_name, cooking_time, ingredients (an array of objects \
             with ingredient, quantity and unit), instructions (an array of strings), \
             nutritional_info (an object with calories, protein, fat and carbohydrates), \
             and cooking_tips.",
            ingredients.join(", ")
        );
        if let Some(concern) = dietary_concerns {
            prompt.push_str(&format!(
                " The recipe must strictly satisfy this dietary requirement: {}.",
                concern
            ));
        }
        prompt
    }

    /// Structural check only: the text parses as a JSON object and all six
    /// required keys are present. Content is the model's problem.
    fn parse_structured(text: &str) -> Option<Value> {
        let value: Value = serde_json::from_str(text).ok()?;
        let object = value.as_object()?;
        if REQUIRED_KEYS.iter().all(|key| object.contains_key(*key)) {
            Some(value)
        } else {
            None
        }
    }

    /// Runs up to the configured number of attempts, sleeping a fixed delay
    /// between them. Transport errors and malformed output are both soft
    /// failures; the error after exhaustion reflects the last attempt.
    #[instrument(skip(self))]
    pub async fn generate(
        &self,
        ingredients: &[String],
        dietary_concerns: Option<&str>,
    ) -> Result<Value, GenerationError> {
        let prompt = Self::build_prompt(ingredients, dietary_concerns);
        let mut last_failure = SoftFailure::Malformed;

        for attempt in 1..=self.retries {
            match self.client.complete(&prompt).await {
                Ok(text) => match Self::parse_structured(&text) {
                    Some(recipe) => {
                        info!(attempt, "generated a structurally valid recipe");
                        return Ok(recipe);
                    }
                    None => {
                        warn!(attempt, "completion was not a structurally valid recipe");
                        last_failure = SoftFailure::Malformed;
                    }
                },
                Err(err) => {
                    warn!(attempt, error = %err, "completion call failed");
                    last_failure = SoftFailure::Transport;
                }
            }
            if attempt < self.retries {
                tokio::time::sleep(self.delay).await;
            }
        }

        Err(match last_failure {
            SoftFailure::Transport => GenerationError::ServiceUnavailable,
            SoftFailure::Malformed => GenerationError::InvalidFormat,
        })
    }
}
