//! Submission serialization
//!
//! Turns an in-memory [`Recipe`] into the YAML document a contributor
//! submits as `recipes/<author>/<slug>/recipe.yaml`, conventionally via a
//! pull request. Output contract: 2-space indentation, no line wrapping,
//! no anchors or aliases. `serde_yaml` emits exactly this shape for the
//! alias-free tree a `Recipe` is.

use crate::recipe::{Parameter, Recipe, Step, StepTool};
use thiserror::Error;

/// Errors producing a submission document
#[derive(Debug, Error)]
pub enum AuthoringError {
    /// The recipe could not be serialized to YAML
    #[error("yaml serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Serialize a recipe into submission-shaped YAML.
pub fn to_submission_yaml(recipe: &Recipe) -> Result<String, AuthoringError> {
    Ok(serde_yaml::to_string(recipe)?)
}

/// A starter recipe for `hub new`, mirroring the fields the multi-step
/// authoring form walks through.
#[must_use]
pub fn submission_template() -> Recipe {
    Recipe {
        name: "My recipe".to_string(),
        description: "What this workflow accomplishes".to_string(),
        tags: vec!["example".to_string()],
        parameters: vec![Parameter {
            name: "topic".to_string(),
            description: "The subject to work on".to_string(),
            example: "rust build pipelines".to_string(),
        }],
        workflow: vec![Step {
            id: "first_step".to_string(),
            name: "First step".to_string(),
            description: "Describe what this step does".to_string(),
            tool: StepTool {
                name: "chatgpt".to_string(),
                model: None,
                settings: None,
            },
            prompt: Some("Tell me about {{topic}}".to_string()),
            input_source: None,
            output_handling: None,
            notes: None,
            tool_usage: None,
        }],
        tips: vec!["Keep prompts specific".to_string()],
        examples: vec![],
    }
}
