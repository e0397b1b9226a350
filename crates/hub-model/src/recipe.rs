//! Recipe documents
//!
//! A recipe is the unit of content: an ordered workflow of steps, each bound
//! to exactly one tool configuration, plus the parameters its prompts
//! interpolate and the tips/examples shown alongside it.
//!
//! The struct mirrors the on-disk `recipe.yaml` shape exactly. `path` and
//! `author` are deliberately absent here: they are directory-derived and
//! only appear on the projected record.

use crate::tool::Settings;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A declared template parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Placeholder identifier used as `{{name}}` in step prompts
    pub name: String,
    /// What the parameter means
    pub description: String,
    /// An example value shown in the authoring UI
    pub example: String,
}

/// A worked example: parameter values plus the queries they produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Values for the declared parameters, keyed by parameter name
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
    /// Sample queries a user might run with these values
    #[serde(default)]
    pub sample_queries: Vec<String>,
}

/// The tool binding of a single step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTool {
    /// Tool id, resolving to a `tools/<name>/tool.yaml` definition
    pub name: String,
    /// Selected model, if the tool exposes a model choice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Step-level settings overrides (highest precedence)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

/// One ordered stage of a recipe's workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Step id, unique within the recipe and addressable as `#id`
    pub id: String,
    /// Display name
    pub name: String,
    /// What this step accomplishes
    pub description: String,
    /// Tool binding
    pub tool: StepTool,
    /// Prompt template; may contain `{{param}}` placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Where the step's input comes from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_source: Option<String>,
    /// What to do with the step's output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_handling: Option<String>,
    /// Free-form notes; may contain `#id` step references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// How the tool is operated in this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_usage: Option<String>,
}

impl Step {
    /// The descriptive text fields scanned for `#id` step references,
    /// paired with their field names for diagnostics.
    ///
    /// `prompt` is intentionally excluded: `#` inside prompt text belongs
    /// to the target AI tool, not to hub navigation.
    #[must_use]
    pub fn reference_fields(&self) -> Vec<(String, &str)> {
        let mut fields = vec![(
            format!("workflow[{}].description", self.id),
            self.description.as_str(),
        )];
        let optional = [
            ("input_source", &self.input_source),
            ("output_handling", &self.output_handling),
            ("notes", &self.notes),
            ("tool_usage", &self.tool_usage),
        ];
        for (name, value) in optional {
            if let Some(text) = value {
                fields.push((format!("workflow[{}].{}", self.id, name), text.as_str()));
            }
        }
        fields
    }
}

/// A complete recipe document, as stored in `recipe.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Free-text labels used for browsing and search
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ordered list of declared template parameters
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Ordered workflow steps
    pub workflow: Vec<Step>,
    /// Practical tips; the authoring UI expects at least one
    #[serde(default)]
    pub tips: Vec<String>,
    /// Worked examples
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl Recipe {
    /// Set of all step ids in workflow order
    #[must_use]
    pub fn step_ids(&self) -> BTreeSet<&str> {
        self.workflow.iter().map(|s| s.id.as_str()).collect()
    }

    /// Set of all declared parameter names
    #[must_use]
    pub fn declared_parameters(&self) -> BTreeSet<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    /// Look up a step by id
    #[must_use]
    pub fn find_step(&self, id: &str) -> Option<&Step> {
        self.workflow.iter().find(|s| s.id == id)
    }
}
