//! Projected catalogue records
//!
//! The public output contract of the build: one denormalized
//! [`ProjectedRecipe`] per valid recipe, aggregated into `recipes.json`,
//! plus one lightweight [`SearchEntry`] per recipe in `search-index.json`.
//! Any consumer (the browsing UI) depends only on these shapes.

use crate::recipe::{Example, Parameter};
use crate::tool::Settings;
use serde::{Deserialize, Serialize};

/// A step's tool binding after resolution against the tool definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTool {
    /// Tool id
    pub id: String,
    /// Tool display name from the definition
    pub name: String,
    /// Tool description from the definition
    pub description: String,
    /// Serving-tree path of the resolved icon
    pub icon: String,
    /// Selected model, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Fully resolved settings (step > model > tool defaults)
    #[serde(default, skip_serializing_if = "Settings::is_empty")]
    pub settings: Settings,
}

/// A workflow step after projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedStep {
    /// Step id
    pub id: String,
    /// Display name
    pub name: String,
    /// What this step accomplishes
    pub description: String,
    /// Resolved tool binding
    pub tool: ResolvedTool,
    /// Prompt template; `None` when absent or whitespace-only, so the UI
    /// can key section rendering off presence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Where the step's input comes from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_source: Option<String>,
    /// What to do with the step's output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_handling: Option<String>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// How the tool is operated in this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_usage: Option<String>,
}

/// One denormalized catalogue record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedRecipe {
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// `<author>/<slug>`, derived from directory location
    pub path: String,
    /// Author (the `recipes/` subdirectory name)
    pub author: String,
    /// Free-text labels
    pub tags: Vec<String>,
    /// Declared template parameters
    pub parameters: Vec<Parameter>,
    /// Projected workflow steps
    pub workflow: Vec<ProjectedStep>,
    /// Practical tips
    pub tips: Vec<String>,
    /// Worked examples
    pub examples: Vec<Example>,
    /// Long-form documentation: the companion `README.md`/`description.md`
    /// when one exists, otherwise the recipe's own `description`. Never
    /// absent.
    pub readme: String,
}

/// One search-index record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    /// Recipe path, used as the stable id
    pub id: String,
    /// Recipe display name
    pub title: String,
    /// Recipe description
    pub description: String,
    /// Recipe tags
    pub tags: Vec<String>,
    /// Recipe author
    pub author: String,
}

impl From<&ProjectedRecipe> for SearchEntry {
    fn from(recipe: &ProjectedRecipe) -> Self {
        Self {
            id: recipe.path.clone(),
            title: recipe.name.clone(),
            description: recipe.description.clone(),
            tags: recipe.tags.clone(),
            author: recipe.author.clone(),
        }
    }
}
