//! Content validation
//!
//! Two public checks, both accumulating every applicable diagnostic in one
//! pass so a single run reports every problem:
//!
//! - [`validate_tool`]: identity schema (base + tool-specific), id shape,
//!   icon existence.
//! - [`validate_recipe`]: recipe schema first (if that fails the structural
//!   shape cannot be trusted and the custom checks are skipped), then
//!   step-id and parameter-name uniqueness, tool-reference and model
//!   resolution, bidirectional parameter-usage consistency, and `#id`
//!   step-reference integrity.
//!
//! Both return the typed document only when it passed, so downstream
//! projection can rely on having a vetted value. One item's failure never
//! blocks validation of siblings; the caller decides the process exit code
//! from whether any diagnostics accumulated.

use crate::diagnostics::{Diagnostic, IssueKind};
use crate::loader::{RecipeSource, ToolSource};
use crate::schema::SchemaStore;
use hub_model::{slug, Recipe, ToolDefinition};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use tracing::debug;

/// `{{identifier}}` placeholder tokens inside prompt text
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([a-zA-Z][a-zA-Z0-9_]*)\}\}").expect("placeholder pattern"));

/// `#step_id` reference tokens inside descriptive text
static STEP_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([a-z0-9_]+)").expect("step reference pattern"));

/// A tool that passed validation, with the directory its assets live in
#[derive(Debug, Clone)]
pub struct ValidatedTool {
    /// The typed definition, with `id` attached
    pub definition: ToolDefinition,
    /// Directory holding `tool.yaml` and the icon file
    pub dir: PathBuf,
}

/// The set of validated tools, keyed by tool id
#[derive(Debug, Default)]
pub struct ToolSet {
    tools: BTreeMap<String, ValidatedTool>,
}

impl ToolSet {
    /// Empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validated tool
    pub fn insert(&mut self, tool: ValidatedTool) {
        self.tools.insert(tool.definition.id.clone(), tool);
    }

    /// Look up a tool by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ValidatedTool> {
        self.tools.get(id)
    }

    /// Whether a tool id resolves
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.tools.contains_key(id)
    }

    /// All tools in id order
    pub fn iter(&self) -> impl Iterator<Item = &ValidatedTool> {
        self.tools.values()
    }

    /// Number of tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Validate one tool definition.
///
/// On success the typed [`ValidatedTool`] is returned with `id` attached
/// from the directory name; on failure every diagnostic found is returned
/// and the tool is excluded from the catalogue.
pub fn validate_tool(
    source: &ToolSource,
    store: &SchemaStore,
) -> Result<ValidatedTool, Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();

    if !slug::is_tool_id(&source.id) {
        diagnostics.push(Diagnostic::new(
            &source.file,
            IssueKind::SchemaViolation {
                detail: format!(
                    "tool directory '{}' is not a valid tool id (expected ^[a-z][a-z0-9_-]*$)",
                    source.id
                ),
            },
        ));
    }

    for detail in store.check_tool(&source.id, &source.raw) {
        diagnostics.push(Diagnostic::new(
            &source.file,
            IssueKind::SchemaViolation { detail },
        ));
    }

    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    let mut definition: ToolDefinition = match serde_json::from_value(source.raw.clone()) {
        Ok(definition) => definition,
        Err(e) => {
            // Shape passed the schema but still failed typed decode
            return Err(vec![Diagnostic::new(
                &source.file,
                IssueKind::SchemaViolation {
                    detail: e.to_string(),
                },
            )]);
        }
    };
    definition.id = source.id.clone();

    let icon = source.dir.join(&definition.icon);
    if !icon.is_file() {
        diagnostics.push(Diagnostic::new(
            &source.file,
            IssueKind::MissingAsset { asset: icon },
        ));
    }

    if diagnostics.is_empty() {
        debug!(tool = %definition.id, "tool valid");
        Ok(ValidatedTool {
            definition,
            dir: source.dir.clone(),
        })
    } else {
        Err(diagnostics)
    }
}

/// Validate one recipe against the schema, the tool set, and the
/// structural cross-checks.
pub fn validate_recipe(
    source: &RecipeSource,
    store: &SchemaStore,
    tools: &ToolSet,
) -> Result<Recipe, Vec<Diagnostic>> {
    let mut diagnostics = Vec::new();

    for (field, value) in [("author directory", &source.author), ("recipe directory", &source.slug)]
    {
        if !slug::is_url_friendly(value) {
            diagnostics.push(Diagnostic::new(
                &source.file,
                IssueKind::BadSlug {
                    field: field.to_string(),
                    value: value.clone(),
                },
            ));
        }
    }

    let schema_violations: Vec<Diagnostic> = store
        .check_recipe(&source.raw)
        .into_iter()
        .map(|detail| Diagnostic::new(&source.file, IssueKind::SchemaViolation { detail }))
        .collect();

    // A recipe that fails its schema has no trustworthy shape; report what
    // we have and skip the structural checks.
    if !schema_violations.is_empty() {
        diagnostics.extend(schema_violations);
        return Err(diagnostics);
    }

    let recipe: Recipe = match serde_json::from_value(source.raw.clone()) {
        Ok(recipe) => recipe,
        Err(e) => {
            diagnostics.push(Diagnostic::new(
                &source.file,
                IssueKind::SchemaViolation {
                    detail: e.to_string(),
                },
            ));
            return Err(diagnostics);
        }
    };

    for tag in &recipe.tags {
        if !slug::is_url_friendly(tag) {
            diagnostics.push(Diagnostic::new(
                &source.file,
                IssueKind::BadSlug {
                    field: "tag".to_string(),
                    value: tag.clone(),
                },
            ));
        }
    }

    check_duplicate_names(&recipe, source, &mut diagnostics);
    check_tool_references(&recipe, tools, source, &mut diagnostics);
    check_parameter_usage(&recipe, source, &mut diagnostics);
    check_step_references(&recipe, source, &mut diagnostics);

    if diagnostics.is_empty() {
        debug!(recipe = %source.path(), "recipe valid");
        Ok(recipe)
    } else {
        Err(diagnostics)
    }
}

/// Extract `{{identifier}}` placeholder names from prompt text.
#[must_use]
pub fn extract_placeholders(text: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Extract `#step_id` reference tokens from descriptive text.
#[must_use]
pub fn extract_step_references(text: &str) -> Vec<String> {
    STEP_REFERENCE
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

/// Step ids must be unique: duplicates make `#id` references ambiguous and
/// collapse diagram nodes that share a Mermaid identifier. Parameter names
/// must be unique for the same reason on the `{{name}}` side.
fn check_duplicate_names(
    recipe: &Recipe,
    source: &RecipeSource,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut seen = BTreeSet::new();
    for step in &recipe.workflow {
        if !seen.insert(step.id.as_str()) {
            diagnostics.push(Diagnostic::new(
                &source.file,
                IssueKind::SchemaViolation {
                    detail: format!("duplicate step id '{}'", step.id),
                },
            ));
        }
    }

    let mut seen = BTreeSet::new();
    for parameter in &recipe.parameters {
        if !seen.insert(parameter.name.as_str()) {
            diagnostics.push(Diagnostic::new(
                &source.file,
                IssueKind::SchemaViolation {
                    detail: format!("duplicate parameter name '{}'", parameter.name),
                },
            ));
        }
    }
}

/// Every step's tool must resolve, and a selected model must be one the
/// tool declares (tools without a `models` list accept any).
fn check_tool_references(
    recipe: &Recipe,
    tools: &ToolSet,
    source: &RecipeSource,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for step in &recipe.workflow {
        match tools.get(&step.tool.name) {
            None => {
                diagnostics.push(Diagnostic::new(
                    &source.file,
                    IssueKind::UnknownTool {
                        step_id: step.id.clone(),
                        tool_name: step.tool.name.clone(),
                    },
                ));
            }
            Some(tool) => {
                if let Some(model) = &step.tool.model {
                    if !tool.definition.supports_model(model) {
                        diagnostics.push(Diagnostic::new(
                            &source.file,
                            IssueKind::SchemaViolation {
                                detail: format!(
                                    "step '{}' selects model '{}' not declared by tool '{}'",
                                    step.id, model, step.tool.name
                                ),
                            },
                        ));
                    }
                }
            }
        }
    }
}

/// Bidirectional dead-parameter detection: every used placeholder must be
/// declared, every declared parameter must be used by some prompt.
fn check_parameter_usage(
    recipe: &Recipe,
    source: &RecipeSource,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let defined = recipe.declared_parameters();
    let mut used: BTreeSet<String> = BTreeSet::new();

    for step in &recipe.workflow {
        if let Some(prompt) = &step.prompt {
            for name in extract_placeholders(prompt) {
                if !defined.contains(name.as_str()) {
                    diagnostics.push(Diagnostic::new(
                        &source.file,
                        IssueKind::UndefinedParameterReference {
                            step_id: step.id.clone(),
                            name: name.clone(),
                        },
                    ));
                }
                used.insert(name);
            }
        }
    }

    for name in defined {
        if !used.contains(name) {
            diagnostics.push(Diagnostic::new(
                &source.file,
                IssueKind::UnusedParameter {
                    name: name.to_string(),
                },
            ));
        }
    }
}

/// Every `#id` token in descriptive text must name a step in this recipe.
/// Self-references are allowed; this is navigation text, not control flow.
fn check_step_references(
    recipe: &Recipe,
    source: &RecipeSource,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let ids = recipe.step_ids();

    let mut fields: Vec<(String, &str)> =
        vec![("description".to_string(), recipe.description.as_str())];
    for (i, tip) in recipe.tips.iter().enumerate() {
        fields.push((format!("tips[{i}]"), tip.as_str()));
    }
    for step in &recipe.workflow {
        fields.extend(step.reference_fields());
    }

    for (field, text) in fields {
        for token in extract_step_references(text) {
            if !ids.contains(token.as_str()) {
                diagnostics.push(Diagnostic::new(
                    &source.file,
                    IssueKind::UnknownStepReference {
                        field: field.clone(),
                        token,
                    },
                ));
            }
        }
    }
}
