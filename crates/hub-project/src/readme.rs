//! Per-recipe README rendering
//!
//! Renders the generated `README.md` for a recipe directory: title,
//! long-form description, embedded workflow diagram, parameters table, and
//! tips. A build convenience so contributors don't hand-maintain the
//! boilerplate around their `recipe.yaml`.

use crate::diagram::workflow_diagram;
use hub_model::Recipe;

/// Render a recipe's README.
///
/// `long_description` is the companion `description.md` prose when one
/// exists; the recipe's own `description` always appears as well.
#[must_use]
pub fn render_readme(recipe: &Recipe, long_description: Option<&str>) -> String {
    let mut out = format!("# {}\n\n", recipe.name);

    if let Some(prose) = long_description {
        let prose = prose.trim();
        if !prose.is_empty() {
            out.push_str(prose);
            out.push_str("\n\n");
        }
    }

    out.push_str(&recipe.description);
    out.push_str("\n\n## Workflow\n\n```mermaid\n");
    out.push_str(&workflow_diagram(&recipe.workflow));
    out.push_str("```\n");

    if !recipe.parameters.is_empty() {
        out.push_str("\n## Parameters\n\n");
        out.push_str("| Parameter | Description | Example |\n");
        out.push_str("|-----------|-------------|----------|\n");
        for parameter in &recipe.parameters {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                parameter.name, parameter.description, parameter.example
            ));
        }
    }

    if !recipe.tips.is_empty() {
        out.push_str("\n## Tips\n\n");
        for tip in &recipe.tips {
            out.push_str(&format!("- {tip}\n"));
        }
    }

    out
}
