//! Recipe projection
//!
//! Merges a validated recipe with its resolved tool configuration into one
//! denormalized [`ProjectedRecipe`] record: per-step settings resolution,
//! icon resolution, companion-doc attachment, prompt normalization.
//! Projection is pure and total; validation has already vouched for the
//! inputs, and every fallback (icon, readme, missing tool) is deterministic.

use hub_content::loader::RecipeSource;
use hub_content::validate::ToolSet;
use hub_model::{
    ProjectedRecipe, ProjectedStep, Recipe, ResolvedTool, Settings, Step,
};
use std::path::{Path, PathBuf};

/// Serving-tree path of the shared fallback icon
pub const DEFAULT_ICON_PATH: &str = "tools/default-icon.svg";

/// Outcome of icon resolution for one tool directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIcon {
    /// `icon.svg` exists
    Svg(PathBuf),
    /// No svg, but `icon.webp` exists
    Webp(PathBuf),
    /// Neither exists; the shared default is served
    Default,
}

impl ResolvedIcon {
    /// Path of the icon in the serving tree
    #[must_use]
    pub fn serving_path(&self, tool_id: &str) -> String {
        match self {
            Self::Svg(_) => format!("tools/{tool_id}/icon.svg"),
            Self::Webp(_) => format!("tools/{tool_id}/icon.webp"),
            Self::Default => DEFAULT_ICON_PATH.to_string(),
        }
    }

    /// Source file to copy into the serving tree, if any
    #[must_use]
    pub fn source_file(&self) -> Option<&Path> {
        match self {
            Self::Svg(path) | Self::Webp(path) => Some(path),
            Self::Default => None,
        }
    }
}

/// Resolve the icon for a tool directory.
///
/// Fixed preference order, first existing file wins: `icon.svg`, then
/// `icon.webp`, then the shared default. Total: never an error, never
/// more than one candidate.
#[must_use]
pub fn resolve_icon(tool_dir: &Path) -> ResolvedIcon {
    let svg = tool_dir.join("icon.svg");
    if svg.is_file() {
        return ResolvedIcon::Svg(svg);
    }
    let webp = tool_dir.join("icon.webp");
    if webp.is_file() {
        return ResolvedIcon::Webp(webp);
    }
    ResolvedIcon::Default
}

/// Project a validated recipe into its catalogue record.
#[must_use]
pub fn project(recipe: &Recipe, source: &RecipeSource, tools: &ToolSet) -> ProjectedRecipe {
    let workflow = recipe
        .workflow
        .iter()
        .map(|step| project_step(step, tools))
        .collect();

    let readme = source
        .companion
        .clone()
        .unwrap_or_else(|| recipe.description.clone());

    ProjectedRecipe {
        name: recipe.name.clone(),
        description: recipe.description.clone(),
        path: source.path(),
        author: source.author.clone(),
        tags: recipe.tags.clone(),
        parameters: recipe.parameters.clone(),
        workflow,
        tips: recipe.tips.clone(),
        examples: recipe.examples.clone(),
        readme,
    }
}

fn project_step(step: &Step, tools: &ToolSet) -> ProjectedStep {
    let tool = match tools.get(&step.tool.name) {
        Some(validated) => {
            let definition = &validated.definition;
            ResolvedTool {
                id: definition.id.clone(),
                name: definition.name.clone(),
                description: definition.description.clone(),
                icon: resolve_icon(&validated.dir).serving_path(&definition.id),
                model: step.tool.model.clone(),
                settings: definition
                    .resolve_settings(step.tool.model.as_deref(), step.tool.settings.as_ref()),
            }
        }
        // Validation rejects unknown tools; keep projection total regardless
        None => ResolvedTool {
            id: step.tool.name.clone(),
            name: step.tool.name.clone(),
            description: String::new(),
            icon: DEFAULT_ICON_PATH.to_string(),
            model: step.tool.model.clone(),
            settings: step.tool.settings.clone().unwrap_or_else(Settings::new),
        },
    };

    ProjectedStep {
        id: step.id.clone(),
        name: step.name.clone(),
        description: step.description.clone(),
        tool,
        prompt: normalize_prompt(step.prompt.as_deref()),
        input_source: step.input_source.clone(),
        output_handling: step.output_handling.clone(),
        notes: step.notes.clone(),
        tool_usage: step.tool_usage.clone(),
    }
}

/// Empty or whitespace-only prompt text is absent, not an empty string;
/// its presence is what flags UI sections to render.
fn normalize_prompt(prompt: Option<&str>) -> Option<String> {
    prompt
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn icon_prefers_svg_over_webp() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("icon.svg"), "<svg/>").unwrap();
        fs::write(tmp.path().join("icon.webp"), "webp").unwrap();

        let resolved = resolve_icon(tmp.path());
        assert!(matches!(resolved, ResolvedIcon::Svg(_)));
        assert_eq!(resolved.serving_path("claude"), "tools/claude/icon.svg");
    }

    #[test]
    fn icon_falls_back_to_webp_then_default() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("icon.webp"), "webp").unwrap();
        assert!(matches!(resolve_icon(tmp.path()), ResolvedIcon::Webp(_)));

        let empty = tempfile::tempdir().unwrap();
        let resolved = resolve_icon(empty.path());
        assert_eq!(resolved, ResolvedIcon::Default);
        assert_eq!(resolved.serving_path("anything"), DEFAULT_ICON_PATH);
        assert!(resolved.source_file().is_none());
    }

    #[test]
    fn prompt_normalization() {
        assert_eq!(normalize_prompt(None), None);
        assert_eq!(normalize_prompt(Some("")), None);
        assert_eq!(normalize_prompt(Some("   \n\t")), None);
        assert_eq!(
            normalize_prompt(Some("  do the thing  ")),
            Some("do the thing".to_string())
        );
    }
}
