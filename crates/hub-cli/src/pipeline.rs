//! Build pipeline orchestration
//!
//! Wires the crates together in the order the data flows: schema store
//! first (fatal if broken), then tools, then recipes, then projection and
//! emission. Diagnostics accumulate across every phase; one bad item never
//! hides the problems of its siblings.

use anyhow::Context;
use hub_content::loader::{self, RecipeSource};
use hub_content::validate::{self, ToolSet};
use hub_content::{Diagnostic, SchemaStore};
use hub_model::{ProjectedRecipe, Recipe};
use hub_project::EmitReport;
use std::path::Path;
use tracing::info;

/// Everything validation produced: the vetted content plus every
/// diagnostic found along the way
pub(crate) struct ValidatedContent {
    /// Tools that passed, keyed by id
    pub(crate) tools: ToolSet,
    /// Recipes that passed, paired with their on-disk source
    pub(crate) recipes: Vec<(Recipe, RecipeSource)>,
    /// Every diagnostic from loading and validation
    pub(crate) diagnostics: Vec<Diagnostic>,
}

/// What a full build produced
pub(crate) struct BuildReport {
    /// The emission outcome
    pub(crate) emit: EmitReport,
    /// Diagnostics from the validation phases
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Per-recipe READMEs regenerated in the content tree
    pub(crate) readmes_written: usize,
}

/// Load and validate both content trees.
///
/// A broken schema store or a missing content root aborts; everything else
/// folds into `diagnostics`.
pub(crate) fn validate_content(
    content_dir: &Path,
    schema_dir: &Path,
) -> anyhow::Result<ValidatedContent> {
    let store = SchemaStore::load(schema_dir)
        .with_context(|| format!("loading schema store from {}", schema_dir.display()))?;

    let mut diagnostics = Vec::new();

    let tool_sources = loader::load_tools(&content_dir.join("tools"))
        .context("enumerating tools")?;
    diagnostics.extend(tool_sources.diagnostics);

    let mut tools = ToolSet::new();
    for source in &tool_sources.items {
        match validate::validate_tool(source, &store) {
            Ok(tool) => tools.insert(tool),
            Err(found) => diagnostics.extend(found),
        }
    }

    let recipe_sources = loader::load_recipes(&content_dir.join("recipes"))
        .context("enumerating recipes")?;
    diagnostics.extend(recipe_sources.diagnostics);

    let mut recipes = Vec::new();
    for source in recipe_sources.items {
        match validate::validate_recipe(&source, &store, &tools) {
            Ok(recipe) => recipes.push((recipe, source)),
            Err(found) => diagnostics.extend(found),
        }
    }

    info!(
        tools = tools.len(),
        recipes = recipes.len(),
        diagnostics = diagnostics.len(),
        "content validated"
    );

    Ok(ValidatedContent {
        tools,
        recipes,
        diagnostics,
    })
}

/// Run the full pipeline: validate, project, emit.
///
/// Invalid items are excluded from the artifacts but reported; the caller
/// decides the exit code from `diagnostics`. With `readmes`, each valid
/// recipe's `README.md` is regenerated in its content directory.
pub(crate) fn build(
    content_dir: &Path,
    schema_dir: &Path,
    out_dir: &Path,
    readmes: bool,
) -> anyhow::Result<BuildReport> {
    let content = validate_content(content_dir, schema_dir)?;

    let projected: Vec<ProjectedRecipe> = content
        .recipes
        .iter()
        .map(|(recipe, source)| hub_project::project(recipe, source, &content.tools))
        .collect();

    let emit = hub_project::emit(out_dir, &projected, &content.tools)
        .with_context(|| format!("writing artifacts to {}", out_dir.display()))?;

    let readmes_written = if readmes {
        write_readmes(&content.recipes)?
    } else {
        0
    };

    Ok(BuildReport {
        emit,
        diagnostics: content.diagnostics,
        readmes_written,
    })
}

/// Regenerate `README.md` next to each recipe.
///
/// `description.md` (not the README itself, which this overwrites) supplies
/// the long-form prose section.
pub(crate) fn write_readmes(recipes: &[(Recipe, RecipeSource)]) -> anyhow::Result<usize> {
    let mut written = 0;
    for (recipe, source) in recipes {
        let prose_path = source.dir.join("description.md");
        let prose = if prose_path.is_file() {
            Some(std::fs::read_to_string(&prose_path).with_context(|| {
                format!("reading {}", prose_path.display())
            })?)
        } else {
            None
        };

        let rendered = hub_project::render_readme(recipe, prose.as_deref());
        let target = source.dir.join("README.md");
        std::fs::write(&target, rendered)
            .with_context(|| format!("writing {}", target.display()))?;
        written += 1;
    }
    Ok(written)
}

/// Load the emitted catalogue back for searching.
pub(crate) fn load_catalogue(data_dir: &Path) -> anyhow::Result<Vec<ProjectedRecipe>> {
    let path = data_dir.join("recipes.json");
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading catalogue {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("decoding catalogue {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn schema_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../schemas")
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn seed_content(root: &Path) {
        write(
            &root.join("tools/claude/tool.yaml"),
            "name: Claude\ndescription: Anthropic assistant\nicon: icon.svg\n",
        );
        write(&root.join("tools/claude/icon.svg"), "<svg/>");
        write(
            &root.join("recipes/jane/market-scan/recipe.yaml"),
            r#"name: Market scan
description: Quick market overview
workflow:
  - id: gather
    name: Gather
    description: Collect sources
    tool:
      name: claude
"#,
        );
    }

    #[test]
    fn build_writes_artifacts_and_reports_clean() {
        let content = tempfile::tempdir().unwrap();
        seed_content(content.path());
        let out = tempfile::tempdir().unwrap();

        let report = build(content.path(), &schema_dir(), out.path(), false).unwrap();

        assert!(report.diagnostics.is_empty());
        assert_eq!(report.emit.recipe_count, 1);
        assert!(out.path().join("recipes.json").is_file());
        assert!(out.path().join("search-index.json").is_file());

        let catalogue = load_catalogue(out.path()).unwrap();
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue[0].path, "jane/market-scan");
    }

    #[test]
    fn invalid_recipe_is_excluded_but_reported() {
        let content = tempfile::tempdir().unwrap();
        seed_content(content.path());
        write(
            &content.path().join("recipes/jane/broken/recipe.yaml"),
            "name: Broken\ndescription: Missing workflow\n",
        );
        let out = tempfile::tempdir().unwrap();

        let report = build(content.path(), &schema_dir(), out.path(), false).unwrap();

        assert_eq!(report.emit.recipe_count, 1);
        assert!(!report.diagnostics.is_empty());
        assert!(report.diagnostics.iter().all(|d| d.code() == "E100"));
    }

    #[test]
    fn readme_regeneration_writes_next_to_the_recipe() {
        let content = tempfile::tempdir().unwrap();
        seed_content(content.path());
        write(
            &content
                .path()
                .join("recipes/jane/market-scan/description.md"),
            "Long-form prose about the scan.",
        );
        let out = tempfile::tempdir().unwrap();

        let report = build(content.path(), &schema_dir(), out.path(), true).unwrap();
        assert_eq!(report.readmes_written, 1);

        let readme = fs::read_to_string(
            content.path().join("recipes/jane/market-scan/README.md"),
        )
        .unwrap();
        assert!(readme.starts_with("# Market scan\n"));
        assert!(readme.contains("Long-form prose about the scan."));
        assert!(readme.contains("```mermaid"));
    }

    #[test]
    fn missing_schema_dir_aborts() {
        let content = tempfile::tempdir().unwrap();
        seed_content(content.path());
        let out = tempfile::tempdir().unwrap();

        let result = build(
            content.path(),
            Path::new("/nonexistent/schemas"),
            out.path(),
            false,
        );
        assert!(result.is_err());
    }
}
