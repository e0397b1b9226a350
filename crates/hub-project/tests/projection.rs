//! Projection and emission against real directory trees.

use hub_content::loader::RecipeSource;
use hub_content::validate::{ToolSet, ValidatedTool};
use hub_model::{Recipe, Settings, ToolDefinition};
use hub_project::{emit, project};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

fn claude_definition() -> ToolDefinition {
    ToolDefinition {
        id: "claude".to_string(),
        name: "Claude".to_string(),
        description: "Anthropic assistant".to_string(),
        icon: "icon.svg".to_string(),
        models: Some(vec!["claude-sonnet".to_string()]),
        default_settings: Some(BTreeMap::from([
            ("a".to_string(), json!(1)),
            ("b".to_string(), json!(2)),
        ])),
        settings: Some(BTreeMap::from([(
            "claude-sonnet".to_string(),
            BTreeMap::from([("b".to_string(), json!(3))]),
        )])),
        used_for: None,
    }
}

fn tool_set_with_claude(dir: &Path) -> ToolSet {
    let mut tools = ToolSet::new();
    tools.insert(ValidatedTool {
        definition: claude_definition(),
        dir: dir.to_path_buf(),
    });
    tools
}

fn recipe_source(author: &str, slug: &str, companion: Option<&str>) -> RecipeSource {
    RecipeSource {
        author: author.to_string(),
        slug: slug.to_string(),
        dir: format!("recipes/{author}/{slug}").into(),
        file: format!("recipes/{author}/{slug}/recipe.yaml").into(),
        raw: serde_json::Value::Null,
        companion: companion.map(String::from),
    }
}

fn sample_recipe() -> Recipe {
    serde_yaml::from_str(
        r#"
name: Market scan
description: Quick market overview
tags:
  - research
parameters:
  - name: company_name
    description: Company to research
    example: Acme Corp
workflow:
  - id: gather
    name: Gather
    description: Collect sources
    tool:
      name: claude
      model: claude-sonnet
      settings:
        b: 4
    prompt: "News about {{company_name}}"
  - id: blank_prompt
    name: Review
    description: Manual review
    tool:
      name: claude
    prompt: "   "
"#,
    )
    .unwrap()
}

#[test]
fn settings_resolve_with_step_over_model_over_default() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("icon.svg"), "<svg/>").unwrap();
    let tools = tool_set_with_claude(tmp.path());

    let projected = project(
        &sample_recipe(),
        &recipe_source("jane", "market-scan", None),
        &tools,
    );

    let expected: Settings = BTreeMap::from([
        ("a".to_string(), json!(1)),
        ("b".to_string(), json!(4)),
    ]);
    assert_eq!(projected.workflow[0].tool.settings, expected);

    // Second step selects no model: defaults only
    let defaults: Settings = BTreeMap::from([
        ("a".to_string(), json!(1)),
        ("b".to_string(), json!(2)),
    ]);
    assert_eq!(projected.workflow[1].tool.settings, defaults);
}

#[test]
fn projection_attaches_identity_tool_description_and_icon() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("icon.svg"), "<svg/>").unwrap();
    let tools = tool_set_with_claude(tmp.path());

    let projected = project(
        &sample_recipe(),
        &recipe_source("jane", "market-scan", None),
        &tools,
    );

    assert_eq!(projected.path, "jane/market-scan");
    assert_eq!(projected.author, "jane");
    let tool = &projected.workflow[0].tool;
    assert_eq!(tool.description, "Anthropic assistant");
    assert_eq!(tool.icon, "tools/claude/icon.svg");
}

#[test]
fn whitespace_prompt_becomes_absent() {
    let tmp = tempfile::tempdir().unwrap();
    let tools = tool_set_with_claude(tmp.path());

    let projected = project(
        &sample_recipe(),
        &recipe_source("jane", "market-scan", None),
        &tools,
    );

    assert_eq!(
        projected.workflow[0].prompt.as_deref(),
        Some("News about {{company_name}}")
    );
    assert_eq!(projected.workflow[1].prompt, None);
}

#[test]
fn readme_falls_back_to_description_and_companion_wins() {
    let tmp = tempfile::tempdir().unwrap();
    let tools = tool_set_with_claude(tmp.path());

    let without = project(
        &sample_recipe(),
        &recipe_source("jane", "market-scan", None),
        &tools,
    );
    assert_eq!(without.readme, "Quick market overview");

    let with = project(
        &sample_recipe(),
        &recipe_source("jane", "market-scan", Some("Long-form prose.")),
        &tools,
    );
    assert_eq!(with.readme, "Long-form prose.");
}

#[test]
fn emission_is_byte_identical_across_reruns() {
    let icons = tempfile::tempdir().unwrap();
    fs::write(icons.path().join("icon.svg"), "<svg/>").unwrap();
    let tools = tool_set_with_claude(icons.path());

    let projected = vec![project(
        &sample_recipe(),
        &recipe_source("jane", "market-scan", None),
        &tools,
    )];

    let out = tempfile::tempdir().unwrap();
    let first = emit(out.path(), &projected, &tools).unwrap();
    let catalogue_first = fs::read(&first.catalogue).unwrap();
    let index_first = fs::read(&first.index).unwrap();

    let second = emit(out.path(), &projected, &tools).unwrap();
    assert_eq!(catalogue_first, fs::read(&second.catalogue).unwrap());
    assert_eq!(index_first, fs::read(&second.index).unwrap());
}

#[test]
fn emission_copies_resolved_icons_and_search_index_shape() {
    let icons = tempfile::tempdir().unwrap();
    fs::write(icons.path().join("icon.svg"), "<svg/>").unwrap();
    let tools = tool_set_with_claude(icons.path());

    let projected = vec![project(
        &sample_recipe(),
        &recipe_source("jane", "market-scan", None),
        &tools,
    )];

    let out = tempfile::tempdir().unwrap();
    let report = emit(out.path(), &projected, &tools).unwrap();

    assert_eq!(report.icons_copied, 1);
    assert!(out.path().join("tools/claude/icon.svg").is_file());
    assert!(out.path().join("tools/default-icon.svg").is_file());

    let index: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(report.index).unwrap()).unwrap();
    assert_eq!(index[0]["id"], "jane/market-scan");
    assert_eq!(index[0]["title"], "Market scan");
    assert_eq!(index[0]["tags"], json!(["research"]));
    assert_eq!(index[0]["author"], "jane");
}
