//! Tool definitions and settings resolution
//!
//! A tool definition describes one AI tool the hub knows how to reference:
//! its identity (id, name, description, icon), the models a step may select,
//! and the settings those models accept. Definitions are authored once per
//! supported tool under `tools/<tool-id>/tool.yaml` and are read-only at
//! runtime.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Arbitrary key → value tool configuration
///
/// A `BTreeMap` rather than a hash map so that resolved settings serialize
/// in a stable key order and rebuilds reproduce byte-identical artifacts.
pub type Settings = BTreeMap<String, serde_json::Value>;

/// One supported AI tool, as declared in `tools/<tool-id>/tool.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool id; the `tools/` directory name, attached at load time.
    /// Any `id` present in the file itself is overridden.
    #[serde(default)]
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description shown alongside steps that use this tool
    pub description: String,
    /// Icon filename next to the definition (`icon.svg` or `icon.webp`)
    pub icon: String,
    /// Selectable model names, if the tool exposes a model choice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    /// Settings applied when neither the model nor the step overrides them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_settings: Option<Settings>,
    /// Per-model settings, keyed by model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<BTreeMap<String, Settings>>,
    /// Free-text list of intended purposes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_for: Option<Vec<String>>,
}

impl ToolDefinition {
    /// Resolve the effective settings for a step bound to this tool.
    ///
    /// Precedence, highest wins:
    /// 1. step-level overrides
    /// 2. per-model settings for the selected model
    /// 3. tool-level `default_settings`
    #[must_use]
    pub fn resolve_settings(
        &self,
        model: Option<&str>,
        step_overrides: Option<&Settings>,
    ) -> Settings {
        let mut resolved = self.default_settings.clone().unwrap_or_default();

        if let (Some(model), Some(per_model)) = (model, self.settings.as_ref()) {
            if let Some(model_settings) = per_model.get(model) {
                for (key, value) in model_settings {
                    resolved.insert(key.clone(), value.clone());
                }
            }
        }

        if let Some(overrides) = step_overrides {
            for (key, value) in overrides {
                resolved.insert(key.clone(), value.clone());
            }
        }

        resolved
    }

    /// Whether `model` is one of the declared selectable models.
    ///
    /// Tools without a `models` list accept any model string (membership is
    /// narrowed by the tool-specific schema instead).
    #[must_use]
    pub fn supports_model(&self, model: &str) -> bool {
        match &self.models {
            Some(models) => models.iter().any(|m| m == model),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(pairs: &[(&str, serde_json::Value)]) -> Settings {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    fn tool_with_settings() -> ToolDefinition {
        ToolDefinition {
            id: "claude".to_string(),
            name: "Claude".to_string(),
            description: "Anthropic assistant".to_string(),
            icon: "icon.svg".to_string(),
            models: Some(vec!["fast".to_string(), "smart".to_string()]),
            default_settings: Some(settings(&[("a", json!(1)), ("b", json!(2))])),
            settings: Some(BTreeMap::from([(
                "smart".to_string(),
                settings(&[("b", json!(3))]),
            )])),
            used_for: None,
        }
    }

    #[test]
    fn step_override_wins_over_model_and_default() {
        let tool = tool_with_settings();
        let step = settings(&[("b", json!(4))]);

        let resolved = tool.resolve_settings(Some("smart"), Some(&step));

        assert_eq!(resolved, settings(&[("a", json!(1)), ("b", json!(4))]));
    }

    #[test]
    fn model_settings_override_defaults() {
        let tool = tool_with_settings();

        let resolved = tool.resolve_settings(Some("smart"), None);

        assert_eq!(resolved, settings(&[("a", json!(1)), ("b", json!(3))]));
    }

    #[test]
    fn unknown_model_falls_back_to_defaults() {
        let tool = tool_with_settings();

        let resolved = tool.resolve_settings(Some("other"), None);

        assert_eq!(resolved, settings(&[("a", json!(1)), ("b", json!(2))]));
    }

    #[test]
    fn no_settings_anywhere_resolves_empty() {
        let tool = ToolDefinition {
            id: "plain".to_string(),
            name: "Plain".to_string(),
            description: String::new(),
            icon: "icon.svg".to_string(),
            models: None,
            default_settings: None,
            settings: None,
            used_for: None,
        };

        assert!(tool.resolve_settings(None, None).is_empty());
    }

    #[test]
    fn model_membership() {
        let tool = tool_with_settings();
        assert!(tool.supports_model("fast"));
        assert!(!tool.supports_model("giant"));

        let open = ToolDefinition {
            models: None,
            ..tool
        };
        assert!(open.supports_model("anything"));
    }

    #[test]
    fn yaml_roundtrip_keeps_settings_order() {
        let yaml = r#"
name: ChatGPT
description: OpenAI assistant
icon: icon.webp
models:
  - gpt-4o
default_settings:
  temperature: 0.7
  web_browsing: true
"#;
        let tool: ToolDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(tool.name, "ChatGPT");
        assert_eq!(
            tool.default_settings.as_ref().unwrap().get("temperature"),
            Some(&json!(0.7))
        );
        // id comes from the directory, not the file
        assert!(tool.id.is_empty());
    }
}
