//! Schema store
//!
//! Holds the compiled JSON Schema contracts content is checked against:
//! the recipe schema, the generic tool-identity schema, and one optional
//! specific schema per tool id (logically `allOf: [base, specific]`,
//! checked base-first, then specific).
//!
//! The store is an external, versioned contract loaded from a directory:
//!
//! ```text
//! schemas/
//!   recipe-schema.json
//!   tool-schema.json
//!   tools/<tool-id>.json   (optional, per tool)
//! ```
//!
//! Unlike content errors, a missing or corrupt store is fatal: nothing can
//! be validated against a contract that failed to load.

use jsonschema::{Draft, JSONSchema};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fatal errors loading the schema store
#[derive(Debug, thiserror::Error)]
pub enum SchemaStoreError {
    /// A required schema document is absent
    #[error("schema document not found: {}", path.display())]
    MissingDocument {
        /// Expected document path
        path: PathBuf,
    },

    /// A schema document could not be read
    #[error("io error reading {}: {source}", path.display())]
    Io {
        /// Document path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A schema document is not valid JSON
    #[error("malformed schema document {}: {message}", path.display())]
    Malformed {
        /// Document path
        path: PathBuf,
        /// Parse error text
        message: String,
    },

    /// A schema document parsed but did not compile as JSON Schema
    #[error("schema document {} failed to compile: {message}", path.display())]
    Compile {
        /// Document path
        path: PathBuf,
        /// Compilation error text
        message: String,
    },
}

/// Compiled schema documents for recipes and tools
pub struct SchemaStore {
    recipe: JSONSchema,
    tool_base: JSONSchema,
    tool_specific: BTreeMap<String, JSONSchema>,
}

impl SchemaStore {
    /// Load and compile every schema document under `dir`.
    ///
    /// `recipe-schema.json` and `tool-schema.json` are required; per-tool
    /// schemas are whatever `tools/*.json` files exist.
    pub fn load(dir: &Path) -> Result<Self, SchemaStoreError> {
        let recipe = compile_document(&dir.join("recipe-schema.json"))?;
        let tool_base = compile_document(&dir.join("tool-schema.json"))?;

        let mut tool_specific = BTreeMap::new();
        let tools_dir = dir.join("tools");
        if tools_dir.is_dir() {
            let entries = std::fs::read_dir(&tools_dir).map_err(|source| SchemaStoreError::Io {
                path: tools_dir.clone(),
                source,
            })?;
            let mut paths: Vec<PathBuf> = entries
                .filter_map(Result::ok)
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                .collect();
            paths.sort();

            for path in paths {
                let tool_id = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default()
                    .to_string();
                debug!(tool = %tool_id, "compiling tool-specific schema");
                tool_specific.insert(tool_id, compile_document(&path)?);
            }
        }

        Ok(Self {
            recipe,
            tool_base,
            tool_specific,
        })
    }

    /// Check a raw recipe document; returns one message per violation.
    #[must_use]
    pub fn check_recipe(&self, document: &serde_json::Value) -> Vec<String> {
        collect_violations(&self.recipe, document)
    }

    /// Check a raw tool document against the identity schema and, when one
    /// exists for `tool_id`, the tool-specific schema.
    #[must_use]
    pub fn check_tool(&self, tool_id: &str, document: &serde_json::Value) -> Vec<String> {
        let mut violations = collect_violations(&self.tool_base, document);
        // Specific constraints only narrow a shape that already passed the base
        if violations.is_empty() {
            if let Some(specific) = self.tool_specific.get(tool_id) {
                violations.extend(collect_violations(specific, document));
            }
        }
        violations
    }

    /// Tool ids that ship a specific schema
    #[must_use]
    pub fn specific_tool_ids(&self) -> Vec<&str> {
        self.tool_specific.keys().map(String::as_str).collect()
    }
}

fn compile_document(path: &Path) -> Result<JSONSchema, SchemaStoreError> {
    if !path.is_file() {
        return Err(SchemaStoreError::MissingDocument {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|source| SchemaStoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| SchemaStoreError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&value)
        .map_err(|e| SchemaStoreError::Compile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn collect_violations(schema: &JSONSchema, document: &serde_json::Value) -> Vec<String> {
    match schema.validate(document) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|e| {
                let pointer = e.instance_path.to_string();
                if pointer.is_empty() {
                    e.to_string()
                } else {
                    format!("{e} (at {pointer})")
                }
            })
            .collect(),
    }
}
