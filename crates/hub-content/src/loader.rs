//! Content loader
//!
//! Enumerates the two content trees and decodes their YAML into raw
//! documents plus source metadata:
//!
//! ```text
//! tools/<tool-id>/tool.yaml          (+ icon.svg | icon.webp)
//! recipes/<author>/<slug>/recipe.yaml (+ optional README.md / description.md)
//! ```
//!
//! Enumeration is sorted by directory name (author, then slug) so a rerun
//! over unchanged content reproduces byte-identical artifacts.
//!
//! Loading is a fold: per-item failures become diagnostics and the batch
//! continues; only an absent root directory is a hard failure. Raw
//! documents are handed to the validator untyped; typed decoding happens
//! only after the schema check has vouched for the shape.

use crate::diagnostics::{Diagnostic, IssueKind};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Fatal loader errors
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The content root itself is absent
    #[error("content root not found: {}", path.display())]
    MissingRoot {
        /// Expected root directory
        path: PathBuf,
    },

    /// The content root exists but cannot be enumerated
    #[error("io error reading {}: {source}", path.display())]
    Io {
        /// Root directory
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// A tool definition as found on disk, not yet validated
#[derive(Debug, Clone)]
pub struct ToolSource {
    /// Tool id (the directory name)
    pub id: String,
    /// Tool directory
    pub dir: PathBuf,
    /// The `tool.yaml` path, for diagnostics
    pub file: PathBuf,
    /// Raw decoded document
    pub raw: serde_json::Value,
}

/// A recipe as found on disk, not yet validated
#[derive(Debug, Clone)]
pub struct RecipeSource {
    /// Author (the `recipes/` subdirectory name)
    pub author: String,
    /// Recipe slug (the recipe directory name)
    pub slug: String,
    /// Recipe directory
    pub dir: PathBuf,
    /// The `recipe.yaml` path, for diagnostics
    pub file: PathBuf,
    /// Raw decoded document
    pub raw: serde_json::Value,
    /// Companion long-form doc (`README.md` or `description.md`), if present
    pub companion: Option<String>,
}

impl RecipeSource {
    /// Catalogue path: `<author>/<slug>`
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}/{}", self.author, self.slug)
    }
}

/// Result of loading one content tree: the items that decoded, plus the
/// diagnostics for those that did not
#[derive(Debug)]
pub struct LoadOutcome<T> {
    /// Successfully decoded items, in sorted directory order
    pub items: Vec<T>,
    /// Per-item failures
    pub diagnostics: Vec<Diagnostic>,
}

/// Load every tool definition under `tools_root`.
pub fn load_tools(tools_root: &Path) -> Result<LoadOutcome<ToolSource>, LoadError> {
    let mut items = Vec::new();
    let mut diagnostics = Vec::new();

    for dir in sorted_subdirectories(tools_root)? {
        let id = directory_name(&dir);
        let file = dir.join("tool.yaml");

        if !file.is_file() {
            diagnostics.push(Diagnostic::new(
                &dir,
                IssueKind::MissingAsset { asset: file },
            ));
            continue;
        }

        match read_yaml_document(&file) {
            Ok(raw) => {
                debug!(tool = %id, "loaded tool definition");
                items.push(ToolSource { id, dir, file, raw });
            }
            Err(kind) => {
                warn!(tool = %id, "skipping tool: failed to load");
                diagnostics.push(Diagnostic::new(&file, kind));
            }
        }
    }

    Ok(LoadOutcome { items, diagnostics })
}

/// Load every recipe under `recipes_root`.
pub fn load_recipes(recipes_root: &Path) -> Result<LoadOutcome<RecipeSource>, LoadError> {
    let mut items = Vec::new();
    let mut diagnostics = Vec::new();

    for author_dir in sorted_subdirectories(recipes_root)? {
        let author = directory_name(&author_dir);

        let recipe_dirs = match sorted_subdirectories(&author_dir) {
            Ok(dirs) => dirs,
            Err(LoadError::MissingRoot { .. }) => continue,
            Err(LoadError::Io { path, source }) => {
                diagnostics.push(Diagnostic::new(
                    path,
                    IssueKind::Io {
                        detail: source.to_string(),
                    },
                ));
                continue;
            }
        };

        for dir in recipe_dirs {
            let slug = directory_name(&dir);
            let file = dir.join("recipe.yaml");

            if !file.is_file() {
                diagnostics.push(Diagnostic::new(
                    &dir,
                    IssueKind::MissingAsset { asset: file },
                ));
                continue;
            }

            let raw = match read_yaml_document(&file) {
                Ok(raw) => raw,
                Err(kind) => {
                    warn!(recipe = %format!("{author}/{slug}"), "skipping recipe: failed to load");
                    diagnostics.push(Diagnostic::new(&file, kind));
                    continue;
                }
            };

            let companion = match read_companion(&dir) {
                Ok(companion) => companion,
                Err(kind) => {
                    // The recipe itself is fine; the companion just can't be read
                    diagnostics.push(Diagnostic::new(&dir, kind));
                    None
                }
            };

            debug!(recipe = %format!("{author}/{slug}"), "loaded recipe");
            items.push(RecipeSource {
                author: author.clone(),
                slug,
                dir,
                file,
                raw,
                companion,
            });
        }
    }

    Ok(LoadOutcome { items, diagnostics })
}

/// Read the optional long-form companion document for a recipe directory.
///
/// `README.md` wins over `description.md`; absence of both is a normal
/// skip, not an error.
fn read_companion(dir: &Path) -> Result<Option<String>, IssueKind> {
    for candidate in ["README.md", "description.md"] {
        let path = dir.join(candidate);
        if path.is_file() {
            return std::fs::read_to_string(&path)
                .map(Some)
                .map_err(|e| IssueKind::Io {
                    detail: format!("{}: {e}", path.display()),
                });
        }
    }
    Ok(None)
}

fn read_yaml_document(path: &Path) -> Result<serde_json::Value, IssueKind> {
    let text = std::fs::read_to_string(path).map_err(|e| IssueKind::Io {
        detail: e.to_string(),
    })?;

    serde_yaml::from_str(&text).map_err(|e| IssueKind::SchemaViolation {
        detail: format!("yaml syntax error: {e}"),
    })
}

fn sorted_subdirectories(root: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::MissingRoot {
            path: root.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(root).map_err(|source| LoadError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn directory_name(dir: &Path) -> String {
    dir.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}
