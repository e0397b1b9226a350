//! Build artifact emission
//!
//! Writes the two public build outputs, the catalogue (`recipes.json`)
//! and the search index (`search-index.json`), and copies each tool's
//! resolved icon into the serving tree. Both files are written even when
//! the catalogue is empty, so the browsing UI can distinguish "no content
//! yet" from a failed fetch.
//!
//! Emission is idempotent: inputs arrive in sorted order, settings are
//! `BTreeMap`s, and the serializer is stable, so a rerun over unchanged
//! content reproduces byte-identical artifacts.

use crate::project::resolve_icon;
use hub_content::validate::ToolSet;
use hub_model::{ProjectedRecipe, SearchEntry};
use std::path::{Path, PathBuf};
use tracing::info;

/// Shared fallback icon, written into the serving tree on every build
const DEFAULT_ICON: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="#6b7280" stroke-width="2"><rect x="3" y="3" width="18" height="18" rx="4"/><path d="M8 12h8M12 8v8"/></svg>
"##;

/// Errors writing build artifacts
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// A file or directory could not be written
    #[error("io error writing {}: {source}", path.display())]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Serialization failed
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl EmitError {
    fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// What one emission produced
#[derive(Debug)]
pub struct EmitReport {
    /// Path of the written catalogue
    pub catalogue: PathBuf,
    /// Path of the written search index
    pub index: PathBuf,
    /// Number of catalogue records
    pub recipe_count: usize,
    /// Number of tool icons copied
    pub icons_copied: usize,
}

/// Write catalogue, search index, and icons under `out_dir`.
pub fn emit(
    out_dir: &Path,
    recipes: &[ProjectedRecipe],
    tools: &ToolSet,
) -> Result<EmitReport, EmitError> {
    std::fs::create_dir_all(out_dir).map_err(|e| EmitError::io(out_dir, e))?;

    let catalogue = out_dir.join("recipes.json");
    write_json(&catalogue, recipes)?;

    let entries: Vec<SearchEntry> = recipes.iter().map(SearchEntry::from).collect();
    let index = out_dir.join("search-index.json");
    write_json(&index, &entries)?;

    let icons_copied = copy_icons(out_dir, tools)?;

    info!(
        recipes = recipes.len(),
        icons = icons_copied,
        out = %out_dir.display(),
        "artifacts written"
    );

    Ok(EmitReport {
        catalogue,
        index,
        recipe_count: recipes.len(),
        icons_copied,
    })
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), EmitError> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    std::fs::write(path, text).map_err(|e| EmitError::io(path, e))
}

fn copy_icons(out_dir: &Path, tools: &ToolSet) -> Result<usize, EmitError> {
    let tools_dir = out_dir.join("tools");
    std::fs::create_dir_all(&tools_dir).map_err(|e| EmitError::io(&tools_dir, e))?;

    // The shared fallback is always present, so the default serving path
    // resolves whether or not any tool needs it
    let default_icon = tools_dir.join("default-icon.svg");
    std::fs::write(&default_icon, DEFAULT_ICON).map_err(|e| EmitError::io(&default_icon, e))?;

    let mut copied = 0;
    for tool in tools.iter() {
        let resolved = resolve_icon(&tool.dir);
        if let Some(source) = resolved.source_file() {
            let target_dir = tools_dir.join(&tool.definition.id);
            std::fs::create_dir_all(&target_dir).map_err(|e| EmitError::io(&target_dir, e))?;

            let file_name = source.file_name().unwrap_or_default();
            let target = target_dir.join(file_name);
            std::fs::copy(source, &target).map_err(|e| EmitError::io(&target, e))?;
            copied += 1;
        }
    }

    Ok(copied)
}
