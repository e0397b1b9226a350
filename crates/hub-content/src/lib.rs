//! Recipe Hub ingest boundary
//!
//! The trusted boundary between the content trees on disk and the typed
//! model the rest of the pipeline consumes.
//!
//! # Pipeline position
//!
//! ```text
//! schemas/ ──► SchemaStore ─┐
//! tools/   ──► loader ──────┼─► validate ──► ToolSet / Recipe ──► projection
//! recipes/ ──► loader ──────┘         │
//!                                     └──► Vec<Diagnostic>
//! ```
//!
//! Loading is strictly two-phase: the schema store is loaded to completion
//! before any content is read, and only fully validated, immutable values
//! are handed onward; no partially initialized configuration is ever
//! observable. Per-item failures fold into diagnostics; only a missing
//! content root or a corrupt schema store aborts the run.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod diagnostics;
pub mod loader;
pub mod schema;
pub mod validate;

pub use diagnostics::{Diagnostic, IssueKind};
pub use loader::{LoadError, LoadOutcome, RecipeSource, ToolSource};
pub use schema::{SchemaStore, SchemaStoreError};
pub use validate::{validate_recipe, validate_tool, ToolSet, ValidatedTool};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
