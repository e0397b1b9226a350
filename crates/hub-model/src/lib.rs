//! Recipe Hub data model
//!
//! Typed documents for the two content families the hub understands:
//!
//! - **Tool definitions** (`tools/<tool-id>/tool.yaml`): identity, selectable
//!   models, and configurable settings for one AI tool.
//! - **Recipes** (`recipes/<author>/<slug>/recipe.yaml`): multi-step prompt
//!   workflows that chain tools together.
//!
//! Plus the projected output types the build emits: denormalized
//! [`ProjectedRecipe`] catalogue records and lightweight [`SearchEntry`]
//! search-index records.
//!
//! Identity (`path`, `author`, tool `id`) is derived from directory location
//! at load time and never stored in the source files themselves.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod authoring;
pub mod projected;
pub mod recipe;
pub mod slug;
pub mod tool;

pub use authoring::{submission_template, to_submission_yaml, AuthoringError};
pub use projected::{ProjectedRecipe, ProjectedStep, ResolvedTool, SearchEntry};
pub use recipe::{Example, Parameter, Recipe, Step, StepTool};
pub use tool::{Settings, ToolDefinition};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
