//! Recipe Hub projection
//!
//! Turns validated recipes and tools into the build outputs the browsing
//! UI consumes:
//!
//! - [`project::project`]: denormalize one recipe (settings resolution,
//!   icon resolution, companion-doc merge, prompt normalization)
//! - [`diagram::workflow_diagram`]: Mermaid path diagram of step order
//! - [`readme::render_readme`]: generated per-recipe `README.md`
//! - [`emit::emit`]: write `recipes.json` + `search-index.json` and copy
//!   icons into the serving tree

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod diagram;
pub mod emit;
pub mod project;
pub mod readme;

pub use diagram::workflow_diagram;
pub use emit::{emit, EmitError, EmitReport};
pub use project::{project, resolve_icon, ResolvedIcon, DEFAULT_ICON_PATH};
pub use readme::render_readme;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
