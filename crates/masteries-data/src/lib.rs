//! Dataset sources for the masteries calculator.
//!
//! Two ways to get a dataset:
//!
//! - [`mastery::mastery_tree`] / [`mastery::mastery_layers`] -- the built-in
//!   mastery-study dataset, hand-transcribed from the game's tree.
//! - [`loader::load_mastery_data`] -- discover and load `mastery_tree.*` and
//!   `mastery_layers.*` (RON, JSON, or TOML) from a directory, with full
//!   cross-reference validation after parse.

pub mod loader;
pub mod mastery;
pub mod schema;

pub use loader::{DataError, MasteryData, load_mastery_data};
pub use mastery::{mastery_layers, mastery_tree};
