//! Serde data file structs for mastery datasets.
//!
//! These structs define the on-disk format for the graph and layer forms.
//! They are deserialized from RON, JSON, or TOML data files and then
//! resolved into engine types by the loader, which also runs the engine's
//! cross-reference validation.

use serde::Deserialize;

// ===========================================================================
// Graph form
// ===========================================================================

/// A study tree data file: the start study plus every node.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeData {
    /// Id of the study the walk starts from.
    pub start: u32,
    pub studies: Vec<StudyNodeData>,
}

/// One study node in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct StudyNodeData {
    pub id: u32,
    pub cost: f64,
    pub cost_multiplier: f64,
    /// Alternative prerequisites; empty (the default) means none.
    #[serde(default)]
    pub prereq_options: Vec<u32>,
    /// Successor studies in traversal order.
    #[serde(default)]
    pub reachable: Vec<u32>,
}

// ===========================================================================
// Layer form
// ===========================================================================

/// A layer sequence data file. Order in the file is processing order.
#[derive(Debug, Clone, Deserialize)]
pub struct LayersData {
    pub layers: Vec<StudyLayerData>,
}

/// One layer in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct StudyLayerData {
    pub id: u32,
    pub cost: f64,
    pub cost_multiplier: f64,
    pub size: u32,
    #[serde(default)]
    pub prereq: Option<LayerPrereqData>,
}

/// A layer gate in a data file: an explicit reference to an earlier layer,
/// never a positional offset.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerPrereqData {
    pub depends_on: u32,
    pub unlocked_per_unit: u32,
}
