//! Dataset loading: format detection (RON/JSON/TOML), file discovery,
//! deserialization, and resolution into validated engine types.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use masteries_core::id::{LayerId, StudyId};
use masteries_core::layer::{LayerError, LayerPrereq, LayerSequence, StudyLayer};
use masteries_core::study::Study;
use masteries_core::tree::{StudyNode, StudyTree, TreeError};

use crate::schema::{LayersData, TreeData};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: &'static str, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The tree references a study that does not exist, or prices one
    /// nonsensically.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// The layer sequence has an invalid gate or pricing.
    #[error(transparent)]
    Layer(#[from] LayerError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without
/// extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(DataError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(
    dir: &Path,
    base_name: &'static str,
) -> Result<PathBuf, DataError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataError::MissingRequired {
        file: base_name,
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn decode<T: DeserializeOwned>(content: &str, format: Format) -> Result<T, String> {
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| e.to_string()),
        Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Read a file and deserialize it according to its format (detected from
/// extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    decode(&content, format).map_err(|detail| DataError::Parse {
        file: path.to_path_buf(),
        detail,
    })
}

// ===========================================================================
// Resolution into engine types
// ===========================================================================

/// Resolve tree file data into a validated [`StudyTree`] plus the start id.
pub fn build_tree(data: &TreeData) -> Result<(StudyTree, StudyId), DataError> {
    let mut tree = StudyTree::new();
    for study in &data.studies {
        tree.insert(StudyNode {
            id: StudyId(study.id),
            study: Study {
                cost: study.cost,
                cost_multiplier: study.cost_multiplier,
            },
            prereq_options: study.prereq_options.iter().copied().map(StudyId).collect(),
            reachable: study.reachable.iter().copied().map(StudyId).collect(),
        })?;
    }
    tree.validate()?;

    let start = StudyId(data.start);
    tree.get(start)?;
    Ok((tree, start))
}

/// Resolve layers file data into a validated [`LayerSequence`].
pub fn build_layers(data: &LayersData) -> Result<LayerSequence, DataError> {
    let layers: Vec<StudyLayer> = data
        .layers
        .iter()
        .map(|layer| StudyLayer {
            id: LayerId(layer.id),
            study: Study {
                cost: layer.cost,
                cost_multiplier: layer.cost_multiplier,
            },
            size: layer.size,
            prereq: layer.prereq.as_ref().map(|p| LayerPrereq {
                depends_on: LayerId(p.depends_on),
                unlocked_per_unit: p.unlocked_per_unit,
            }),
        })
        .collect();
    Ok(LayerSequence::new(layers)?)
}

/// Load and resolve a tree data file.
pub fn load_tree(path: &Path) -> Result<(StudyTree, StudyId), DataError> {
    let data: TreeData = deserialize_file(path)?;
    build_tree(&data)
}

/// Load and resolve a layers data file.
pub fn load_layers(path: &Path) -> Result<LayerSequence, DataError> {
    let data: LayersData = deserialize_file(path)?;
    build_layers(&data)
}

// ===========================================================================
// Directory loading
// ===========================================================================

/// Base name of the tree data file.
pub const TREE_BASE_NAME: &str = "mastery_tree";

/// Base name of the layers data file.
pub const LAYERS_BASE_NAME: &str = "mastery_layers";

/// A complete loaded dataset: both forms of the mastery tree.
#[derive(Debug, Clone)]
pub struct MasteryData {
    pub tree: StudyTree,
    pub start: StudyId,
    pub layers: LayerSequence,
}

/// Discover and load both dataset files from a directory.
pub fn load_mastery_data(dir: &Path) -> Result<MasteryData, DataError> {
    let tree_path = require_data_file(dir, TREE_BASE_NAME)?;
    let layers_path = require_data_file(dir, LAYERS_BASE_NAME)?;

    let (tree, start) = load_tree(&tree_path)?;
    let layers = load_layers(&layers_path)?;

    Ok(MasteryData {
        tree,
        start,
        layers,
    })
}

// ===========================================================================
// Tests
// ===========================================================================
