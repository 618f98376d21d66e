//! The graph form of a mastery tree: studies with prerequisite options and
//! reachable successors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::id::StudyId;
use crate::study::Study;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while building or querying a study tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("study not found: {0:?}")]
    StudyNotFound(StudyId),

    #[error("duplicate study id: {0:?}")]
    DuplicateId(StudyId),

    #[error("prerequisite {prereq:?} for study {study:?} does not exist")]
    InvalidPrerequisite { study: StudyId, prereq: StudyId },

    #[error("reachable target {target:?} for study {study:?} does not exist")]
    InvalidReachable { study: StudyId, target: StudyId },

    #[error("invalid cost {cost} for study {study:?}")]
    InvalidCost { study: StudyId, cost: f64 },

    #[error("invalid cost multiplier {multiplier} for study {study:?}")]
    InvalidMultiplier { study: StudyId, multiplier: f64 },
}

// ---------------------------------------------------------------------------
// Core data structures
// ---------------------------------------------------------------------------

/// One study in the graph form: its pricing, the alternative prerequisites
/// that unlock it, and the studies it can lead to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyNode {
    /// Unique identifier.
    pub id: StudyId,

    /// Pricing of this study.
    pub study: Study,

    /// Alternative prerequisites; owning any one of them unlocks this study.
    /// Empty means no prerequisite at all.
    pub prereq_options: Vec<StudyId>,

    /// Studies this one can lead to, in traversal order.
    pub reachable: Vec<StudyId>,
}

/// The mastery tree: an id-to-node map, immutable during traversal.
///
/// Built in two phases because hand-authored datasets reference studies
/// before they are inserted: [`StudyTree::insert`] performs local checks
/// only, and [`StudyTree::validate`] checks every cross-reference once all
/// nodes are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudyTree {
    nodes: HashMap<StudyId, StudyNode>,
}

impl StudyTree {
    /// Create a new, empty tree.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Insert a study node. Rejects duplicate ids and unusable pricing;
    /// cross-references are checked later by [`StudyTree::validate`].
    pub fn insert(&mut self, node: StudyNode) -> Result<StudyId, TreeError> {
        let id = node.id;

        if self.nodes.contains_key(&id) {
            return Err(TreeError::DuplicateId(id));
        }
        if !node.study.has_valid_cost() {
            return Err(TreeError::InvalidCost {
                study: id,
                cost: node.study.cost,
            });
        }
        if !node.study.has_valid_multiplier() {
            return Err(TreeError::InvalidMultiplier {
                study: id,
                multiplier: node.study.cost_multiplier,
            });
        }

        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Check that every prerequisite option and reachable target refers to an
    /// existing study. Call once after the last insert.
    pub fn validate(&self) -> Result<(), TreeError> {
        for node in self.nodes.values() {
            for &prereq in &node.prereq_options {
                if !self.nodes.contains_key(&prereq) {
                    return Err(TreeError::InvalidPrerequisite {
                        study: node.id,
                        prereq,
                    });
                }
            }
            for &target in &node.reachable {
                if !self.nodes.contains_key(&target) {
                    return Err(TreeError::InvalidReachable {
                        study: node.id,
                        target,
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up a study node. A missing id is a dataset fault, reported
    /// descriptively rather than tolerated.
    pub fn get(&self, id: StudyId) -> Result<&StudyNode, TreeError> {
        self.nodes.get(&id).ok_or(TreeError::StudyNotFound(id))
    }

    /// Whether a study with this id exists.
    pub fn contains(&self, id: StudyId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of studies in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no studies.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes (unordered).
    pub fn nodes(&self) -> impl Iterator<Item = &StudyNode> {
        self.nodes.values()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u32, cost: f64, mult: f64, prereqs: &[u32], reachable: &[u32]) -> StudyNode {
        StudyNode {
            id: StudyId(id),
            study: Study {
                cost,
                cost_multiplier: mult,
            },
            prereq_options: prereqs.iter().copied().map(StudyId).collect(),
            reachable: reachable.iter().copied().map(StudyId).collect(),
        }
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut tree = StudyTree::new();
        tree.insert(node(1, 10.0, 1.0, &[], &[])).unwrap();

        let result = tree.insert(node(1, 20.0, 1.0, &[], &[]));
        assert!(matches!(result, Err(TreeError::DuplicateId(StudyId(1)))));
    }

    #[test]
    fn invalid_pricing_rejected() {
        let mut tree = StudyTree::new();

        let result = tree.insert(node(1, -5.0, 1.0, &[], &[]));
        assert!(matches!(result, Err(TreeError::InvalidCost { .. })));

        let result = tree.insert(node(2, 5.0, 0.0, &[], &[]));
        assert!(matches!(result, Err(TreeError::InvalidMultiplier { .. })));
    }

    #[test]
    fn forward_references_allowed_until_validate() {
        let mut tree = StudyTree::new();
        // 1 reaches 2 before 2 exists; insert succeeds, validate decides.
        tree.insert(node(1, 10.0, 1.0, &[], &[2])).unwrap();
        assert!(matches!(
            tree.validate(),
            Err(TreeError::InvalidReachable {
                study: StudyId(1),
                target: StudyId(2),
            })
        ));

        tree.insert(node(2, 10.0, 1.0, &[1], &[])).unwrap();
        tree.validate().unwrap();
    }

    #[test]
    fn dangling_prerequisite_caught() {
        let mut tree = StudyTree::new();
        tree.insert(node(1, 10.0, 1.0, &[99], &[])).unwrap();
        assert!(matches!(
            tree.validate(),
            Err(TreeError::InvalidPrerequisite {
                study: StudyId(1),
                prereq: StudyId(99),
            })
        ));
    }

    #[test]
    fn lookup_fails_fast() {
        let tree = StudyTree::new();
        assert!(matches!(
            tree.get(StudyId(7)),
            Err(TreeError::StudyNotFound(StudyId(7)))
        ));
    }
}
