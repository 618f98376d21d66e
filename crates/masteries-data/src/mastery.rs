//! The built-in mastery-study dataset, in both forms.
//!
//! Hand-transcribed from the game's mastery tree: studies 241 through 302,
//! layer by layer. The 300s/310s/320s rows past study 302 are not yet
//! purchasable in-game and are left out, which is why 291, 292, and 302 have
//! empty reachable lists.

use masteries_core::id::{LayerId, StudyId};
use masteries_core::layer::{LayerError, LayerPrereq, LayerSequence, StudyLayer};
use masteries_core::study::Study;
use masteries_core::tree::{StudyNode, StudyTree, TreeError};

/// The start study for [`mastery_tree`] walks.
pub const START_STUDY: StudyId = StudyId(241);

const LAYER_250S: [u32; 3] = [251, 252, 253];
const LAYER_260S: [u32; 6] = [261, 262, 263, 264, 265, 266];
const LAYER_270S: [u32; 3] = [271, 272, 273];
const LAYER_280S: [u32; 2] = [281, 282];
const LAYER_290S: [u32; 2] = [291, 292];

fn ids(groups: &[&[u32]]) -> Vec<StudyId> {
    groups
        .iter()
        .flat_map(|group| group.iter().copied().map(StudyId))
        .collect()
}

fn node(id: u32, cost: f64, mult: f64, prereqs: &[u32], reachable: Vec<StudyId>) -> StudyNode {
    StudyNode {
        id: StudyId(id),
        study: Study {
            cost,
            cost_multiplier: mult,
        },
        prereq_options: prereqs.iter().copied().map(StudyId).collect(),
        reachable,
    }
}

/// The graph form of the mastery dataset: the validated tree plus the start
/// study (241).
pub fn mastery_tree() -> Result<(StudyTree, StudyId), TreeError> {
    let l250_260 = || ids(&[&LAYER_250S, &LAYER_260S]);
    let l260_270 = || ids(&[&LAYER_260S, &LAYER_270S]);
    let l270_280 = || ids(&[&LAYER_270S, &LAYER_280S]);
    let l280_290_302 = || ids(&[&LAYER_280S, &LAYER_290S, &[302]]);

    let mut tree = StudyTree::new();

    tree.insert(node(241, 1e71, 1.0, &[], ids(&[&LAYER_250S])))?;

    tree.insert(node(251, 2e71, 2.5, &[241], l250_260()))?;
    tree.insert(node(252, 2e71, 2.5, &[241], ids(&[&LAYER_250S, &LAYER_260S, &LAYER_270S])))?;
    tree.insert(node(253, 2e71, 2.5, &[241], l250_260()))?;

    tree.insert(node(261, 5e71, 6.0, &[251], l260_270()))?;
    tree.insert(node(262, 5e71, 6.0, &[251], l260_270()))?;
    tree.insert(node(263, 5e71, 6.0, &[252], l260_270()))?;
    tree.insert(node(264, 5e71, 6.0, &[252], l260_270()))?;
    tree.insert(node(265, 5e71, 6.0, &[253], l260_270()))?;
    tree.insert(node(266, 5e71, 6.0, &[253], l260_270()))?;

    tree.insert(node(271, 2.74e76, 2.0, &[252], l270_280()))?;
    tree.insert(node(
        272,
        2.74e76,
        2.0,
        &[252],
        ids(&[&LAYER_270S, &LAYER_280S, &LAYER_290S, &[302]]),
    ))?;
    tree.insert(node(273, 2.74e76, 2.0, &[252], l270_280()))?;

    tree.insert(node(281, 6.86e76, 4.0, &[271, 272], l280_290_302()))?;
    tree.insert(node(282, 6.86e76, 4.0, &[272, 273], l280_290_302()))?;

    // 291/292/302 lead nowhere until the 300s rows unlock.
    tree.insert(node(291, 2.14e77, 1.0, &[272], Vec::new()))?;
    tree.insert(node(292, 2.14e77, 1.0, &[272], Vec::new()))?;
    tree.insert(node(302, 8.57e77, 2.0, &[272], Vec::new()))?;

    tree.validate()?;
    Ok((tree, START_STUDY))
}

fn layer(id: u32, cost: f64, mult: f64, size: u32, prereq: Option<(u32, u32)>) -> StudyLayer {
    StudyLayer {
        id: LayerId(id),
        study: Study {
            cost,
            cost_multiplier: mult,
        },
        size,
        prereq: prereq.map(|(depends_on, per_unit)| LayerPrereq {
            depends_on: LayerId(depends_on),
            unlocked_per_unit: per_unit,
        }),
    }
}

/// The layer form of the mastery dataset: one layer per homogeneous study
/// row, each gated on the row that unlocks it. Study 302 sits alone in its
/// layer and is gated on the 270s row, the only row it can be unlocked from.
pub fn mastery_layers() -> Result<LayerSequence, LayerError> {
    LayerSequence::new(vec![
        layer(241, 1e71, 1.0, 1, None),
        // One unit of 241 opens the whole 250s row.
        layer(250, 2e71, 2.5, 3, Some((241, 3))),
        // Each 250 study unlocks its own pair of 260s.
        layer(260, 5e71, 6.0, 6, Some((250, 2))),
        // The 270s row needs only 252, so any 250 purchase opens all three.
        layer(270, 2.74e76, 2.0, 3, Some((250, 3))),
        layer(280, 6.86e76, 4.0, 2, Some((270, 1))),
        layer(290, 2.14e77, 1.0, 2, Some((270, 2))),
        layer(302, 8.57e77, 2.0, 1, Some((270, 1))),
    ])
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_is_internally_consistent() {
        let (tree, start) = mastery_tree().unwrap();
        assert_eq!(tree.len(), 18);
        assert_eq!(start, StudyId(241));
        assert!(tree.get(start).unwrap().prereq_options.is_empty());
    }

    #[test]
    fn terminal_studies_lead_nowhere() {
        let (tree, _) = mastery_tree().unwrap();
        for id in [291, 292, 302] {
            assert!(tree.get(StudyId(id)).unwrap().reachable.is_empty());
        }
    }

    #[test]
    fn layers_resolve_in_sequence_order() {
        let seq = mastery_layers().unwrap();
        assert_eq!(seq.len(), 7);

        let ids: Vec<u32> = seq.layers().map(|l| l.id.0).collect();
        assert_eq!(ids, vec![241, 250, 260, 270, 280, 290, 302]);
    }

    #[test]
    fn study_302_is_gated_on_the_270s_row() {
        let seq = mastery_layers().unwrap();
        // Layer 302 is last (index 6); its gate resolves to the 270s row at
        // index 3, two rows back past 290 and 280.
        let layer_302 = seq.get(6).unwrap();
        assert_eq!(layer_302.id, LayerId(302));
        assert_eq!(
            layer_302.prereq,
            Some(LayerPrereq {
                depends_on: LayerId(270),
                unlocked_per_unit: 1,
            })
        );
        assert_eq!(seq.dependency_index(6), Some(3));
    }
}
