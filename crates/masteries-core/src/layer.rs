//! The layer form of a mastery tree: an ordered sequence of homogeneous
//! study batches.
//!
//! Each layer holds `size` identical studies. A layer may be gated by an
//! earlier layer: every unit bought there unlocks `unlocked_per_unit` units
//! here. The gate is an explicit layer reference resolved to a direct index
//! at construction; the sequence rejects unknown or forward references, so
//! an invalid dataset is a load-time fault rather than an out-of-bounds
//! lookup mid-enumeration.

use serde::{Deserialize, Serialize};

use crate::id::LayerId;
use crate::study::Study;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while building a layer sequence.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    #[error("duplicate layer id: {0:?}")]
    DuplicateId(LayerId),

    #[error("layer {layer:?} depends on unknown layer {depends_on:?}")]
    UnknownDependency { layer: LayerId, depends_on: LayerId },

    #[error("layer {layer:?} depends on {depends_on:?}, which is not earlier in the sequence")]
    ForwardDependency { layer: LayerId, depends_on: LayerId },

    #[error("invalid cost {cost} for layer {layer:?}")]
    InvalidCost { layer: LayerId, cost: f64 },

    #[error("invalid cost multiplier {multiplier} for layer {layer:?}")]
    InvalidMultiplier { layer: LayerId, multiplier: f64 },
}

// ---------------------------------------------------------------------------
// Core data structures
// ---------------------------------------------------------------------------

/// How a layer's purchasable quantity is gated by an earlier layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerPrereq {
    /// The earlier layer whose chosen quantity gates this one.
    pub depends_on: LayerId,

    /// Units unlocked here per unit bought in `depends_on`.
    pub unlocked_per_unit: u32,
}

/// One layer: a batch of `size` identical studies sharing one price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyLayer {
    /// Unique identifier.
    pub id: LayerId,

    /// Pricing shared by every unit in the layer.
    pub study: Study,

    /// Maximum purchasable count in this layer, before any gate.
    pub size: u32,

    /// Optional gate on an earlier layer's chosen quantity.
    pub prereq: Option<LayerPrereq>,
}

/// Quantity bought from one layer in a candidate combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerResult {
    /// Which layer.
    pub layer: LayerId,

    /// How many units, possibly zero for a skipped layer.
    pub quantity: u32,
}

/// A candidate purchase combination: one [`LayerResult`] per layer processed
/// so far, in sequence order, plus the total spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    /// Per-layer quantities in sequence order.
    pub purchases: Vec<LayerResult>,

    /// Total spent across all purchases.
    pub cost: f64,
}

impl Combination {
    /// The purchases as space-separated `<quantity>x<layer>` tokens in
    /// sequence order, e.g. `1x241 3x250 0x260`.
    pub fn purchase_string(&self) -> String {
        let tokens: Vec<String> = self
            .purchases
            .iter()
            .map(|r| format!("{}x{}", r.quantity, r.layer))
            .collect();
        tokens.join(" ")
    }
}

// ---------------------------------------------------------------------------
// LayerSequence
// ---------------------------------------------------------------------------

/// A validated, strictly ordered sequence of layers. Index order is
/// processing order; a layer's gate may only reference an earlier index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSequence {
    layers: Vec<StudyLayer>,

    /// Resolved gate target per layer: the index of `prereq.depends_on`
    /// within `layers`, or `None` for ungated layers.
    resolved: Vec<Option<usize>>,
}

impl LayerSequence {
    /// Build a sequence, checking pricing, duplicate ids, and resolving every
    /// gate to the index of its target layer.
    pub fn new(layers: Vec<StudyLayer>) -> Result<Self, LayerError> {
        let mut resolved = Vec::with_capacity(layers.len());

        for (index, layer) in layers.iter().enumerate() {
            if layers[..index].iter().any(|earlier| earlier.id == layer.id) {
                return Err(LayerError::DuplicateId(layer.id));
            }
            if !layer.study.has_valid_cost() {
                return Err(LayerError::InvalidCost {
                    layer: layer.id,
                    cost: layer.study.cost,
                });
            }
            if !layer.study.has_valid_multiplier() {
                return Err(LayerError::InvalidMultiplier {
                    layer: layer.id,
                    multiplier: layer.study.cost_multiplier,
                });
            }

            match layer.prereq {
                None => resolved.push(None),
                Some(prereq) => {
                    // Only earlier layers are candidates: a gate may never
                    // look forward (or at the layer itself).
                    let target = layers[..index]
                        .iter()
                        .position(|earlier| earlier.id == prereq.depends_on);
                    match target {
                        Some(dep_index) => resolved.push(Some(dep_index)),
                        None => {
                            let err = if layers[index..].iter().any(|l| l.id == prereq.depends_on)
                            {
                                LayerError::ForwardDependency {
                                    layer: layer.id,
                                    depends_on: prereq.depends_on,
                                }
                            } else {
                                LayerError::UnknownDependency {
                                    layer: layer.id,
                                    depends_on: prereq.depends_on,
                                }
                            };
                            return Err(err);
                        }
                    }
                }
            }
        }

        Ok(Self { layers, resolved })
    }

    /// The layer at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&StudyLayer> {
        self.layers.get(index)
    }

    /// The resolved gate target for the layer at `index`.
    pub fn dependency_index(&self, index: usize) -> Option<usize> {
        self.resolved.get(index).copied().flatten()
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the sequence has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterate over the layers in sequence order.
    pub fn layers(&self) -> impl Iterator<Item = &StudyLayer> {
        self.layers.iter()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn resolves_gates_to_indices() {
        let seq = LayerSequence::new(vec![
            layer(241, 1e71, 1.0, 1, None),
            layer(250, 2e71, 2.5, 3, Some((241, 3))),
            layer(270, 2.74e76, 2.0, 3, Some((250, 3))),
        ])
        .unwrap();

        assert_eq!(seq.dependency_index(0), None);
        assert_eq!(seq.dependency_index(1), Some(0));
        assert_eq!(seq.dependency_index(2), Some(1));
    }

    #[test]
    fn duplicate_id_rejected() {
        let result = LayerSequence::new(vec![
            layer(1, 1.0, 1.0, 1, None),
            layer(1, 2.0, 1.0, 1, None),
        ]);
        assert!(matches!(result, Err(LayerError::DuplicateId(LayerId(1)))));
    }

    #[test]
    fn unknown_dependency_rejected() {
        let result = LayerSequence::new(vec![
            layer(1, 1.0, 1.0, 1, None),
            layer(2, 1.0, 1.0, 1, Some((9, 1))),
        ]);
        assert!(matches!(
            result,
            Err(LayerError::UnknownDependency {
                layer: LayerId(2),
                depends_on: LayerId(9),
            })
        ));
    }

    #[test]
    fn forward_dependency_rejected() {
        let result = LayerSequence::new(vec![
            layer(1, 1.0, 1.0, 1, Some((2, 1))),
            layer(2, 1.0, 1.0, 1, None),
        ]);
        assert!(matches!(
            result,
            Err(LayerError::ForwardDependency {
                layer: LayerId(1),
                depends_on: LayerId(2),
            })
        ));
    }

    #[test]
    fn self_dependency_rejected() {
        let result = LayerSequence::new(vec![layer(1, 1.0, 1.0, 1, Some((1, 1)))]);
        assert!(matches!(result, Err(LayerError::ForwardDependency { .. })));
    }

    #[test]
    fn invalid_pricing_rejected() {
        let result = LayerSequence::new(vec![layer(1, f64::NAN, 1.0, 1, None)]);
        assert!(matches!(result, Err(LayerError::InvalidCost { .. })));

        let result = LayerSequence::new(vec![layer(1, 1.0, -2.0, 1, None)]);
        assert!(matches!(result, Err(LayerError::InvalidMultiplier { .. })));
    }

    #[test]
    fn purchase_string_renders_in_order() {
        let combo = Combination {
            purchases: vec![
                LayerResult {
                    layer: LayerId(241),
                    quantity: 1,
                },
                LayerResult {
                    layer: LayerId(250),
                    quantity: 3,
                },
                LayerResult {
                    layer: LayerId(260),
                    quantity: 0,
                },
            ],
            cost: 1e71,
        };
        assert_eq!(combo.purchase_string(), "1x241 3x250 0x260");
    }
}
