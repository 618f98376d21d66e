//! Quantity enumeration over the layer form.
//!
//! Recursion is over the layer index. Every layer first contributes a
//! zero-quantity entry (the "skip" branch, explored unconditionally so that
//! later layers gated on a *different* earlier layer still get their turn),
//! then one branch per quantity from 1 up to the layer's effective maximum.
//! A [`Combination`] snapshot is recorded after every nonzero purchase
//! event, so the all-zero baseline is never emitted.
//!
//! Cumulative cost threads by value through the recursion. The multiplier
//! accumulator is layer-local: a layer's price escalates with its own
//! purchases only, starting from 1 each layer, and compounds unit-by-unit
//! inside the quantity loop (never as a closed-form power). The ongoing
//! purchase list has a single push/pop pair per branch.

use crate::layer::{Combination, LayerResult, LayerSequence};

/// Mutable enumeration state: the ongoing purchase list and the output log.
struct CombineState {
    purchases: Vec<LayerResult>,
    out: Vec<Combination>,
}

/// Enumerate every purchase combination over the sequence, one
/// [`Combination`] snapshot per nonzero purchase event.
pub fn enumerate_combinations(sequence: &LayerSequence) -> Vec<Combination> {
    let mut state = CombineState {
        purchases: Vec::with_capacity(sequence.len()),
        out: Vec::with_capacity(1024),
    };

    descend(sequence, &mut state, 0, 0.0);

    state.out
}

fn descend(sequence: &LayerSequence, state: &mut CombineState, index: usize, cost: f64) {
    let Some(layer) = sequence.get(index) else {
        return;
    };

    // The purchase list holds exactly one entry per processed layer, so a
    // resolved gate index is a direct lookup into it.
    debug_assert_eq!(state.purchases.len(), index);

    // Skip branch: buy nothing from this layer.
    state.purchases.push(LayerResult {
        layer: layer.id,
        quantity: 0,
    });
    descend(sequence, state, index + 1, cost);
    state.purchases.pop();

    let max = match (layer.prereq, sequence.dependency_index(index)) {
        (Some(prereq), Some(dep_index)) => {
            let unlocked = state.purchases[dep_index].quantity * prereq.unlocked_per_unit;
            unlocked.min(layer.size)
        }
        _ => layer.size,
    };

    let mut cost = cost;
    let mut multiplier = 1.0;
    for quantity in 1..=max {
        (cost, multiplier) = layer.study.buy_one(cost, multiplier);
        state.purchases.push(LayerResult {
            layer: layer.id,
            quantity,
        });
        state.out.push(Combination {
            purchases: state.purchases.clone(),
            cost,
        });
        descend(sequence, state, index + 1, cost);
        state.purchases.pop();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
