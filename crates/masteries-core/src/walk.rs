//! Depth-first purchase-path enumeration over the graph form.
//!
//! The walk visits every study reachable from the start node, branching into
//! each successor whose prerequisite options are satisfied by the studies
//! already bought on the current branch. Every freshly-visited state is
//! recorded as a [`PathCost`] snapshot; a study already on the active branch
//! is skipped, which both prevents double counting and guards against cycles
//! in the reachable lists.
//!
//! Running cost and multiplier are threaded by value through the recursion,
//! so unwinding a branch restores them by construction. The visited set is
//! the only in-place mutation and has a single insert/remove pair around the
//! successor loop.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::id::StudyId;
use crate::tree::{StudyNode, StudyTree, TreeError};

/// One snapshot of a purchase branch: the set of studies bought so far and
/// the cumulative cost at the moment that set was reached.
///
/// The same study id can appear in many snapshots, once per branch that
/// reaches it through a different purchase history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCost {
    /// Studies bought on this branch, in id order.
    pub purchased: BTreeSet<StudyId>,

    /// Total spent to reach this state.
    pub cost: f64,
}

impl PathCost {
    /// The purchased ids as a comma-joined ascending list, e.g. `241,251,261`.
    pub fn path_string(&self) -> String {
        let ids: Vec<String> = self.purchased.iter().map(|id| id.to_string()).collect();
        ids.join(",")
    }
}

/// Mutable traversal state: the active branch's visited set and the output
/// log of snapshots. Owned exclusively by the single recursive call chain.
struct WalkState {
    visited: BTreeSet<StudyId>,
    out: Vec<PathCost>,
}

/// Enumerate every [`PathCost`] reachable by a depth-first walk from `start`.
///
/// The start node is always visited, whatever its own prerequisite options
/// say; descent into a successor requires at least one of the *successor's*
/// prerequisite options to be on the current branch, or none to exist.
///
/// Validates the tree first so a dangling reference is a descriptive load
/// fault instead of a mid-walk surprise.
pub fn walk_paths(tree: &StudyTree, start: StudyId) -> Result<Vec<PathCost>, TreeError> {
    tree.validate()?;

    let mut state = WalkState {
        visited: BTreeSet::new(),
        // The log grows combinatorially (millions of snapshots on the real
        // dataset); doubling from a large base avoids most reallocation.
        out: Vec::with_capacity(1 << 16),
    };

    let root = tree.get(start)?;
    visit(tree, &mut state, root, 0.0, 1.0);

    Ok(state.out)
}

fn visit(tree: &StudyTree, state: &mut WalkState, node: &StudyNode, cost: f64, multiplier: f64) {
    if state.visited.contains(&node.id) {
        return;
    }

    let (cost, next_multiplier) = node.study.buy_one(cost, multiplier);
    state.visited.insert(node.id);
    state.out.push(PathCost {
        purchased: state.visited.clone(),
        cost,
    });

    for &next_id in &node.reachable {
        // Validated tree: every reachable target exists.
        let Ok(next) = tree.get(next_id) else {
            continue;
        };
        let unlocked = next.prereq_options.is_empty()
            || next
                .prereq_options
                .iter()
                .any(|prereq| state.visited.contains(prereq));
        if unlocked {
            visit(tree, state, next, cost, next_multiplier);
        }
    }

    state.visited.remove(&node.id);
}

// ===========================================================================
// Tests
// ===========================================================================
