//! Masteries Core -- purchase-path enumeration for idle-game mastery trees.
//!
//! A mastery tree is a small directed prerequisite graph of *studies*: each
//! study has a base cost and a multiplicative cost-growth factor applied to
//! every later purchase in the same branch. This crate enumerates every valid
//! purchase sequence and the cumulative cost of reaching it, in two
//! independent representations:
//!
//! - **Graph form** ([`tree::StudyTree`] + [`walk::walk_paths`]): a
//!   depth-first walk over nodes with per-study prerequisite options,
//!   recording a [`walk::PathCost`] snapshot for every freshly-visited state.
//! - **Layer form** ([`layer::LayerSequence`] + [`combine::enumerate_combinations`]):
//!   an ordered sequence of homogeneous layers with bounded purchase counts,
//!   where a layer's effective maximum may be gated by an earlier layer's
//!   chosen quantity, recording a [`layer::Combination`] per purchase event.
//!
//! Both feed [`report::Report`], which sorts by cumulative cost and keeps
//! only tiers at least 1% more expensive than the previously kept one.
//!
//! # Key Types
//!
//! - [`study::Study`] -- base cost plus compounding multiplier.
//! - [`tree::StudyTree`] -- validated id-to-node map for the graph form.
//! - [`layer::LayerSequence`] -- validated ordered layers with explicit,
//!   resolved dependencies between layers.
//! - [`report::Report`] -- sorted, deduplicated cost tiers and rendering.

pub mod combine;
pub mod id;
pub mod layer;
pub mod report;
pub mod study;
pub mod tree;
pub mod walk;
