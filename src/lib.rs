//  LIB.rs
//    by Lut99
//
//  Created:
//    08 Apr 2025, 09:12:40
//  Last edited:
//    16 Apr 2025, 11:30:15
//  Auto updated?
//    Yes
//
//  Description:
//!   A generalized multi-layer belief model for reasoning with uncertain and
//!   possibly conflicting pieces of evidence.
//!
//!   Every piece of evidence is a proposition (a set of states) with a mass, i.e., the probability
//!   that it holds. The [`BeliefModel`] combines them into a degree of belief for every
//!   proposition, parameterized by a [`JustificationFrame`] and an [`Allocation`]. This covers
//!   Dempster's rule of combination as well as reasoners based on the [`Topology`] that the
//!   evidence generates.
//

// Declare modules
pub mod allocation;
pub mod codec;
pub mod evidence;
pub mod frame;
mod log;
pub mod model;
pub mod profile;
pub mod reasoners;
pub mod space;
#[cfg(test)]
mod tests;
pub mod topology;

// Use some of it in the crate namespace
pub use allocation::{Allocation, Intersection, MinimalDenseSet, Union};
pub use evidence::{Combination, Evidence};
pub use frame::JustificationFrame;
pub use model::{BeliefModel, JustifiedMasses};
pub use profile::BeliefProfile;
pub use reasoners::{Reasoner, ds_int_belief_model, ds_min_belief_model, sd_min_belief_model};
pub use space::{Proposition, StateSpace};
pub use topology::Topology;
