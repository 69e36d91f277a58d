//  TESTS.rs
//    by Lut99
//
//  Created:
//    03 Dec 2024, 14:32:43
//  Last edited:
//    15 Apr 2025, 14:21:08
//  Auto updated?
//    Yes
//
//  Description:
//!   Contains some common test functions and fixtures.
//

#![allow(unused)]

use crate::evidence::Evidence;
use crate::space::{Proposition, StateSpace};


/***** LIBRARY *****/
/// Sets up a logger if wanted.
#[cfg(feature = "log")]
pub fn setup_logger() {
    use humanlog::{DebugMode, HumanLogger};

    // Check if the envs tell us to
    if let Ok(logger) = std::env::var("LOGGER") {
        if logger == "1" || logger == "true" {
            // Create the logger
            if let Err(err) = HumanLogger::terminal(DebugMode::Full).init() {
                eprintln!("WARNING: Failed to setup logger: {err} (no logging for this session)");
            }
        }
    }
}



/// Makes a [`StateSpace`] conveniently.
#[track_caller]
pub fn make_space<const N: usize>(labels: [&'static str; N]) -> StateSpace {
    StateSpace::new(labels).unwrap_or_else(|err| panic!("Failed to build state space: {err}"))
}

/// Makes a [`Proposition`] conveniently from labels in the given space.
#[track_caller]
pub fn make_prop<const N: usize>(space: &StateSpace, labels: [&'static str; N]) -> Proposition {
    space.proposition(labels).unwrap_or_else(|err| panic!("Failed to build proposition: {err}"))
}

/// Makes [`Evidence`] conveniently from raw bitmasks.
#[track_caller]
pub fn make_evidence<const N: usize>(items: [(u64, f64); N]) -> Evidence {
    let mut evidence = Evidence::new();
    for (bits, mass) in items {
        evidence.insert(Proposition::from_bits(bits), mass).unwrap_or_else(|err| panic!("Failed to add evidence: {err}"));
    }
    evidence
}

/// Makes [`Evidence`] conveniently from labels in the given space.
#[track_caller]
pub fn make_labelled_evidence<const N: usize>(space: &StateSpace, items: [(&[&'static str], f64); N]) -> Evidence {
    let mut evidence = Evidence::new();
    for (labels, mass) in items {
        let prop: Proposition = space.proposition(labels).unwrap_or_else(|err| panic!("Failed to build proposition: {err}"));
        evidence.insert(prop, mass).unwrap_or_else(|err| panic!("Failed to add evidence: {err}"));
    }
    evidence
}



/// The state space of the running medical example, i.e., `{dp, sp, dm}`.
pub fn small_space() -> StateSpace { make_space(["dp", "sp", "dm"]) }

/// The evidence of the running medical example over [`small_space()`].
///
/// `{dp, dm}` with mass 0.8, and `{sp}` with mass 0.4.
pub fn small_evidence(space: &StateSpace) -> Evidence { make_labelled_evidence(space, [(&["dp", "dm"], 0.8), (&["sp"], 0.4)]) }

/// The state space of the extended medical example, i.e., `{dp, sp, dm, sm, do}`.
pub fn large_space() -> StateSpace { make_space(["dp", "sp", "dm", "sm", "do"]) }

/// The evidence of the extended medical example over [`large_space()`].
///
/// `{dp, dm, do}`, `{dm, sm}` and `{dp, sp}` with the given masses, respectively.
pub fn large_evidence(space: &StateSpace, masses: [f64; 3]) -> Evidence {
    make_labelled_evidence(space, [(&["dp", "dm", "do"], masses[0]), (&["dm", "sm"], masses[1]), (&["dp", "sp"], masses[2])])
}
