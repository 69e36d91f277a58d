//  PROFILE.rs
//    by Lut99
//
//  Created:
//    10 Apr 2025, 11:20:37
//  Last edited:
//    16 Apr 2025, 09:58:02
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the [`BeliefProfile`], which lists the belief in every
//!   proposition over a state space.
//

use std::fmt::{Display, Formatter, Result as FResult};

use indexmap::IndexMap;

use crate::allocation::Allocation;
use crate::log::debug;
use crate::model::{BeliefModel, Error, JustifiedMasses};
use crate::space::{Proposition, StateSpace};


/***** LIBRARY *****/
/// The non-zero degrees of belief of all propositions over a state space.
///
/// Propositions are ordered by ascending cardinality and, within the same cardinality, by
/// descending belief. Ties keep the order in which [`StateSpace::subsets()`] produces them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BeliefProfile {
    /// The belief per proposition, in order.
    beliefs: IndexMap<Proposition, f64>,
}

// Constructors
impl BeliefProfile {
    /// Computes the profile from already normalized masses.
    ///
    /// # Arguments
    /// - `space`: The [`StateSpace`] to enumerate the propositions of.
    /// - `masses`: The [`JustifiedMasses`] to compute beliefs with.
    ///
    /// # Returns
    /// A new BeliefProfile.
    pub fn from_masses(space: &StateSpace, masses: &JustifiedMasses) -> Self {
        let mut beliefs: Vec<(Proposition, f64)> =
            space.non_empty_subsets().map(|prop| (prop, masses.belief(prop))).filter(|(_, belief)| *belief != 0.0).collect();
        // NOTE: `sort_by` is stable, so ties keep the enumeration order
        beliefs.sort_by(|(lhs, lbel), (rhs, rbel)| lhs.len().cmp(&rhs.len()).then_with(|| rbel.total_cmp(lbel)));
        Self { beliefs: beliefs.into_iter().collect() }
    }
}

// Querying
impl BeliefProfile {
    /// Returns the belief in the given proposition, if it's non-zero.
    #[inline]
    pub fn get(&self, prop: Proposition) -> Option<f64> { self.beliefs.get(&prop).copied() }

    /// Returns the number of propositions with non-zero belief.
    #[inline]
    pub fn len(&self) -> usize { self.beliefs.len() }

    /// Returns whether no proposition has non-zero belief.
    #[inline]
    pub fn is_empty(&self) -> bool { self.beliefs.is_empty() }

    /// Returns an iterator over the propositions and their beliefs, in order.
    #[inline]
    pub fn iter(&self) -> impl '_ + ExactSizeIterator<Item = (Proposition, f64)> { self.beliefs.iter().map(|(p, b)| (*p, *b)) }

    /// Converts this profile into a map from canonical keys to beliefs.
    ///
    /// # Arguments
    /// - `space`: The [`StateSpace`] the profile was computed over.
    ///
    /// # Returns
    /// An [`IndexMap`] with the same order as this profile.
    #[inline]
    pub fn to_keys(&self, space: &StateSpace) -> IndexMap<String, f64> { self.beliefs.iter().map(|(p, b)| (space.key(*p), *b)).collect() }

    /// Returns a formatter that writes every entry on its own line.
    #[inline]
    pub fn display<'p>(&'p self, space: &'p StateSpace) -> BeliefProfileDisplay<'p> { BeliefProfileDisplay { space, profile: self } }
}



/// Formats a [`BeliefProfile`] with the labels of its [`StateSpace`].
#[derive(Clone, Copy, Debug)]
pub struct BeliefProfileDisplay<'p> {
    space:   &'p StateSpace,
    profile: &'p BeliefProfile,
}
impl Display for BeliefProfileDisplay<'_> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        for (prop, belief) in self.profile.iter() {
            writeln!(f, "belief for {} -> {belief:.2}", self.space.key(prop))?;
        }
        Ok(())
    }
}





/***** FUNCTIONS *****/
/// Computes the [`BeliefProfile`] of a model.
///
/// # Arguments
/// - `model`: The [`BeliefModel`] to query. Any layers it computes stay cached.
///
/// # Returns
/// A new BeliefProfile over the model's state space.
///
/// # Errors
/// This function errors if the model failed to compute its layers.
pub fn enumerate<A: Allocation>(model: &mut BeliefModel<A>) -> Result<BeliefProfile, Error> {
    let space: StateSpace = model.space().clone();
    let profile: BeliefProfile = BeliefProfile::from_masses(&space, model.delta_j()?);
    debug!("Enumerated belief profile ({} of {} proposition(s) with non-zero belief)", profile.len(), (1u128 << space.len()) - 1);
    Ok(profile)
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::allocation::Intersection;
    use crate::evidence::Evidence;
    use crate::frame::JustificationFrame;
    use crate::tests::{make_prop, make_space, small_evidence, small_space};


    #[test]
    fn test_profile_small() {
        let space: StateSpace = small_space();
        let mut model = BeliefModel::new(space.clone(), small_evidence(&space), JustificationFrame::DempsterShafer, Intersection);
        let profile: BeliefProfile = enumerate(&mut model).unwrap();

        let order: Vec<Proposition> = profile.iter().map(|(p, _)| p).collect();
        assert_eq!(order, vec![
            make_prop(&space, ["sp"]),
            make_prop(&space, ["dm", "dp"]),
            make_prop(&space, ["dm", "sp"]),
            make_prop(&space, ["dp", "sp"]),
            space.full(),
        ]);
        assert_abs_diff_eq!(profile.get(make_prop(&space, ["dm", "dp"])).unwrap(), 0.48 / 0.68, epsilon = 1e-12);
        assert_eq!(profile.get(make_prop(&space, ["dp"])), None);

        let keys: Vec<String> = profile.to_keys(&space).into_keys().collect();
        assert_eq!(keys, vec!["{'sp'}", "{'dm', 'dp'}", "{'dm', 'sp'}", "{'dp', 'sp'}", "{'dm', 'dp', 'sp'}"]);
    }

    #[test]
    fn test_profile_sorted() {
        let space: StateSpace = make_space(["a", "b", "c", "d"]);
        let evidence: Evidence = Evidence::from_keys(&space, [("{'a'}", 0.3), ("{'b', 'c'}", 0.6), ("{'c', 'd'}", 0.2)]).unwrap();
        let mut model = BeliefModel::new(space, evidence, JustificationFrame::DempsterShafer, Intersection);
        let profile: BeliefProfile = enumerate(&mut model).unwrap();
        assert!(!profile.is_empty());
        for ((lhs, lbel), (rhs, rbel)) in profile.iter().zip(profile.iter().skip(1)) {
            assert!(lbel > 0.0);
            assert!(lhs.len() < rhs.len() || (lhs.len() == rhs.len() && lbel >= rbel));
        }
    }

    #[test]
    fn test_profile_display() {
        let space: StateSpace = make_space(["x", "y"]);
        let mut model = BeliefModel::new(space.clone(), Evidence::new(), JustificationFrame::DempsterShafer, Intersection);
        let profile: BeliefProfile = enumerate(&mut model).unwrap();
        assert_eq!(profile.len(), 1);
        assert_eq!(profile.display(&space).to_string(), "belief for {'x', 'y'} -> 1.00\n");
    }
}
