//  TOPOLOGY.rs
//    by Lut99
//
//  Created:
//    08 Apr 2025, 10:52:06
//  Last edited:
//    15 Apr 2025, 16:18:57
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the [`Topology`] generated by a set of pieces of evidence.
//!
//!   The propositions of the evidence act as a _subbase_: the topology is the smallest collection
//!   of propositions containing them (and the empty set and the whole space) that is closed under
//!   intersection and union. Because the state space is finite, closing under pairwise operations
//!   until nothing changes anymore suffices.
//!
//!   The topology then decides which propositions are _dense_, i.e., intersect every non-empty
//!   open set, which in turn defines the [justification frames](JustificationFrame).
//

use std::collections::HashSet;

use indexmap::IndexSet;

use crate::frame::JustificationFrame;
use crate::log::{debug, trace};
use crate::space::{Proposition, StateSpace};


/***** LIBRARY *****/
/// A topology over a [`StateSpace`], generated by a subbase.
///
/// Both the open sets and the dense sets are computed when the topology is generated. Afterwards,
/// it is immutable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Topology {
    /// The whole state space.
    full:  Proposition,
    /// The open sets, ordered by cardinality and then by bit pattern.
    opens: IndexSet<Proposition>,
    /// The dense sets, ordered by cardinality and then lexicographically by state.
    dense: Vec<Proposition>,
}

// Constructors
impl Topology {
    /// Generates the topology with the given subbase.
    ///
    /// # Arguments
    /// - `space`: The [`StateSpace`] the topology is over.
    /// - `subbase`: The [`Proposition`]s generating the topology. Typically, these are the
    ///   propositions of the [`Evidence`](crate::evidence::Evidence). States outside of `space`
    ///   are ignored.
    ///
    /// # Returns
    /// A new Topology.
    pub fn generate(space: &StateSpace, subbase: impl IntoIterator<Item = Proposition>) -> Self {
        let full: Proposition = space.full();
        let mut opens: IndexSet<Proposition> = IndexSet::new();
        opens.insert(Proposition::EMPTY);
        opens.insert(full);
        opens.extend(subbase.into_iter().map(|prop| prop & full));
        debug!("Generating topology from a subbase of {} set(s)", opens.len());

        // Close under pairwise intersection and union.
        // NOTE: Always terminates, as there are only finitely many subsets of the space.
        let mut updates: HashSet<Proposition> = HashSet::new();
        let mut changed: bool = true;
        #[cfg(feature = "log")]
        let mut i: usize = 0;
        while changed {
            changed = false;
            #[cfg(feature = "log")]
            {
                i += 1;
            }

            for (j, lhs) in opens.iter().enumerate() {
                for rhs in opens.iter().skip(j + 1) {
                    updates.insert(*lhs & *rhs);
                    updates.insert(*lhs | *rhs);
                }
            }
            for prop in updates.drain() {
                changed |= opens.insert(prop);
            }
            trace!("Closure pass {i} done ({} open set(s))", opens.len());
        }
        opens.sort_by(|lhs, rhs| (lhs.len(), lhs.bits()).cmp(&(rhs.len(), rhs.bits())));

        // Then find the dense sets among all subsets
        let dense: Vec<Proposition> = space.subsets().filter(|prop| Self::meets_all(&opens, prop)).collect();
        debug!("Generated topology with {} open set(s) and {} dense set(s) (took {i} passes)", opens.len(), dense.len());
        Self { full, opens, dense }
    }

    /// Checks whether the given proposition meets every non-empty open set.
    #[inline]
    fn meets_all(opens: &IndexSet<Proposition>, prop: &Proposition) -> bool { opens.iter().all(|open| open.is_empty() || open.intersects(prop)) }
}

// Querying
impl Topology {
    /// Returns the whole space this topology is over.
    #[inline]
    pub const fn full(&self) -> Proposition { self.full }

    /// Returns the number of open sets, including the empty set.
    #[inline]
    pub fn len(&self) -> usize { self.opens.len() }

    /// Returns whether there are no open sets. Always false, as the empty set is open.
    #[inline]
    pub fn is_empty(&self) -> bool { self.opens.is_empty() }

    /// Returns all open sets, ordered by cardinality.
    #[inline]
    pub fn opens(&self) -> impl '_ + ExactSizeIterator<Item = Proposition> { self.opens.iter().copied() }

    /// Returns whether the given proposition is open.
    #[inline]
    pub fn is_open(&self, prop: Proposition) -> bool { self.opens.contains(&prop) }

    /// Returns all dense sets, ordered by cardinality.
    #[inline]
    pub fn dense_sets(&self) -> &[Proposition] { &self.dense }

    /// Returns whether the given proposition is dense, i.e., meets every non-empty open set.
    #[inline]
    pub fn is_dense(&self, prop: Proposition) -> bool { Self::meets_all(&self.opens, &prop) }

    /// Computes the closure of a proposition.
    ///
    /// This is the smallest closed set containing it, i.e., the whole space minus every open set
    /// that doesn't meet it. A proposition is dense iff its closure is the whole space.
    ///
    /// # Arguments
    /// - `prop`: The [`Proposition`] to find the closure of.
    ///
    /// # Returns
    /// The closure of `prop`.
    pub fn closure(&self, prop: Proposition) -> Proposition {
        let outside: Proposition = self.opens.iter().filter(|open| !open.intersects(&prop)).fold(Proposition::EMPTY, |acc, open| acc | *open);
        self.full.difference(outside)
    }

    /// Finds the minimal dense sets containing a proposition.
    ///
    /// # Arguments
    /// - `prop`: The [`Proposition`] that should be contained.
    ///
    /// # Returns
    /// Every dense superset of `prop` that has no dense strict subset which is also a superset of
    /// `prop`. Because the whole space is always dense, this is never empty for a non-empty space.
    pub fn minimal_dense_supersets(&self, prop: Proposition) -> Vec<Proposition> {
        let candidates: Vec<Proposition> = self.dense.iter().copied().filter(|dense| prop.is_subset(dense)).collect();
        candidates.iter().copied().filter(|cand| !candidates.iter().any(|other| other != cand && other.is_subset(cand))).collect()
    }

    /// Returns the propositions that are justified under the given frame.
    ///
    /// # Arguments
    /// - `frame`: The [`JustificationFrame`] to apply.
    ///
    /// # Returns
    /// For [`JustificationFrame::DempsterShafer`], all open sets except the empty one. For
    /// [`JustificationFrame::StrongDenseness`], all dense sets.
    pub fn justification_frame(&self, frame: JustificationFrame) -> Vec<Proposition> {
        match frame {
            JustificationFrame::DempsterShafer => self.opens.iter().copied().filter(|open| !open.is_empty()).collect(),
            JustificationFrame::StrongDenseness => self.dense.clone(),
        }
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{large_evidence, large_space, make_prop, make_space, small_evidence, small_space};


    #[test]
    fn test_topology_small() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let space: StateSpace = small_space();
        let top: Topology = Topology::generate(&space, small_evidence(&space).propositions());
        let sp: Proposition = make_prop(&space, ["sp"]);
        let dpdm: Proposition = make_prop(&space, ["dp", "dm"]);
        assert_eq!(top.opens().collect::<Vec<_>>(), vec![Proposition::EMPTY, sp, dpdm, space.full()]);
        assert!(top.is_open(dpdm));
        assert!(!top.is_open(make_prop(&space, ["dp"])));
        assert_eq!(top.dense_sets(), &[make_prop(&space, ["dm", "sp"]), make_prop(&space, ["dp", "sp"]), space.full()]);
    }

    #[test]
    fn test_topology_large() {
        let space: StateSpace = large_space();
        let top: Topology = Topology::generate(&space, large_evidence(&space, [0.9, 0.75, 0.45]).propositions());

        // The basis is {dm}, {dp}, {dp, dm, do}, {dm, sm} and {dp, sp}; their unions make up 12 non-empty open sets
        assert_eq!(top.len(), 13);
        assert!(top.is_open(make_prop(&space, ["dm"])));
        assert!(top.is_open(make_prop(&space, ["dp", "dm", "sm"])));
        assert!(!top.is_open(make_prop(&space, ["sm"])));
        assert!(!top.is_open(make_prop(&space, ["do", "sm"])));

        // Closed under both operations
        for lhs in top.opens() {
            for rhs in top.opens() {
                assert!(top.is_open(lhs & rhs));
                assert!(top.is_open(lhs | rhs));
            }
        }

        // Dense means containing both dp and dm
        let dpdm: Proposition = make_prop(&space, ["dp", "dm"]);
        assert_eq!(top.dense_sets().len(), 8);
        assert!(top.dense_sets().iter().all(|dense| dpdm.is_subset(dense)));
        assert_eq!(top.dense_sets()[0], dpdm);
    }

    #[test]
    fn test_topology_without_evidence() {
        let space: StateSpace = make_space(["a", "b", "c"]);
        let top: Topology = Topology::generate(&space, Vec::<Proposition>::new());
        assert_eq!(top.opens().collect::<Vec<_>>(), vec![Proposition::EMPTY, space.full()]);
        assert_eq!(top.dense_sets().len(), 7);
        assert_eq!(top.justification_frame(JustificationFrame::DempsterShafer), vec![space.full()]);
    }

    #[test]
    fn test_closure_matches_denseness() {
        let space: StateSpace = large_space();
        let top: Topology = Topology::generate(&space, large_evidence(&space, [0.5; 3]).propositions());
        for prop in space.subsets() {
            let closure: Proposition = top.closure(prop);
            assert!(prop.is_subset(&closure));
            assert_eq!(top.closure(closure), closure);
            assert_eq!(top.is_dense(prop), closure == space.full(), "Denseness of {}", space.display(prop));
        }
        assert_eq!(top.closure(make_prop(&space, ["sm"])), make_prop(&space, ["sm"]));
        assert_eq!(top.closure(make_prop(&space, ["dm"])), make_prop(&space, ["dm", "do", "sm"]));
    }

    #[test]
    fn test_minimal_dense_supersets() {
        let space: StateSpace = small_space();
        let top: Topology = Topology::generate(&space, small_evidence(&space).propositions());
        assert_eq!(top.minimal_dense_supersets(make_prop(&space, ["dp", "dm"])), vec![space.full()]);
        assert_eq!(top.minimal_dense_supersets(make_prop(&space, ["dp", "sp"])), vec![make_prop(&space, ["dp", "sp"])]);
        assert_eq!(top.minimal_dense_supersets(make_prop(&space, ["sp"])), vec![make_prop(&space, ["dm", "sp"]), make_prop(&space, ["dp", "sp"])]);
    }

    #[test]
    fn test_justification_frames() {
        let space: StateSpace = small_space();
        let top: Topology = Topology::generate(&space, small_evidence(&space).propositions());
        assert_eq!(top.justification_frame(JustificationFrame::DempsterShafer), vec![
            make_prop(&space, ["sp"]),
            make_prop(&space, ["dp", "dm"]),
            space.full()
        ]);
        assert_eq!(top.justification_frame(JustificationFrame::StrongDenseness), top.dense_sets());
    }
}
