//  ALLOCATION.rs
//    by Lut99
//
//  Created:
//    09 Apr 2025, 09:31:44
//  Last edited:
//    15 Apr 2025, 16:55:30
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the [`Allocation`] functions, which decide what proposition a
//!   combination of pieces of evidence actually supports.
//!
//!   Every allocation maps the empty combination (i.e., no evidence holds) to the whole space.
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use itertools::Itertools as _;

use crate::space::Proposition;
use crate::topology::Topology;


/***** ERRORS *****/
/// Defines errors originating from allocating a combination.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// There was not exactly one minimal dense set containing a combination's intersection.
    Ambiguous { intersection: Proposition, candidates: Vec<Proposition> },
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Ambiguous { intersection, candidates } => write!(
                f,
                "There is no unique minimal dense set containing {intersection} (candidates: {})",
                if candidates.is_empty() { "<none>".into() } else { candidates.iter().join(", ") }
            ),
        }
    }
}
impl error::Error for Error {}





/***** INTERFACES *****/
/// Maps combinations of pieces of evidence to the proposition they support.
pub trait Allocation {
    /// Returns a short name for this allocation, for reporting purposes.
    fn name(&self) -> &'static str;

    /// Computes the proposition supported by a combination of pieces of evidence.
    ///
    /// # Arguments
    /// - `topology`: The [`Topology`] generated by the evidence that the combination is drawn
    ///   from.
    /// - `combination`: The propositions of the pieces of evidence in the combination. If empty,
    ///   the whole space should be returned.
    ///
    /// # Returns
    /// The supported [`Proposition`].
    ///
    /// # Errors
    /// This function may error if the allocation is undefined for the given combination.
    fn allocate(&self, topology: &Topology, combination: &[Proposition]) -> Result<Proposition, Error>;
}

// Pointer-like impls
impl<A: ?Sized + Allocation> Allocation for &A {
    #[inline]
    fn name(&self) -> &'static str { <A as Allocation>::name(self) }

    #[inline]
    fn allocate(&self, topology: &Topology, combination: &[Proposition]) -> Result<Proposition, Error> {
        <A as Allocation>::allocate(self, topology, combination)
    }
}
impl<A: ?Sized + Allocation> Allocation for Box<A> {
    #[inline]
    fn name(&self) -> &'static str { <A as Allocation>::name(self) }

    #[inline]
    fn allocate(&self, topology: &Topology, combination: &[Proposition]) -> Result<Proposition, Error> {
        <A as Allocation>::allocate(self, topology, combination)
    }
}





/***** HELPERS *****/
/// Intersects all propositions in a combination, starting from the whole space.
#[inline]
fn intersect_all(topology: &Topology, combination: &[Proposition]) -> Proposition {
    combination.iter().fold(topology.full(), |acc, prop| acc & *prop)
}





/***** LIBRARY *****/
/// Allocates a combination to the intersection of its propositions.
///
/// Together with the [Dempster-Shafer frame](crate::frame::JustificationFrame::DempsterShafer),
/// this gives Dempster's rule of combination.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Intersection;
impl Allocation for Intersection {
    #[inline]
    fn name(&self) -> &'static str { "intersection" }

    #[inline]
    fn allocate(&self, topology: &Topology, combination: &[Proposition]) -> Result<Proposition, Error> {
        Ok(intersect_all(topology, combination))
    }
}



/// Allocates a combination to the union of its propositions.
///
/// This is the disjunctive counterpart of [`Intersection`]: a combination supports only what any
/// of its pieces support.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Union;
impl Allocation for Union {
    #[inline]
    fn name(&self) -> &'static str { "union" }

    #[inline]
    fn allocate(&self, topology: &Topology, combination: &[Proposition]) -> Result<Proposition, Error> {
        if combination.is_empty() {
            return Ok(topology.full());
        }
        Ok(combination.iter().fold(Proposition::EMPTY, |acc, prop| acc | *prop))
    }
}



/// Allocates a combination to the smallest dense set containing the intersection of its
/// propositions.
///
/// The dense sets above a proposition need not have a unique minimal element. In that case, the
/// allocation is considered to be undefined and an [`Error::Ambiguous`] is returned.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct MinimalDenseSet;
impl Allocation for MinimalDenseSet {
    #[inline]
    fn name(&self) -> &'static str { "minimal_dense_set" }

    fn allocate(&self, topology: &Topology, combination: &[Proposition]) -> Result<Proposition, Error> {
        if combination.is_empty() {
            return Ok(topology.full());
        }

        let intersection: Proposition = intersect_all(topology, combination);
        let mut candidates: Vec<Proposition> = topology.minimal_dense_supersets(intersection);
        if candidates.len() == 1 {
            if let Some(dense) = candidates.pop() {
                return Ok(dense);
            }
        }
        Err(Error::Ambiguous { intersection, candidates })
    }
}





/***** TESTS *****/
