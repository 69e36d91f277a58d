//  MODEL.rs
//    by Lut99
//
//  Created:
//    09 Apr 2025, 14:02:19
//  Last edited:
//    16 Apr 2025, 10:27:41
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the multi-layer [`BeliefModel`], which computes degrees of
//!   belief from a set of pieces of evidence.
//!
//!   The model is built in layers, each computed from the previous one:
//!   1. **Delta (Δ)**: every [`Combination`] of pieces of evidence is assigned the probability
//!      that exactly those pieces hold.
//!   2. **Delta-tau (Δτ)**: every combination is mapped to the proposition it supports by an
//!      [`Allocation`], summing the weights of combinations supporting the same proposition.
//!   3. **Delta-J (ΔJ)**: the weights of propositions in the [`JustificationFrame`] are
//!      normalized such that they sum to 1; everything else is discarded.
//!   4. **Degree of belief**: the belief in a proposition is the sum of the normalized weights of
//!      all justified propositions implying it.
//!
//!   Every layer is computed lazily and cached in the model until it is [reset](BeliefModel::reset()).
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

#[cfg(feature = "log")]
use enum_debug::EnumDebug as _;
use indexmap::IndexMap;

use crate::allocation::{self, Allocation};
use crate::evidence::{Combination, Evidence};
use crate::frame::JustificationFrame;
use crate::log::{debug, trace};
use crate::space::{Proposition, StateSpace};
use crate::topology::Topology;


/***** ERRORS *****/
/// Defines errors originating from computing a [`BeliefModel`].
#[derive(Debug)]
pub enum Error {
    /// Failed to allocate a combination of evidence.
    Allocation { comb: Combination, err: allocation::Error },
    /// No weight ended up in the justification frame, so there is nothing to normalize.
    Degenerate { frame: JustificationFrame },
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Allocation { comb, .. } => write!(f, "Failed to allocate combination {comb} of evidence"),
            Self::Degenerate { frame } => {
                write!(f, "No combination of evidence supports a proposition justified by the {frame} frame (normalization factor is zero)")
            },
        }
    }
}
impl error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Allocation { err, .. } => Some(err),
            Self::Degenerate { .. } => None,
        }
    }
}





/***** AUXILLARY *****/
/// The normalized weights of all justified propositions (the ΔJ-layer of a [`BeliefModel`]).
///
/// Once computed, this can answer belief queries without needing mutable access to the model.
#[derive(Clone, Debug, PartialEq)]
pub struct JustifiedMasses {
    /// The normalized weight per justified proposition.
    masses: IndexMap<Proposition, f64>,
    /// The total weight of the justified propositions before normalization.
    normalization: f64,
}
impl JustifiedMasses {
    /// Normalizes the weights of the justified propositions.
    ///
    /// # Arguments
    /// - `delta_tau`: The aggregated weight per proposition.
    /// - `justified`: The propositions in the justification frame.
    /// - `frame`: The frame that `justified` was derived from, for error reporting.
    ///
    /// # Returns
    /// A new JustifiedMasses with an entry for every justified proposition in `delta_tau`.
    ///
    /// # Errors
    /// This function errors if the justified propositions have no weight at all.
    fn normalize(delta_tau: &IndexMap<Proposition, f64>, justified: &[Proposition], frame: JustificationFrame) -> Result<Self, Error> {
        let normalization: f64 = justified.iter().filter_map(|prop| delta_tau.get(prop)).sum();
        if normalization == 0.0 {
            return Err(Error::Degenerate { frame });
        }
        let masses: IndexMap<Proposition, f64> =
            justified.iter().filter_map(|prop| delta_tau.get(prop).map(|weight| (*prop, weight / normalization))).collect();
        Ok(Self { masses, normalization })
    }

    /// Computes the degree of belief in a proposition.
    ///
    /// # Arguments
    /// - `prop`: The [`Proposition`] to compute the belief of.
    ///
    /// # Returns
    /// The sum of the weights of all justified propositions that are a subset of `prop`.
    #[inline]
    pub fn belief(&self, prop: Proposition) -> f64 { self.masses.iter().filter(|(just, _)| just.is_subset(&prop)).map(|(_, mass)| mass).sum() }

    /// Computes the plausibility of a proposition.
    ///
    /// # Arguments
    /// - `prop`: The [`Proposition`] to compute the plausibility of.
    ///
    /// # Returns
    /// The sum of the weights of all justified propositions that are consistent with `prop`.
    #[inline]
    pub fn plausibility(&self, prop: Proposition) -> f64 {
        self.masses.iter().filter(|(just, _)| just.intersects(&prop)).map(|(_, mass)| mass).sum()
    }

    /// Returns the normalized weight of a justified proposition, if it has any.
    #[inline]
    pub fn get(&self, prop: Proposition) -> Option<f64> { self.masses.get(&prop).copied() }

    /// Returns the total weight of the justified propositions before normalization.
    #[inline]
    pub const fn normalization(&self) -> f64 { self.normalization }

    /// Returns the number of justified propositions with weight.
    #[inline]
    pub fn len(&self) -> usize { self.masses.len() }

    /// Returns whether no justified proposition has weight.
    #[inline]
    pub fn is_empty(&self) -> bool { self.masses.is_empty() }

    /// Returns an iterator over the justified propositions and their normalized weights.
    #[inline]
    pub fn iter(&self) -> impl '_ + ExactSizeIterator<Item = (Proposition, f64)> { self.masses.iter().map(|(p, m)| (*p, *m)) }
}





/***** LIBRARY *****/
/// A multi-layer belief model over some [`Evidence`].
///
/// The model is parameterized by a [`JustificationFrame`] and an [`Allocation`]. Some notable
/// configurations are:
/// - [`JustificationFrame::DempsterShafer`] with [`Intersection`](crate::allocation::Intersection),
///   which computes Dempster's rule of combination;
/// - [`JustificationFrame::DempsterShafer`] with [`MinimalDenseSet`](crate::allocation::MinimalDenseSet);
///   and
/// - [`JustificationFrame::StrongDenseness`] with [`MinimalDenseSet`](crate::allocation::MinimalDenseSet),
///   which computes the belief of topological evidence models if all evidence has the same mass.
///
/// # Example
/// ```rust
/// use belief_models::allocation::Intersection;
/// use belief_models::evidence::Evidence;
/// use belief_models::frame::JustificationFrame;
/// use belief_models::model::BeliefModel;
/// use belief_models::space::StateSpace;
///
/// let space = StateSpace::new(["dp", "sp", "dm"]).unwrap();
/// let evidence = Evidence::from_keys(&space, [("{'dm', 'dp'}", 0.8), ("{'sp'}", 0.4)]).unwrap();
/// let mut model = BeliefModel::new(space.clone(), evidence, JustificationFrame::DempsterShafer, Intersection);
///
/// let belief = model.belief(space.proposition(["dp", "dm"]).unwrap()).unwrap();
/// assert!((belief - 0.48 / 0.68).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct BeliefModel<A> {
    /// The possible states.
    space:      StateSpace,
    /// The evidence to reason with.
    evidence:   Evidence,
    /// Decides which propositions are justified.
    frame:      JustificationFrame,
    /// Decides which proposition a combination of evidence supports.
    allocation: A,

    /// The topology generated by the evidence, if computed.
    topology:  Option<Topology>,
    /// The weight per combination of evidence, if computed.
    delta:     Option<IndexMap<Combination, f64>>,
    /// The aggregated weight per supported proposition, if computed.
    delta_tau: Option<IndexMap<Proposition, f64>>,
    /// The normalized weight per justified proposition, if computed.
    delta_j:   Option<JustifiedMasses>,
}

// Constructors
impl<A> BeliefModel<A> {
    /// Constructor for the BeliefModel.
    ///
    /// Nothing is computed yet; this happens lazily when layers are queried.
    ///
    /// # Arguments
    /// - `space`: The [`StateSpace`] of possible states.
    /// - `evidence`: The [`Evidence`] to reason with. Its propositions must be over `space`.
    /// - `frame`: The [`JustificationFrame`] to use.
    /// - `allocation`: The [`Allocation`] to use.
    ///
    /// # Returns
    /// A new BeliefModel.
    #[inline]
    pub fn new(space: StateSpace, evidence: Evidence, frame: JustificationFrame, allocation: A) -> Self {
        Self { space, evidence, frame, allocation, topology: None, delta: None, delta_tau: None, delta_j: None }
    }
}

// Configuration
impl<A> BeliefModel<A> {
    /// Returns the state space this model reasons over.
    #[inline]
    pub const fn space(&self) -> &StateSpace { &self.space }

    /// Returns the evidence this model reasons with.
    #[inline]
    pub const fn evidence(&self) -> &Evidence { &self.evidence }

    /// Returns the justification frame of this model.
    #[inline]
    pub const fn frame(&self) -> JustificationFrame { self.frame }

    /// Returns the allocation of this model.
    #[inline]
    pub const fn allocation(&self) -> &A { &self.allocation }

    /// Clears all computed layers, such that they will be re-computed on the next query.
    #[inline]
    pub fn reset(&mut self) {
        self.topology = None;
        self.delta = None;
        self.delta_tau = None;
        self.delta_j = None;
    }
}

// Layers
impl<A: Allocation> BeliefModel<A> {
    /// Returns the topology generated by the evidence.
    #[inline]
    pub fn topology(&mut self) -> &Topology { self.topology.get_or_insert_with(|| Topology::generate(&self.space, self.evidence.propositions())) }

    /// Returns the Δ-layer, i.e., the weight of every combination of evidence.
    ///
    /// # Returns
    /// A map from every [`Combination`] to the probability that exactly its pieces hold. Sums to 1.
    pub fn delta(&mut self) -> &IndexMap<Combination, f64> {
        self.delta.get_or_insert_with(|| {
            let delta: IndexMap<Combination, f64> = self.evidence.combinations().map(|comb| (comb, comb.weight(&self.evidence))).collect();
            debug!("Computed delta over {} combination(s) of {} piece(s) of evidence", delta.len(), self.evidence.len());
            delta
        })
    }

    /// Returns the Δτ-layer, i.e., the aggregated weight of every supported proposition.
    ///
    /// # Returns
    /// A map from every [`Proposition`] supported by some combination to the total weight of those
    /// combinations. Note that this may include the empty proposition.
    ///
    /// # Errors
    /// This function errors if the [`Allocation`] fails for any combination.
    pub fn delta_tau(&mut self) -> Result<&IndexMap<Proposition, f64>, Error> {
        let delta_tau: IndexMap<Proposition, f64> = match self.delta_tau.take() {
            Some(delta_tau) => delta_tau,
            None => {
                let topology: &Topology = self.topology.get_or_insert_with(|| Topology::generate(&self.space, self.evidence.propositions()));
                let delta: &IndexMap<Combination, f64> =
                    self.delta.get_or_insert_with(|| self.evidence.combinations().map(|comb| (comb, comb.weight(&self.evidence))).collect());

                let mut delta_tau: IndexMap<Proposition, f64> = IndexMap::new();
                for (comb, weight) in delta {
                    let props: Vec<Proposition> = comb.propositions(&self.evidence);
                    let target: Proposition =
                        self.allocation.allocate(topology, &props).map_err(|err| Error::Allocation { comb: *comb, err })?;
                    trace!("Allocated combination {comb} (weight {weight}) to {}", self.space.display(target));
                    *delta_tau.entry(target).or_insert(0.0) += weight;
                }
                debug!("Computed delta-tau using {} allocation ({} supported proposition(s))", self.allocation.name(), delta_tau.len());
                delta_tau
            },
        };
        let delta_tau: &IndexMap<Proposition, f64> = self.delta_tau.insert(delta_tau);
        Ok(delta_tau)
    }

    /// Returns the propositions justified by this model's frame in its topology.
    #[inline]
    pub fn justification_frame(&mut self) -> Vec<Proposition> {
        let frame: JustificationFrame = self.frame;
        self.topology().justification_frame(frame)
    }

    /// Returns the ΔJ-layer, i.e., the normalized weights of the justified propositions.
    ///
    /// # Errors
    /// This function errors if the Δτ-layer could not be computed, or if none of its weight is
    /// justified.
    pub fn delta_j(&mut self) -> Result<&JustifiedMasses, Error> {
        let delta_j: JustifiedMasses = match self.delta_j.take() {
            Some(delta_j) => delta_j,
            None => {
                let frame: JustificationFrame = self.frame;
                let justified: Vec<Proposition> = self.justification_frame();
                let delta_j: JustifiedMasses = JustifiedMasses::normalize(self.delta_tau()?, &justified, frame)?;
                debug!(
                    "Computed delta-J using {:?} frame ({} justified proposition(s), normalization factor {}, sum {})",
                    frame.variant(),
                    delta_j.len(),
                    delta_j.normalization(),
                    delta_j.iter().map(|(_, mass)| mass).sum::<f64>()
                );
                delta_j
            },
        };
        let delta_j: &JustifiedMasses = self.delta_j.insert(delta_j);
        Ok(delta_j)
    }

    /// Returns the total weight of the justified propositions, i.e., what ΔJ is normalized by.
    ///
    /// # Errors
    /// This function errors if the ΔJ-layer could not be computed.
    #[inline]
    pub fn normalization_factor(&mut self) -> Result<f64, Error> { Ok(self.delta_j()?.normalization()) }

    /// Returns the weight allocated to the empty proposition.
    ///
    /// With [`Intersection`](crate::allocation::Intersection) allocation, this is the _conflict_
    /// between the pieces of evidence.
    ///
    /// # Errors
    /// This function errors if the Δτ-layer could not be computed.
    #[inline]
    pub fn conflict(&mut self) -> Result<f64, Error> { Ok(self.delta_tau()?.get(&Proposition::EMPTY).copied().unwrap_or(0.0)) }
}

// Querying
impl<A: Allocation> BeliefModel<A> {
    /// Computes the degree of belief in a proposition.
    ///
    /// # Arguments
    /// - `prop`: The [`Proposition`] to compute the belief of.
    ///
    /// # Returns
    /// A number in `[0, 1]`.
    ///
    /// # Errors
    /// This function errors if the ΔJ-layer could not be computed.
    #[inline]
    pub fn belief(&mut self, prop: Proposition) -> Result<f64, Error> { Ok(self.delta_j()?.belief(prop)) }

    /// Computes the plausibility of a proposition.
    ///
    /// # Arguments
    /// - `prop`: The [`Proposition`] to compute the plausibility of.
    ///
    /// # Returns
    /// A number in `[0, 1]` that is at least the belief in `prop`.
    ///
    /// # Errors
    /// This function errors if the ΔJ-layer could not be computed.
    #[inline]
    pub fn plausibility(&mut self, prop: Proposition) -> Result<f64, Error> { Ok(self.delta_j()?.plausibility(prop)) }
}





/***** TESTS *****/
