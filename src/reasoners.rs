//  REASONERS.rs
//    by Lut99
//
//  Created:
//    10 Apr 2025, 15:41:09
//  Last edited:
//    16 Apr 2025, 11:12:50
//  Auto updated?
//    Yes
//
//  Description:
//!   Provides the three named [`Reasoner`]s, i.e., the notable combinations of
//!   [`JustificationFrame`] and [`Allocation`], and string-keyed entry points
//!   for each of them.
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};
use std::str::FromStr;

use enum_debug::EnumDebug;
use indexmap::IndexMap;

use crate::allocation::{Allocation, Intersection, MinimalDenseSet};
use crate::evidence::{self, Evidence};
use crate::frame::JustificationFrame;
use crate::log::debug;
use crate::model::{self, BeliefModel};
use crate::profile::{self, BeliefProfile};
use crate::space::{self, StateSpace};


/***** ERRORS *****/
/// Represents that an unknown [`Reasoner`] was named.
#[derive(Debug)]
pub struct UnknownReasonerError {
    /// The name that was given.
    pub name: String,
}
impl Display for UnknownReasonerError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        write!(f, "Unknown reasoner '{}' (expected one of ", self.name)?;
        for (i, reasoner) in Reasoner::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{reasoner}'")?;
        }
        write!(f, ")")
    }
}
impl error::Error for UnknownReasonerError {}



/// Defines errors originating from running a [`Reasoner`] on string input.
#[derive(Debug)]
pub enum Error {
    /// Failed to build the state space.
    Space { err: space::Error },
    /// Failed to build the evidence.
    Evidence { err: evidence::Error },
    /// Failed to compute the belief model.
    Model { reasoner: Reasoner, err: model::Error },
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Space { .. } => write!(f, "Failed to build state space"),
            Self::Evidence { .. } => write!(f, "Failed to build evidence"),
            Self::Model { reasoner, .. } => write!(f, "Failed to compute the {reasoner} belief model"),
        }
    }
}
impl error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Space { err } => Some(err),
            Self::Evidence { err } => Some(err),
            Self::Model { err, .. } => Some(err),
        }
    }
}





/***** LIBRARY *****/
/// The notable configurations of a [`BeliefModel`].
#[derive(Clone, Copy, Debug, EnumDebug, Eq, Hash, PartialEq)]
pub enum Reasoner {
    /// Dempster-Shafer frame with intersection allocation, i.e., Dempster's rule of combination.
    DsInt,
    /// Dempster-Shafer frame with minimal dense set allocation.
    DsMin,
    /// Strong denseness frame with minimal dense set allocation.
    SdMin,
}
impl Reasoner {
    /// All reasoners, in the order they're usually reported.
    pub const ALL: [Self; 3] = [Self::DsInt, Self::DsMin, Self::SdMin];


    /// Returns the name of this reasoner, as accepted by [`Reasoner::from_str()`].
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DsInt => "ds_int",
            Self::DsMin => "ds_min",
            Self::SdMin => "sd_min",
        }
    }

    /// Returns the justification frame used by this reasoner.
    #[inline]
    pub const fn frame(&self) -> JustificationFrame {
        match self {
            Self::DsInt | Self::DsMin => JustificationFrame::DempsterShafer,
            Self::SdMin => JustificationFrame::StrongDenseness,
        }
    }

    /// Returns the allocation used by this reasoner.
    #[inline]
    pub fn allocation(&self) -> Box<dyn Allocation> {
        match self {
            Self::DsInt => Box::new(Intersection),
            Self::DsMin | Self::SdMin => Box::new(MinimalDenseSet),
        }
    }

    /// Builds a fresh [`BeliefModel`] with this reasoner's configuration.
    ///
    /// # Arguments
    /// - `space`: The [`StateSpace`] to reason over.
    /// - `evidence`: The [`Evidence`] to reason with.
    ///
    /// # Returns
    /// A new BeliefModel, with nothing computed yet.
    #[inline]
    pub fn model(&self, space: StateSpace, evidence: Evidence) -> BeliefModel<Box<dyn Allocation>> {
        BeliefModel::new(space, evidence, self.frame(), self.allocation())
    }

    /// Computes the [`BeliefProfile`] of the given evidence.
    ///
    /// # Arguments
    /// - `space`: The [`StateSpace`] to reason over.
    /// - `evidence`: The [`Evidence`] to reason with.
    ///
    /// # Returns
    /// The non-zero beliefs of all propositions over `space`.
    ///
    /// # Errors
    /// This function errors if the model could not be computed, e.g., because an allocation was
    /// ambiguous or no weight was justified.
    pub fn profile(&self, space: &StateSpace, evidence: &Evidence) -> Result<BeliefProfile, model::Error> {
        debug!("Running {:?} reasoner on {} piece(s) of evidence over {} state(s)", self.variant(), evidence.len(), space.len());
        let mut model = self.model(space.clone(), evidence.clone());
        profile::enumerate(&mut model)
    }

    /// Computes the beliefs of the given evidence, using string labels and keys only.
    ///
    /// # Arguments
    /// - `labels`: The labels of the states to reason over.
    /// - `evidence`: Pairs of canonical keys (see [`codec`](crate::codec)) and masses.
    ///
    /// # Returns
    /// A map from canonical keys to non-zero beliefs, ordered by ascending cardinality and
    /// descending belief.
    ///
    /// # Errors
    /// This function errors if the labels or keys are invalid, or if the model could not be
    /// computed.
    pub fn run<L, I, K>(&self, labels: L, evidence: I) -> Result<IndexMap<String, f64>, Error>
    where
        L: IntoIterator,
        L::Item: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let space: StateSpace = StateSpace::new(labels).map_err(|err| Error::Space { err })?;
        let evidence: Evidence = Evidence::from_keys(&space, evidence).map_err(|err| Error::Evidence { err })?;
        let profile: BeliefProfile = self.profile(&space, &evidence).map_err(|err| Error::Model { reasoner: *self, err })?;
        Ok(profile.to_keys(&space))
    }
}
impl Display for Reasoner {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { f.write_str(self.name()) }
}
impl FromStr for Reasoner {
    type Err = UnknownReasonerError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|reasoner| reasoner.name() == s).ok_or_else(|| UnknownReasonerError { name: s.into() })
    }
}





/***** FUNCTIONS *****/
/// Computes beliefs with Dempster's rule of combination.
///
/// See [`Reasoner::run()`] for the arguments and errors.
#[inline]
pub fn ds_int_belief_model<L, I, K>(labels: L, evidence: I) -> Result<IndexMap<String, f64>, Error>
where
    L: IntoIterator,
    L::Item: Into<String>,
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    Reasoner::DsInt.run(labels, evidence)
}

/// Computes beliefs with the Dempster-Shafer frame and minimal dense set allocation.
///
/// See [`Reasoner::run()`] for the arguments and errors.
#[inline]
pub fn ds_min_belief_model<L, I, K>(labels: L, evidence: I) -> Result<IndexMap<String, f64>, Error>
where
    L: IntoIterator,
    L::Item: Into<String>,
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    Reasoner::DsMin.run(labels, evidence)
}

/// Computes beliefs with the strong denseness frame and minimal dense set allocation.
///
/// See [`Reasoner::run()`] for the arguments and errors.
#[inline]
pub fn sd_min_belief_model<L, I, K>(labels: L, evidence: I) -> Result<IndexMap<String, f64>, Error>
where
    L: IntoIterator,
    L::Item: Into<String>,
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    Reasoner::SdMin.run(labels, evidence)
}





/***** TESTS *****/
