//  EVIDENCE.rs
//    by Lut99
//
//  Created:
//    07 Apr 2025, 15:37:52
//  Last edited:
//    15 Apr 2025, 11:05:40
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the quantitative [`Evidence`] that the belief models reason
//!   about, together with [`Combination`]s of it.
//!
//!   Every piece of evidence is treated as an independent, probabilistic commitment to its
//!   proposition. Masses therefore do not have to sum to 1 over all pieces.
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};

use indexmap::IndexMap;
use itertools::Itertools as _;

use crate::log::warn;
use crate::space::{self, Proposition, StateSpace};


/***** CONSTANTS *****/
/// The maximum number of pieces of evidence that can be combined.
pub const MAX_EVIDENCE: usize = u64::BITS as usize;





/***** ERRORS *****/
/// Defines errors originating from building [`Evidence`].
#[derive(Debug)]
pub enum Error {
    /// Adding a piece of evidence would exceed [`MAX_EVIDENCE`].
    TooMuchEvidence,
    /// The proposition of a piece of evidence could not be read.
    IllegalProposition { key: String, err: space::Error },
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::TooMuchEvidence => write!(f, "Cannot combine more than {MAX_EVIDENCE} pieces of evidence"),
            Self::IllegalProposition { key, .. } => write!(f, "Failed to read proposition {key:?} of piece of evidence"),
        }
    }
}
impl error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::TooMuchEvidence => None,
            Self::IllegalProposition { err, .. } => Some(err),
        }
    }
}





/***** LIBRARY *****/
/// A set of pieces of quantitative evidence.
///
/// Every piece maps a [`Proposition`] to its mass, which should be in `[0, 1]`. There is at most
/// one piece per proposition. The order of insertion is preserved, which only matters for the
/// order in which [`Combination`]s are produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Evidence {
    /// The pieces of evidence.
    items: IndexMap<Proposition, f64>,
}

// Constructors
impl Evidence {
    /// Constructor for Evidence that initializes it without any pieces.
    ///
    /// # Returns
    /// A new, empty Evidence.
    #[inline]
    pub fn new() -> Self { Self { items: IndexMap::new() } }

    /// Constructor for Evidence that reads it from canonical keys.
    ///
    /// # Arguments
    /// - `space`: The [`StateSpace`] to interpret the keys in.
    /// - `items`: Pairs of a [canonical key](crate::codec) and its mass.
    ///
    /// # Returns
    /// A new Evidence with the given pieces in it.
    ///
    /// # Errors
    /// This function errors if any key is malformed or mentions unknown labels, or if there are
    /// more than [`MAX_EVIDENCE`] pieces.
    pub fn from_keys<I, K>(space: &StateSpace, items: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut evidence = Self::new();
        for (key, mass) in items {
            let key: &str = key.as_ref();
            let prop: Proposition = space.parse_key(key).map_err(|err| Error::IllegalProposition { key: key.into(), err })?;
            evidence.insert(prop, mass)?;
        }
        Ok(evidence)
    }
}

// Collection
impl Evidence {
    /// Adds a new piece of evidence.
    ///
    /// Masses outside of `[0, 1]` are not rejected, but the resulting weights are meaningless.
    ///
    /// # Arguments
    /// - `prop`: The [`Proposition`] that the evidence supports.
    /// - `mass`: The mass of the evidence.
    ///
    /// # Returns
    /// The mass previously assigned to `prop`, if any.
    ///
    /// # Errors
    /// This function errors if `prop` is new and there already are [`MAX_EVIDENCE`] pieces.
    pub fn insert(&mut self, prop: Proposition, mass: f64) -> Result<Option<f64>, Error> {
        if !self.items.contains_key(&prop) && self.items.len() >= MAX_EVIDENCE {
            return Err(Error::TooMuchEvidence);
        }
        if !(0.0..=1.0).contains(&mass) {
            warn!("Mass {mass} of evidence for {prop} is not in [0, 1]");
        }
        let old: Option<f64> = self.items.insert(prop, mass);
        #[cfg(feature = "log")]
        if let Some(old) = old {
            warn!("Overwriting mass {old} of evidence for {prop} with {mass}");
        }
        Ok(old)
    }

    /// Returns the number of pieces of evidence.
    #[inline]
    pub fn len(&self) -> usize { self.items.len() }

    /// Returns whether there are no pieces of evidence.
    #[inline]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Returns the mass of the evidence for the given proposition, if any.
    #[inline]
    pub fn get(&self, prop: Proposition) -> Option<f64> { self.items.get(&prop).copied() }

    /// Returns the `index`th piece of evidence, if any.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(Proposition, f64)> { self.items.get_index(index).map(|(p, m)| (*p, *m)) }

    /// Returns an iterator over all pieces of evidence, in order.
    #[inline]
    pub fn iter(&self) -> impl '_ + ExactSizeIterator<Item = (Proposition, f64)> { self.items.iter().map(|(p, m)| (*p, *m)) }

    /// Returns an iterator over the propositions of all pieces of evidence, in order.
    #[inline]
    pub fn propositions(&self) -> impl '_ + ExactSizeIterator<Item = Proposition> { self.items.keys().copied() }
}

// Combining
impl Evidence {
    /// Returns an iterator over every combination of pieces of evidence.
    ///
    /// There are `2^n` of them for `n` pieces. They are produced per size (starting at the empty
    /// combination), and lexicographically by index within one size.
    ///
    /// # Returns
    /// An [`Iterator`] yielding [`Combination`]s.
    pub fn combinations(&self) -> impl Iterator<Item = Combination> {
        let n: usize = self.items.len();
        (0..=n).flat_map(move |size| (0..n).combinations(size).map(|indices| indices.into_iter().fold(Combination::EMPTY, Combination::with)))
    }
}



/// A selection of pieces from some [`Evidence`].
///
/// Like a [`Proposition`], this is a bitmask; bit `i` is set if the `i`th piece of evidence is
/// selected.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Combination(u64);
impl Combination {
    /// The combination that selects nothing.
    pub const EMPTY: Self = Self(0);

    /// Returns a copy of this combination that also selects the `index`th piece.
    ///
    /// # Panics
    /// This function panics if `index` is not smaller than [`MAX_EVIDENCE`].
    #[inline]
    #[track_caller]
    pub fn with(self, index: usize) -> Self {
        assert!(index < MAX_EVIDENCE, "Evidence index {index} out-of-range for a Combination");
        Self(self.0 | (1 << index))
    }

    /// Returns the number of selected pieces.
    #[inline]
    pub const fn len(&self) -> usize { self.0.count_ones() as usize }

    /// Returns whether nothing is selected.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.0 == 0 }

    /// Returns whether the `index`th piece is selected.
    #[inline]
    pub const fn contains(&self, index: usize) -> bool { index < MAX_EVIDENCE && self.0 & (1 << index) != 0 }

    /// Returns the propositions of the selected pieces of evidence.
    ///
    /// # Arguments
    /// - `evidence`: The [`Evidence`] this combination selects from.
    ///
    /// # Returns
    /// A list of [`Proposition`]s, in the order of the evidence.
    pub fn propositions(&self, evidence: &Evidence) -> Vec<Proposition> {
        evidence.propositions().enumerate().filter(|(i, _)| self.contains(*i)).map(|(_, p)| p).collect()
    }

    /// Computes the weight of this combination.
    ///
    /// This is the probability that exactly the selected pieces of evidence hold, i.e., the
    /// product of the masses of the selected pieces and of `1 - mass` of all others.
    ///
    /// # Arguments
    /// - `evidence`: The [`Evidence`] this combination selects from.
    ///
    /// # Returns
    /// The weight of the combination.
    pub fn weight(&self, evidence: &Evidence) -> f64 {
        evidence.iter().enumerate().map(|(i, (_, mass))| if self.contains(i) { mass } else { 1.0 - mass }).product()
    }
}
impl Display for Combination {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        write!(f, "[{}]", (0..MAX_EVIDENCE).filter(|i| self.contains(*i)).map(|i| format!("e{i}")).join(", "))
    }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::tests::{make_evidence, make_space};


    #[test]
    fn test_evidence_from_keys() {
        #[cfg(feature = "log")]
        crate::tests::setup_logger();

        let space: StateSpace = make_space(["dp", "sp", "dm"]);
        let evidence: Evidence = Evidence::from_keys(&space, [("{'dm', 'dp'}", 0.8), ("{'sp'}", 0.4)]).unwrap();
        assert_eq!(evidence.len(), 2);
        assert_eq!(evidence.get(space.proposition(["dp", "dm"]).unwrap()), Some(0.8));
        assert_eq!(evidence.get_index(1), Some((space.proposition(["sp"]).unwrap(), 0.4)));

        assert!(matches!(Evidence::from_keys(&space, [("{'dp', 'dm'}", 0.8)]), Err(Error::IllegalProposition { .. })));
        assert!(matches!(Evidence::from_keys(&space, [("{'xx'}", 0.8)]), Err(Error::IllegalProposition { .. })));
    }

    #[test]
    fn test_evidence_insert_overwrites() {
        let mut evidence = Evidence::new();
        assert_eq!(evidence.insert(Proposition::from_bits(0b01), 0.3).unwrap(), None);
        assert_eq!(evidence.insert(Proposition::from_bits(0b01), 0.6).unwrap(), Some(0.3));
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence.get(Proposition::from_bits(0b01)), Some(0.6));
    }

    #[test]
    fn test_evidence_limit() {
        let mut evidence = Evidence::new();
        for i in 0..MAX_EVIDENCE {
            evidence.insert(Proposition::from_bits(i as u64 + 1), 0.5).unwrap();
        }
        assert!(matches!(evidence.insert(Proposition::from_bits(u64::MAX), 0.5), Err(Error::TooMuchEvidence)));
        // Overwriting is still fine
        assert!(evidence.insert(Proposition::from_bits(1), 0.25).is_ok());
    }

    #[test]
    fn test_combinations() {
        let evidence: Evidence = make_evidence([(0b001, 0.5), (0b010, 0.5), (0b100, 0.5)]);
        let combs: Vec<Combination> = evidence.combinations().collect();
        assert_eq!(combs.len(), 8);
        assert_eq!(combs[0], Combination::EMPTY);
        assert_eq!(combs[1], Combination::EMPTY.with(0));
        assert_eq!(combs[4], Combination::EMPTY.with(0).with(1));
        assert_eq!(combs[7].len(), 3);
        assert_eq!(combs[4].to_string(), "[e0, e1]");
        assert_eq!(combs[4].propositions(&evidence), vec![Proposition::from_bits(0b001), Proposition::from_bits(0b010)]);

        assert_eq!(Evidence::new().combinations().collect::<Vec<_>>(), vec![Combination::EMPTY]);
    }

    #[test]
    fn test_combination_weights_sum_to_one() {
        let evidence: Evidence = make_evidence([(0b00111, 0.9), (0b01010, 0.75), (0b10001, 0.45)]);
        let weights: Vec<f64> = evidence.combinations().map(|c| c.weight(&evidence)).collect();
        assert!(weights.iter().all(|w| *w >= 0.0));
        assert_abs_diff_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        // Nothing selected
        assert_abs_diff_eq!(weights[0], 0.1 * 0.25 * 0.55, epsilon = 1e-12);
        // Everything selected
        assert_abs_diff_eq!(weights[7], 0.9 * 0.75 * 0.45, epsilon = 1e-12);
    }
}
