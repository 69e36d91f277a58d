//  SPACE.rs
//    by Lut99
//
//  Created:
//    07 Apr 2025, 13:02:11
//  Last edited:
//    15 Apr 2025, 09:48:20
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the [`StateSpace`] (also known as the _frame of
//!   discernment_) and the [`Proposition`]s over it.
//!
//!   Because the state space is known up front and small, propositions are simply represented as
//!   bitmasks over it. Bit `i` is set if the `i`th label (in lexicographical order) is in the set.
//

use std::error;
use std::fmt::{Display, Formatter, Result as FResult};
use std::ops::{BitAnd, BitOr};

use indexmap::IndexSet;
use itertools::Itertools as _;

use crate::codec;


/***** CONSTANTS *****/
/// The maximum number of states a [`StateSpace`] can have.
pub const MAX_STATES: usize = u64::BITS as usize;





/***** ERRORS *****/
/// Defines errors originating from building or querying a [`StateSpace`].
#[derive(Debug)]
pub enum Error {
    /// The state space had no states at all.
    Empty,
    /// More states were given than fit in a [`Proposition`].
    TooManyStates { got: usize },
    /// A label was referenced that is not part of the state space.
    UnknownLabel { label: String },
    /// A given key was not a valid key.
    IllegalKey { key: String, err: codec::Error },
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::Empty => write!(f, "A state space must have at least one state"),
            Self::TooManyStates { got } => write!(f, "A state space can have at most {MAX_STATES} states, but {got} were given"),
            Self::UnknownLabel { label } => write!(f, "Label '{label}' is not a state in the state space"),
            Self::IllegalKey { key, .. } => write!(f, "Failed to decode key {key:?}"),
        }
    }
}
impl error::Error for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::IllegalKey { err, .. } => Some(err),
            Self::Empty | Self::TooManyStates { .. } | Self::UnknownLabel { .. } => None,
        }
    }
}





/***** ITERATORS *****/
/// Iterates over the indices of the states in a [`Proposition`], in ascending order.
#[derive(Clone, Debug)]
pub struct StateIter {
    /// The bits that haven't been yielded yet.
    bits: u64,
}
impl Iterator for StateIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let i: u32 = self.bits.trailing_zeros();
        self.bits &= self.bits - 1;
        Some(i as usize)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len: usize = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}
impl ExactSizeIterator for StateIter {}



/// Iterates over all subsets of a set of `n` states.
///
/// Subsets are produced per cardinality (starting at the empty set), and lexicographically by
/// state index within one cardinality. For `n = 3`, that's `{}`, `{0}`, `{1}`, `{2}`, `{0, 1}`,
/// `{0, 2}`, `{1, 2}` and then `{0, 1, 2}`.
///
/// # Arguments
/// - `n`: The number of states to build subsets of.
///
/// # Returns
/// An [`Iterator`] yielding all `2^n` [`Proposition`]s over the first `n` states.
pub fn subsets(n: usize) -> impl Iterator<Item = Proposition> {
    (0..=n).flat_map(move |size| (0..n).combinations(size).map(|states| states.into_iter().map(Proposition::singleton).fold(Proposition::EMPTY, Proposition::union)))
}





/***** LIBRARY *****/
/// Represents a subset of some [`StateSpace`].
///
/// A proposition does not know which state space it is part of. It's up to the user to not mix
/// propositions of different spaces.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Proposition(u64);

// Constructors
impl Proposition {
    /// The proposition that nothing is true.
    pub const EMPTY: Self = Self(0);

    /// Constructor for a Proposition from its raw bitmask.
    ///
    /// # Arguments
    /// - `bits`: The bitmask, where bit `i` is set if the `i`th state is in the proposition.
    ///
    /// # Returns
    /// A new Proposition.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self { Self(bits) }

    /// Constructor for a Proposition with only a single state in it.
    ///
    /// # Arguments
    /// - `index`: The index of the state in its [`StateSpace`].
    ///
    /// # Returns
    /// A new Proposition.
    ///
    /// # Panics
    /// This function panics if `index` is not smaller than [`MAX_STATES`].
    #[inline]
    pub const fn singleton(index: usize) -> Self {
        if index >= MAX_STATES {
            panic!("State index out-of-range for a Proposition");
        }
        Self(1 << index)
    }

    /// Constructor for the Proposition containing the first `n` states.
    ///
    /// # Arguments
    /// - `n`: The number of states.
    ///
    /// # Returns
    /// A new Proposition with all of the first `n` bits set.
    #[inline]
    pub const fn full(n: usize) -> Self {
        if n >= MAX_STATES { Self(u64::MAX) } else { Self((1 << n) - 1) }
    }
}

// Set operations
impl Proposition {
    /// Returns the raw bitmask of this proposition.
    #[inline]
    pub const fn bits(&self) -> u64 { self.0 }

    /// Returns the number of states in this proposition.
    #[inline]
    pub const fn len(&self) -> usize { self.0.count_ones() as usize }

    /// Returns whether this is the empty proposition.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.0 == 0 }

    /// Returns whether the `index`th state is in this proposition.
    #[inline]
    pub const fn contains(&self, index: usize) -> bool { index < MAX_STATES && self.0 & (1 << index) != 0 }

    /// Computes the set intersection of this and another proposition.
    #[inline]
    pub const fn intersection(self, other: Self) -> Self { Self(self.0 & other.0) }

    /// Computes the set union of this and another proposition.
    #[inline]
    pub const fn union(self, other: Self) -> Self { Self(self.0 | other.0) }

    /// Computes the set difference, i.e., everything in `self` but not in `other`.
    #[inline]
    pub const fn difference(self, other: Self) -> Self { Self(self.0 & !other.0) }

    /// Returns whether every state in `self` is also in `other`.
    #[inline]
    pub const fn is_subset(&self, other: &Self) -> bool { self.0 & !other.0 == 0 }

    /// Returns whether `self` and `other` share at least one state.
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool { self.0 & other.0 != 0 }

    /// Returns an iterator over the indices of the states in this proposition.
    #[inline]
    pub const fn iter(&self) -> StateIter { StateIter { bits: self.0 } }
}
impl BitAnd for Proposition {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output { self.intersection(rhs) }
}
impl BitOr for Proposition {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output { self.union(rhs) }
}
impl IntoIterator for Proposition {
    type IntoIter = StateIter;
    type Item = usize;

    #[inline]
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

// Formatting
impl Display for Proposition {
    /// Writes the proposition using state indices, e.g., `{#0, #2}`.
    ///
    /// Use [`StateSpace::display()`] to write it using labels instead.
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { write!(f, "{{{}}}", self.iter().map(|i| format!("#{i}")).join(", ")) }
}



/// Defines the set of possible states, i.e., the _frame of discernment_.
///
/// The labels are kept in lexicographical order, which decides which bit of a [`Proposition`]
/// represents which label.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateSpace {
    /// The labels of the states, sorted.
    labels: IndexSet<String>,
}

// Constructors
impl StateSpace {
    /// Constructor for the StateSpace.
    ///
    /// # Arguments
    /// - `labels`: The labels of the states in the space. Duplicates are ignored.
    ///
    /// # Returns
    /// A new StateSpace.
    ///
    /// # Errors
    /// This function errors if no labels are given, or more than [`MAX_STATES`] unique ones.
    pub fn new<I>(labels: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut labels: IndexSet<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(Error::Empty);
        }
        if labels.len() > MAX_STATES {
            return Err(Error::TooManyStates { got: labels.len() });
        }
        labels.sort();
        Ok(Self { labels })
    }
}

// Querying
impl StateSpace {
    /// Returns the number of states in this space.
    #[inline]
    pub fn len(&self) -> usize { self.labels.len() }

    /// Returns whether this space has no states. Always false for a constructed space.
    #[inline]
    pub fn is_empty(&self) -> bool { self.labels.is_empty() }

    /// Returns the proposition containing every state, i.e., `S` itself.
    #[inline]
    pub fn full(&self) -> Proposition { Proposition::full(self.labels.len()) }

    /// Returns the label of the `index`th state, if it exists.
    #[inline]
    pub fn label(&self, index: usize) -> Option<&str> { self.labels.get_index(index).map(String::as_str) }

    /// Returns the index of the state with the given label, if it exists.
    #[inline]
    pub fn index_of(&self, label: &str) -> Option<usize> { self.labels.get_index_of(label) }

    /// Returns an iterator over all labels, in order.
    #[inline]
    pub fn labels(&self) -> impl '_ + ExactSizeIterator<Item = &str> { self.labels.iter().map(String::as_str) }

    /// Returns an iterator over the labels in the given proposition, in order.
    ///
    /// # Arguments
    /// - `prop`: The [`Proposition`] to get the labels of. Bits outside of this space are ignored.
    #[inline]
    pub fn labels_of(&self, prop: Proposition) -> impl '_ + Iterator<Item = &str> { prop.iter().filter_map(|i| self.label(i)) }

    /// Builds the proposition containing the given labels.
    ///
    /// # Arguments
    /// - `labels`: The labels to put in the proposition. Duplicates are ignored.
    ///
    /// # Returns
    /// A new [`Proposition`].
    ///
    /// # Errors
    /// This function errors if any of the labels is not in this space.
    pub fn proposition<I>(&self, labels: I) -> Result<Proposition, Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut prop = Proposition::EMPTY;
        for label in labels {
            let label: &str = label.as_ref();
            match self.index_of(label) {
                Some(i) => prop = prop | Proposition::singleton(i),
                None => return Err(Error::UnknownLabel { label: label.into() }),
            }
        }
        Ok(prop)
    }

    /// Returns an iterator over every subset of this space.
    ///
    /// See [`subsets()`] for the order in which they're produced.
    #[inline]
    pub fn subsets(&self) -> impl Iterator<Item = Proposition> { subsets(self.labels.len()) }

    /// Returns an iterator over every subset of this space except for the empty one.
    #[inline]
    pub fn non_empty_subsets(&self) -> impl Iterator<Item = Proposition> { self.subsets().skip(1) }
}

// Keys
impl StateSpace {
    /// Computes the canonical key of a proposition.
    ///
    /// # Arguments
    /// - `prop`: The [`Proposition`] to encode.
    ///
    /// # Returns
    /// Its key, as [`codec::encode()`] would write it for its labels.
    #[inline]
    pub fn key(&self, prop: Proposition) -> String { codec::encode_sorted(self.labels_of(prop)) }

    /// Recovers a proposition from its canonical key.
    ///
    /// # Arguments
    /// - `key`: The key to decode.
    ///
    /// # Returns
    /// The [`Proposition`] encoded by the key.
    ///
    /// # Errors
    /// This function errors if the key is malformed, or if it mentions labels outside of this space.
    pub fn parse_key(&self, key: &str) -> Result<Proposition, Error> {
        let labels = codec::decode(key).map_err(|err| Error::IllegalKey { key: key.into(), err })?;
        self.proposition(labels)
    }

    /// Returns a formatter that writes a proposition by its key.
    ///
    /// # Arguments
    /// - `prop`: The [`Proposition`] to write.
    ///
    /// # Returns
    /// A [`PropositionDisplay`] that implements [`Display`].
    #[inline]
    pub fn display(&self, prop: Proposition) -> PropositionDisplay<'_> { PropositionDisplay { space: self, prop } }
}



/// Writes a [`Proposition`] using the labels of its [`StateSpace`].
#[derive(Clone, Copy, Debug)]
pub struct PropositionDisplay<'s> {
    space: &'s StateSpace,
    prop:  Proposition,
}
impl Display for PropositionDisplay<'_> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { f.write_str(&self.space.key(self.prop)) }
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::make_space;


    #[test]
    fn test_space_sorts_labels() {
        let space: StateSpace = make_space(["sp", "dp", "dm"]);
        assert_eq!(space.labels().collect::<Vec<_>>(), vec!["dm", "dp", "sp"]);
        assert_eq!(space.index_of("dp"), Some(1));
        assert_eq!(space.label(2), Some("sp"));
        assert_eq!(space.full(), Proposition::from_bits(0b111));
    }

    #[test]
    fn test_space_errors() {
        assert!(matches!(StateSpace::new(Vec::<String>::new()), Err(Error::Empty)));
        assert!(matches!(StateSpace::new((0..65).map(|i| format!("s{i}"))), Err(Error::TooManyStates { got: 65 })));
        assert_eq!(StateSpace::new((0..64).map(|i| format!("s{i}"))).unwrap().full(), Proposition::from_bits(u64::MAX));

        let space: StateSpace = make_space(["a", "b"]);
        assert!(matches!(space.proposition(["a", "c"]), Err(Error::UnknownLabel { label }) if label == "c"));
        assert!(matches!(space.parse_key("{'b', 'a'}"), Err(Error::IllegalKey { .. })));
        assert!(matches!(space.parse_key("{'c'}"), Err(Error::UnknownLabel { .. })));
    }

    #[test]
    fn test_proposition_set_operations() {
        let a = Proposition::from_bits(0b0110);
        let b = Proposition::from_bits(0b0011);
        assert_eq!(a & b, Proposition::from_bits(0b0010));
        assert_eq!(a | b, Proposition::from_bits(0b0111));
        assert_eq!(a.difference(b), Proposition::from_bits(0b0100));
        assert!(Proposition::from_bits(0b0010).is_subset(&a));
        assert!(!b.is_subset(&a));
        assert!(Proposition::EMPTY.is_subset(&a));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&Proposition::from_bits(0b1000)));
        assert_eq!(a.len(), 2);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(a.to_string(), "{#1, #2}");
    }

    #[test]
    fn test_keys() {
        let space: StateSpace = make_space(["sp", "dp", "dm"]);
        let prop: Proposition = space.proposition(["sp", "dm"]).unwrap();
        assert_eq!(space.key(prop), "{'dm', 'sp'}");
        assert_eq!(space.parse_key("{'dm', 'sp'}").unwrap(), prop);
        assert_eq!(space.key(Proposition::EMPTY), "{}");
        assert_eq!(space.display(space.full()).to_string(), "{'dm', 'dp', 'sp'}");
        for prop in space.subsets() {
            assert_eq!(space.parse_key(&space.key(prop)).unwrap(), prop);
        }
    }

    #[test]
    fn test_subsets() {
        let subs: Vec<Proposition> = subsets(3).collect();
        assert_eq!(subs.len(), 8);
        assert_eq!(subs[0], Proposition::EMPTY);
        assert_eq!(subs[1..4], [Proposition::singleton(0), Proposition::singleton(1), Proposition::singleton(2)]);
        assert_eq!(subs[4], Proposition::from_bits(0b011));
        assert_eq!(subs[7], Proposition::full(3));
        assert!(subs.windows(2).all(|w| w[0].len() <= w[1].len()));

        let space: StateSpace = make_space(["a", "b", "c", "d"]);
        assert_eq!(space.non_empty_subsets().count(), 15);
        assert!(space.non_empty_subsets().all(|p| !p.is_empty()));
    }
}
