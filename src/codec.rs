//  CODEC.rs
//    by Lut99
//
//  Created:
//    07 Apr 2025, 11:20:45
//  Last edited:
//    14 Apr 2025, 10:11:02
//  Auto updated?
//    Yes
//
//  Description:
//!   Implements the canonical string encoding of sets of labels.
//!
//!   Every set of labels has exactly one key, looking like `{'dm', 'dp'}`. The labels are sorted
//!   lexicographically, single-quoted and separated by a comma and a space. The empty set is
//!   written as `{}`. Backslashes and quotes in labels are escaped with a backslash.
//!
//!   Internally, the crate does not use these keys (see [`Proposition`](crate::space::Proposition)).
//!   They only appear at the edges, i.e., when reading evidence or reporting beliefs.
//

use std::collections::BTreeSet;
use std::error;
use std::fmt::{Display, Formatter, Result as FResult};
use std::iter::Peekable;
use std::str::CharIndices;


/***** ERRORS *****/
/// Defines the ways in which a key may be malformed.
///
/// Every variant carries the byte offset in the key at which the problem was found.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The key did not start with an opening curly bracket.
    ExpectedOpen { pos: usize },
    /// The key ended before its closing curly bracket.
    ExpectedClose { pos: usize },
    /// Expected the opening quote of a label.
    ExpectedQuote { pos: usize },
    /// A label was opened but never closed.
    UnterminatedLabel { pos: usize },
    /// An escape sequence other than `\\` or `\'` was found.
    IllegalEscape { pos: usize, c: char },
    /// Expected either `", "` or `}` after a label.
    ExpectedSeparator { pos: usize },
    /// There was more input after the closing curly bracket.
    TrailingInput { pos: usize },
    /// The labels were not in strictly ascending order (which also covers duplicates).
    NotCanonical { pos: usize, label: String, prev: String },
}
impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        match self {
            Self::ExpectedOpen { pos } => write!(f, "Expected '{{' at position {pos}"),
            Self::ExpectedClose { pos } => write!(f, "Expected '}}' at position {pos}"),
            Self::ExpectedQuote { pos } => write!(f, "Expected a quoted label at position {pos}"),
            Self::UnterminatedLabel { pos } => write!(f, "Label starting at position {pos} is never closed"),
            Self::IllegalEscape { pos, c } => write!(f, "Illegal escape sequence '\\{c}' at position {pos}"),
            Self::ExpectedSeparator { pos } => write!(f, "Expected ', ' or '}}' at position {pos}"),
            Self::TrailingInput { pos } => write!(f, "Unexpected input after closing '}}' at position {pos}"),
            Self::NotCanonical { pos, label, prev } => {
                write!(f, "Label '{label}' at position {pos} does not come strictly after '{prev}' (key is not canonical)")
            },
        }
    }
}
impl error::Error for Error {}





/***** HELPERS *****/
/// Shorthand for the iterator we parse with.
type Chars<'k> = Peekable<CharIndices<'k>>;

/// Writes a single, already-validated label to the given key.
///
/// # Arguments
/// - `key`: The [`String`] to extend.
/// - `label`: The label to write (quoted and escaped).
fn write_label(key: &mut String, label: &str) {
    key.push('\'');
    for c in label.chars() {
        if c == '\\' || c == '\'' {
            key.push('\\');
        }
        key.push(c);
    }
    key.push('\'');
}

/// Parses a single quoted label.
///
/// # Arguments
/// - `chars`: The [`Chars`] to parse from. Should be positioned on the opening quote.
/// - `len`: The total length of the key, used to report errors at the end of it.
///
/// # Returns
/// A tuple with the position of the label's opening quote and the unescaped label.
///
/// # Errors
/// This function errors if the next thing in `chars` is not a valid label.
fn decode_label(chars: &mut Chars, len: usize) -> Result<(usize, String), Error> {
    let start: usize = match chars.next() {
        Some((pos, '\'')) => pos,
        Some((pos, _)) => return Err(Error::ExpectedQuote { pos }),
        None => return Err(Error::ExpectedQuote { pos: len }),
    };

    let mut label = String::new();
    loop {
        match chars.next() {
            Some((_, '\'')) => return Ok((start, label)),
            Some((pos, '\\')) => match chars.next() {
                Some((_, c @ ('\\' | '\''))) => label.push(c),
                Some((_, c)) => return Err(Error::IllegalEscape { pos, c }),
                None => return Err(Error::UnterminatedLabel { pos: start }),
            },
            Some((_, c)) => label.push(c),
            None => return Err(Error::UnterminatedLabel { pos: start }),
        }
    }
}

/// Writes a key for labels that are known to be sorted and unique.
///
/// # Arguments
/// - `labels`: The labels to write, in order.
///
/// # Returns
/// The canonical key of the set of labels.
pub(crate) fn encode_sorted<'l>(labels: impl IntoIterator<Item = &'l str>) -> String {
    let mut key = String::from("{");
    for (i, label) in labels.into_iter().enumerate() {
        if i > 0 {
            key.push_str(", ");
        }
        write_label(&mut key, label);
    }
    key.push('}');
    key
}





/***** LIBRARY *****/
/// Computes the canonical key of a set of labels.
///
/// The order in which labels are given does not matter, and duplicates are ignored.
///
/// # Arguments
/// - `labels`: The labels in the set.
///
/// # Returns
/// A [`String`] that is the same for every set with the same labels.
///
/// # Example
/// ```rust
/// use belief_models::codec::encode;
///
/// assert_eq!(encode(["dp", "dm"]), "{'dm', 'dp'}");
/// assert_eq!(encode(["dm", "dp", "dm"]), "{'dm', 'dp'}");
/// assert_eq!(encode(Vec::<&str>::new()), "{}");
/// ```
pub fn encode<I>(labels: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut labels: Vec<I::Item> = labels.into_iter().collect();
    labels.sort_by(|lhs, rhs| lhs.as_ref().cmp(rhs.as_ref()));
    labels.dedup_by(|lhs, rhs| lhs.as_ref() == rhs.as_ref());
    encode_sorted(labels.iter().map(AsRef::as_ref))
}

/// Recovers the set of labels from its canonical key.
///
/// This is the exact inverse of [`encode()`]. Only canonical keys are accepted, i.e., exactly what
/// [`encode()`] would produce.
///
/// # Arguments
/// - `key`: The key to decode.
///
/// # Returns
/// The labels in the set.
///
/// # Errors
/// This function errors if the `key` is malformed or not canonical.
///
/// # Example
/// ```rust
/// use belief_models::codec::decode;
///
/// let labels = decode("{'dm', 'dp'}").unwrap();
/// assert_eq!(labels.into_iter().collect::<Vec<_>>(), vec!["dm", "dp"]);
/// assert!(decode("{'dp', 'dm'}").is_err());
/// ```
pub fn decode(key: &str) -> Result<BTreeSet<String>, Error> {
    let mut chars: Chars = key.char_indices().peekable();
    match chars.next() {
        Some((_, '{')) => {},
        Some((pos, _)) => return Err(Error::ExpectedOpen { pos }),
        None => return Err(Error::ExpectedOpen { pos: 0 }),
    }

    // Parse the labels, if any
    let mut labels: Vec<String> = Vec::new();
    if let Some((_, '}')) = chars.peek() {
        chars.next();
    } else {
        loop {
            let (pos, label) = decode_label(&mut chars, key.len())?;
            if let Some(prev) = labels.last() {
                if label <= *prev {
                    return Err(Error::NotCanonical { pos, label, prev: prev.clone() });
                }
            }
            labels.push(label);

            match chars.next() {
                Some((_, '}')) => break,
                Some((pos, ',')) => match chars.next() {
                    Some((_, ' ')) => continue,
                    Some((pos, _)) => return Err(Error::ExpectedSeparator { pos }),
                    None => return Err(Error::ExpectedSeparator { pos: pos + 1 }),
                },
                Some((pos, _)) => return Err(Error::ExpectedSeparator { pos }),
                None => return Err(Error::ExpectedClose { pos: key.len() }),
            }
        }
    }

    // Nothing may follow
    if let Some((pos, _)) = chars.next() {
        return Err(Error::TrailingInput { pos });
    }
    Ok(labels.into_iter().collect())
}





/***** TESTS *****/
#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn test_encode_order_independent() {
        assert_eq!(encode(["sp", "dp", "dm"]), encode(["dm", "sp", "dp"]));
        assert_eq!(encode(["sp", "dp", "dm"]), "{'dm', 'dp', 'sp'}");
        assert_eq!(encode(["a"]), "{'a'}");
        assert_eq!(encode(Vec::<String>::new()), "{}");
        assert_ne!(encode(["a", "b"]), encode(["a", "bb"]));
    }

    #[test]
    fn test_encode_escapes() {
        assert_eq!(encode(["it's"]), r"{'it\'s'}");
        assert_eq!(encode([r"back\slash"]), r"{'back\\slash'}");
        assert_eq!(decode(r"{'it\'s'}").unwrap().into_iter().collect::<Vec<_>>(), vec!["it's"]);
    }

    #[test]
    fn test_decode_inverts_encode() {
        for labels in [vec![], vec!["dp"], vec!["dp", "sp", "dm"], vec!["a, b", "'", "}"]] {
            let set: BTreeSet<String> = labels.iter().map(|l| l.to_string()).collect();
            let key: String = encode(&labels);
            assert_eq!(decode(&key).unwrap(), set, "Round-trip of {key:?}");
            assert_eq!(encode(decode(&key).unwrap()), key);
        }
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(decode(""), Err(Error::ExpectedOpen { pos: 0 }));
        assert_eq!(decode("'a'}"), Err(Error::ExpectedOpen { pos: 0 }));
        assert_eq!(decode("{'a'"), Err(Error::ExpectedClose { pos: 4 }));
        assert_eq!(decode("{a}"), Err(Error::ExpectedQuote { pos: 1 }));
        assert_eq!(decode("{'a}"), Err(Error::UnterminatedLabel { pos: 1 }));
        assert_eq!(decode(r"{'a\n'}"), Err(Error::IllegalEscape { pos: 3, c: 'n' }));
        assert_eq!(decode("{'a','b'}"), Err(Error::ExpectedSeparator { pos: 5 }));
        assert_eq!(decode("{'a' 'b'}"), Err(Error::ExpectedSeparator { pos: 4 }));
        assert_eq!(decode("{'a'} "), Err(Error::TrailingInput { pos: 5 }));
        assert_eq!(decode("{'a', }"), Err(Error::ExpectedQuote { pos: 6 }));
    }

    #[test]
    fn test_decode_not_canonical() {
        assert_eq!(decode("{'b', 'a'}"), Err(Error::NotCanonical { pos: 6, label: "a".into(), prev: "b".into() }));
        assert_eq!(decode("{'a', 'a'}"), Err(Error::NotCanonical { pos: 6, label: "a".into(), prev: "a".into() }));
    }
}
