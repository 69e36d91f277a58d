//  FRAME.rs
//    by Lut99
//
//  Created:
//    08 Apr 2025, 10:14:33
//  Last edited:
//    14 Apr 2025, 16:40:12
//  Auto updated?
//    Yes
//
//  Description:
//!   Defines the [`JustificationFrame`]s that decide which propositions
//!   are licensed to carry belief.
//

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FResult};
use std::str::FromStr;

use enum_debug::EnumDebug;


/***** ERRORS *****/
/// Represents that an unknown [`JustificationFrame`] was named.
#[derive(Debug)]
pub struct UnknownFrameError {
    /// The name that was given.
    pub name: String,
}
impl Display for UnknownFrameError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult {
        write!(f, "Unknown justification frame '{}' (expected '{}' or '{}')", self.name, JustificationFrame::DEMPSTER_SHAFER, JustificationFrame::STRONG_DENSENESS)
    }
}
impl Error for UnknownFrameError {}





/***** LIBRARY *****/
/// Decides which propositions may carry (normalized) belief mass.
///
/// Both are defined in terms of the [`Topology`](crate::topology::Topology) generated by the
/// evidence.
#[derive(Clone, Copy, Debug, EnumDebug, Eq, Hash, PartialEq)]
pub enum JustificationFrame {
    /// All non-empty open sets are justified.
    ///
    /// Combined with [intersection](crate::allocation::Intersection) as allocation, this gives
    /// Dempster's rule of combination.
    DempsterShafer,
    /// Only the dense sets are justified.
    StrongDenseness,
}
impl JustificationFrame {
    /// The name of [`JustificationFrame::DempsterShafer`].
    pub const DEMPSTER_SHAFER: &'static str = "dempster_shafer";
    /// The name of [`JustificationFrame::StrongDenseness`].
    pub const STRONG_DENSENESS: &'static str = "strong_denseness";

    /// Returns the name of this frame, as accepted by [`JustificationFrame::from_str()`].
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DempsterShafer => Self::DEMPSTER_SHAFER,
            Self::StrongDenseness => Self::STRONG_DENSENESS,
        }
    }
}
impl Display for JustificationFrame {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FResult { f.write_str(self.name()) }
}
impl FromStr for JustificationFrame {
    type Err = UnknownFrameError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::DEMPSTER_SHAFER => Ok(Self::DempsterShafer),
            Self::STRONG_DENSENESS => Ok(Self::StrongDenseness),
            other => Err(UnknownFrameError { name: other.into() }),
        }
    }
}





/***** TESTS *****/
