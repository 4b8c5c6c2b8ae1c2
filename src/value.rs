use std::fmt::{Debug, Display};
use std::str::FromStr;

/// Bound for values stored in a [`Tree`](crate::arena::Tree).
///
/// `Ord` makes a value usable as a lookup key during construction, `Display`
/// is the canonical text used by both the renderer and the codec, and
/// `FromStr` reads that text back when deserializing.
pub trait NodeValue: Ord + Clone + Display + Debug + FromStr {}

impl<T> NodeValue for T where T: Ord + Clone + Display + Debug + FromStr {}
