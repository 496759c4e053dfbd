//! Error types for map operations.
//!
//! This module provides the error type returned when a deletion targets
//! a key that is not present in the tree. Lookups are not error cases:
//! searching a missing key returns `None`.

/// Represents an error when deleting a key that is absent from the map.
///
/// Deleting is the only fallible map operation. Unlike lookups, which
/// signal absence through `Option`, a deletion of a missing key is a
/// contract violation that callers must handle explicitly: check with
/// [`contains_key`](crate::AvlTreeMap::contains_key) first, or match on
/// the returned `Result`.
///
/// The error carries no key payload because deletions accept borrowed,
/// possibly unsized key forms that cannot be turned into an owned key.
///
/// # Examples
///
/// ```rust
/// use avlmap::{AvlTreeMap, KeyNotFoundError};
///
/// let mut map: AvlTreeMap<i32, &str> = AvlTreeMap::new();
/// assert_eq!(map.delete(&1), Err(KeyNotFoundError));
/// assert_eq!(
///     format!("{}", KeyNotFoundError),
///     "key not found in the tree"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNotFoundError;

impl std::fmt::Display for KeyNotFoundError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("key not found in the tree")
    }
}

impl std::error::Error for KeyNotFoundError {}
