//! # avlmap
//!
//! A height-balanced ordered map for Rust, backed by an AVL tree.
//!
//! ## Overview
//!
//! This library provides [`AvlTreeMap`], an ordered key-value map that
//! keeps itself balanced through rotations, guaranteeing logarithmic
//! lookups, insertions, and deletions for any insertion order. It
//! includes:
//!
//! - **Ordered Operations**: `insert`, `search`, `delete`, `min`, `max`
//! - **Materialized Traversals**: inorder, preorder, postorder, and
//!   breadth-first key sequences
//! - **Standard Integration**: `FromIterator`, `Extend`, `IntoIterator`,
//!   `Debug`, `Display`, `Hash`, and friends
//! - **Explicit Failure**: deleting an absent key returns
//!   [`KeyNotFoundError`] instead of failing silently
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize and Deserialize implementations for the map
//!
//! ## Example
//!
//! ```rust
//! use avlmap::AvlTreeMap;
//!
//! let mut map = AvlTreeMap::new();
//! map.insert(10, "ten");
//! map.insert(20, "twenty");
//! map.insert(30, "thirty");
//!
//! // The third insert triggered a rotation; 20 is now the root.
//! assert_eq!(map.preorder(), vec![&20, &10, &30]);
//! assert_eq!(map.search(&10), Some(&"ten"));
//! assert_eq!(map.delete(&10), Ok("ten"));
//! assert!(map.delete(&10).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

mod error;
mod map;

pub use error::KeyNotFoundError;
pub use map::{AvlTreeMap, AvlTreeMapIntoIterator, AvlTreeMapIterator};
