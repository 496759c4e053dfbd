//! A height-balanced ordered map backed by an AVL tree.
//!
//! # Overview
//!
//! [`AvlTreeMap`] stores key-value pairs in a binary search tree that
//! rebalances itself after every mutation, so the longer of the two paths
//! below any node never exceeds the shorter one by more than a single
//! level. This guarantees `O(log n)` lookups, insertions, and deletions
//! regardless of the order in which keys arrive.
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | [`insert`](AvlTreeMap::insert) | `O(log n)` |
//! | [`search`](AvlTreeMap::search) | `O(log n)` |
//! | [`delete`](AvlTreeMap::delete) | `O(log n)` |
//! | [`len`](AvlTreeMap::len) | `O(1)` |
//! | traversals | `O(n)` |
//!
//! # Examples
//!
//! ```rust
//! use avlmap::AvlTreeMap;
//!
//! let mut map = AvlTreeMap::new();
//! map.insert(2, "two");
//! map.insert(1, "one");
//! map.insert(3, "three");
//!
//! assert_eq!(map.search(&2), Some(&"two"));
//! assert_eq!(map.inorder(), vec![&1, &2, &3]);
//! assert_eq!(map.delete(&2), Ok("two"));
//! assert!(map.delete(&2).is_err());
//! ```
//!
//! # Internal Structure
//!
//! Every node caches the height of the subtree it roots, and the map
//! caches its entry count. The tree maintains two invariants:
//!
//! - **Order**: all keys in a node's left subtree compare strictly less
//!   than the node's key, and all keys in its right subtree strictly
//!   greater. Keys are unique.
//! - **Balance**: for every node, the heights of its two subtrees differ
//!   by at most one.
//!
//! Mutations restore the balance invariant bottom-up with the four
//! classic rotations (left, right, left-right, right-left), each of
//! which is a constant-time pointer rearrangement.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::mem;

use crate::error::KeyNotFoundError;

// =============================================================================
// Node Definition
// =============================================================================

/// An owned, possibly absent subtree.
type Edge<K, V> = Option<Box<Node<K, V>>>;

/// Internal tree node with a cached subtree height.
#[derive(Clone)]
struct Node<K, V> {
    /// The key stored in this node
    key: K,
    /// The value associated with the key
    value: V,
    /// Height of the subtree rooted here (a leaf has height 1)
    height: usize,
    /// Left subtree, holding strictly smaller keys
    left: Edge<K, V>,
    /// Right subtree, holding strictly greater keys
    right: Edge<K, V>,
}

impl<K, V> Node<K, V> {
    /// Creates a new leaf node.
    const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        }
    }

    /// Recomputes this node's cached height from its children.
    ///
    /// Must be called after any change to `left` or `right`.
    fn update_height(&mut self) {
        self.height = 1 + height_of(&self.left).max(height_of(&self.right));
    }

    /// Returns the height difference `left - right`.
    ///
    /// A positive factor means the node leans left, a negative one that
    /// it leans right. The balance invariant keeps this in `-1..=1`.
    #[allow(clippy::cast_possible_wrap)]
    fn balance_factor(&self) -> isize {
        height_of(&self.left) as isize - height_of(&self.right) as isize
    }
}

/// Returns the height of a subtree, treating an absent subtree as 0.
fn height_of<K, V>(edge: &Edge<K, V>) -> usize {
    edge.as_deref().map_or(0, |node| node.height)
}

// =============================================================================
// Rotations and Rebalancing
// =============================================================================

/// Rotates the subtree right, promoting the left child to the root.
///
/// ```text
///       node            pivot
///       /  \            /  \
///    pivot  C   =>     A   node
///    /  \                  /  \
///   A    B                B    C
/// ```
///
/// The demoted node's height is recomputed before the pivot's, since the
/// pivot's height depends on it. A subtree without a left child is
/// returned unchanged.
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match node.left.take() {
        None => node,
        Some(mut pivot) => {
            node.left = pivot.right.take();
            node.update_height();
            pivot.right = Some(node);
            pivot.update_height();
            pivot
        }
    }
}

/// Rotates the subtree left, promoting the right child to the root.
///
/// Mirror image of [`rotate_right`].
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match node.right.take() {
        None => node,
        Some(mut pivot) => {
            node.right = pivot.left.take();
            node.update_height();
            pivot.left = Some(node);
            pivot.update_height();
            pivot
        }
    }
}

/// Refreshes the node's height and restores the balance invariant.
///
/// Called on every node along the mutated path, from the deepest change
/// back up to the root. A single call performs at most two rotations:
///
/// - left-heavy with a non-right-leaning left child: one right rotation
/// - left-heavy with a right-leaning left child: rotate the left child
///   left, then the node right
/// - the two mirrored right-heavy cases
fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        if let Some(left) = node.left.take() {
            node.left = if left.balance_factor() < 0 {
                Some(rotate_left(left))
            } else {
                Some(left)
            };
        }

        rotate_right(node)
    } else if balance < -1 {
        if let Some(right) = node.right.take() {
            node.right = if right.balance_factor() > 0 {
                Some(rotate_right(right))
            } else {
                Some(right)
            };
        }

        rotate_left(node)
    } else {
        node
    }
}

/// Detaches the minimum node of a subtree, rebalancing the descent path.
///
/// Returns the remaining subtree and the detached node. The detached
/// node's children are cleared; its former right subtree takes its place
/// in the tree.
fn detach_min<K, V>(mut node: Box<Node<K, V>>) -> (Edge<K, V>, Box<Node<K, V>>) {
    match node.left.take() {
        None => {
            let remainder = node.right.take();
            (remainder, node)
        }
        Some(left) => {
            let (new_left, minimum) = detach_min(left);
            node.left = new_left;
            (Some(rebalance(node)), minimum)
        }
    }
}

// =============================================================================
// AvlTreeMap Definition
// =============================================================================

/// An ordered map of unique keys backed by a height-balanced (AVL) tree.
///
/// Keys must implement [`Ord`]. Inserting a key that is already present
/// replaces its value in place without changing the tree shape. Deleting
/// a key that is absent is an error, surfaced as
/// [`KeyNotFoundError`](crate::KeyNotFoundError).
///
/// Beyond the usual map operations, the tree exposes its structure
/// through four materialized traversals: [`inorder`](Self::inorder)
/// (sorted key order), [`preorder`](Self::preorder),
/// [`postorder`](Self::postorder), and [`bforder`](Self::bforder)
/// (breadth-first, level by level).
///
/// # Examples
///
/// ```rust
/// use avlmap::AvlTreeMap;
///
/// let mut map = AvlTreeMap::new();
/// map.insert(10, "ten");
/// map.insert(20, "twenty");
/// map.insert(30, "thirty");
///
/// // The rotation after the third insert keeps the tree balanced:
/// assert_eq!(map.preorder(), vec![&20, &10, &30]);
/// assert_eq!(map.height(), 2);
/// ```
#[derive(Clone)]
pub struct AvlTreeMap<K, V> {
    /// Root of the tree, absent when the map is empty
    root: Edge<K, V>,
    /// Number of entries, kept in sync by insert and delete
    length: usize,
}

// Static assertions to verify thread-capability guarantees at compile time
static_assertions::assert_impl_all!(AvlTreeMap<i32, String>: Send, Sync);
static_assertions::assert_impl_all!(AvlTreeMap<String, Vec<u8>>: Clone);

// =============================================================================
// Construction and Size
// =============================================================================

impl<K, V> AvlTreeMap<K, V> {
    /// Creates an empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, String> = AvlTreeMap::new();
    /// assert!(map.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// `O(1)`, the count is maintained incrementally.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// assert_eq!(map.len(), 0);
    ///
    /// map.insert(1, "one");
    /// map.insert(1, "uno");
    /// assert_eq!(map.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns the number of entries in the map.
    ///
    /// This is an alias for [`len`](Self::len), provided for API
    /// consistency with classic tree interfaces.
    #[must_use]
    #[inline]
    pub const fn size(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// assert!(map.is_empty());
    ///
    /// map.insert(1, "one");
    /// assert!(!map.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the height of the tree.
    ///
    /// An empty map has height 0 and a single entry has height 1. The
    /// balance invariant bounds the height by roughly `1.44 * log2(n)`,
    /// even for adversarial insertion orders.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, i32> = (1..=7).map(|key| (key, key)).collect();
    ///
    /// // Seven ascending inserts settle into a perfectly balanced tree.
    /// assert_eq!(map.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        height_of(&self.root)
    }

    /// Removes all entries from the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, "one");
    /// map.insert(2, "two");
    ///
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.search(&1), None);
    /// ```
    pub fn clear(&mut self) {
        self.root = None;
        self.length = 0;
    }
}

// =============================================================================
// Lookup and Mutation
// =============================================================================

impl<K: Ord, V> AvlTreeMap<K, V> {
    /// Creates a map containing a single entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::singleton(1, "one");
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.search(&1), Some(&"one"));
    /// ```
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        let mut map = Self::new();
        map.insert(key, value);
        map
    }

    /// Inserts a key-value pair, returning the previous value if the key
    /// was already present.
    ///
    /// A new key is placed at its ordered position and the insertion
    /// path is rebalanced bottom-up. An existing key has its value
    /// replaced in place; the tree shape and all cached heights are left
    /// untouched, since no node was added.
    ///
    /// # Complexity
    ///
    /// `O(log n)`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// assert_eq!(map.insert(1, "one"), None);
    /// assert_eq!(map.insert(1, "ONE"), Some("one"));
    /// assert_eq!(map.search(&1), Some(&"ONE"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (new_root, previous) = Self::insert_into_node(self.root.take(), key, value);
        self.root = Some(new_root);

        if previous.is_none() {
            self.length += 1;
        }

        previous
    }

    /// Inserts into a subtree, returning the new subtree root and the
    /// replaced value, if any.
    ///
    /// The path back up is rebalanced only when a node was actually
    /// added; replacing a value cannot unbalance anything.
    fn insert_into_node(edge: Edge<K, V>, key: K, value: V) -> (Box<Node<K, V>>, Option<V>) {
        match edge {
            None => (Box::new(Node::new(key, value)), None),
            Some(mut node) => match key.cmp(&node.key) {
                Ordering::Less => {
                    let (new_left, previous) = Self::insert_into_node(node.left.take(), key, value);
                    node.left = Some(new_left);

                    if previous.is_none() {
                        (rebalance(node), None)
                    } else {
                        (node, previous)
                    }
                }
                Ordering::Greater => {
                    let (new_right, previous) =
                        Self::insert_into_node(node.right.take(), key, value);
                    node.right = Some(new_right);

                    if previous.is_none() {
                        (rebalance(node), None)
                    } else {
                        (node, previous)
                    }
                }
                Ordering::Equal => {
                    let previous = mem::replace(&mut node.value, value);
                    (node, Some(previous))
                }
            },
        }
    }

    /// Returns a reference to the value associated with the key, or
    /// `None` if the key is absent.
    ///
    /// The key may be any borrowed form of the map's key type, as long
    /// as it orders the same way.
    ///
    /// # Complexity
    ///
    /// `O(log n)`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(String::from("key"), 42);
    ///
    /// assert_eq!(map.search("key"), Some(&42));
    /// assert_eq!(map.search("missing"), None);
    /// ```
    #[must_use]
    pub fn search<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Self::search_in_node(self.root.as_deref(), key)
    }

    /// Returns a reference to the value associated with the key.
    ///
    /// This is an alias for [`search`](Self::search), provided for API
    /// consistency with the standard library's map types.
    #[must_use]
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key)
    }

    /// Returns a mutable reference to the value associated with the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, 10);
    ///
    /// if let Some(value) = map.get_mut(&1) {
    ///     *value += 32;
    /// }
    ///
    /// assert_eq!(map.search(&1), Some(&42));
    /// ```
    #[must_use]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Self::search_in_node_mut(self.root.as_deref_mut(), key)
    }

    /// Returns `true` if the map contains the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, "one");
    ///
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Searches a subtree, following the order invariant at each node.
    fn search_in_node<'a, Q>(node: Option<&'a Node<K, V>>, key: &Q) -> Option<&'a V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node.and_then(|node_ref| match key.cmp(node_ref.key.borrow()) {
            Ordering::Less => Self::search_in_node(node_ref.left.as_deref(), key),
            Ordering::Greater => Self::search_in_node(node_ref.right.as_deref(), key),
            Ordering::Equal => Some(&node_ref.value),
        })
    }

    /// Mutable counterpart of [`search_in_node`](Self::search_in_node).
    fn search_in_node_mut<'a, Q>(node: Option<&'a mut Node<K, V>>, key: &Q) -> Option<&'a mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node.and_then(|node_ref| match key.cmp(node_ref.key.borrow()) {
            Ordering::Less => Self::search_in_node_mut(node_ref.left.as_deref_mut(), key),
            Ordering::Greater => Self::search_in_node_mut(node_ref.right.as_deref_mut(), key),
            Ordering::Equal => Some(&mut node_ref.value),
        })
    }

    /// Removes a key from the map, returning its value.
    ///
    /// A node with two children is not unlinked directly: its in-order
    /// successor (the minimum of the right subtree) is detached instead,
    /// and the successor's key and value move into the node. Every node
    /// on the descent path is rebalanced on the way back up.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFoundError`](crate::KeyNotFoundError) if the key
    /// is not present. The map is left unchanged in that case.
    ///
    /// # Complexity
    ///
    /// `O(log n)`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::{AvlTreeMap, KeyNotFoundError};
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(1, "one");
    /// map.insert(2, "two");
    ///
    /// assert_eq!(map.delete(&1), Ok("one"));
    /// assert_eq!(map.delete(&1), Err(KeyNotFoundError));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Result<V, KeyNotFoundError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.root.take() {
            None => Err(KeyNotFoundError),
            Some(root) => {
                let (new_root, removed) = Self::delete_from_node(root, key);
                self.root = new_root;

                match removed {
                    Some(value) => {
                        self.length -= 1;
                        Ok(value)
                    }
                    None => Err(KeyNotFoundError),
                }
            }
        }
    }

    /// Deletes from a subtree, returning the new subtree root and the
    /// removed value.
    ///
    /// A miss hands the subtree back untouched, so the caller can
    /// distinguish it without a separate lookup pass. The path back up
    /// is rebalanced only when a node was actually removed.
    fn delete_from_node<Q>(mut node: Box<Node<K, V>>, key: &Q) -> (Edge<K, V>, Option<V>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match key.cmp(node.key.borrow()) {
            Ordering::Less => match node.left.take() {
                None => (Some(node), None),
                Some(left) => {
                    let (new_left, removed) = Self::delete_from_node(left, key);
                    node.left = new_left;

                    if removed.is_some() {
                        (Some(rebalance(node)), removed)
                    } else {
                        (Some(node), None)
                    }
                }
            },
            Ordering::Greater => match node.right.take() {
                None => (Some(node), None),
                Some(right) => {
                    let (new_right, removed) = Self::delete_from_node(right, key);
                    node.right = new_right;

                    if removed.is_some() {
                        (Some(rebalance(node)), removed)
                    } else {
                        (Some(node), None)
                    }
                }
            },
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, None) => {
                    let Node { value, .. } = *node;
                    (None, Some(value))
                }
                (Some(child), None) | (None, Some(child)) => {
                    let Node { value, .. } = *node;
                    (Some(child), Some(value))
                }
                (Some(left), Some(right)) => {
                    let (new_right, successor) = detach_min(right);
                    let Node {
                        key: successor_key,
                        value: successor_value,
                        ..
                    } = *successor;

                    // The node keeps its place in the tree; only its
                    // entry changes to the successor's.
                    node.key = successor_key;
                    let removed = mem::replace(&mut node.value, successor_value);
                    node.left = Some(left);
                    node.right = new_right;

                    (Some(rebalance(node)), Some(removed))
                }
            },
        }
    }
}

// =============================================================================
// Traversals and Extremes
// =============================================================================

impl<K, V> AvlTreeMap<K, V> {
    /// Returns all keys in ascending order.
    ///
    /// The sequence is fully materialized; mutations after the call do
    /// not affect it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, &str> =
    ///     [(5, "a"), (3, "b"), (8, "c"), (1, "d")].into_iter().collect();
    ///
    /// assert_eq!(map.inorder(), vec![&1, &3, &5, &8]);
    /// ```
    #[must_use]
    pub fn inorder(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.length);
        Self::collect_inorder(self.root.as_deref(), &mut keys);
        keys
    }

    /// Returns all keys in preorder: each node before both its subtrees.
    ///
    /// The first key is always the root, which makes this traversal a
    /// direct window into the rotation behavior.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(10, "ten");
    /// map.insert(20, "twenty");
    /// map.insert(30, "thirty");
    ///
    /// // Ascending inserts forced a left rotation; 20 is the new root.
    /// assert_eq!(map.preorder(), vec![&20, &10, &30]);
    /// ```
    #[must_use]
    pub fn preorder(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.length);
        Self::collect_preorder(self.root.as_deref(), &mut keys);
        keys
    }

    /// Returns all keys in postorder: each node after both its subtrees.
    ///
    /// The root comes last.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(10, "ten");
    /// map.insert(20, "twenty");
    /// map.insert(30, "thirty");
    ///
    /// assert_eq!(map.postorder(), vec![&10, &30, &20]);
    /// ```
    #[must_use]
    pub fn postorder(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.length);
        Self::collect_postorder(self.root.as_deref(), &mut keys);
        keys
    }

    /// Returns all keys in breadth-first order: level by level from the
    /// root, each level left to right.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, &str> =
    ///     [(5, "a"), (3, "b"), (8, "c"), (1, "d")].into_iter().collect();
    ///
    /// assert_eq!(map.bforder(), vec![&5, &3, &8, &1]);
    /// ```
    #[must_use]
    pub fn bforder(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.length);
        let mut queue = VecDeque::new();

        if let Some(root) = self.root.as_deref() {
            queue.push_back(root);
        }

        while let Some(node_ref) = queue.pop_front() {
            keys.push(&node_ref.key);

            if let Some(left) = node_ref.left.as_deref() {
                queue.push_back(left);
            }

            if let Some(right) = node_ref.right.as_deref() {
                queue.push_back(right);
            }
        }

        keys
    }

    /// Returns the entry with the smallest key, or `None` if the map is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(3, "three");
    /// map.insert(1, "one");
    /// map.insert(2, "two");
    ///
    /// assert_eq!(map.min(), Some((&1, &"one")));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<(&K, &V)> {
        Self::min_in_node(self.root.as_deref())
    }

    /// Returns the entry with the largest key, or `None` if the map is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::new();
    /// map.insert(3, "three");
    /// map.insert(1, "one");
    /// map.insert(2, "two");
    ///
    /// assert_eq!(map.max(), Some((&3, &"three")));
    /// ```
    #[must_use]
    pub fn max(&self) -> Option<(&K, &V)> {
        Self::max_in_node(self.root.as_deref())
    }

    /// Returns an iterator over the entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, &str> =
    ///     [(2, "b"), (1, "a"), (3, "c")].into_iter().collect();
    ///
    /// let entries: Vec<(&i32, &&str)> = map.iter().collect();
    /// assert_eq!(entries, vec![(&1, &"a"), (&2, &"b"), (&3, &"c")]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> AvlTreeMapIterator<'_, K, V> {
        let mut entries = Vec::with_capacity(self.length);
        Self::collect_entries(self.root.as_deref(), &mut entries);

        AvlTreeMapIterator {
            entries,
            current_index: 0,
        }
    }

    /// Returns an iterator over the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, &str> =
    ///     [(2, "b"), (1, "a"), (3, "c")].into_iter().collect();
    ///
    /// let keys: Vec<&i32> = map.keys().collect();
    /// assert_eq!(keys, vec![&1, &2, &3]);
    /// ```
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values, in ascending order of their
    /// keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, &str> =
    ///     [(2, "b"), (1, "a"), (3, "c")].into_iter().collect();
    ///
    /// let values: Vec<&&str> = map.values().collect();
    /// assert_eq!(values, vec![&"a", &"b", &"c"]);
    /// ```
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    fn collect_inorder<'a>(node: Option<&'a Node<K, V>>, keys: &mut Vec<&'a K>) {
        if let Some(node_ref) = node {
            Self::collect_inorder(node_ref.left.as_deref(), keys);
            keys.push(&node_ref.key);
            Self::collect_inorder(node_ref.right.as_deref(), keys);
        }
    }

    fn collect_preorder<'a>(node: Option<&'a Node<K, V>>, keys: &mut Vec<&'a K>) {
        if let Some(node_ref) = node {
            keys.push(&node_ref.key);
            Self::collect_preorder(node_ref.left.as_deref(), keys);
            Self::collect_preorder(node_ref.right.as_deref(), keys);
        }
    }

    fn collect_postorder<'a>(node: Option<&'a Node<K, V>>, keys: &mut Vec<&'a K>) {
        if let Some(node_ref) = node {
            Self::collect_postorder(node_ref.left.as_deref(), keys);
            Self::collect_postorder(node_ref.right.as_deref(), keys);
            keys.push(&node_ref.key);
        }
    }

    fn collect_entries<'a>(node: Option<&'a Node<K, V>>, entries: &mut Vec<(&'a K, &'a V)>) {
        if let Some(node_ref) = node {
            Self::collect_entries(node_ref.left.as_deref(), entries);
            entries.push((&node_ref.key, &node_ref.value));
            Self::collect_entries(node_ref.right.as_deref(), entries);
        }
    }

    fn collect_owned_entries(edge: Edge<K, V>, entries: &mut Vec<(K, V)>) {
        if let Some(node) = edge {
            let Node {
                key,
                value,
                left,
                right,
                ..
            } = *node;

            Self::collect_owned_entries(left, entries);
            entries.push((key, value));
            Self::collect_owned_entries(right, entries);
        }
    }

    fn min_in_node<'a>(node: Option<&'a Node<K, V>>) -> Option<(&'a K, &'a V)> {
        node.and_then(|node_ref| {
            node_ref.left.as_deref().map_or_else(
                || Some((&node_ref.key, &node_ref.value)),
                |left| Self::min_in_node(Some(left)),
            )
        })
    }

    fn max_in_node<'a>(node: Option<&'a Node<K, V>>) -> Option<(&'a K, &'a V)> {
        node.and_then(|node_ref| {
            node_ref.right.as_deref().map_or_else(
                || Some((&node_ref.key, &node_ref.value)),
                |right| Self::max_in_node(Some(right)),
            )
        })
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the entries of an [`AvlTreeMap`] in ascending key
/// order.
///
/// Created by [`AvlTreeMap::iter`]. The entries are collected up front,
/// so iteration itself is `O(1)` per step.
pub struct AvlTreeMapIterator<'a, K, V> {
    /// Entries in ascending key order
    entries: Vec<(&'a K, &'a V)>,
    /// Position of the next entry to yield
    current_index: usize,
}

impl<'a, K, V> Iterator for AvlTreeMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_index < self.entries.len() {
            let entry = self.entries[self.current_index];
            self.current_index += 1;
            Some(entry)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len().saturating_sub(self.current_index);
        (remaining, Some(remaining))
    }
}

impl<K, V> ExactSizeIterator for AvlTreeMapIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.entries.len().saturating_sub(self.current_index)
    }
}

/// An owning iterator over the entries of an [`AvlTreeMap`] in ascending
/// key order.
///
/// Created by the [`IntoIterator`] implementation on the map itself.
pub struct AvlTreeMapIntoIterator<K, V> {
    /// Entries in ascending key order
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V> Iterator for AvlTreeMapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> ExactSizeIterator for AvlTreeMapIntoIterator<K, V> {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = AvlTreeMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for AvlTreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = AvlTreeMapIntoIterator<K, V>;

    /// Consumes the map, yielding owned entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use avlmap::AvlTreeMap;
    ///
    /// let map: AvlTreeMap<i32, &str> =
    ///     [(2, "b"), (1, "a")].into_iter().collect();
    ///
    /// let entries: Vec<(i32, &str)> = map.into_iter().collect();
    /// assert_eq!(entries, vec![(1, "a"), (2, "b")]);
    /// ```
    fn into_iter(self) -> Self::IntoIter {
        let mut entries = Vec::with_capacity(self.length);
        Self::collect_owned_entries(self.root, &mut entries);

        AvlTreeMapIntoIterator {
            entries: entries.into_iter(),
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for AvlTreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();

        for (key, value) in iter {
            map.insert(key, value);
        }

        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for AvlTreeMap<K, V> {
    /// Two maps are equal when they hold the same entries, regardless of
    /// the insertion orders that produced them.
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self
                .iter()
                .zip(other.iter())
                .all(|(left, right)| left == right)
    }
}

impl<K: Eq, V: Eq> Eq for AvlTreeMap<K, V> {}

impl<K: Hash, V: Hash> Hash for AvlTreeMap<K, V> {
    /// Hashes the length and then every entry in ascending key order, so
    /// equal maps hash identically whatever their construction history.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);

        for (key, value) in self.iter() {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for AvlTreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;

        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }

            write!(formatter, "{key}: {value}")?;
        }

        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for AvlTreeMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;

        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

#[cfg(feature = "serde")]
struct AvlTreeMapVisitor<K, V> {
    key_marker: std::marker::PhantomData<K>,
    value_marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<K, V> AvlTreeMapVisitor<K, V> {
    const fn new() -> Self {
        Self {
            key_marker: std::marker::PhantomData,
            value_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for AvlTreeMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = AvlTreeMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: serde::de::MapAccess<'de>,
    {
        let mut map = AvlTreeMap::new();

        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }

        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for AvlTreeMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(AvlTreeMapVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
