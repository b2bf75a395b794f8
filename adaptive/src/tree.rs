//! The [`RadixTree`] map and its insert / search / delete algorithms.

use std::fmt;
use std::mem;

use crate::MAX_PREFIX_LEN;
use crate::iter::{Iter, PathIter};
use crate::keys::encode_path;
use crate::node::{
    Header, Leaf, Node, check_prefix, longest_common_prefix, prefix_mismatch,
};
use crate::stats::{TreeStats, collect_tree_stats};
use crate::tracing_helpers::trace_log;
use crate::txn::Txn;

/// An Adaptive Radix Tree: an ordered map from byte-string keys to values.
///
/// Shared key prefixes are stored once per inner node, and inner nodes switch between 4, 16, 48
/// and 256 child slots as they fill up and drain, so memory tracks the number of branching
/// points rather than the length of the keys.
///
/// Keys are anything that can be viewed as bytes. Ordering is lexicographic over those bytes,
/// and a key may be a prefix of another.
///
/// ```rust
/// use adaptive_radix::RadixTree;
///
/// let mut tree = RadixTree::new();
/// tree.insert("apple", 1);
/// tree.insert("application", 2);
/// tree.insert("app", 3);
///
/// assert_eq!(tree.search("apple"), Some(&1));
/// assert_eq!(tree.search("appl"), None);
///
/// let keys: Vec<&[u8]> = tree.prefix_iter("appl").map(|(k, _)| k).collect();
/// assert_eq!(keys, vec![&b"apple"[..], &b"application"[..]]);
///
/// assert_eq!(tree.minimum().map(|l| l.key()), Some(&b"app"[..]));
/// ```
pub struct RadixTree<V> {
    root: Option<Node<V>>,
    size: usize,
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RadixTree<V> {
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// Number of keys in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn root(&self) -> Option<&Node<V>> {
        self.root.as_ref()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }

    /// Inserts `value` under `key`, returning the value it replaced, if any.
    pub fn insert<K: AsRef<[u8]>>(&mut self, key: K, value: V) -> Option<V> {
        let leaf = Box::new(Leaf::new(key.as_ref(), value));
        let replaced = match self.root.take() {
            None => {
                self.root = Some(Node::Leaf(leaf));
                None
            }
            Some(mut root) => {
                let replaced = insert_recurse(&mut root, leaf, 0);
                self.root = Some(root);
                replaced
            }
        };
        if replaced.is_none() {
            self.size += 1;
        }
        replaced
    }

    pub fn search<K: AsRef<[u8]>>(&self, key: K) -> Option<&V> {
        let path = encode_path(key.as_ref());
        let mut node = self.root.as_ref()?;
        let mut depth = 0;
        loop {
            if let Node::Leaf(leaf) = node {
                return leaf.matches(&path).then(|| leaf.value());
            }

            let partial_len = node.partial_len();
            if partial_len > 0 {
                let header = node.header()?;
                if check_prefix(header, &path, depth) != partial_len.min(MAX_PREFIX_LEN) {
                    return None;
                }
                depth += partial_len;
            }

            node = node.find_child(*path.get(depth)?)?;
            depth += 1;
        }
    }

    pub fn get_mut<K: AsRef<[u8]>>(&mut self, key: K) -> Option<&mut V> {
        let path = encode_path(key.as_ref());
        let mut node = self.root.as_mut()?;
        let mut depth = 0;
        loop {
            if node.is_leaf() {
                return match node {
                    Node::Leaf(leaf) if leaf.matches(&path) => Some(&mut leaf.value),
                    _ => None,
                };
            }

            let partial_len = node.partial_len();
            if partial_len > 0 {
                let header = node.header()?;
                if check_prefix(header, &path, depth) != partial_len.min(MAX_PREFIX_LEN) {
                    return None;
                }
                depth += partial_len;
            }

            node = node.find_child_mut(*path.get(depth)?)?;
            depth += 1;
        }
    }

    /// Removes `key`, returning its value if it was present.
    pub fn delete<K: AsRef<[u8]>>(&mut self, key: K) -> Option<V> {
        let path = encode_path(key.as_ref());
        let removed = match self.root.take()? {
            Node::Leaf(leaf) if leaf.matches(&path) => Some(leaf.into_value()),
            mut root => {
                let removed = delete_recurse(&mut root, &path, 0);
                self.root = Some(root);
                removed
            }
        };
        if removed.is_some() {
            self.size -= 1;
        }
        removed
    }

    /// The entry with the smallest key.
    pub fn minimum(&self) -> Option<&Leaf<V>> {
        self.root.as_ref()?.minimum()
    }

    /// The entry with the largest key.
    pub fn maximum(&self) -> Option<&Leaf<V>> {
        self.root.as_ref()?.maximum()
    }

    /// All entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root.as_ref())
    }

    /// Entries whose key starts with `prefix`, in ascending key order.
    pub fn prefix_iter<K: AsRef<[u8]>>(&self, prefix: K) -> Iter<'_, V> {
        let mut iter = self.iter();
        iter.seek_prefix(prefix);
        iter
    }

    /// Entries whose key is a prefix of (or equal to) `path`, shortest first.
    pub fn path_iter<K: AsRef<[u8]>>(&self, path: K) -> PathIter<'_, V> {
        PathIter::new(self.root.as_ref(), path.as_ref(), Some(0))
    }

    /// A handle that applies mutations directly to this tree.
    pub fn txn(&mut self) -> Txn<'_, V> {
        Txn::new(self)
    }

    pub fn stats(&self) -> TreeStats {
        collect_tree_stats(self.root.as_ref())
    }
}

fn insert_recurse<V>(node: &mut Node<V>, leaf: Box<Leaf<V>>, mut depth: usize) -> Option<V> {
    if let Node::Leaf(existing) = node {
        if existing.matches(leaf.path()) {
            return Some(mem::replace(&mut existing.value, leaf.into_value()));
        }

        // Split the leaf: a new Node4 holds the common run and both leaves hang off it.
        let common = longest_common_prefix(existing.path(), leaf.path(), depth);
        let split = depth + common;
        let existing_byte = existing.path()[split];
        let new_byte = leaf.path()[split];
        let header = Header::new(&leaf.path()[depth..split], common);
        trace_log!(depth, common, "split leaf");

        let existing = mem::replace(node, Node::new_4(header));
        node.add_child(existing_byte, existing);
        node.add_child(new_byte, Node::Leaf(leaf));
        return None;
    }

    let partial_len = node.partial_len();
    if partial_len > 0 {
        let prefix_diff = prefix_mismatch(node, leaf.path(), depth);
        if prefix_diff < partial_len {
            // The key leaves this node's prefix early. Push the node down under a new Node4
            // holding the matched part.
            let header = Header::new(&leaf.path()[depth..depth + prefix_diff], prefix_diff);
            let remaining = partial_len - prefix_diff - 1;
            let (existing_byte, shifted) = if partial_len <= MAX_PREFIX_LEN {
                let partial = node.partial();
                (
                    partial[prefix_diff],
                    Header::new(&partial[prefix_diff + 1..], remaining),
                )
            } else {
                let Some(min_leaf) = node.minimum() else {
                    unreachable!("inner node without leaves");
                };
                let at = depth + prefix_diff;
                (
                    min_leaf.path()[at],
                    Header::new(&min_leaf.path()[at + 1..], remaining),
                )
            };
            if let Some(h) = node.header_mut() {
                *h = shifted;
            }
            let new_byte = leaf.path()[depth + prefix_diff];
            trace_log!(depth, prefix_diff, partial_len, "split prefix");

            let existing = mem::replace(node, Node::new_4(header));
            node.add_child(existing_byte, existing);
            node.add_child(new_byte, Node::Leaf(leaf));
            return None;
        }
        depth += partial_len;
    }

    let byte = leaf.path()[depth];
    if let Some(child) = node.find_child_mut(byte) {
        return insert_recurse(child, leaf, depth + 1);
    }
    node.add_child(byte, Node::Leaf(leaf));
    None
}

fn delete_recurse<V>(node: &mut Node<V>, path: &[u8], mut depth: usize) -> Option<V> {
    let partial_len = node.partial_len();
    if partial_len > 0 {
        let header = node.header()?;
        if check_prefix(header, path, depth) != partial_len.min(MAX_PREFIX_LEN) {
            return None;
        }
        depth += partial_len;
    }

    let byte = *path.get(depth)?;
    let child = node.find_child_mut(byte)?;
    if let Some(leaf) = child.as_leaf() {
        if !leaf.matches(path) {
            return None;
        }
        trace_log!(depth, byte, "remove leaf");
        return match node.remove_child(byte) {
            Some(Node::Leaf(leaf)) => Some(leaf.into_value()),
            _ => unreachable!("removed child should be the matched leaf"),
        };
    }
    delete_recurse(child, path, depth + 1)
}

impl<V: fmt::Debug> fmt::Debug for RadixTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, v)| (String::from_utf8_lossy(k), v)))
            .finish()
    }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for RadixTree<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = RadixTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: AsRef<[u8]>, V> Extend<(K, V)> for RadixTree<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, V> IntoIterator for &'a RadixTree<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
