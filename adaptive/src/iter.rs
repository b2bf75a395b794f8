//! Sorted depth-first traversal.
//!
//! Both iterators keep an explicit stack of nodes and push the children of an inner node
//! highest key byte first, so the lowest key is always popped next and entries come out in
//! ascending key order.

use std::cmp::min;

use crate::MAX_PREFIX_LEN;
use crate::keys::{TERMINATOR, escape};
use crate::node::{Node, check_prefix};

/// Iterates over `(key, value)` pairs in key order, optionally restricted to keys starting with a
/// prefix (see [`Iter::seek_prefix`]).
pub struct Iter<'a, V> {
    root: Option<&'a Node<V>>,
    stack: Vec<&'a Node<V>>,
    prefix: Vec<u8>,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(root: Option<&'a Node<V>>) -> Self {
        Self {
            root,
            stack: root.into_iter().collect(),
            prefix: Vec::new(),
        }
    }

    /// Restarts the iterator so that it yields only the keys starting with `prefix`.
    ///
    /// The subtree the prefix leads to is found by descending from the root; if the prefix
    /// falls off the tree the iterator is empty.
    pub fn seek_prefix<K: AsRef<[u8]>>(&mut self, prefix: K) {
        let prefix = prefix.as_ref();
        self.stack.clear();
        self.prefix = prefix.to_vec();

        let search = escape(prefix);
        let Some(mut node) = self.root else {
            return;
        };
        let mut depth = 0;
        loop {
            if depth >= search.len() || node.is_leaf() {
                self.stack.push(node);
                return;
            }

            let partial_len = node.partial_len();
            if partial_len > 0 {
                let Some(header) = node.header() else {
                    return;
                };
                let cmp = min(min(MAX_PREFIX_LEN, partial_len), search.len() - depth);
                if check_prefix(header, &search, depth) < cmp {
                    return;
                }
                if partial_len > MAX_PREFIX_LEN && search.len() - depth > MAX_PREFIX_LEN {
                    let Some(leaf) = node.minimum() else {
                        return;
                    };
                    let end = min(depth + partial_len, search.len());
                    if leaf.path().get(depth..end) != Some(&search[depth..end]) {
                        return;
                    }
                }
                depth += partial_len;
                if depth >= search.len() {
                    self.stack.push(node);
                    return;
                }
            }

            match node.find_child(search[depth]) {
                Some(child) => {
                    node = child;
                    depth += 1;
                }
                None => return,
            }
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Leaf(leaf) => {
                    if leaf.key().starts_with(&self.prefix) {
                        return Some((leaf.key(), leaf.value()));
                    }
                }
                _ => self.stack.extend(node.children().rev().map(|(_, child)| child)),
            }
        }
        None
    }
}

/// Iterates over the entries whose key is a prefix of (or equal to) a target key, shortest
/// first.
///
/// Started from the tree, the traversal only visits the children that can lie on the target's
/// path: the end-of-key child and the child for the next path byte. Started from an arbitrary
/// node the depth is unknown, so every child is visited and the keys are filtered.
pub struct PathIter<'a, V> {
    stack: Vec<(&'a Node<V>, Option<usize>)>,
    target: Vec<u8>,
    path: Vec<u8>,
}

impl<'a, V> PathIter<'a, V> {
    pub(crate) fn new(root: Option<&'a Node<V>>, target: &[u8], depth: Option<usize>) -> Self {
        Self {
            stack: root.into_iter().map(|node| (node, depth)).collect(),
            target: target.to_vec(),
            path: escape(target),
        }
    }

    fn push_candidates(&mut self, node: &'a Node<V>, depth: usize) {
        let partial_len = node.partial_len();
        if depth + partial_len > self.path.len() {
            return;
        }
        if partial_len > 0 {
            let Some(header) = node.header() else {
                return;
            };
            if check_prefix(header, &self.path, depth) < min(MAX_PREFIX_LEN, partial_len) {
                return;
            }
        }
        let depth = depth + partial_len;
        if let Some(&next) = self.path.get(depth) {
            if let Some(child) = node.find_child(next) {
                self.stack.push((child, Some(depth + 1)));
            }
        }
        if let Some(child) = node.find_child(TERMINATOR) {
            self.stack.push((child, Some(depth + 1)));
        }
    }
}

impl<'a, V> Iterator for PathIter<'a, V> {
    type Item = (&'a [u8], &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, depth)) = self.stack.pop() {
            match (node, depth) {
                (Node::Leaf(leaf), _) => {
                    if self.target.starts_with(leaf.key()) {
                        return Some((leaf.key(), leaf.value()));
                    }
                }
                (_, Some(depth)) => self.push_candidates(node, depth),
                (_, None) => self
                    .stack
                    .extend(node.children().rev().map(|(_, child)| (child, None))),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::RadixTree;

    fn tree_of(keys: &[&str]) -> RadixTree<usize> {
        let mut tree = RadixTree::new();
        for (i, k) in keys.iter().enumerate() {
            tree.insert(k, i);
        }
        tree
    }

    fn keys_of<'a>(iter: impl Iterator<Item = (&'a [u8], &'a usize)>) -> Vec<String> {
        iter.map(|(k, _)| String::from_utf8_lossy(k).into_owned())
            .collect()
    }

    #[test]
    fn test_iter_sorted() {
        let tree = tree_of(&["b", "abc", "a", "ab", "", "ba", "abd", "z"]);
        assert_eq!(
            keys_of(tree.iter()),
            vec!["", "a", "ab", "abc", "abd", "b", "ba", "z"]
        );
    }

    #[test]
    fn test_iter_empty() {
        let tree = RadixTree::<u32>::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.prefix_iter("a").next(), None);
        assert_eq!(tree.path_iter("a").next(), None);
    }

    #[test]
    fn test_seek_prefix() {
        let tree = tree_of(&["foo", "foobar", "foobaz", "fob", "bar", "f"]);
        assert_eq!(
            keys_of(tree.prefix_iter("foo")),
            vec!["foo", "foobar", "foobaz"]
        );
        assert_eq!(keys_of(tree.prefix_iter("foob")), vec!["foobar", "foobaz"]);
        assert_eq!(keys_of(tree.prefix_iter("fo")), vec!["fob", "foo", "foobar", "foobaz"]);
        assert_eq!(keys_of(tree.prefix_iter("foobarx")), Vec::<String>::new());
        assert_eq!(keys_of(tree.prefix_iter("x")), Vec::<String>::new());
        assert_eq!(keys_of(tree.prefix_iter("")).len(), 6);

        // Reseeking restarts from the root.
        let mut iter = tree.iter();
        iter.seek_prefix("ba");
        assert_eq!(keys_of(iter.by_ref()), vec!["bar"]);
        iter.seek_prefix("f");
        assert_eq!(iter.count(), 5);
    }

    #[test]
    fn test_seek_prefix_long_partial() {
        let base = "x".repeat(40);
        let tree = tree_of(&[
            &format!("{base}1"),
            &format!("{base}2"),
            &format!("{}y3", &base[..30]),
        ]);
        assert_eq!(keys_of(tree.prefix_iter(&base[..25])).len(), 3);
        assert_eq!(keys_of(tree.prefix_iter(&base[..35])).len(), 2);
        assert_eq!(keys_of(tree.prefix_iter(format!("{}z", &base[..35]))).len(), 0);
        assert_eq!(keys_of(tree.prefix_iter(format!("{base}2"))).len(), 1);
    }

    #[test]
    fn test_seek_prefix_escaped_bytes() {
        let mut tree = RadixTree::new();
        tree.insert(b"a\x00", 1);
        tree.insert(b"a\x00b", 2);
        tree.insert(b"a\x01", 3);
        tree.insert(b"a", 4);
        let found: Vec<i32> = tree.prefix_iter(b"a\x00").map(|(_, v)| *v).collect();
        assert_eq!(found, vec![1, 2]);
        let all: Vec<i32> = tree.prefix_iter(b"a").map(|(_, v)| *v).collect();
        assert_eq!(all, vec![4, 1, 2, 3]);
    }

    #[test]
    fn test_path_iter() {
        let tree = tree_of(&["", "a", "ab", "abc", "abd", "abcde", "b", "abcdef"]);
        assert_eq!(
            keys_of(tree.path_iter("abcde")),
            vec!["", "a", "ab", "abc", "abcde"]
        );
        assert_eq!(keys_of(tree.path_iter("ab")), vec!["", "a", "ab"]);
        assert_eq!(keys_of(tree.path_iter("abx")), vec!["", "a", "ab"]);
        assert_eq!(keys_of(tree.path_iter("x")), vec![""]);
    }

    #[test]
    fn test_node_path_iter_matches_tree() {
        let tree = tree_of(&["a", "ab", "abc", "abd", "b", "bcd", "abcdefghijklmnopq"]);
        let Some(root) = tree.root() else {
            panic!("tree should not be empty");
        };
        for target in ["abcdefghijklmnopqrs", "abd", "bc", "b", "zz"] {
            assert_eq!(
                keys_of(root.path_iter(target)),
                keys_of(tree.path_iter(target)),
                "target {target}"
            );
        }
        assert_eq!(keys_of(root.iter()), keys_of(tree.iter()));
    }
}
