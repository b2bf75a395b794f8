use std::cmp::min;
use std::fmt;

use crate::MAX_PREFIX_LEN;
use crate::iter::{Iter, PathIter};
use crate::keys::encode_path;
use crate::mapping::NodeMapping;
use crate::mapping::direct_mapping::DirectMapping;
use crate::mapping::indexed_mapping::IndexedMapping;
use crate::mapping::sorted_keyed_mapping::SortedKeyedMapping;
use crate::tracing_helpers::trace_log;

/// A Node16 drops back to a Node4 once it is down to this many children.
const NODE16_SHRINK_AT: usize = 3;
const NODE48_SHRINK_AT: usize = 12;
/// Well below 48, so a node hovering around the Node48 capacity doesn't flip back and forth.
const NODE256_SHRINK_AT: usize = 37;

/// Compressed path shared by every internal node kind.
///
/// `partial_len` is the logical length of the prefix and may exceed [`MAX_PREFIX_LEN`]; only
/// the first `MAX_PREFIX_LEN` bytes are kept here, the rest are read from a descendant leaf.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub(crate) partial: [u8; MAX_PREFIX_LEN],
    pub(crate) partial_len: u32,
}

impl Header {
    /// A header with logical prefix length `partial_len`, storing as many leading bytes of
    /// `prefix` as fit.
    pub fn new(prefix: &[u8], partial_len: usize) -> Self {
        let mut header = Header::default();
        header.set_partial(prefix, partial_len);
        header
    }

    /// The stored prefix bytes.
    #[inline]
    pub fn partial(&self) -> &[u8] {
        &self.partial[..self.stored_len()]
    }

    #[inline]
    pub fn partial_len(&self) -> usize {
        self.partial_len as usize
    }

    pub fn set_partial(&mut self, prefix: &[u8], partial_len: usize) {
        let n = min(MAX_PREFIX_LEN, min(prefix.len(), partial_len));
        self.partial[..n].copy_from_slice(&prefix[..n]);
        self.partial_len = partial_len as u32;
    }

    pub fn set_partial_len(&mut self, partial_len: usize) {
        self.partial_len = partial_len as u32;
    }

    #[inline]
    fn stored_len(&self) -> usize {
        min(MAX_PREFIX_LEN, self.partial_len as usize)
    }
}

/// Copies the logical prefix length and the stored prefix bytes from `src` into `dest`.
pub fn copy_header(dest: &mut Header, src: &Header) {
    let n = src.stored_len();
    dest.partial[..n].copy_from_slice(&src.partial[..n]);
    dest.partial_len = src.partial_len;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    Leaf,
    Node4,
    Node16,
    Node48,
    Node256,
}

impl NodeKind {
    pub fn capacity(&self) -> usize {
        match self {
            NodeKind::Leaf => 0,
            NodeKind::Node4 => 4,
            NodeKind::Node16 => 16,
            NodeKind::Node48 => 48,
            NodeKind::Node256 => 256,
        }
    }
}

/// A stored entry: the user's key, the tree path it is navigated by, and the value.
pub struct Leaf<V> {
    key: Box<[u8]>,
    path: Box<[u8]>,
    pub(crate) value: V,
}

impl<V> Leaf<V> {
    pub fn new(key: &[u8], value: V) -> Self {
        Self {
            key: Box::from(key),
            path: encode_path(key),
            value,
        }
    }

    #[inline]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    #[inline]
    pub fn path(&self) -> &[u8] {
        &self.path
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }

    /// Whether this leaf is stored under `path`.
    #[inline]
    pub fn matches(&self, path: &[u8]) -> bool {
        *self.path == *path
    }
}

impl<V: fmt::Debug> fmt::Debug for Leaf<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("key", &String::from_utf8_lossy(&self.key))
            .field("value", &self.value)
            .finish()
    }
}

pub struct InnerNode<M> {
    pub(crate) header: Header,
    pub(crate) mapping: M,
}

impl<M> InnerNode<M> {
    fn with_header(src: &Header, mapping: M) -> Self {
        let mut header = Header::default();
        copy_header(&mut header, src);
        Self { header, mapping }
    }
}

pub enum Node<V> {
    Leaf(Box<Leaf<V>>),
    Node4(Box<InnerNode<SortedKeyedMapping<Node<V>, 4>>>),
    Node16(Box<InnerNode<SortedKeyedMapping<Node<V>, 16>>>),
    Node48(Box<InnerNode<IndexedMapping<Node<V>, 48>>>),
    Node256(Box<InnerNode<DirectMapping<Node<V>>>>),
}

impl<V> Node<V> {
    #[inline]
    pub fn new_leaf(key: &[u8], value: V) -> Self {
        Node::Leaf(Box::new(Leaf::new(key, value)))
    }

    #[inline]
    pub fn new_4(header: Header) -> Self {
        Node::Node4(Box::new(InnerNode {
            header,
            mapping: SortedKeyedMapping::new(),
        }))
    }

    #[cfg(test)]
    pub(crate) fn new_16(header: Header) -> Self {
        Node::Node16(Box::new(InnerNode {
            header,
            mapping: SortedKeyedMapping::new(),
        }))
    }

    #[cfg(test)]
    pub(crate) fn new_48(header: Header) -> Self {
        Node::Node48(Box::new(InnerNode {
            header,
            mapping: IndexedMapping::new(),
        }))
    }

    #[cfg(test)]
    pub(crate) fn new_256(header: Header) -> Self {
        Node::Node256(Box::new(InnerNode {
            header,
            mapping: DirectMapping::new(),
        }))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Leaf(_) => NodeKind::Leaf,
            Node::Node4(_) => NodeKind::Node4,
            Node::Node16(_) => NodeKind::Node16,
            Node::Node48(_) => NodeKind::Node48,
            Node::Node256(_) => NodeKind::Node256,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf<V>> {
        match self {
            Node::Leaf(leaf) => Some(leaf.as_ref()),
            _ => None,
        }
    }

    /// The prefix header, or `None` for a leaf.
    pub fn header(&self) -> Option<&Header> {
        match self {
            Node::Leaf(_) => None,
            Node::Node4(n) => Some(&n.header),
            Node::Node16(n) => Some(&n.header),
            Node::Node48(n) => Some(&n.header),
            Node::Node256(n) => Some(&n.header),
        }
    }

    pub fn header_mut(&mut self) -> Option<&mut Header> {
        match self {
            Node::Leaf(_) => None,
            Node::Node4(n) => Some(&mut n.header),
            Node::Node16(n) => Some(&mut n.header),
            Node::Node48(n) => Some(&mut n.header),
            Node::Node256(n) => Some(&mut n.header),
        }
    }

    /// Stored prefix bytes; empty for a leaf.
    pub fn partial(&self) -> &[u8] {
        match self.header() {
            Some(header) => header.partial(),
            None => &[],
        }
    }

    /// Logical prefix length; zero for a leaf.
    #[inline]
    pub fn partial_len(&self) -> usize {
        self.header().map_or(0, |h| h.partial_len())
    }

    pub fn num_children(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Node4(n) => n.mapping.num_children(),
            Node::Node16(n) => n.mapping.num_children(),
            Node::Node48(n) => n.mapping.num_children(),
            Node::Node256(n) => n.mapping.num_children(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.kind().capacity()
    }

    pub fn find_child(&self, key: u8) -> Option<&Node<V>> {
        match self {
            Node::Leaf(_) => None,
            Node::Node4(n) => n.mapping.seek_child(key),
            Node::Node16(n) => n.mapping.seek_child(key),
            Node::Node48(n) => n.mapping.seek_child(key),
            Node::Node256(n) => n.mapping.seek_child(key),
        }
    }

    pub fn find_child_mut(&mut self, key: u8) -> Option<&mut Node<V>> {
        match self {
            Node::Leaf(_) => None,
            Node::Node4(n) => n.mapping.seek_child_mut(key),
            Node::Node16(n) => n.mapping.seek_child_mut(key),
            Node::Node48(n) => n.mapping.seek_child_mut(key),
            Node::Node256(n) => n.mapping.seek_child_mut(key),
        }
    }

    /// Adds `child` under `key`, first promoting this node to the next kind if it is full.
    pub(crate) fn add_child(&mut self, key: u8, child: Node<V>) {
        if self.num_children() >= self.capacity() {
            self.grow();
        }
        match self {
            Node::Node4(n) => n.mapping.add_child(key, child),
            Node::Node16(n) => n.mapping.add_child(key, child),
            Node::Node48(n) => n.mapping.add_child(key, child),
            Node::Node256(n) => n.mapping.add_child(key, child),
            Node::Leaf(_) => unreachable!("add_child on a leaf"),
        }
    }

    /// Removes the child under `key`. Afterwards this node may have been demoted to a smaller
    /// kind or, for a Node4 left with a single child, replaced by that child.
    pub(crate) fn remove_child(&mut self, key: u8) -> Option<Node<V>> {
        let removed = match self {
            Node::Node4(n) => n.mapping.delete_child(key),
            Node::Node16(n) => n.mapping.delete_child(key),
            Node::Node48(n) => n.mapping.delete_child(key),
            Node::Node256(n) => n.mapping.delete_child(key),
            Node::Leaf(_) => unreachable!("remove_child on a leaf"),
        };
        if removed.is_some() {
            self.shrink();
        }
        removed
    }

    fn grow(&mut self) {
        let grown = match self {
            Node::Node4(n) => Node::Node16(Box::new(InnerNode::with_header(
                &n.header,
                SortedKeyedMapping::from_resized(&mut n.mapping),
            ))),
            Node::Node16(n) => Node::Node48(Box::new(InnerNode::with_header(
                &n.header,
                IndexedMapping::from_sorted_keyed(&mut n.mapping),
            ))),
            Node::Node48(n) => Node::Node256(Box::new(InnerNode::with_header(
                &n.header,
                DirectMapping::from_indexed(&mut n.mapping),
            ))),
            Node::Node256(_) => unreachable!("a Node256 never grows"),
            Node::Leaf(_) => unreachable!("grow on a leaf"),
        };
        trace_log!(from = ?self.kind(), to = ?grown.kind(), "grow");
        *self = grown;
    }

    fn shrink(&mut self) {
        let shrunk = match self {
            Node::Node4(n) if n.mapping.num_children() == 1 => {
                let Some((key, child)) = n.mapping.take_only_child() else {
                    return;
                };
                collapse(&n.header, key, child)
            }
            Node::Node16(n) if n.mapping.num_children() <= NODE16_SHRINK_AT => {
                Node::Node4(Box::new(InnerNode::with_header(
                    &n.header,
                    SortedKeyedMapping::from_resized(&mut n.mapping),
                )))
            }
            Node::Node48(n) if n.mapping.num_children() <= NODE48_SHRINK_AT => {
                Node::Node16(Box::new(InnerNode::with_header(
                    &n.header,
                    SortedKeyedMapping::from_indexed(&mut n.mapping),
                )))
            }
            Node::Node256(n) if n.mapping.num_children() <= NODE256_SHRINK_AT => {
                Node::Node48(Box::new(InnerNode::with_header(
                    &n.header,
                    IndexedMapping::from_direct(&mut n.mapping),
                )))
            }
            _ => return,
        };
        trace_log!(from = ?self.kind(), to = ?shrunk.kind(), "shrink");
        *self = shrunk;
    }

    /// Children in ascending key byte order.
    pub fn children(&self) -> Box<dyn DoubleEndedIterator<Item = (u8, &Node<V>)> + '_> {
        match self {
            Node::Leaf(_) => Box::new(std::iter::empty()),
            Node::Node4(n) => Box::new(n.mapping.iter()),
            Node::Node16(n) => Box::new(n.mapping.iter()),
            Node::Node48(n) => Box::new(n.mapping.iter()),
            Node::Node256(n) => Box::new(n.mapping.iter()),
        }
    }

    fn first_child(&self) -> Option<&Node<V>> {
        let first = match self {
            Node::Leaf(_) => None,
            Node::Node4(n) => n.mapping.first(),
            Node::Node16(n) => n.mapping.first(),
            Node::Node48(n) => n.mapping.first(),
            Node::Node256(n) => n.mapping.first(),
        };
        first.map(|(_, child)| child)
    }

    fn last_child(&self) -> Option<&Node<V>> {
        let last = match self {
            Node::Leaf(_) => None,
            Node::Node4(n) => n.mapping.last(),
            Node::Node16(n) => n.mapping.last(),
            Node::Node48(n) => n.mapping.last(),
            Node::Node256(n) => n.mapping.last(),
        };
        last.map(|(_, child)| child)
    }

    /// The leaf with the smallest key under this node.
    pub fn minimum(&self) -> Option<&Leaf<V>> {
        match self {
            Node::Leaf(leaf) => Some(leaf.as_ref()),
            _ => self.first_child()?.minimum(),
        }
    }

    /// The leaf with the largest key under this node.
    pub fn maximum(&self) -> Option<&Leaf<V>> {
        match self {
            Node::Leaf(leaf) => Some(leaf.as_ref()),
            _ => self.last_child()?.maximum(),
        }
    }

    /// Every entry under this node, in key order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(Some(self))
    }

    /// Entries under this node whose key is a prefix of `path`, shortest first.
    pub fn path_iter<K: AsRef<[u8]>>(&self, path: K) -> PathIter<'_, V> {
        PathIter::new(Some(self), path.as_ref(), None)
    }
}

/// Replaces a Node4 that is down to one child by that child, folding the Node4's prefix and the
/// child's key byte in front of the child's own prefix.
fn collapse<V>(parent: &Header, key: u8, mut child: Node<V>) -> Node<V> {
    if let Some(header) = child.header_mut() {
        let mut prefix = Vec::with_capacity(2 * MAX_PREFIX_LEN + 1);
        prefix.extend_from_slice(parent.partial());
        prefix.push(key);
        prefix.extend_from_slice(header.partial());
        let partial_len = parent.partial_len() + 1 + header.partial_len();
        header.set_partial(&prefix, partial_len);
    }
    trace_log!(kind = ?child.kind(), "collapse node4 into its only child");
    child
}

/// Number of stored prefix bytes of `header` that agree with `path` from `depth`. Compares at
/// most `min(MAX_PREFIX_LEN, partial_len, remaining)` bytes.
pub(crate) fn check_prefix(header: &Header, path: &[u8], depth: usize) -> usize {
    let remaining = path.len().saturating_sub(depth);
    let max_cmp = min(header.stored_len(), remaining);
    (0..max_cmp)
        .take_while(|&i| header.partial[i] == path[depth + i])
        .count()
}

/// Position of the first byte at which `path` diverges from the logical prefix of `node`,
/// starting at `depth`. Bytes past the stored prefix are compared against the node's minimum
/// leaf. Returns `partial_len` when the whole prefix matches.
pub(crate) fn prefix_mismatch<V>(node: &Node<V>, path: &[u8], depth: usize) -> usize {
    let Some(header) = node.header() else {
        return 0;
    };
    let matched = check_prefix(header, path, depth);
    let partial_len = header.partial_len();
    if matched < header.stored_len() || partial_len <= MAX_PREFIX_LEN {
        return matched;
    }
    let Some(leaf) = node.minimum() else {
        return matched;
    };
    let end = min(depth + partial_len, min(path.len(), leaf.path().len()));
    let tail = depth + matched;
    if tail >= end {
        return end.saturating_sub(depth);
    }
    matched
        + path[tail..end]
            .iter()
            .zip(&leaf.path()[tail..end])
            .take_while(|(a, b)| a == b)
            .count()
}

/// Length of the common run of `a` and `b` starting at `depth`.
pub(crate) fn longest_common_prefix(a: &[u8], b: &[u8], depth: usize) -> usize {
    let (Some(a), Some(b)) = (a.get(depth..), b.get(depth..)) else {
        return 0;
    };
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use crate::MAX_PREFIX_LEN;
    use crate::keys::encode_path;
    use crate::node::{
        Header, Node, NodeKind, check_prefix, copy_header, longest_common_prefix, prefix_mismatch,
    };

    fn leaf(key: u8, value: u8) -> Node<u8> {
        Node::new_leaf(&[key], value)
    }

    fn value_at(node: &Node<u8>, key: u8) -> Option<u8> {
        node.find_child(key)
            .and_then(|c| c.as_leaf())
            .map(|l| *l.value())
    }

    #[test]
    fn test_n4() {
        let mut n4 = Node::new_4(Header::new(b"abc", 3));
        n4.add_child(5, leaf(5, 1));
        n4.add_child(4, leaf(4, 2));
        n4.add_child(3, leaf(3, 3));
        n4.add_child(2, leaf(2, 4));
        assert_eq!(n4.kind(), NodeKind::Node4);

        assert_eq!(value_at(&n4, 5), Some(1));
        assert_eq!(value_at(&n4, 4), Some(2));
        assert_eq!(value_at(&n4, 3), Some(3));
        assert_eq!(value_at(&n4, 2), Some(4));

        n4.remove_child(5);
        assert!(n4.find_child(5).is_none());
        assert_eq!(value_at(&n4, 4), Some(2));
        assert_eq!(value_at(&n4, 3), Some(3));
        assert_eq!(value_at(&n4, 2), Some(4));

        n4.remove_child(2);
        assert!(n4.find_child(5).is_none());
        assert!(n4.find_child(2).is_none());

        n4.add_child(2, leaf(2, 4));
        n4.remove_child(3);
        assert!(n4.find_child(5).is_none());
        assert!(n4.find_child(3).is_none());
        assert_eq!(n4.num_children(), 2);
    }

    #[test]
    fn test_n4_grows_into_n16() {
        let mut n = Node::new_4(Header::new(b"abc", 3));
        for i in 0..4 {
            n.add_child(i * 10, leaf(i, i));
        }
        assert_eq!(n.kind(), NodeKind::Node4);
        n.add_child(5, leaf(5, 5));
        assert_eq!(n.kind(), NodeKind::Node16);
        assert_eq!(n.partial(), b"abc");
        assert_eq!(n.partial_len(), 3);
        let keys: Vec<u8> = n.children().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![0, 5, 10, 20, 30]);
    }

    #[test]
    fn test_n16() {
        let mut n16 = Node::new_16(Header::default());

        // Fill up the node with keys in reverse order.
        for i in (0..16).rev() {
            n16.add_child(i, leaf(i, i));
        }

        for i in 0..16 {
            assert_eq!(value_at(&n16, i), Some(i));
        }

        // Delete from end doesn't affect position of others.
        n16.remove_child(15);
        n16.remove_child(14);
        assert!(n16.find_child(15).is_none());
        assert!(n16.find_child(14).is_none());
        for i in 0..14 {
            assert_eq!(value_at(&n16, i), Some(i));
        }

        n16.remove_child(0);
        n16.remove_child(1);
        assert!(n16.find_child(0).is_none());
        assert!(n16.find_child(1).is_none());
        for i in 2..14 {
            assert_eq!(value_at(&n16, i), Some(i));
        }

        // Delete from the middle
        n16.remove_child(5);
        n16.remove_child(6);
        assert!(n16.find_child(5).is_none());
        assert!(n16.find_child(6).is_none());
        for i in 2..5 {
            assert_eq!(value_at(&n16, i), Some(i));
        }
        for i in 7..14 {
            assert_eq!(value_at(&n16, i), Some(i));
        }
        assert_eq!(n16.kind(), NodeKind::Node16);
    }

    #[test]
    fn test_n48() {
        let mut n48 = Node::new_48(Header::default());

        for i in 0..48 {
            n48.add_child(i, leaf(i, i));
        }

        for i in 0..48 {
            assert_eq!(value_at(&n48, i), Some(i));
        }

        n48.remove_child(47);
        n48.remove_child(46);
        assert!(n48.find_child(47).is_none());
        assert!(n48.find_child(46).is_none());
        for i in 0..46 {
            assert_eq!(value_at(&n48, i), Some(i));
        }

        n48.add_child(200, leaf(200, 200));
        n48.add_child(201, leaf(201, 201));
        n48.add_child(202, leaf(202, 202));
        assert_eq!(n48.kind(), NodeKind::Node256);
        assert_eq!(n48.num_children(), 49);
    }

    #[test]
    fn test_n_256() {
        let mut n256 = Node::new_256(Header::default());

        for i in 0..=255 {
            n256.add_child(i, leaf(i, i));
        }
        for i in 0..=255 {
            assert_eq!(value_at(&n256, i), Some(i));
        }

        n256.remove_child(47);
        n256.remove_child(46);
        assert!(n256.find_child(47).is_none());
        assert!(n256.find_child(46).is_none());
        for i in 0..46 {
            assert_eq!(value_at(&n256, i), Some(i));
        }
        for i in 48..=255 {
            assert_eq!(value_at(&n256, i), Some(i));
        }
    }

    #[test]
    fn test_shrink_thresholds() {
        let mut n = Node::new_256(Header::new(b"xy", 2));
        for i in 0..40u8 {
            n.add_child(i, leaf(i, i));
        }
        n.remove_child(0);
        n.remove_child(1);
        assert_eq!(n.kind(), NodeKind::Node256);
        n.remove_child(2);
        assert_eq!(n.num_children(), 37);
        assert_eq!(n.kind(), NodeKind::Node48);

        for i in 3..28u8 {
            n.remove_child(i);
        }
        assert_eq!(n.num_children(), 12);
        assert_eq!(n.kind(), NodeKind::Node16);

        for i in 28..37u8 {
            n.remove_child(i);
        }
        assert_eq!(n.num_children(), 3);
        assert_eq!(n.kind(), NodeKind::Node4);
        assert_eq!(n.partial(), b"xy");
        let keys: Vec<u8> = n.children().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![37, 38, 39]);
    }

    #[test]
    fn test_collapse_into_leaf() {
        let mut n = Node::new_4(Header::new(b"ab", 2));
        n.add_child(b'c', leaf(b'c', 1));
        n.add_child(b'd', leaf(b'd', 2));
        assert!(n.remove_child(b'c').is_some());
        assert!(n.is_leaf());
        assert_eq!(n.as_leaf().map(|l| *l.value()), Some(2));
    }

    #[test]
    fn test_collapse_merges_prefixes() {
        let mut child = Node::new_4(Header::new(b"def", 3));
        child.add_child(b'g', leaf(b'g', 1));
        child.add_child(b'h', leaf(b'h', 2));

        let mut n = Node::new_4(Header::new(b"ab", 2));
        n.add_child(b'c', child);
        n.add_child(b'z', leaf(b'z', 3));
        n.remove_child(b'z');

        assert_eq!(n.kind(), NodeKind::Node4);
        assert_eq!(n.partial_len(), 6);
        assert_eq!(n.partial(), b"abcdef");
        assert_eq!(n.num_children(), 2);
    }

    #[test]
    fn test_collapse_clips_long_prefix() {
        let mut child = Node::new_4(Header::new(b"0123456789", 14));
        child.add_child(b'g', leaf(b'g', 1));
        child.add_child(b'h', leaf(b'h', 2));

        let mut n = Node::new_4(Header::new(b"abcdefgh", 8));
        n.add_child(b'!', child);
        n.add_child(b'~', leaf(b'~', 3));
        n.remove_child(b'~');

        assert_eq!(n.partial_len(), 8 + 1 + 14);
        assert_eq!(n.partial().len(), MAX_PREFIX_LEN);
        assert_eq!(n.partial(), b"abcdefgh!0");
    }

    #[test]
    fn test_copy_header() {
        let src = Header::new(b"abcdefghijklmnop", 16);
        let mut dest = Header::default();
        copy_header(&mut dest, &src);
        assert_eq!(dest, src);
        assert_eq!(dest.partial(), b"abcdefghij");
        assert_eq!(dest.partial_len(), 16);
    }

    #[test]
    fn test_minimum_maximum() {
        let mut n = Node::new_4(Header::default());
        let mut inner = Node::new_4(Header::default());
        inner.add_child(b'b', Node::new_leaf(b"mb", 2));
        inner.add_child(b'a', Node::new_leaf(b"ma", 1));
        n.add_child(b'm', inner);
        n.add_child(b'z', Node::new_leaf(b"z", 3));
        n.add_child(b'c', Node::new_leaf(b"c", 0));

        assert_eq!(n.minimum().map(|l| l.key()), Some(&b"c"[..]));
        assert_eq!(n.maximum().map(|l| l.key()), Some(&b"z"[..]));
        n.remove_child(b'c');
        assert_eq!(n.minimum().map(|l| l.key()), Some(&b"ma"[..]));
    }

    #[test]
    fn test_prefix_helpers() {
        let path = encode_path(b"abcdef");
        let header = Header::new(b"bcx", 3);
        assert_eq!(check_prefix(&header, &path, 1), 2);
        assert_eq!(check_prefix(&header, &path, 6), 0);

        assert_eq!(longest_common_prefix(b"abcd", b"abxy", 0), 2);
        assert_eq!(longest_common_prefix(b"abcd", b"abxy", 3), 0);
        assert_eq!(longest_common_prefix(b"ab", b"ab", 5), 0);

        // A prefix longer than the stored bytes is resolved through the minimum leaf.
        let long = [b'k'; 20];
        let mut a = long.to_vec();
        a.push(b'a');
        let mut b = long.to_vec();
        b.push(b'b');
        let mut n = Node::new_4(Header::new(&long, 20));
        n.add_child(b'a', Node::new_leaf(&a, 1));
        n.add_child(b'b', Node::new_leaf(&b, 2));

        let mut probe = long.to_vec();
        probe[15] = b'z';
        assert_eq!(prefix_mismatch(&n, &encode_path(&probe), 0), 15);
        assert_eq!(prefix_mismatch(&n, &encode_path(&a), 0), 20);
        assert_eq!(prefix_mismatch(&n, &encode_path(b"kkx"), 0), 2);
    }
}
