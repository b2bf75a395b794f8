use crate::node::Node;
use crate::tracing_helpers::debug_log;
use crate::tree::RadixTree;

/// A transaction handle bound to one tree.
///
/// There is no isolation and no rollback: every mutation goes straight to the bound tree and is
/// visible there immediately. `commit` only hands the tree back. While the handle is alive the
/// borrow checker keeps anyone else from touching the tree.
pub struct Txn<'a, V> {
    tree: &'a mut RadixTree<V>,
    size: usize,
}

impl<'a, V> Txn<'a, V> {
    pub(crate) fn new(tree: &'a mut RadixTree<V>) -> Self {
        let size = tree.len();
        Self { tree, size }
    }

    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&V> {
        self.tree.search(key)
    }

    pub fn insert<K: AsRef<[u8]>>(&mut self, key: K, value: V) -> Option<V> {
        let old = self.tree.insert(key, value);
        self.size = self.tree.len();
        old
    }

    pub fn delete<K: AsRef<[u8]>>(&mut self, key: K) -> Option<V> {
        let old = self.tree.delete(key);
        self.size = self.tree.len();
        old
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn root(&self) -> Option<&Node<V>> {
        self.tree.root()
    }

    /// Ends the transaction and returns the tree it was bound to.
    pub fn commit(self) -> &'a mut RadixTree<V> {
        debug_log!(size = self.size, "txn commit");
        self.tree
    }
}
