//! An in-memory Adaptive Radix Tree.
//!
//! [`RadixTree`] is an ordered map from byte-string keys to values. Inner nodes store the key
//! bytes their whole subtree shares once, and switch between 4, 16, 48 and 256 child slots as
//! they fill and drain.
//!
//! ```rust
//! use adaptive_radix::{RadixTree, VectorKey};
//!
//! let mut tree = RadixTree::new();
//! tree.insert(VectorKey::from(42u32), "answer");
//! tree.insert(VectorKey::from(7u32), "lucky");
//!
//! let values: Vec<_> = tree.iter().map(|(_, v)| *v).collect();
//! assert_eq!(values, vec!["lucky", "answer"]);
//!
//! let mut txn = tree.txn();
//! txn.delete(VectorKey::from(7u32));
//! assert_eq!(txn.commit().len(), 1);
//! ```
//!
//! The tree is not internally synchronized. Mutation takes `&mut self`; wrap the tree in a lock
//! to share it between threads.

mod tracing_helpers;

pub mod iter;
pub mod keys;
pub mod mapping;
pub mod node;
pub mod stats;
pub mod tree;
pub mod txn;
pub mod utils;

pub use iter::{Iter, PathIter};
pub use keys::vector_key::VectorKey;
pub use node::{Leaf, Node, NodeKind};
pub use stats::TreeStats;
pub use tree::RadixTree;
pub use txn::Txn;

/// Number of compressed prefix bytes an inner node stores inline. Longer prefixes keep their
/// full logical length and are checked against a leaf when needed.
pub const MAX_PREFIX_LEN: usize = 10;
