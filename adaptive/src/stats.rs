//! Structural statistics for a tree.
//!
//! Useful for checking that node kinds are promoted and demoted as expected, and for getting a
//! feel for how densely a workload packs the inner nodes.

use std::collections::HashMap;

use crate::node::{Node, NodeKind};

#[derive(Debug, Default, Clone)]
pub struct NodeStats {
    pub width: usize,
    pub total_nodes: usize,
    pub total_children: usize,
    pub density: f64,
}

#[derive(Debug, Default, Clone)]
pub struct TreeStats {
    pub node_stats: HashMap<NodeKind, NodeStats>,
    pub num_leaves: usize,
    pub num_inner_nodes: usize,
    pub total_density: f64,
    pub max_height: usize,
}

impl TreeStats {
    /// Number of inner nodes of the given kind.
    pub fn count(&self, kind: NodeKind) -> usize {
        self.node_stats.get(&kind).map_or(0, |s| s.total_nodes)
    }
}

pub(crate) fn collect_tree_stats<V>(root: Option<&Node<V>>) -> TreeStats {
    let mut stats = TreeStats::default();
    let Some(root) = root else {
        return stats;
    };
    collect_recurse(root, &mut stats, 1);

    let mut total_children = 0;
    let mut total_width = 0;
    for ns in stats.node_stats.values_mut() {
        total_children += ns.total_children;
        total_width += ns.width * ns.total_nodes;
        ns.density = ns.total_children as f64 / (ns.width * ns.total_nodes) as f64;
    }
    stats.num_inner_nodes = stats.node_stats.values().map(|ns| ns.total_nodes).sum();
    if total_width > 0 {
        stats.total_density = total_children as f64 / total_width as f64;
    }
    stats
}

fn collect_recurse<V>(node: &Node<V>, stats: &mut TreeStats, height: usize) {
    stats.max_height = stats.max_height.max(height);
    let kind = node.kind();
    if kind == NodeKind::Leaf {
        stats.num_leaves += 1;
        return;
    }

    let num_children = node.num_children();
    let entry = stats.node_stats.entry(kind).or_insert_with(|| NodeStats {
        width: kind.capacity(),
        ..Default::default()
    });
    entry.total_nodes += 1;
    entry.total_children += num_children;

    for (_, child) in node.children() {
        collect_recurse(child, stats, height + 1);
    }
}

#[cfg(test)]
mod tests {
    use crate::node::NodeKind;
    use crate::tree::RadixTree;

    #[test]
    fn test_empty_stats() {
        let tree = RadixTree::<u8>::new();
        let stats = tree.stats();
        assert_eq!(stats.num_leaves, 0);
        assert_eq!(stats.num_inner_nodes, 0);
        assert_eq!(stats.max_height, 0);
        assert_eq!(stats.total_density, 0.0);
    }

    #[test]
    fn test_stats_shape() {
        let mut tree = RadixTree::new();
        tree.insert("a", 0);
        assert_eq!(tree.stats().max_height, 1);
        assert_eq!(tree.stats().num_inner_nodes, 0);

        for (i, k) in ["b", "c", "d"].iter().enumerate() {
            tree.insert(k, i + 1);
        }
        let stats = tree.stats();
        assert_eq!(stats.num_leaves, 4);
        assert_eq!(stats.count(NodeKind::Node4), 1);
        assert_eq!(stats.max_height, 2);
        assert_eq!(stats.total_density, 1.0);

        tree.insert("e", 5);
        let stats = tree.stats();
        assert_eq!(stats.count(NodeKind::Node4), 0);
        assert_eq!(stats.count(NodeKind::Node16), 1);
        assert_eq!(stats.node_stats[&NodeKind::Node16].total_children, 5);
        assert!((stats.total_density - 5.0 / 16.0).abs() < f64::EPSILON);
    }
}
