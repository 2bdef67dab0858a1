use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::compression::frequency::FrequencyTable;

/// Represents a node in the Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf node contains a byte value and its frequency.
    Leaf { symbol: u8, freq: u64 },
    /// An internal node with left and right children and combined frequency.
    Internal {
        freq: u64,
        left: Box<HuffmanNode>,
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Returns the frequency of the node.
    pub fn freq(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { freq, .. } => *freq,
            HuffmanNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    pub fn internal_count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { left, right, .. } => {
                1 + left.internal_count() + right.internal_count()
            }
        }
    }
}

/// A helper wrapper for HuffmanNode for use in a BinaryHeap.
/// The node with the smallest frequency has the highest priority; among equal
/// frequencies the one pushed first wins.
#[derive(Debug)]
struct NodeWrapper {
    seq: usize,
    node: Box<HuffmanNode>,
}

impl PartialEq for NodeWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeWrapper {}

impl Ord for NodeWrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse: lower frequency, then lower sequence number, comes first.
        other
            .node
            .freq()
            .cmp(&self.node.freq())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeWrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the Huffman tree given a frequency table.
///
/// Leaves are queued in table order. Each round pops the two lightest nodes;
/// the first popped becomes the left child. Merged nodes are numbered after
/// every node queued before them, so equal weights are served first in, first
/// out. Returns `None` if the frequency table is empty, and the lone leaf
/// itself when the table has a single entry.
pub fn build_huffman_tree(freq_table: &FrequencyTable) -> Option<Box<HuffmanNode>> {
    let mut heap = BinaryHeap::with_capacity(freq_table.len());
    for (seq, (symbol, freq)) in freq_table.iter().enumerate() {
        heap.push(NodeWrapper {
            seq,
            node: Box::new(HuffmanNode::Leaf {
                symbol,
                freq: u64::from(freq),
            }),
        });
    }

    let mut next_seq = heap.len();
    loop {
        let left = heap.pop()?.node;
        let Some(NodeWrapper { node: right, .. }) = heap.pop() else {
            debug!(
                "built Huffman tree: {} leaves, depth {}",
                left.leaf_count(),
                left.depth()
            );
            return Some(left);
        };
        let internal = Box::new(HuffmanNode::Internal {
            freq: left.freq() + right.freq(),
            left,
            right,
        });
        heap.push(NodeWrapper {
            seq: next_seq,
            node: internal,
        });
        next_seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::frequency::build_frequency_table;

    fn leaf_symbol(node: &HuffmanNode) -> Option<u8> {
        match node {
            HuffmanNode::Leaf { symbol, .. } => Some(*symbol),
            HuffmanNode::Internal { .. } => None,
        }
    }

    #[test]
    fn test_empty_table_has_no_tree() {
        let freq = build_frequency_table(b"").unwrap();
        assert!(build_huffman_tree(&freq).is_none());
    }

    #[test]
    fn test_single_symbol_is_bare_leaf() {
        let freq = build_frequency_table(b"aaaa").unwrap();
        let tree = build_huffman_tree(&freq).unwrap();
        assert_eq!(
            *tree,
            HuffmanNode::Leaf {
                symbol: b'a',
                freq: 4
            }
        );
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_two_symbols_merge_once() {
        let freq = build_frequency_table(b"abb").unwrap();
        let tree = build_huffman_tree(&freq).unwrap();
        assert_eq!(tree.internal_count(), 1);
        assert_eq!(tree.freq(), 3);
        match &*tree {
            HuffmanNode::Internal { left, right, .. } => {
                assert_eq!(leaf_symbol(left), Some(b'a'));
                assert_eq!(leaf_symbol(right), Some(b'b'));
            }
            HuffmanNode::Leaf { .. } => panic!("expected an internal root"),
        }
    }

    #[test]
    fn test_ties_are_first_in_first_out() {
        // b and c tie at 1 and merge first, in table order; the merged node
        // then ties with a at 2 and, being newer, goes right.
        let freq = build_frequency_table(b"aabc").unwrap();
        let tree = build_huffman_tree(&freq).unwrap();
        let HuffmanNode::Internal { left, right, .. } = &*tree else {
            panic!("expected an internal root");
        };
        assert_eq!(leaf_symbol(left), Some(b'a'));
        let HuffmanNode::Internal {
            left: inner_left,
            right: inner_right,
            ..
        } = &**right
        else {
            panic!("expected an internal right child");
        };
        assert_eq!(leaf_symbol(inner_left), Some(b'b'));
        assert_eq!(leaf_symbol(inner_right), Some(b'c'));
    }

    #[test]
    fn test_node_counts() {
        let input = b"this is an example for huffman encoding";
        let freq = build_frequency_table(input).unwrap();
        let tree = build_huffman_tree(&freq).unwrap();
        assert_eq!(tree.leaf_count(), freq.len());
        assert_eq!(tree.internal_count(), freq.len() - 1);
        assert_eq!(tree.freq(), input.len() as u64);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let freq = build_frequency_table(b"mississippi river banks").unwrap();
        let first = build_huffman_tree(&freq).unwrap();
        let second = build_huffman_tree(&freq).unwrap();
        assert_eq!(first, second);
    }
}
