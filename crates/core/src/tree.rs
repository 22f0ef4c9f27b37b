//! Deterministic Huffman tree construction.
//!
//! The decoder never receives the tree itself, only the frequency table, so
//! both sides must build exactly the same shape from the same counts. Every
//! merge therefore picks nodes by a total order with no ties:
//!
//! 1. weight, ascending
//! 2. leaves before internal nodes
//! 3. leaves by symbol, ascending
//! 4. internal nodes by creation order, ascending
//!
//! The first node removed becomes the left child, the second the right.

use crate::frequency::FrequencyTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

/// A node of a Huffman tree. Children are exclusively owned by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Frequency of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Child reached by `bit` (false = left, true = right); `None` on a leaf.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// Merge order key of a node waiting in the build heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    /// Leaves sort before internal nodes of the same weight
    Leaf(u8),
    /// Creation sequence of an internal node
    Internal(u32),
}

#[derive(Debug)]
struct HeapEntry {
    weight: u64,
    rank: Rank,
    node: Node,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.rank == other.rank
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (lightest node = highest priority)
        (other.weight, other.rank).cmp(&(self.weight, self.rank))
    }
}

/// A Huffman tree with at least one leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for `frequencies`.
    ///
    /// Returns `None` for an empty table. A table with a single symbol yields
    /// a tree whose root is that symbol's leaf.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Option<Self> {
        let mut heap: BinaryHeap<HeapEntry> = frequencies
            .iter()
            .map(|(symbol, weight)| HeapEntry {
                weight,
                rank: Rank::Leaf(symbol),
                node: Node::Leaf { symbol, weight },
            })
            .collect();

        let mut sequence = 0u32;
        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };

            let weight = left.weight + right.weight;
            heap.push(HeapEntry {
                weight,
                rank: Rank::Internal(sequence),
                node: Node::Internal {
                    weight,
                    left: Box::new(left.node),
                    right: Box::new(right.node),
                },
            });
            sequence += 1;
        }

        let root = heap.pop()?.node;
        log::debug!(
            "built huffman tree: {} leaves, depth {}",
            root.leaf_count(),
            root.depth()
        );
        Some(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of distinct symbols in the tree.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// The symbol of a single-leaf tree.
    pub fn single_symbol(&self) -> Option<u8> {
        match self.root {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize, label: &str) -> fmt::Result {
            let indent = "  ".repeat(depth);
            match node {
                Node::Leaf { symbol, weight } => {
                    writeln!(f, "{indent}{label}-> leaf {symbol:#04x} [weight: {weight}]")
                }
                Node::Internal { weight, left, right } => {
                    writeln!(f, "{indent}{label}-> internal [weight: {weight}]")?;
                    write_node(f, left, depth + 1, "0")?;
                    write_node(f, right, depth + 1, "1")
                }
            }
        }

        write_node(f, &self.root, 0, "root")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(u8, u64)]) -> FrequencyTable {
        entries.iter().copied().collect()
    }

    fn leaf(symbol: u8, weight: u64) -> Node {
        Node::Leaf { symbol, weight }
    }

    fn internal(left: Node, right: Node) -> Node {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_empty_table() {
        assert!(HuffmanTree::from_frequencies(&FrequencyTable::new()).is_none());
    }

    #[test]
    fn test_single_symbol() {
        let tree = HuffmanTree::from_frequencies(&table(&[(b'A', 1000)])).unwrap();
        assert_eq!(tree.root(), &leaf(b'A', 1000));
        assert_eq!(tree.single_symbol(), Some(b'A'));
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_two_symbols_lighter_goes_left() {
        let tree = HuffmanTree::from_frequencies(&table(&[(b'a', 5), (b'b', 2)])).unwrap();
        assert_eq!(tree.root(), &internal(leaf(b'b', 2), leaf(b'a', 5)));
        assert_eq!(tree.single_symbol(), None);
    }

    #[test]
    fn test_leaf_ties_break_by_symbol() {
        let tree = HuffmanTree::from_frequencies(&table(&[(b'z', 1), (b'a', 1)])).unwrap();
        assert_eq!(tree.root(), &internal(leaf(b'a', 1), leaf(b'z', 1)));
    }

    #[test]
    fn test_leaf_before_internal_of_equal_weight() {
        // a+b merge into weight 2, which ties with c; c must be taken first.
        let tree =
            HuffmanTree::from_frequencies(&table(&[(b'a', 1), (b'b', 1), (b'c', 2)])).unwrap();
        let expected = internal(leaf(b'c', 2), internal(leaf(b'a', 1), leaf(b'b', 1)));
        assert_eq!(tree.root(), &expected);
    }

    #[test]
    fn test_internal_ties_break_by_creation_order() {
        // Four equal leaves produce two internal nodes of weight 2; the one
        // created first (a+b) must become the left child of the root.
        let tree = HuffmanTree::from_frequencies(&table(&[
            (b'd', 1),
            (b'c', 1),
            (b'b', 1),
            (b'a', 1),
        ]))
        .unwrap();
        let expected = internal(
            internal(leaf(b'a', 1), leaf(b'b', 1)),
            internal(leaf(b'c', 1), leaf(b'd', 1)),
        );
        assert_eq!(tree.root(), &expected);
    }

    #[test]
    fn test_leaf_and_internal_counts() {
        let data: Vec<u8> = (0..=255).collect();
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&data)).unwrap();
        assert_eq!(tree.leaf_count(), 256);
        assert_eq!(tree.depth(), 8);
        assert_eq!(tree.root().weight(), 256);

        fn internal_count(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Internal { left, right, .. } => {
                    1 + internal_count(left) + internal_count(right)
                }
            }
        }
        assert_eq!(internal_count(tree.root()), 255);
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let entries = [(b'e', 7), (b'q', 3), (b'x', 3), (b' ', 9), (b'k', 1), (b'm', 4)];
        let forward: FrequencyTable = entries.iter().copied().collect();
        let backward: FrequencyTable = entries.iter().rev().copied().collect();

        let a = HuffmanTree::from_frequencies(&forward).unwrap();
        let b = HuffmanTree::from_frequencies(&backward).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_child_navigation() {
        let tree = HuffmanTree::from_frequencies(&table(&[(b'a', 5), (b'b', 2)])).unwrap();
        let root = tree.root();
        assert_eq!(root.child(false), Some(&leaf(b'b', 2)));
        assert_eq!(root.child(true), Some(&leaf(b'a', 5)));
        assert!(root.child(true).unwrap().child(false).is_none());
        assert!(!root.is_leaf());
    }

    #[test]
    fn test_display() {
        let tree = HuffmanTree::from_frequencies(&table(&[(b'a', 5), (b'b', 2)])).unwrap();
        let text = tree.to_string();
        assert!(text.starts_with("root-> internal [weight: 7]"));
        assert!(text.contains("  0-> leaf 0x62 [weight: 2]"));
        assert!(text.contains("  1-> leaf 0x61 [weight: 5]"));
    }
}
