//! Code table generation.
//!
//! Codes are root-to-leaf paths of the Huffman tree, `0` for a left edge and
//! `1` for a right edge, so the table is prefix-free by construction. The
//! forward (symbol to code) and reverse (code to symbol) maps are filled by the
//! same traversal.

use std::collections::{BTreeMap, HashMap};

use bitvec::prelude::*;
use log::trace;

use crate::compression::frequency::FrequencyTable;
use crate::compression::tree::{build_huffman_tree, HuffmanNode};

/// A variable-length code, most significant bit first.
pub type Code = BitVec<u8, Msb0>;

/// Bidirectional mapping between byte values and their codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    forward: BTreeMap<u8, Code>,
    reverse: HashMap<Code, u8>,
    max_len: usize,
}

impl CodeTable {
    /// Walk `root` and record the code of every leaf.
    ///
    /// If the tree consists of a single leaf (i.e. one unique symbol), the code
    /// "0" is assigned so that every symbol still costs one bit.
    pub fn from_tree(root: &HuffmanNode) -> Self {
        let mut table = CodeTable::default();
        let mut prefix = Code::new();
        table.assign(root, &mut prefix);
        table
    }

    /// Build the tree for `freq_table` and derive its codes. An empty table
    /// yields an empty code table.
    pub fn from_frequencies(freq_table: &FrequencyTable) -> Self {
        build_huffman_tree(freq_table)
            .map(|root| Self::from_tree(&root))
            .unwrap_or_default()
    }

    fn assign(&mut self, node: &HuffmanNode, prefix: &mut Code) {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                let code = if prefix.is_empty() {
                    bitvec![u8, Msb0; 0]
                } else {
                    prefix.clone()
                };
                trace!("code {:#04x} -> {}", symbol, to_bit_string(&code));
                self.max_len = self.max_len.max(code.len());
                self.reverse.insert(code.clone(), *symbol);
                self.forward.insert(*symbol, code);
            }
            HuffmanNode::Internal { left, right, .. } => {
                prefix.push(false);
                self.assign(left, prefix);
                prefix.pop();
                prefix.push(true);
                self.assign(right, prefix);
                prefix.pop();
            }
        }
    }

    /// Code assigned to `symbol`.
    pub fn code(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.forward.get(&symbol).map(|code| code.as_bitslice())
    }

    /// Symbol whose code is exactly `code`.
    pub fn symbol(&self, code: &BitSlice<u8, Msb0>) -> Option<u8> {
        self.reverse.get(code).copied()
    }

    /// Length in bits of the longest code, 0 for an empty table.
    pub fn max_code_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.forward
            .iter()
            .map(|(&symbol, code)| (symbol, code.as_bitslice()))
    }
}

/// Render a code as a string of `0` and `1` characters.
pub fn to_bit_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}
