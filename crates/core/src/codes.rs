//! Code assignment from a Huffman tree.
//!
//! A depth-first walk appends 0 for every left edge and 1 for every right
//! edge; a leaf's code is the path that reached it. A tree that is a single
//! leaf has an empty path, so that symbol gets the code `0` instead.

use crate::error::{HuffmanError, Result};
use crate::tree::{HuffmanTree, Node};
use std::fmt;

/// Longest code the bit engine can write in one call.
pub const MAX_CODE_LEN: usize = 64;

/// A variable-length bit string of at most `MAX_CODE_LEN` bits.
///
/// The code occupies the low `len` bits of `value`, first bit most significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    value: u64,
    len: u8,
}

impl Code {
    /// Build a code from the low `len` bits of `value`.
    ///
    /// `len` is clamped to `MAX_CODE_LEN`.
    pub fn new(value: u64, len: usize) -> Self {
        let len = len.min(MAX_CODE_LEN);
        let mask = if len >= 64 { u64::MAX } else { (1u64 << len) - 1 };
        Self {
            value: value & mask,
            len: len as u8,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit `i`, counting from the first bit written.
    pub fn bit(&self, i: usize) -> bool {
        (self.value >> (self.len() - 1 - i)) & 1 == 1
    }

    /// Whether `self` is a proper or equal prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len
            && other
                .value
                .checked_shr(u32::from(other.len - self.len))
                .unwrap_or(0)
                == self.value
    }

    /// Extend with one more bit, failing past `MAX_CODE_LEN`.
    fn push(self, bit: bool) -> Result<Self> {
        let len = self.len() + 1;
        if len > MAX_CODE_LEN {
            return Err(HuffmanError::CodeLengthTooLong { length: len }.into());
        }
        Ok(Self {
            value: (self.value << 1) | bit as u64,
            len: len as u8,
        })
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len() {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping for one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
}

impl CodeTable {
    /// Assign codes to every leaf of `tree`.
    ///
    /// # Errors
    /// `HuffmanError::CodeLengthTooLong` if a leaf sits deeper than `MAX_CODE_LEN`.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut table = Self { codes: [None; 256] };

        match tree.root() {
            Node::Leaf { symbol, .. } => {
                table.codes[*symbol as usize] = Some(Code::new(0, 1));
            }
            root => assign(root, Code::new(0, 0), &mut table.codes)?,
        }

        for (symbol, code) in table.iter() {
            log::trace!("code {symbol:#04x} -> {code}");
        }
        Ok(table)
    }

    /// Code for `symbol`, if it occurs in the tree.
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbols and their codes, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u8, c)))
    }
}

fn assign(node: &Node, path: Code, codes: &mut [Option<Code>; 256]) -> Result<()> {
    match node {
        Node::Leaf { symbol, .. } => {
            codes[*symbol as usize] = Some(path);
        }
        Node::Internal { left, right, .. } => {
            assign(left, path.push(false)?, codes)?;
            assign(right, path.push(true)?, codes)?;
        }
    }
    Ok(())
}
