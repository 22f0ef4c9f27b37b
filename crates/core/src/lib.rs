//! huffpack-core: static Huffman compression for byte streams
//!
//! This library compresses a finite input with a Huffman code built from one
//! full pass over it, and stores the result in a self-describing container:
//! - Counts every byte value of the input
//! - Builds a deterministic Huffman tree from the counts
//! - Writes the counts, the original length, and the bit-packed codes
//! - Rebuilds the same tree from the stored counts to decode
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bitio`: Buffered bit reading/writing
//! - `frequency`: Byte frequency analysis
//! - `tree`: Deterministic Huffman tree construction
//! - `codes`: Code assignment from the tree
//! - `container`: Container format, compress and decompress
//! - `stats`: Compression statistics
//!
//! # Example
//!
//! ```
//! use huffpack_core::container::{compress_bytes, decompress_bytes};
//!
//! let data = b"abracadabra";
//! let packed = compress_bytes(data).unwrap();
//! assert_eq!(decompress_bytes(&packed).unwrap(), data);
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and name the failing stage
//! - **Deterministic**: The tree depends only on the frequency table
//! - **Bounded buffering**: Bit I/O moves fixed-size blocks

pub mod bitio;
pub mod codes;
pub mod container;
pub mod error;
pub mod frequency;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use codes::{Code, CodeTable};
pub use container::{compress, compress_bytes, decompress, decompress_bytes, read_header, Header};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use stats::CompressionStats;
pub use tree::HuffmanTree;
