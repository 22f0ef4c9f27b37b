//! Error types for the huffpack codec.
//!
//! All operations return structured errors rather than panicking. Each
//! variant names the stage that failed so callers can report it precisely.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - I/O: the underlying source or sink failed
/// - Huffman: the input cannot be represented by the container's code model
/// - Header: the container header is truncated or inconsistent
/// - Truncated stream: the payload ran out before every symbol was decoded
/// - Empty alphabet: a header claims data but lists no symbols
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the source or writing the sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Huffman model error (e.g., frequency too large for the format)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Container header could not be parsed
    #[error("corrupt header: {0}")]
    CorruptHeader(#[from] HeaderError),

    /// Bit stream ended before `expected` symbols were decoded
    #[error("truncated stream: decoded {decoded} of {expected} bytes")]
    TruncatedStream { expected: u64, decoded: u64 },

    /// Header lists zero symbols but a non-zero original length
    #[error("empty alphabet for {original_length} bytes of output")]
    EmptyAlphabet { original_length: u64 },
}

/// Huffman model errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// A symbol occurs more often than the 32-bit frequency field can hold
    #[error("symbol {symbol:#04x} occurs {count} times, exceeding the 32-bit frequency limit")]
    FrequencyOverflow { symbol: u8, count: u64 },

    /// Code length exceeds what the bit engine packs in one word
    #[error("code length {length} exceeds maximum 64")]
    CodeLengthTooLong { length: usize },
}

/// Container header errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// Stream ended before the 4-byte symbol count
    #[error("missing symbol count")]
    MissingSymbolCount,

    /// More distinct symbols than the byte alphabet has
    #[error("symbol count {0} exceeds alphabet size 256")]
    SymbolCountOutOfRange(u32),

    /// Stream ended inside the frequency table
    #[error("frequency table truncated at entry {index} of {declared}")]
    TruncatedEntry { index: u32, declared: u32 },

    /// Same symbol listed twice
    #[error("symbol {0:#04x} listed more than once")]
    DuplicateSymbol(u8),

    /// Listed symbol with a zero count
    #[error("symbol {0:#04x} has zero frequency")]
    ZeroFrequency(u8),

    /// Stream ended before the 8-byte original length
    #[error("missing original length")]
    MissingOriginalLength,

    /// Frequencies do not add up to the stored length
    #[error("frequency total {frequency_total} does not match original length {original_length}")]
    LengthMismatch {
        frequency_total: u64,
        original_length: u64,
    },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
