//! Container format and whole-stream compression.
//!
//! A container carries the frequency table instead of the tree; the decoder
//! rebuilds the identical tree from it.
//!
//! # Container Format
//!
//! ```text
//! +------------------------+
//! | symbol_count (4)       |  u32 little-endian, 0..=256
//! +------------------------+
//! | entries (5 each)       |  u8 symbol, u32 frequency (little-endian),
//! | (symbol_count times)   |  ascending symbol order
//! +------------------------+
//! | original_length (8)    |  u64 little-endian
//! +------------------------+
//! | payload                |  codes of every input byte, MSB-first,
//! | (variable)             |  last byte zero-padded
//! +------------------------+
//! ```
//!
//! There is no padding-length field: the decoder stops after
//! `original_length` symbols. An empty input produces a 12-byte header and
//! no payload.

use crate::bitio::{BitReader, BitWriter, BUFFER_SIZE};
use crate::codes::CodeTable;
use crate::error::{Error, HeaderError, HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::stats::CompressionStats;
use crate::tree::{HuffmanTree, Node};
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

/// Size of the symbol count field
pub const SYMBOL_COUNT_SIZE: usize = 4;

/// Size of one frequency table entry
pub const ENTRY_SIZE: usize = 5;

/// Size of the original length field
pub const ORIGINAL_LENGTH_SIZE: usize = 8;

/// Decoded bytes between progress log lines
const PROGRESS_INTERVAL: u64 = 1_000_000;

/// Parsed container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Symbol counts the tree is rebuilt from
    pub frequencies: FrequencyTable,

    /// Number of bytes the payload decodes to
    pub original_length: u64,
}

impl Header {
    /// Header for an input with the given counts.
    ///
    /// # Errors
    /// `HuffmanError::FrequencyOverflow` if a count does not fit in 32 bits.
    pub fn for_frequencies(frequencies: FrequencyTable) -> Result<Self> {
        if let Some((symbol, count)) = frequencies.iter().find(|&(_, c)| c > u64::from(u32::MAX)) {
            return Err(HuffmanError::FrequencyOverflow { symbol, count }.into());
        }

        let original_length = frequencies.total();
        Ok(Self {
            frequencies,
            original_length,
        })
    }

    /// Number of distinct symbols listed.
    pub fn symbol_count(&self) -> u32 {
        self.frequencies.distinct() as u32
    }

    /// Serialized size in bytes.
    pub fn encoded_len(&self) -> u64 {
        (SYMBOL_COUNT_SIZE + self.frequencies.distinct() * ENTRY_SIZE + ORIGINAL_LENGTH_SIZE) as u64
    }

    /// Serialize the header.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.encoded_len() as usize);
        bytes.extend_from_slice(&self.symbol_count().to_le_bytes());

        for (symbol, count) in self.frequencies.iter() {
            let count32 = u32::try_from(count)
                .map_err(|_| HuffmanError::FrequencyOverflow { symbol, count })?;
            bytes.push(symbol);
            bytes.extend_from_slice(&count32.to_le_bytes());
        }

        bytes.extend_from_slice(&self.original_length.to_le_bytes());
        Ok(bytes)
    }

    /// Write the header to `sink` in one call.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        sink.write_all(&self.to_bytes()?)?;
        Ok(())
    }

    /// Parse and validate a header, consuming exactly its bytes from `source`.
    ///
    /// # Errors
    /// - `Error::CorruptHeader` if a field is truncated, out of range, or the
    ///   counts do not add up to the original length
    /// - `Error::EmptyAlphabet` if no symbols are listed but the length is non-zero
    /// - `Error::Io` for any other read failure
    pub fn read_from<R: Read>(source: &mut R) -> Result<Self> {
        let declared = u32::from_le_bytes(read_field(source, HeaderError::MissingSymbolCount)?);
        if declared > 256 {
            return Err(HeaderError::SymbolCountOutOfRange(declared).into());
        }

        let mut frequencies = FrequencyTable::new();
        for index in 0..declared {
            let entry: [u8; ENTRY_SIZE] =
                read_field(source, HeaderError::TruncatedEntry { index, declared })?;
            let symbol = entry[0];
            let count = u32::from_le_bytes([entry[1], entry[2], entry[3], entry[4]]);

            if count == 0 {
                return Err(HeaderError::ZeroFrequency(symbol).into());
            }
            if frequencies.count(symbol) != 0 {
                return Err(HeaderError::DuplicateSymbol(symbol).into());
            }
            frequencies.set(symbol, u64::from(count));
        }

        let original_length =
            u64::from_le_bytes(read_field(source, HeaderError::MissingOriginalLength)?);

        let header = Self {
            frequencies,
            original_length,
        };
        header.validate()?;

        log::debug!(
            "read header: {} symbols, {} bytes",
            declared,
            header.original_length
        );
        log::trace!("frequency table: {:?}", header.frequencies);
        Ok(header)
    }

    fn validate(&self) -> Result<()> {
        if self.frequencies.is_empty() {
            if self.original_length > 0 {
                return Err(Error::EmptyAlphabet {
                    original_length: self.original_length,
                });
            }
            return Ok(());
        }

        let frequency_total = self.frequencies.total();
        if frequency_total != self.original_length {
            return Err(HeaderError::LengthMismatch {
                frequency_total,
                original_length: self.original_length,
            }
            .into());
        }
        Ok(())
    }
}

/// Read a fixed-size field, mapping a short read to `missing`.
fn read_field<R: Read, const N: usize>(source: &mut R, missing: HeaderError) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    match source.read_exact(&mut buf) {
        Ok(()) => Ok(buf),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(missing.into()),
        Err(e) => Err(e.into()),
    }
}

/// Read and validate just the header of a container.
pub fn read_header<R: Read>(mut source: R) -> Result<Header> {
    Header::read_from(&mut source)
}

/// Compress `input` into `output`.
///
/// The input is read twice: once to count symbols and, after seeking back to
/// where it started, once to encode.
///
/// # Errors
/// - `Error::Io` if reading, seeking or writing fails, or the input changes
///   between the two passes
/// - `Error::Huffman` if a symbol occurs more than `u32::MAX` times
pub fn compress<R: Read + Seek, W: Write>(mut input: R, mut output: W) -> Result<CompressionStats> {
    let start = input.stream_position()?;

    let frequencies = FrequencyTable::from_reader(&mut input)?;
    log::debug!(
        "analyzed {} bytes, {} distinct symbols",
        frequencies.total(),
        frequencies.distinct()
    );
    log::trace!("frequency table: {:?}", frequencies);

    let header = Header::for_frequencies(frequencies)?;
    header.write_to(&mut output)?;

    let mut stats = CompressionStats {
        original_bytes: header.original_length,
        header_bytes: header.encoded_len(),
        distinct_symbols: header.frequencies.distinct(),
        ..Default::default()
    };

    let Some(tree) = HuffmanTree::from_frequencies(&header.frequencies) else {
        output.flush()?;
        stats.compressed_bytes = stats.header_bytes;
        log::debug!("empty input, wrote header only");
        return Ok(stats);
    };
    log::trace!("huffman tree:\n{}", tree);
    let codes = CodeTable::from_tree(&tree)?;

    input.seek(SeekFrom::Start(start))?;
    let mut writer = BitWriter::new(output);
    let encoded = encode_stream(&mut input, &codes, &mut writer)?;
    writer.flush()?;

    if encoded != header.original_length {
        return Err(input_changed(format!(
            "input was {} bytes on the first pass and {} on the second",
            header.original_length, encoded
        )));
    }

    stats.payload_bits = writer.bit_len();
    stats.payload_bytes = writer.bytes_flushed();
    stats.compressed_bytes = stats.header_bytes + stats.payload_bytes;
    log::debug!(
        "wrote {} payload bytes ({} bits)",
        stats.payload_bytes,
        stats.payload_bits
    );

    Ok(stats)
}

/// Feed the code of every byte of `input` to `writer`; returns bytes encoded.
fn encode_stream<R: Read, W: Write>(
    input: &mut R,
    codes: &CodeTable,
    writer: &mut BitWriter<W>,
) -> Result<u64> {
    let mut chunk = vec![0u8; BUFFER_SIZE];
    let mut encoded = 0u64;

    loop {
        let n = match input.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        for &byte in &chunk[..n] {
            let code = codes.get(byte).ok_or_else(|| {
                input_changed(format!("byte {byte:#04x} was not seen on the first pass"))
            })?;
            writer.write_code(code)?;
        }
        encoded += n as u64;
    }

    Ok(encoded)
}

fn input_changed(detail: String) -> Error {
    Error::Io(io::Error::new(
        io::ErrorKind::InvalidData,
        format!("input changed during compression: {detail}"),
    ))
}

/// Decompress a container from `input` into `output`.
///
/// Returns the number of bytes written.
///
/// # Errors
/// - `Error::CorruptHeader` / `Error::EmptyAlphabet` for a bad header
/// - `Error::TruncatedStream` if the payload ends early
/// - `Error::Io` if reading or writing fails
pub fn decompress<R: Read, W: Write>(mut input: R, output: W) -> Result<u64> {
    let header = Header::read_from(&mut input)?;
    let expected = header.original_length;
    let mut sink = BlockSink::new(output);

    let Some(tree) = HuffmanTree::from_frequencies(&header.frequencies) else {
        sink.finish()?;
        return Ok(0);
    };
    log::trace!("huffman tree:\n{}", tree);

    if let Some(symbol) = tree.single_symbol() {
        // One-symbol payloads carry no information; never read them.
        for _ in 0..expected {
            sink.push(symbol)?;
        }
        sink.finish()?;
        return Ok(expected);
    }

    let root = tree.root();
    let mut reader = BitReader::new(input);
    let mut decoded = 0u64;

    while decoded < expected {
        let mut node = root;
        while let Node::Internal { left, right, .. } = node {
            if !reader.has_more()? {
                return Err(Error::TruncatedStream { expected, decoded });
            }
            node = if reader.read_bit()? { right } else { left };
        }
        if let Node::Leaf { symbol, .. } = node {
            sink.push(*symbol)?;
        }

        decoded += 1;
        if decoded % PROGRESS_INTERVAL == 0 {
            log::debug!("decoded {} of {} bytes", decoded, expected);
        }
    }

    sink.finish()?;
    Ok(decoded)
}

/// Compress a byte slice into a new container.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    compress(Cursor::new(data), &mut out)?;
    Ok(out)
}

/// Decompress a container held in memory.
pub fn decompress_bytes(container: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decompress(container, &mut out)?;
    Ok(out)
}

/// Collects decoded bytes and writes them to the sink in blocks.
struct BlockSink<W: Write> {
    sink: W,
    block: Vec<u8>,
}

impl<W: Write> BlockSink<W> {
    fn new(sink: W) -> Self {
        Self {
            sink,
            block: Vec::with_capacity(BUFFER_SIZE),
        }
    }

    fn push(&mut self, byte: u8) -> io::Result<()> {
        self.block.push(byte);
        if self.block.len() >= BUFFER_SIZE {
            self.sink.write_all(&self.block)?;
            self.block.clear();
        }
        Ok(())
    }

    fn finish(mut self) -> io::Result<()> {
        if !self.block.is_empty() {
            self.sink.write_all(&self.block)?;
        }
        self.sink.flush()
    }
}
