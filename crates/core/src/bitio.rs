//! Bit-level I/O over byte sinks and sources.
//!
//! `BitWriter` packs Huffman codes into bytes for any `Write` sink and
//! `BitReader` unpacks them from any `Read` source. Both operate in MSB-first
//! order: the first bit written lands in bit position 7 of the first byte.
//!
//! # Buffering
//! Both sides move whole blocks of `BUFFER_SIZE` bytes to and from the
//! underlying stream so that per-bit calls never reach the OS.
//!
//! # Padding Rules
//! - BitWriter: pads the final incomplete byte with trailing zeros
//! - BitReader: cannot tell padding from data; the caller stops after the
//!   number of symbols recorded in the container header
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11, 2).unwrap();
//! // Total: 10111 -> padded to 10111000
//! let bytes = writer.finish().unwrap();
//! assert_eq!(bytes, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(&bytes[..]);
//! assert!(reader.read_bit().unwrap());
//! assert!(!reader.read_bit().unwrap());
//! ```

use crate::codes::Code;
use crate::error::{HuffmanError, Result};
use std::io::{self, Read, Write};

/// Size of the block buffer on either side of the bit engine.
pub const BUFFER_SIZE: usize = 8192;

/// Writes bits MSB-first into a buffered byte sink.
///
/// # Invariants
/// - `bit_count` is always < 8
/// - `bytes.len()` is always < `BUFFER_SIZE` between calls
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    sink: W,
    /// Completed bytes not yet handed to the sink
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
    /// Bytes handed to the sink so far
    bytes_flushed: u64,
    /// Total bits accepted, padding excluded
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter in front of `sink`.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            bytes: Vec::with_capacity(BUFFER_SIZE),
            bit_buffer: 0,
            bit_count: 0,
            bytes_flushed: 0,
            bits_written: 0,
        }
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        if bit {
            self.bit_buffer |= 1 << (7 - self.bit_count);
        }
        self.bit_count += 1;
        self.bits_written += 1;

        if self.bit_count == 8 {
            self.push_byte()?;
        }
        Ok(())
    }

    /// Write up to 64 bits to the output.
    ///
    /// Bits are written MSB-first. For example, writing value=0b101 with count=3
    /// writes bits 1, 0, 1 in that order.
    ///
    /// # Errors
    /// Returns `HuffmanError::CodeLengthTooLong` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(HuffmanError::CodeLengthTooLong { length: count }.into());
        }

        let mut remaining = count;
        while remaining > 0 {
            // How many bits fit in the current byte?
            let bits_to_write = remaining.min(8 - self.bit_count as usize);

            // Take the top bits_to_write of the remaining value
            let shift = remaining - bits_to_write;
            let bits = ((value >> shift) & ((1u64 << bits_to_write) - 1)) as u8;

            self.bit_buffer |= bits << (8 - self.bit_count as usize - bits_to_write);
            self.bit_count += bits_to_write as u8;

            if self.bit_count == 8 {
                self.push_byte()?;
            }
            remaining -= bits_to_write;
        }

        self.bits_written += count as u64;
        Ok(())
    }

    /// Write every bit of a Huffman code.
    pub fn write_code(&mut self, code: &Code) -> Result<()> {
        self.write_bits(code.value(), code.len())
    }

    /// Force the partial byte and all buffered bytes out to the sink.
    ///
    /// The unused low-order bits of the final byte are zero. Calling this
    /// again with nothing pending writes nothing, so it is only byte-aligned
    /// once per stream.
    pub fn flush(&mut self) -> io::Result<()> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
        self.drain()?;
        self.sink.flush()
    }

    /// Flush and return the underlying sink.
    pub fn finish(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.sink)
    }

    /// Bytes handed to the sink so far.
    pub fn bytes_flushed(&self) -> u64 {
        self.bytes_flushed
    }

    /// Total number of bits written, excluding padding.
    pub fn bit_len(&self) -> u64 {
        self.bits_written
    }

    fn push_byte(&mut self) -> io::Result<()> {
        self.bytes.push(self.bit_buffer);
        self.bit_buffer = 0;
        self.bit_count = 0;

        if self.bytes.len() >= BUFFER_SIZE {
            self.drain()?;
        }
        Ok(())
    }

    fn drain(&mut self) -> io::Result<()> {
        if !self.bytes.is_empty() {
            self.sink.write_all(&self.bytes)?;
            self.bytes_flushed += self.bytes.len() as u64;
            self.bytes.clear();
        }
        Ok(())
    }
}

/// Reads bits MSB-first from a buffered byte source.
///
/// Once the source is exhausted the reader is permanently ended:
/// `has_more` returns false and `read_bit` returns `false`.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    source: R,
    /// Read-ahead block
    buffer: Vec<u8>,
    /// Index of the next unread byte in `buffer`
    buffer_pos: usize,
    /// Valid bytes in `buffer`
    buffer_len: usize,
    current_byte: u8,
    /// Unread bits left in `current_byte`
    bits_left: u8,
    ended: bool,
}

impl<R: Read> BitReader<R> {
    /// Create a new BitReader over `source`.
    pub fn new(source: R) -> Self {
        Self {
            source,
            buffer: vec![0; BUFFER_SIZE],
            buffer_pos: 0,
            buffer_len: 0,
            current_byte: 0,
            bits_left: 0,
            ended: false,
        }
    }

    /// Read the next bit, or `false` once the source is exhausted.
    pub fn read_bit(&mut self) -> io::Result<bool> {
        if !self.has_more()? {
            return Ok(false);
        }

        self.bits_left -= 1;
        Ok((self.current_byte >> self.bits_left) & 1 == 1)
    }

    /// Whether another bit can be produced, refilling from the source if needed.
    pub fn has_more(&mut self) -> io::Result<bool> {
        if self.bits_left > 0 {
            return Ok(true);
        }
        if self.ended {
            return Ok(false);
        }

        if self.buffer_pos >= self.buffer_len && !self.refill()? {
            self.ended = true;
            return Ok(false);
        }

        self.current_byte = self.buffer[self.buffer_pos];
        self.buffer_pos += 1;
        self.bits_left = 8;
        Ok(true)
    }

    /// Fill the block buffer; false when the source has no more bytes.
    fn refill(&mut self) -> io::Result<bool> {
        loop {
            match self.source.read(&mut self.buffer) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    self.buffer_pos = 0;
                    self.buffer_len = n;
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
