//! Compression statistics.
//!
//! `compress` reports how the output splits between the header (frequency
//! table plus length fields) and the bit-packed payload. These numbers are
//! for display only and never influence encoding.

use std::time::Duration;

/// Sizes observed during one compression run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressionStats {
    /// Bytes read from the input
    pub original_bytes: u64,

    /// Total bytes written (header + payload)
    pub compressed_bytes: u64,

    /// Bytes of container header
    pub header_bytes: u64,

    /// Bytes of bit-packed payload
    pub payload_bytes: u64,

    /// Payload bits before padding
    pub payload_bits: u64,

    /// Distinct symbols in the input
    pub distinct_symbols: usize,
}

impl CompressionStats {
    /// Compute compression ratio (compressed / original).
    ///
    /// Returns 0.0 for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            self.compressed_bytes as f64 / self.original_bytes as f64
        }
    }

    /// Fraction of the input saved; negative when the output grew.
    pub fn space_savings(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            1.0 - self.compression_ratio()
        }
    }

    /// Average code length over the input, in bits.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.original_bytes as f64
        }
    }

    /// Compute throughput in bytes/second for a run that took `elapsed`.
    pub fn throughput_bps(&self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.original_bytes as f64 / secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self, elapsed: Duration) {
        println!("\n=== Compression Summary ===");
        println!("Duration: {} ms", elapsed.as_millis());
        println!();
        println!("Original:   {} bytes ({:.2} MiB)", self.original_bytes, mib(self.original_bytes));
        println!("Compressed: {} bytes ({:.2} MiB)", self.compressed_bytes, mib(self.compressed_bytes));
        println!("  header:   {} bytes ({} symbols)", self.header_bytes, self.distinct_symbols);
        println!("  payload:  {} bytes ({} bits)", self.payload_bytes, self.payload_bits);
        println!();
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Savings: {:.1}%", self.space_savings() * 100.0);
        println!("Bits per symbol: {:.3}", self.bits_per_symbol());
        println!("Throughput: {:.2} MB/s", self.throughput_bps(elapsed) / 1_000_000.0);
        println!();
    }

    /// Export statistics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "original_bytes={}\n\
             compressed_bytes={}\n\
             header_bytes={}\n\
             payload_bytes={}\n\
             payload_bits={}\n\
             distinct_symbols={}\n\
             compression_ratio={:.4}\n\
             bits_per_symbol={:.4}\n",
            self.original_bytes,
            self.compressed_bytes,
            self.header_bytes,
            self.payload_bytes,
            self.payload_bits,
            self.distinct_symbols,
            self.compression_ratio(),
            self.bits_per_symbol(),
        )
    }
}

fn mib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}
