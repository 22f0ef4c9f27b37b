//! Shared test input generation.
//!
//! Produces reproducible data with a mix of compressibility so round trips
//! exercise short and long codes, skewed and flat alphabets.

#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `size_bytes` of mixed data from `seed`.
///
/// Sections alternate between runs of one byte, text-like data over a small
/// alphabet, short repeating patterns, and uniformly random bytes.
pub fn sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = rng.gen_range(64..=3000).min(size_bytes - data.len());

        match rng.gen_range(0..10) {
            // runs of the same byte
            0..=2 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(section));
            }

            // text-like
            3..=5 => {
                let alphabet = b"abcdefghijklmnopqrstuvwxyz .!,\n";
                for _ in 0..section {
                    data.push(alphabet[rng.gen_range(0..alphabet.len())]);
                }
            }

            // repeating pattern
            6..=7 => {
                let pattern: Vec<u8> = (0..rng.gen_range(4..=32)).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(section));
            }

            // incompressible
            _ => {
                for _ in 0..section {
                    data.push(rng.gen());
                }
            }
        }
    }

    data
}

/// Text with a heavily skewed symbol distribution.
pub fn skewed_text(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..size_bytes)
        .map(|_| match rng.gen_range(0..100) {
            0..=89 => b'e',
            90..=95 => b't',
            96..=98 => b'a',
            _ => b'q',
        })
        .collect()
}

/// Uniformly random bytes.
pub fn random_bytes(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..size_bytes).map(|_| rng.gen()).collect()
}
