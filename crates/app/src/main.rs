//! huffpack: compress and decompress files with a static Huffman code.

mod config;
mod paths;

use config::{Config, Mode};
use huffpack_core::{compress, decompress, read_header, CodeTable, Error, HuffmanTree, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tempfile::NamedTempFile;

fn main() -> ExitCode {
    let config = Config::from_args(std::env::args_os()).unwrap_or_else(|e| e.exit());

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("huffpack: {e}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(config: &Config) -> Result<()> {
    match &config.mode {
        Mode::Compress { output } => run_compress(config, &config.input_file, output),
        Mode::Decompress { output } => run_decompress(&config.input_file, output),
        Mode::Inspect => run_inspect(&config.input_file),
    }
}

fn run_compress(config: &Config, input: &Path, output: &Path) -> Result<()> {
    log::info!("compressing {} -> {}", input.display(), output.display());
    let start = Instant::now();

    let source = BufReader::new(File::open(input)?);
    let stats = write_output(output, |file| compress(source, BufWriter::new(file)))?;
    let elapsed = start.elapsed();

    if config.print_stats {
        stats.print_summary(elapsed);
    }
    println!(
        "Compressed {} -> {} ({} -> {} bytes, {:.1}%)",
        input.display(),
        output.display(),
        stats.original_bytes,
        stats.compressed_bytes,
        stats.compression_ratio() * 100.0
    );
    Ok(())
}

fn run_decompress(input: &Path, output: &Path) -> Result<()> {
    log::info!("decompressing {} -> {}", input.display(), output.display());
    let start = Instant::now();

    let source = BufReader::new(File::open(input)?);
    let written = write_output(output, |file| decompress(source, BufWriter::new(file)))?;

    println!(
        "Decompressed {} -> {} ({} bytes in {} ms)",
        input.display(),
        output.display(),
        written,
        start.elapsed().as_millis()
    );
    Ok(())
}

/// Run `write` against a temporary file next to `output`, and move it into
/// place only if `write` succeeds. A failed run leaves `output` as it was.
fn write_output<T>(output: &Path, write: impl FnOnce(&mut File) -> Result<T>) -> Result<T> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    let value = write(staged.as_file_mut())?;
    staged.as_file_mut().flush()?;
    staged.persist(output).map_err(|e| e.error)?;
    Ok(value)
}

fn run_inspect(input: &Path) -> Result<()> {
    let header = read_header(BufReader::new(File::open(input)?))?;

    println!("=== Header ===");
    println!("Symbols: {}", header.symbol_count());
    println!("Original length: {} bytes", header.original_length);
    println!("Header size: {} bytes", header.encoded_len());
    println!();

    let Some(tree) = HuffmanTree::from_frequencies(&header.frequencies) else {
        println!("(empty input, no codes)");
        return Ok(());
    };
    let codes = CodeTable::from_tree(&tree)?;

    println!("=== Codes ===");
    for (symbol, code) in codes.iter() {
        println!(
            "{:>6} -> {} (freq: {})",
            display_symbol(symbol),
            code,
            header.frequencies.count(symbol)
        );
    }
    println!();
    println!("Tree depth: {}", tree.depth());
    Ok(())
}

/// Printable form of a byte for the code listing.
fn display_symbol(symbol: u8) -> String {
    match symbol {
        b' ' => "' '".to_string(),
        b'!'..=b'~' => format!("'{}'", symbol as char),
        _ => format!("{}", std::ascii::escape_default(symbol)),
    }
}

/// Process exit status for each failure class.
fn exit_code(error: &Error) -> u8 {
    match error {
        Error::Io(_) => 2,
        Error::CorruptHeader(_) => 3,
        Error::TruncatedStream { .. } => 4,
        Error::EmptyAlphabet { .. } => 5,
        Error::Huffman(_) => 6,
    }
}
