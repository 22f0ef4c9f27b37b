//! Configuration for the huffpack command-line tool.
//!
//! Parses command-line arguments and resolves every default (notably the
//! output path) up front, so a run is fully described by its `Config`.

use crate::paths;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Static Huffman compressor.
#[derive(Debug, Parser)]
#[command(name = "huffpack", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print the resolved configuration before running
    #[arg(long, global = true)]
    pub print_config: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress a file
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output path (default: <INPUT>.compressed)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a compression summary
        #[arg(long)]
        stats: bool,
    },

    /// Decompress a file
    Decompress {
        /// File to decompress
        input: PathBuf,

        /// Output path (default: <INPUT> without .compressed, plus .decompressed)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the frequency table and codes stored in a compressed file
    Inspect {
        /// Compressed file to read
        input: PathBuf,
    },
}

/// What a run does, with its resolved output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Compress { output: PathBuf },
    Decompress { output: PathBuf },
    Inspect,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,

    // === Files ===
    /// Input file path
    pub input_file: PathBuf,

    // === Behavior ===
    /// Whether to print the compression summary
    pub print_stats: bool,

    /// Whether to print the resolved config
    pub print_config: bool,

    /// Number of -v flags
    pub verbosity: u8,
}

impl Config {
    /// Parse configuration from command-line arguments (first item is the program name).
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::try_parse_from(args).map(Self::from_cli)
    }

    /// Resolve defaults for parsed arguments.
    pub fn from_cli(cli: Cli) -> Self {
        let (mode, input_file, print_stats) = match cli.command {
            Command::Compress {
                input,
                output,
                stats,
            } => {
                let output = output.unwrap_or_else(|| paths::compressed_path(&input));
                (Mode::Compress { output }, input, stats)
            }
            Command::Decompress { input, output } => {
                let output = output.unwrap_or_else(|| paths::decompressed_path(&input));
                (Mode::Decompress { output }, input, false)
            }
            Command::Inspect { input } => (Mode::Inspect, input, false),
        };

        Config {
            mode,
            input_file,
            print_stats,
            print_config: cli.print_config,
            verbosity: cli.verbose,
        }
    }

    /// Output file path (None for inspect).
    pub fn output_file(&self) -> Option<&Path> {
        match &self.mode {
            Mode::Compress { output } | Mode::Decompress { output } => Some(output),
            Mode::Inspect => None,
        }
    }

    /// Log level implied by the verbosity flags.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        let mode = match self.mode {
            Mode::Compress { .. } => "compress",
            Mode::Decompress { .. } => "decompress",
            Mode::Inspect => "inspect",
        };
        println!("Mode:        {}", mode);
        println!("Input file:  {}", self.input_file.display());
        if let Some(output) = self.output_file() {
            println!("Output file: {}", output.display());
        }
        println!("Statistics:  {}", if self.print_stats { "on" } else { "off" });
        println!("Log level:   {}", self.log_level());
        println!();
    }
}
