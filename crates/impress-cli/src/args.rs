//! Command-line argument definitions for the Impress CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, post-build relocation and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Impress layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Paths to the input documents (JSON)
    #[arg(required = true, help = "Paths to the input documents")]
    pub inputs: Vec<String>,

    /// Directory receiving the laid out documents
    #[arg(short, long, default_value = "out")]
    pub output_dir: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Move private folders in the output directory to their public names
    #[arg(long)]
    pub relocate_private: bool,

    /// Clear options left over from earlier builds before the first document
    #[arg(long)]
    pub reset: bool,
}
