use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "rbspeed",
    version,
    about = "Suggests faster idioms for common Ruby performance anti-patterns",
    long_about = "rbspeed scans a Ruby project for code idioms with well-known faster \
                  alternatives and reports them per file and line."
)]
pub struct Cli {
    /// Project root to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
