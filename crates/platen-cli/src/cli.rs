// this_file: crates/platen-cli/src/cli.rs

//! Command-line arguments.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};

use platen_core::types::Strategy;

/// Platen: fill design templates from data rows
#[derive(Parser, Debug)]
#[command(name = "platen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug detail (resolver tiers, styles)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors and skip progress output; the final status line still prints
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one image per data row
    #[command(alias = "r")]
    Run(RunArgs),

    /// Show a template's regions and a data source's columns
    #[command(alias = "i")]
    Info(InfoArgs),

    /// List font files the resolver can see
    Fonts(FontsArgs),
}

/// Arguments for `platen run`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Template manifest (JSON)
    #[arg(short, long)]
    pub template: Utf8PathBuf,

    /// Data rows (JSON Lines)
    #[arg(short, long)]
    pub data: Utf8PathBuf,

    /// Directory image paths in rows are relative to (default: the data file's directory)
    #[arg(short, long)]
    pub assets: Option<Utf8PathBuf>,

    /// Region mapping (JSON); asks interactively when omitted
    #[arg(short, long)]
    pub mapping: Option<Utf8PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "output/platen")]
    pub output: Utf8PathBuf,

    /// What to do with text that does not fit
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Write an annotated diagnostic sheet per text region
    #[arg(long)]
    pub debug: bool,

    /// Project-local font root (overrides PLATEN_FONT_ROOT)
    #[arg(long)]
    pub font_root: Option<Utf8PathBuf>,

    /// Do not guess alignment from region names
    #[arg(long)]
    pub no_name_heuristic: bool,
}

/// Arguments for `platen info`
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Template manifest (JSON)
    #[arg(short, long)]
    pub template: Utf8PathBuf,

    /// Data rows (JSON Lines) whose columns to list
    #[arg(short, long)]
    pub data: Option<Utf8PathBuf>,
}

/// Arguments for `platen fonts`
#[derive(Args, Debug)]
pub struct FontsArgs {
    /// Project-local font root (overrides PLATEN_FONT_ROOT)
    #[arg(long)]
    pub font_root: Option<Utf8PathBuf>,

    /// Files shown per directory
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Shrink the font before truncating
    Auto,
    /// Keep the nominal size and truncate
    Fixed,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => Strategy::Auto,
            StrategyArg::Fixed => Strategy::Fixed,
        }
    }
}
