//! CLI argument parsing for cleanscript.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// cleanscript - compile Cleanscript (.csc) files to JavaScript
#[derive(Parser, Debug)]
#[command(name = "cleanscript")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: ./cleanscript.toml if present)
    #[arg(long, global = true, env = "CLEANSCRIPT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a file, or every source file in a directory
    #[command(alias = "c")]
    Compile(BuildArgs),

    /// Compile, then recompile sources as they change
    #[command(alias = "w")]
    Watch(BuildArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct BuildArgs {
    /// Source file or directory
    pub target: PathBuf,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Pipe the output through the configured minifier
    #[arg(short, long)]
    pub minify: bool,

    /// Mangle top-level names while minifying
    #[arg(long, requires = "minify")]
    pub mangle: bool,

    /// Pipe the output through the configured formatter
    #[arg(short, long)]
    pub prettify: bool,

    /// Omit the "Compiled by Cleanscript" comment
    #[arg(long)]
    pub no_banner: bool,

    /// Print the JavaScript instead of writing a file
    #[arg(long, conflicts_with = "recursive")]
    pub stdout: bool,
}
