//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::analyze::AnalyzeArgs;
use crate::cli::commands::script::ScriptArgs;

/// loginprobe command line
#[derive(Parser, Debug)]
#[command(name = "loginprobe")]
#[command(
    about = "Detect SaaS login form elements and generate Playwright login scripts",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file merged over .loginprobe/ and LOGINPROBE_* settings
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Knowledge base file replacing the built-in patterns
    #[arg(short, long, global = true, value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Seed for reproducible confidence scores
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a login page and report detected elements
    Analyze(AnalyzeArgs),

    /// Generate a Playwright login script for a login page
    Script(ScriptArgs),

    /// List the login patterns in the knowledge base
    Patterns,

    /// List sample login pages and whether the knowledge base covers them
    Examples,
}
