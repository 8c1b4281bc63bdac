//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::{
    config::ConfigArgs, history::HistoryArgs, import::ImportArgs, init::InitArgs,
    projects::ProjectsArgs, verify::VerifyArgs,
};

#[derive(Parser, Debug)]
#[command(name = "bluecarbon")]
#[command(about = "Blue carbon restoration verification engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .bluecarbon/
    #[arg(short, long, global = true, env = "BLUECARBON_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .bluecarbon/ with a default configuration and database
    Init(InitArgs),

    /// Import project telemetry from a JSON document
    Import(ImportArgs),

    /// List imported projects
    Projects(ProjectsArgs),

    /// Verify a project and record the result
    Verify(VerifyArgs),

    /// Show the verification history of a project
    History(HistoryArgs),

    /// Print the effective configuration
    Config(ConfigArgs),
}
