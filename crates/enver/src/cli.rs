use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "enver", version, about = "Track known and local engine versions")]
pub struct Cli {
    /// Log more to stderr; repeat for debug and trace output
    #[arg(short, long, visible_alias = "debug", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog and local versions with their channel and install state
    List,
    /// Print the version that would be pre-selected
    Default,
    /// Remember a version as the preferred selection
    Select { version: String },
    /// Print the release channel of a version
    Channel { version: String },
    /// Register a local build
    Add {
        path: PathBuf,
        #[arg(long)]
        version: String,
        #[arg(long)]
        name: Option<String>,
    },
    /// Forget the local build registered at a path
    Remove { path: PathBuf },
    /// Fetch the release catalog
    Refresh,
    /// Show the supported major window
    Support {
        #[arg(long)]
        major: Option<u64>,
    },
    /// Show release metadata for a version
    Info { version: String },
}
