// Wed Jan 15 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "memlayout")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Finds struct field orders that waste memory on padding", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// JSON config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Overrides the configured word size (4 or 8).
    #[arg(long, global = true)]
    pub word_size: Option<u64>,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the layout of every struct in a file.
    Layout(LayoutArgs),
    /// Print better declarations for structs that waste padding.
    Optimize(OptimizeArgs),
    /// Compare two revisions of a file and print review comments.
    Review(ReviewArgs),
}

#[derive(Parser, Debug)]
pub struct LayoutArgs {
    pub file: PathBuf,

    #[arg(long)]
    pub hex: bool,

    #[arg(long)]
    pub no_padding: bool,
}

#[derive(Parser, Debug)]
pub struct OptimizeArgs {
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// Base revision. Omit for a newly added file.
    #[arg(short, long)]
    pub base: Option<PathBuf>,

    #[arg(long)]
    pub head: PathBuf,

    /// Path to report in comments, defaults to the head file.
    #[arg(short, long)]
    pub path: Option<PathBuf>,
}

impl ReviewArgs {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(base) = &self.base {
            if !base.exists() {
                return Err(format!("Base file does not exist: {:?}", base));
            }
        }
        if !self.head.exists() {
            return Err(format!("Head file does not exist: {:?}", self.head));
        }
        Ok(())
    }

    pub fn reported_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| self.head.clone())
    }
}
