use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "relname")]
#[command(author, version, about = "Parse scene and P2P release names")]
pub struct Cli {
    /// Release names to parse (reads lines from stdin when omitted)
    pub names: Vec<String>,

    /// Output one JSON object per release
    #[arg(long)]
    pub json: bool,

    /// Print only the release type
    #[arg(long, conflicts_with = "tags")]
    pub type_only: bool,

    /// Print the lexed tokens
    #[arg(long)]
    pub tags: bool,

    /// Keep " AKA " inside titles instead of splitting out the alternate
    #[arg(long)]
    pub no_aka: bool,

    /// Load the vocabulary from a CSV file instead of the built-in table
    #[arg(long, value_name = "FILE")]
    pub vocab: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
