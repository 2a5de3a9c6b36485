use std::path::PathBuf;
use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "vultester", version, about = "Server vulnerability expert system")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP analysis API
    Serve(ServeArgs),
    /// Analyze a set of configuration facts
    Analyze(AnalyzeArgs),
    /// List the rules of the knowledge base
    Rules(RulesArgs),
    /// Validate a knowledge catalogue file or directory
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long, default_value = "5000")]
    pub port: u16,

    /// Listen address
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Knowledge catalogue file or directory (defaults to the built-in one)
    #[arg(short, long)]
    pub knowledge: Option<PathBuf>,
}

#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Observed facts, e.g. no_ssl_enabled port_23_open
    pub facts: Vec<String>,

    /// Reasoning method: forward, backward, mixed
    #[arg(short, long, default_value = "forward")]
    pub method: String,

    /// Knowledge catalogue file or directory
    #[arg(short, long)]
    pub knowledge: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print the inference trace
    #[arg(long)]
    pub trace: bool,
}

#[derive(Args, Clone)]
pub struct RulesArgs {
    /// Only list rules of this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Knowledge catalogue file or directory
    #[arg(short, long)]
    pub knowledge: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Catalogue file or directory to validate
    pub path: PathBuf,
}
