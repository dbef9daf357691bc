// Tue Jan 20 2026 - Alex

use crate::output::OutputFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "struct-layout")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Dump compiler-verified struct layouts", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Repeat for more detail (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Take the log filter from RUST_LOG instead of -v.
    #[arg(long, global = true)]
    pub env_log: bool,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a type table and dump the target struct.
    Dump(DumpArgs),
    /// Parse a text layout file and print what it describes.
    Read(ReadArgs),
}

#[derive(Parser, Debug)]
pub struct DumpArgs {
    /// JSON type table produced by the compiler front end.
    pub types: PathBuf,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short = 's', long = "struct")]
    pub target_struct: Option<String>,

    /// Plugin-style option, `key=value` or `-fplugin-arg-struct_layout-key=value`.
    #[arg(short = 'p', long = "plugin-arg", allow_hyphen_values = true)]
    pub plugin_args: Vec<String>,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Parser, Debug)]
pub struct ReadArgs {
    pub input: PathBuf,
}
