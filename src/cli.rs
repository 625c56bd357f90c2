use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_DATA_DIR, RisaleConfig};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Corpus directory holding `index/` and `sozler/`.
    #[arg(long, global = true, env = "RISALE_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn config(&self) -> RisaleConfig {
        RisaleConfig::new(&self.data_dir)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Answer a message the way the bot would.
    Reply(ReplyArgs),
    /// Show how a message is understood, without reading the corpus.
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
pub struct ReplyArgs {
    /// Message text, e.g. "risale sözler 9 sayfa 3 kapalı".
    pub text: String,

    /// Print the whole response (text, buttons, navigation) as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    pub text: String,
}
