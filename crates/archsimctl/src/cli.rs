//! Command-line definition

use archsim_common::Scenario;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Version is embedded at build time
pub const VERSION: &str = env!("ARCHSIM_VERSION");

#[derive(Debug, Parser)]
#[command(name = "archsimctl")]
#[command(about = "Simulated Arch Linux shell with a natural-language front end", long_about = None)]
#[command(version = VERSION)]
pub struct Cli {
    /// Config file (default: $ARCHSIM_CONFIG or ~/.config/archsim/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Inject a fault before starting: audio, pacman, network
    #[arg(long = "scenario", global = true)]
    pub scenarios: Vec<Scenario>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Do not write the session journal
    #[arg(long, global = true)]
    pub no_journal: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive shell (default)
    Repl,

    /// Run one simulated command
    Run {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Translate a request and run it through the safety gate
    Ask {
        #[arg(required = true, trailing_var_arg = true)]
        request: Vec<String>,
    },
}
