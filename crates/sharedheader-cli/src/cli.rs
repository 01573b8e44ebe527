use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sharedheader")]
#[command(about = "A collapsible header shared across horizontally paged lists", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")"))]
pub struct Cli {
    /// Path to a config file (or set SHAREDHEADER_CONFIG env var)
    #[arg(long, value_name = "FILE", env = "SHAREDHEADER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Header height in terminal rows for the demo
    #[arg(long, default_value_t = 8)]
    pub header_rows: u16,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a JSON script of scroll and selection steps and print the resulting state
    Simulate(SimulateArgs),
    /// Print the effective configuration
    Config {
        #[arg(long, value_enum, default_value_t = ConfigFormat::Json)]
        format: ConfigFormat,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Script file
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Json,
    Toml,
}
