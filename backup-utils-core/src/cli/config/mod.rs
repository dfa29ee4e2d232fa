mod check;
mod dump;
mod init;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
pub use init::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check,

    /// Print resolved configuration
    Dump {
        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Write a commented starter config file
    Init {
        /// Where to write the file
        #[arg(default_value = crate::conf::DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },
}
