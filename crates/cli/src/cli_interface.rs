use clap::{Parser, Subcommand};

use crate::commands::check::CheckArgs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter basicguard.yaml and .env
    Init {
        /// optional - The path to create the config in, default will be where the command is run.
        #[clap(long, short)]
        path: Option<String>,

        /// The user name written into the template
        #[clap(long, short, default_value = "admin")]
        username: String,
    },
    /// Start the demo server behind the basic auth guard
    Start {
        #[clap(long, short)]
        path: Option<String>,
    },
    /// Show how a request would be treated by the configured rules
    Check(CheckArgs),
    /// Print the Authorization header value for a user
    Encode {
        #[clap(long, short)]
        username: String,

        #[clap(long, short = 'P')]
        password: String,
    },
}
