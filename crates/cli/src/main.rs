use std::{env, path::PathBuf, str::FromStr};

#[cfg(feature = "jemalloc")]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use basicguard_core::{load_env_from_project_path, setup_info_logger};
use clap::Parser;

use crate::{
    cli_interface::{Cli, Commands},
    commands::{check, encode, init, start},
    error::CliError,
    project_location::ProjectLocation,
};

mod cli_interface;
mod commands;
mod console;
pub use console::print_error_message;

mod error;
mod project_location;

fn resolve_path(override_path: &Option<String>) -> Result<PathBuf, String> {
    let path = match override_path {
        Some(path) => {
            PathBuf::from_str(path).map_err(|_| format!("Invalid path provided: '{}'", path))?
        }
        None => env::current_dir().map_err(|_| "Failed to get current directory.".to_string())?,
    };

    path.canonicalize().map_err(|e| format!("Failed to resolve path '{}': {}", path.display(), e))
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    setup_info_logger();

    match &cli.command {
        Commands::Init { path, username } => {
            let resolved_path = resolve_path(path).inspect_err(|e| print_error_message(e))?;
            init::handle_init(&ProjectLocation::new(resolved_path), username)
                .inspect_err(|e| print_error_message(&e.to_string()))?;
        }
        Commands::Start { path } => {
            let resolved_path = resolve_path(path).inspect_err(|e| print_error_message(e))?;
            load_env_from_project_path(&resolved_path);
            start::handle_start(&ProjectLocation::new(resolved_path))
                .await
                .inspect_err(|e| print_error_message(&e.to_string()))?;
        }
        Commands::Check(args) => {
            let resolved_path = resolve_path(&args.path).inspect_err(|e| print_error_message(e))?;
            load_env_from_project_path(&resolved_path);
            check::handle_check(&ProjectLocation::new(resolved_path), args)
                .inspect_err(|e| print_error_message(&e.to_string()))?;
        }
        Commands::Encode { username, password } => {
            encode::handle_encode(username, password);
        }
    }

    Ok(())
}
