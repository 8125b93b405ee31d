//! Command implementations.

pub mod batch;
pub mod calc;
pub mod schedule;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{CliError, CliResult};

/// Arguments of commands that take one request.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Request file (JSON); reads stdin when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Arguments of the batch command.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// File holding a JSON array of requests
    #[arg(short, long)]
    pub input: PathBuf,
}

/// Reads the request text from a file, or stdin without one.
pub fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) => read_file(path),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

/// Reads a whole file, naming it in the error.
pub fn read_file(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}
