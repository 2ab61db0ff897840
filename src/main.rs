//! raml2html command-line entry point.
//!
//! Parses the arguments, renders the input, and on failure prints a
//! user-friendly error to stderr and exits with status 1.

use anyhow::Result;
use clap::Parser;
use raml2html::cli;
use raml2html::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
