//! # image-dedup CLI
//!
//! Command-line interface for the duplicate image finder.
//!
//! ## Usage
//! ```bash
//! image-dedup scan a.png b.png c.jpg
//! image-dedup scan uploads/*.png --output json
//! ```

mod cli;

use console::style;
use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
