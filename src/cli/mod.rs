//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Account | Login and profile | `login`, `signup`, `onboard`, `verify send` |
//! | Buckets | Course baskets and priorities | `bucket list`, `bucket move 2 up`, `bucket save` |
//! | Lectures | Catalogue search | `lectures --name algo --grade 2` |
//! | Results | Simulation reports | `results`, `results 3` |
//! | Interactive | Full-screen views | `tui`, `reaction` |
//! | Settings | Local configuration | `config show`, `config set server_url ...` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `config set default_format json`.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! regsim --verbose bucket list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod utils;
mod student;
mod lecture;
mod bucket;
mod results;
mod config_cmd;
mod tui;

pub use app::{run, Cli, Commands, Env};
pub use output::{Output, OutputFormat};
