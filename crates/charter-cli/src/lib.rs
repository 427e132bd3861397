//! # charter-cli — Command-Line Interface for the Constitutional Rulebook
//!
//! ## Subcommands
//!
//! - `charter majority`: evaluate a vote against a majority requirement.
//! - `charter quorum`: check attendance against a statutory total.
//! - `charter check`: run a standalone predicate on a YAML or JSON record.
//! - `charter replay`: drive a procedure through a scenario file and print
//!   its stage, history and history digest.
//!
//! ## Exit Codes
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | the rule held / every event was accepted  |
//! | 1    | the command itself failed (I/O, parsing)  |
//! | 2    | a violation was raised                    |
//!
//! ```bash
//! charter majority --chamber sejm --for 240 --against 200 --requirement absolute --base seats
//! charter check debt-ceiling --input debt.yaml
//! charter replay scenarios/bill.yaml
//! ```

pub mod check;
pub mod config;
pub mod replay;
pub mod vote;

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::OutputFormat;

/// Exit code when a rule held or every event was accepted.
pub const EXIT_OK: u8 = 0;

/// Exit code when a violation was raised.
pub const EXIT_VIOLATION: u8 = 2;

/// Load a YAML or JSON document, chosen by file extension.
///
/// `.json` is parsed as JSON; `.yaml`, `.yml` and anything else as YAML.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content).with_context(|| format!("parsing JSON in {}", path.display()))
    } else {
        serde_yaml::from_str(&content).with_context(|| format!("parsing YAML in {}", path.display()))
    }
}

/// Print a report as pretty JSON, or through `text` for text output.
pub fn emit<T: Serialize>(
    format: OutputFormat,
    report: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(report).context("serializing report")?;
            println!("{rendered}");
        }
        OutputFormat::Text => println!("{}", text(report)),
    }
    Ok(())
}
