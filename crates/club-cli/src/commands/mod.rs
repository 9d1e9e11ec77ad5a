//! CLI subcommand implementations.

pub mod check;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use club_core::{ClubInput, parse_input};

/// Reads and parses an input file.
///
/// On a malformed line, the line itself is written to `writer` before the
/// error is returned, so it is the only thing on stdout.
pub(crate) fn load_input<W: std::io::Write>(writer: &mut W, path: &Path) -> Result<ClubInput> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    match parse_input(&text) {
        Ok(input) => Ok(input),
        Err(err) => {
            writeln!(writer, "{}", err.raw_line())?;
            Err(err).with_context(|| format!("invalid input in {}", path.display()))
        }
    }
}
