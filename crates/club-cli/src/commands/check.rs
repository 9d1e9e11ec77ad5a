//! Check command: validate an input file without replaying it.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use super::load_input;

pub fn run<W: Write>(writer: &mut W, path: &Path) -> Result<()> {
    let input = load_input(writer, path)?;
    writeln!(
        writer,
        "ok: {} tables, {} events",
        input.config.tables(),
        input.events.len()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn input_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn check_summarizes_valid_input() {
        let file = input_file("2\n09:00 19:00\n10\n09:10 1 a\n09:20 2 a 1\n");
        let mut output = Vec::new();
        run(&mut output, file.path()).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @"ok: 2 tables, 2 events");
    }

    #[test]
    fn check_prints_offending_line() {
        let file = input_file("2\n09:00 19:00\n10\n09:10 1 a\n09:20 12 a 1\n");
        let mut output = Vec::new();
        let err = run(&mut output, file.path()).unwrap_err();

        assert_eq!(String::from_utf8(output).unwrap(), "09:20 12 a 1\n");
        assert!(format!("{err:#}").contains("line 5: event id 12 is outgoing only"));
    }

    #[test]
    fn check_reports_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let mut output = Vec::new();
        let err = run(&mut output, &temp.path().join("missing.txt")).unwrap_err();

        assert!(output.is_empty());
        assert!(err.to_string().contains("failed to read"));
    }
}
