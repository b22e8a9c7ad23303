//! Convert a markup file to HTML

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::Horizon;

/// Convert `input` (or stdin) and write the HTML to stdout
pub fn run(horizon: &Horizon, input: Option<&Path>) -> Result<()> {
    let markup = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let html = horizon.converter().convert(&markup);
    let mut stdout = io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_converter_uses_configured_tags() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "markup_tags: [b]\n").unwrap();
        let horizon = Horizon::new(dir.path()).unwrap();
        let converter = horizon.converter();
        assert_eq!(converter.convert("{b x b} {p y p}"), "<strong>x</strong> {p y p}");
    }

    #[test]
    fn test_missing_input_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let horizon = Horizon::new(dir.path()).unwrap();
        let err = run(&horizon, Some(&dir.path().join("nope.md"))).unwrap_err();
        assert!(err.to_string().contains("nope.md"));
    }
}
