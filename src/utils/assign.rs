use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// One `FACTOR=VALUE` pair from the command line or an input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: String,
    pub value: String,
    pub line: usize,
}

impl Assignment {
    /// Where the pair came from, for error messages.
    pub fn origin(&self) -> String {
        if self.line == 0 {
            "command line".to_string()
        } else {
            format!("input file line {}", self.line)
        }
    }
}

/// Parses a single `--set`/`--override` argument.
pub fn parse_assignment(raw: &str) -> Result<Assignment> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("expected FACTOR=VALUE, got '{}'", raw);
    };

    let key = key.trim();
    if key.is_empty() {
        bail!("missing factor name in '{}'", raw);
    }

    Ok(Assignment {
        key: key.to_string(),
        value: strip_quotes(value.trim()),
        line: 0,
    })
}

pub fn read_assignments(path: &Path) -> Result<Vec<Assignment>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading input file {}", path.display()))?;
    Ok(parse_assignments(&content))
}

/// Parses `FACTOR=VALUE` lines. Blank lines, `#` comments and lines without
/// a key are skipped.
pub fn parse_assignments(content: &str) -> Vec<Assignment> {
    let mut entries = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        entries.push(Assignment {
            key: key.to_string(),
            value: strip_quotes(value.trim()),
            line: line_no,
        });
    }

    entries
}

fn strip_quotes(value: &str) -> String {
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}
