//! Golden position fixtures.
//!
//! A fixture is a text file with a header line followed by one line per
//! node holding the raw bit patterns of its coordinates in hex:
//!
//! ```text
//! # manet positions v1
//! 4059000000000000 4049000000000000
//! ```
//!
//! Storing bits rather than decimals keeps the round trip exact.

use std::fs;
use std::path::Path;

use manet_core::Point;

use crate::error::ReplayError;

/// First line of every fixture.
pub const FIXTURE_HEADER: &str = "# manet positions v1";

/// Render positions in fixture format.
pub fn format_positions(positions: &[Point]) -> String {
    let mut out = String::with_capacity(FIXTURE_HEADER.len() + 1 + positions.len() * 34);
    out.push_str(FIXTURE_HEADER);
    out.push('\n');
    for p in positions {
        out.push_str(&format!("{:016x} {:016x}\n", p.x.to_bits(), p.y.to_bits()));
    }
    out
}

fn parse_bits(word: Option<&str>, line: usize) -> Result<f64, ReplayError> {
    let word = word.ok_or_else(|| ReplayError::MalformedLine {
        line,
        detail: "expected two coordinates".into(),
    })?;
    u64::from_str_radix(word, 16)
        .map(f64::from_bits)
        .map_err(|e| ReplayError::MalformedLine {
            line,
            detail: format!("{word:?}: {e}"),
        })
}

/// Parse fixture text. Blank lines are ignored.
pub fn parse_positions(text: &str) -> Result<Vec<Point>, ReplayError> {
    let mut lines = text.lines().enumerate();
    match lines.next() {
        Some((_, header)) if header.trim_end() == FIXTURE_HEADER => {}
        other => {
            return Err(ReplayError::InvalidHeader {
                found: other.map(|(_, l)| l.to_string()).unwrap_or_default(),
            })
        }
    }

    let mut positions = Vec::new();
    for (i, raw) in lines {
        let line = i + 1;
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let mut words = raw.split_ascii_whitespace();
        let x = parse_bits(words.next(), line)?;
        let y = parse_bits(words.next(), line)?;
        if words.next().is_some() {
            return Err(ReplayError::MalformedLine {
                line,
                detail: "trailing data".into(),
            });
        }
        positions.push(Point::new(x, y));
    }
    Ok(positions)
}

/// Write a fixture file, replacing any existing one.
pub fn write_fixture(path: &Path, positions: &[Point]) -> Result<(), ReplayError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, format_positions(positions))?;
    Ok(())
}

/// Read a fixture file.
pub fn read_fixture(path: &Path) -> Result<Vec<Point>, ReplayError> {
    parse_positions(&fs::read_to_string(path)?)
}
