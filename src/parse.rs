//! Line-oriented parser for the machine list format.
//!
//! One machine per line. The first `{...}` group holds the comma-separated
//! counter targets; every `(...)` group holds one button's counter indices.
//! Anything else on the line (indicator blocks, labels) is ignored.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::machine::{Button, Machine};

static TARGETS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(.*?)\}").unwrap());
static BUTTON_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((.*?)\)").unwrap());

/// A malformed machine description. Variants carry the 1-based line number so
/// callers can point at the offending input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected a {{...}} target list")]
    MissingTargets { line: usize },
    #[error("line {line}: invalid counter value '{text}'")]
    InvalidInteger { line: usize, text: String },
    #[error("line {line}: button index {index} out of range for {counters} counters")]
    IndexOutOfRange { line: usize, index: u32, counters: usize },
}

/// Parses the whole input, one machine per non-blank line.
pub fn parse_machines(input: &str) -> Result<Vec<Machine>, ParseError> {
    let mut machines = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        machines.push(parse_line(raw, index + 1)?);
    }
    Ok(machines)
}

fn parse_line(line: &str, line_no: usize) -> Result<Machine, ParseError> {
    let targets = match TARGETS_RE.captures(line) {
        Some(caps) => parse_values(&caps[1], line_no)?,
        None => return Err(ParseError::MissingTargets { line: line_no }),
    };

    let mut buttons = Vec::new();
    for caps in BUTTON_RE.captures_iter(line) {
        let indices = parse_values(&caps[1], line_no)?;
        // The core constructor treats bad indices as a caller bug, so range
        // errors on user input must be caught here.
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= targets.len()) {
            return Err(ParseError::IndexOutOfRange {
                line: line_no,
                index,
                counters: targets.len(),
            });
        }
        buttons.push(Button::new(indices));
    }

    Ok(Machine::new(targets, buttons))
}

/// Splits a comma-separated list of unsigned integers, skipping empty items.
fn parse_values(text: &str, line_no: usize) -> Result<Vec<u32>, ParseError> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse().map_err(|_| ParseError::InvalidInteger {
                line: line_no,
                text: item.to_string(),
            })
        })
        .collect()
}
