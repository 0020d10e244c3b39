// src/instructions.rs

//! Instruction list encoding
//!
//! A recipe's instructions are an ordered list of lines, but they are stored
//! in a single text column. Lines are joined with a reserved separator token
//! and split back apart on read.
//!
//! Two kinds of line can't survive that trip:
//! - a line containing the separator, which decoding would split in two
//! - a line ending in `_` that is followed by another line, since its
//!   trailing underscore fuses with the separator and shifts the split point
//!   (`["a_", "b"]` would be stored as `a____b` and read back as `["a", "_b"]`)
//!
//! [`encode`] rejects both, so `decode(encode(lines)) == lines` for every
//! list it accepts except the empty list, which shares its encoding with a
//! single empty line.

use thiserror::Error;

/// Token placed between instruction lines in the stored string
pub const SEPARATOR: &str = "___";

/// One or more instruction lines collide with [`SEPARATOR`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Instruction contains delimiter '{}' (lines {})", SEPARATOR, format_lines(.lines))]
pub struct DelimiterConflict {
    /// Zero-based indices of every offending line
    pub lines: Vec<usize>,
}

fn format_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn conflicts_with_separator(line: &str, is_last: bool) -> bool {
    line.contains(SEPARATOR) || (!is_last && line.ends_with('_'))
}

/// Fold an ordered list of lines into the stored form
///
/// Every line is checked, so the error names all conflicting lines rather
/// than only the first.
pub fn encode<S: AsRef<str>>(lines: &[S]) -> Result<String, DelimiterConflict> {
    let last = lines.len().saturating_sub(1);
    let conflicts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| conflicts_with_separator(line.as_ref(), *i == last))
        .map(|(i, _)| i)
        .collect();

    if !conflicts.is_empty() {
        return Err(DelimiterConflict { lines: conflicts });
    }

    Ok(lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(SEPARATOR))
}

/// Split a stored string back into its lines
///
/// A string without the separator yields exactly one line.
pub fn decode(stored: &str) -> Vec<String> {
    stored.split(SEPARATOR).map(str::to_string).collect()
}
