//! Tokenizers for the line oriented output of slurm commands.

use std::ops::RangeInclusive;
use std::str::FromStr;

use tracing::warn;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Expected {expected:?} fields separated by {separator:?}, found {found} in {line:?}")]
    FieldCount {
        expected: RangeInclusive<usize>,
        separator: char,
        found: usize,
        line: String,
    },

    #[error("Field {field:?} is not a count: {value:?}")]
    InvalidCount { field: &'static str, value: String },

    #[error("Missing field {0:?} when parsing")]
    MissingField(&'static str),
}

/// Split `line` on `separator`, expecting a number of parts within `expected`.
pub fn split_fields(
    line: &str,
    separator: char,
    expected: RangeInclusive<usize>,
) -> Result<Vec<&str>, RecordError> {
    let fields: Vec<&str> = line.trim().split(separator).collect();
    if !expected.contains(&fields.len()) {
        return Err(RecordError::FieldCount {
            expected,
            separator,
            found: fields.len(),
            line: line.to_string(),
        });
    }
    Ok(fields)
}

#[inline]
fn is_missing(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("N/A")
}

/// Parse a count, reading a missing or `N/A` value as 0.
pub fn parse_count(field: &'static str, value: &str) -> Result<u64, RecordError> {
    Ok(parse_optional_count(field, value)?.unwrap_or(0))
}

/// Parse a count, reading a missing or `N/A` value as `None`.
pub fn parse_optional_count(field: &'static str, value: &str) -> Result<Option<u64>, RecordError> {
    let value = value.trim();
    if is_missing(value) {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| RecordError::InvalidCount {
        field,
        value: value.to_string(),
    })
}

/// Count carried by a gres token such as `gpu:4` or `gpu:v100:2(IDX:0-1)`.
///
/// The count is the run of digits ending the token once any parenthesised index list is cut
/// off. Tokens without such digits (`(null)`, `N/A`) count 0.
pub fn gres_count(token: &str) -> u64 {
    let head = token.split('(').next().unwrap_or_default().trim();
    let digits_start = head
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i);
    digits_start
        .and_then(|i| head[i..].parse().ok())
        .unwrap_or(0)
}

/// Parse every non blank line of `text` with `parse`, skipping lines that fail.
///
/// A malformed line never aborts the whole listing; it is reported and dropped.
pub fn parse_lines<T, F>(text: &str, parse: F) -> Vec<T>
where
    F: Fn(&str) -> Result<T, RecordError>,
{
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match parse(line) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skip malformed record: {e}");
                None
            }
        })
        .collect()
}

/// Whitespace separated `KEY=VALUE` tokens, as printed by `scontrol show`.
///
/// Values may contain whitespace (file paths, reasons), so a token without `=` belongs to the
/// value of the field before it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyValueRecord {
    fields: Vec<(String, String)>,
}

impl KeyValueRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse blank line separated records, skipping blocks that fail.
    pub fn parse_blocks(text: &str) -> Vec<Self> {
        let mut records = vec![];
        let mut block = String::new();
        for line in text.lines().chain(std::iter::once("")) {
            if !line.trim().is_empty() {
                block.push_str(line);
                block.push('\n');
                continue;
            }
            if block.is_empty() {
                continue;
            }
            match block.parse() {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skip malformed record: {e}"),
            }
            block.clear();
        }
        records
    }
}

impl FromStr for KeyValueRecord {
    type Err = RecordError;

    // Parse example: JobId=42 Command=/home/sam/my job.sh WorkDir=/home/sam
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields: Vec<(String, String)> = vec![];
        for token in s.split_whitespace() {
            match token.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    fields.push((key.to_string(), value.to_string()))
                }
                _ => {
                    let (_, value) = fields.last_mut().ok_or(RecordError::MissingField("key"))?;
                    value.push(' ');
                    value.push_str(token);
                }
            }
        }
        Ok(Self { fields })
    }
}
