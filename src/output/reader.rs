// Tue Jan 20 2026 - Alex

//! Parser for the text record format.
//!
//! Grammar: `Name '=' '[' Line* ']'`, where each line is one of
//! `Scalar('f', off, size, 'ty')`, `Pointer('f', off, size, 'ty')` or
//! `Array('f', off, size, count, 'ty')`, optionally followed by a comma.

use crate::structure::{FieldRecord, StructureLayout};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*=\s*\[$").expect("header pattern"));

static FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(Scalar|Pointer|Array)\(\s*'([^']*)'\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*(\d+)\s*)?,\s*'([^']*)'\s*\)\s*,?$",
    )
    .expect("field pattern")
});

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReadError {
    #[error("line {line}: expected a record header, found '{text}'")]
    ExpectedHeader { line: usize, text: String },
    #[error("line {line}: malformed field line '{text}'")]
    MalformedField { line: usize, text: String },
    #[error("line {line}: {class} field '{field}' has the wrong number of values")]
    ClassMismatch { line: usize, class: String, field: String },
    #[error("line {line}: number out of range in '{text}'")]
    NumberOutOfRange { line: usize, text: String },
    #[error("record '{0}' is not terminated")]
    Unterminated(String),
}

pub fn parse_layouts(text: &str) -> Result<Vec<StructureLayout>, ReadError> {
    let mut layouts = Vec::new();
    let mut current: Option<StructureLayout> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed == "]" && current.is_some() {
            layouts.extend(current.take());
            continue;
        }

        match current.as_mut() {
            None => {
                let caps = HEADER.captures(trimmed).ok_or_else(|| ReadError::ExpectedHeader {
                    line,
                    text: trimmed.to_string(),
                })?;
                current = Some(StructureLayout::new(caps[1].to_string()));
            }
            Some(layout) => layout.add_field(parse_field(line, trimmed)?),
        }
    }

    match current {
        Some(open) => Err(ReadError::Unterminated(open.name().to_string())),
        None => Ok(layouts),
    }
}

fn parse_field(line: usize, text: &str) -> Result<FieldRecord, ReadError> {
    let caps = FIELD.captures(text).ok_or_else(|| ReadError::MalformedField {
        line,
        text: text.to_string(),
    })?;

    let number = |s: &str| {
        s.parse::<u64>().map_err(|_| ReadError::NumberOutOfRange {
            line,
            text: text.to_string(),
        })
    };

    let class = &caps[1];
    let name = &caps[2];
    let offset = number(&caps[3])?;
    let size = number(&caps[4])?;
    let count = caps.get(5).map(|m| number(m.as_str())).transpose()?;
    let type_name = &caps[6];

    match (class, count) {
        ("Scalar", None) => Ok(FieldRecord::scalar(name, offset, size, type_name)),
        ("Pointer", None) => Ok(FieldRecord::pointer(name, offset, size, type_name)),
        ("Array", Some(count)) => Ok(FieldRecord::array(name, offset, size, count, type_name)),
        _ => Err(ReadError::ClassMismatch {
            line,
            class: class.to_string(),
            field: name.to_string(),
        }),
    }
}
