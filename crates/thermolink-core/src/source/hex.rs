//! Hex frame-log source.
//!
//! One frame per line, bytes as hex digits optionally separated by
//! whitespace. Blank lines and `#` comments are skipped; line numbers keep
//! counting through them so diagnostics point at the file as written.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use super::{FrameEvent, FrameSource, SourceError};

pub struct HexFileSource {
    lines: Lines<BufReader<File>>,
    line: u64,
}

impl HexFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line: 0,
        })
    }
}

impl FrameSource for HexFileSource {
    fn next_frame(&mut self) -> Result<Option<FrameEvent>, SourceError> {
        for line in self.lines.by_ref() {
            let text = line?;
            self.line += 1;
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let data = parse_hex_line(trimmed, self.line)?;
            return Ok(Some(FrameEvent {
                line: self.line,
                data,
            }));
        }
        Ok(None)
    }
}

fn parse_hex_line(text: &str, line: u64) -> Result<Vec<u8>, SourceError> {
    let mut digits = text.chars().filter(|c| !c.is_whitespace());
    let mut data = Vec::new();
    while let Some(high) = digits.next() {
        let low = digits.next().ok_or_else(|| SourceError::Hex {
            line,
            message: "odd number of hex digits".to_string(),
        })?;
        data.push(hex_value(high, line)? << 4 | hex_value(low, line)?);
    }
    Ok(data)
}

fn hex_value(c: char, line: u64) -> Result<u8, SourceError> {
    c.to_digit(16)
        .map(|value| value as u8)
        .ok_or_else(|| SourceError::Hex {
            line,
            message: format!("invalid hex digit {c:?}"),
        })
}
