//! Persisted stylesheet formats.
//!
//! The native format is line oriented. A sheet starts with a `SheetName`
//! line, followed by style records. Each record is a run of `Key: value`
//! lines and ends at a blank line or at end of input:
//!
//! ```text
//! # comments start with '#'
//! SheetName: html
//!
//! Name: Heading1
//! Tag: H1
//! EndRule: EndTag
//! Font: Bold
//! Size: 18
//! SpaceBefore: 12
//! SpaceAfter: 6
//!
//! Name: Body
//! Font: Regular
//! Size: 12
//! ```
//!
//! Unknown keys are skipped so newer files still load. Legacy `ColorGray`
//! values are migrated to RGB on read, and the writer only ever emits
//! `ColorRGB`.
//!
//! The [`yaml`] submodule offers the same sheets as YAML documents.

pub mod yaml;

use std::fmt::Write as _;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::{RecordError, RecordErrorKind, StyleError};
use crate::style::{AnchorMarker, Color, Font, ParagraphLayout, ParseValueError, Style};

pub(crate) const KEY_SHEET_NAME: &str = "SheetName";
const KEY_NAME: &str = "Name";
const KEY_TAG: &str = "Tag";
const KEY_END_RULE: &str = "EndRule";
const KEY_FONT: &str = "Font";
const KEY_SIZE: &str = "Size";
const KEY_ALIGNMENT: &str = "ParagraphAlignment";
const KEY_LINE_SPACING: &str = "LineSpacing";
const KEY_FIRST_INDENT: &str = "FirstLineIndent";
const KEY_LEFT_INDENT: &str = "LeftIndent";
const KEY_SPACE_BEFORE: &str = "SpaceBefore";
const KEY_SPACE_AFTER: &str = "SpaceAfter";
const KEY_COLOR_GRAY: &str = "ColorGray";
const KEY_COLOR_RGB: &str = "ColorRGB";
const KEY_ANCHOR: &str = "Anchor";

/// One `Key: value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Field {
    pub line: usize,
    pub key: String,
    pub value: String,
}

/// The fields of one record, in input order.
#[derive(Debug, Clone, Default)]
pub(crate) struct Record {
    pub fields: Vec<Field>,
}

impl Record {
    pub fn first_line(&self) -> usize {
        self.fields.first().map(|f| f.line).unwrap_or(0)
    }
}

/// Splits a buffered input into records.
pub(crate) struct RecordReader<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// Reads the next record, or `None` once the input is exhausted.
    ///
    /// Leading blank lines and comments are skipped, so an input that holds
    /// nothing but whitespace yields no records.
    pub fn next_record(&mut self) -> Result<Option<Record>, StyleError> {
        let mut record = Record::default();
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_line(&mut self.buf)
                .map_err(|e| StyleError::io(format!("failed to read line {}", self.line + 1), e))?;
            if read == 0 {
                break;
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.starts_with('#') {
                continue;
            }
            if text.is_empty() {
                if record.fields.is_empty() {
                    continue;
                }
                break;
            }

            let Some((key, value)) = text.split_once(':') else {
                return Err(RecordError::new(
                    self.line,
                    RecordErrorKind::Syntax {
                        text: text.to_string(),
                    },
                )
                .into());
            };
            record.fields.push(Field {
                line: self.line,
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            });
        }

        if record.fields.is_empty() {
            Ok(None)
        } else {
            Ok(Some(record))
        }
    }
}

fn parse_value<T: FromStr>(field: &Field, expected: &'static str) -> Result<T, RecordError> {
    field.value.parse().map_err(|_| invalid(field, expected))
}

/// Parses a value whose type reports what it expected.
fn parse_typed<T: FromStr<Err = ParseValueError>>(field: &Field) -> Result<T, RecordError> {
    field.value.parse().map_err(|e: ParseValueError| invalid(field, e.expected))
}

fn invalid(field: &Field, expected: &'static str) -> RecordError {
    RecordError::new(
        field.line,
        RecordErrorKind::InvalidValue {
            key: field.key.clone(),
            value: field.value.clone(),
            expected,
        },
    )
}

/// Builds a style from a record, validating it.
pub(crate) fn style_from_record(record: &Record) -> Result<Style, RecordError> {
    let mut style = Style::default();
    let mut has_name = false;
    let mut paragraph: Option<ParagraphLayout> = None;

    for field in &record.fields {
        match field.key.as_str() {
            KEY_NAME => {
                style.name = field.value.clone();
                has_name = true;
            }
            KEY_TAG => style.tag = field.value.clone(),
            KEY_END_RULE => style.scope = parse_typed(field)?,
            KEY_FONT => style.font = Font::new(field.value.clone()),
            KEY_SIZE => style.size = parse_value(field, "a number")?,
            KEY_ALIGNMENT => {
                paragraph.get_or_insert_with(ParagraphLayout::default).alignment =
                    parse_typed(field)?;
            }
            KEY_LINE_SPACING => {
                paragraph.get_or_insert_with(ParagraphLayout::default).line_spacing =
                    parse_value(field, "a number")?;
            }
            KEY_FIRST_INDENT => {
                paragraph
                    .get_or_insert_with(ParagraphLayout::default)
                    .first_line_indent = parse_value(field, "a number")?;
            }
            KEY_LEFT_INDENT => {
                paragraph.get_or_insert_with(ParagraphLayout::default).left_indent =
                    parse_value(field, "a number")?;
            }
            KEY_SPACE_BEFORE => style.space_before = parse_value(field, "a number")?,
            KEY_SPACE_AFTER => style.space_after = parse_value(field, "a number")?,
            KEY_COLOR_GRAY => {
                let level: f32 = parse_value(field, "a gray level between 0 and 1")?;
                let color = Color::from_gray(level)
                    .ok_or_else(|| invalid(field, "a gray level between 0 and 1"))?;
                style.color = Some(color);
            }
            KEY_COLOR_RGB => style.color = Some(parse_typed(field)?),
            KEY_ANCHOR => {
                let id: u64 = parse_value(field, "an unsigned integer")?;
                style.anchor = AnchorMarker::new(id);
            }
            other => {
                log::debug!("ignoring unknown style key '{}' on line {}", other, field.line);
            }
        }
    }

    if !has_name {
        return Err(RecordError::new(
            record.first_line(),
            RecordErrorKind::MissingName,
        ));
    }
    style.paragraph = paragraph;
    style
        .validate()
        .map_err(|e| RecordError::new(record.first_line(), e.into()))?;
    Ok(style)
}

/// Appends the record for `style` to `out`, without the trailing delimiter.
pub(crate) fn write_style_record(style: &Style, out: &mut String) {
    // Writing into a String cannot fail.
    let _ = write_style_fields(style, out);
}

fn write_style_fields(style: &Style, out: &mut String) -> std::fmt::Result {
    writeln!(out, "{}: {}", KEY_NAME, style.name)?;
    if !style.tag.is_empty() {
        writeln!(out, "{}: {}", KEY_TAG, style.tag)?;
    }
    writeln!(out, "{}: {}", KEY_END_RULE, style.scope)?;
    writeln!(out, "{}: {}", KEY_FONT, style.font)?;
    writeln!(out, "{}: {}", KEY_SIZE, style.size)?;
    if let Some(layout) = &style.paragraph {
        writeln!(out, "{}: {}", KEY_ALIGNMENT, layout.alignment)?;
        writeln!(out, "{}: {}", KEY_LINE_SPACING, layout.line_spacing)?;
        writeln!(out, "{}: {}", KEY_FIRST_INDENT, layout.first_line_indent)?;
        writeln!(out, "{}: {}", KEY_LEFT_INDENT, layout.left_indent)?;
    }
    writeln!(out, "{}: {}", KEY_SPACE_BEFORE, style.space_before)?;
    writeln!(out, "{}: {}", KEY_SPACE_AFTER, style.space_after)?;
    if let Some(color) = style.color {
        writeln!(out, "{}: {}", KEY_COLOR_RGB, color)?;
    }
    if let Some(anchor) = style.anchor {
        writeln!(out, "{}: {}", KEY_ANCHOR, anchor)?;
    }
    Ok(())
}
