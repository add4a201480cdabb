//! The style record.

use std::io::{BufRead, Write};

use super::attributes::{AttributeTarget, TextAttributes};
use super::error::StyleValidationError;
use super::value::{AnchorMarker, Color, Font, ParagraphLayout, ScopeRule};
use crate::error::StyleError;
use crate::format::{self, RecordReader};

/// A named translation from a logical text role to physical attributes.
///
/// Styles are built with a fluent API and then handed to a
/// [`StyleSheet`](crate::StyleSheet), which owns them from then on.
///
/// # Example
///
/// ```rust
/// use htstyle::{ScopeRule, Style, TextAttributes};
///
/// let heading = Style::new("Heading1")
///     .tag("H1")
///     .scope(ScopeRule::UntilEndTag)
///     .font("Bold")
///     .size(18.0)
///     .spacing(12.0, 6.0);
///
/// let mut target = TextAttributes::new();
/// heading.apply_to(&mut target);
/// assert_eq!(target.size, Some(18.0));
/// assert!(heading.matches_run(&target));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Lookup key, unique within a sheet.
    pub name: String,
    /// Markup tag that introduces the style; empty if none.
    pub tag: String,
    pub scope: ScopeRule,
    pub font: Font,
    /// Point size of `font`.
    pub size: f32,
    /// `None` leaves the target's paragraph layout alone.
    pub paragraph: Option<ParagraphLayout>,
    pub space_before: f32,
    pub space_after: f32,
    /// `None` leaves the target's color alone.
    pub color: Option<Color>,
    pub anchor: Option<AnchorMarker>,
}

impl Style {
    /// Point size given to styles that do not set one.
    pub const DEFAULT_SIZE: f32 = 12.0;

    /// Creates a style with the default font and size, no paragraph or
    /// color override, and an unbounded scope.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn scope(mut self, scope: ScopeRule) -> Self {
        self.scope = scope;
        self
    }

    pub fn font(mut self, font: impl Into<Font>) -> Self {
        self.font = font.into();
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn paragraph(mut self, layout: ParagraphLayout) -> Self {
        self.paragraph = Some(layout);
        self
    }

    pub fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn anchor(mut self, anchor: AnchorMarker) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Checks the invariants a style must hold before it joins a sheet.
    ///
    /// Text fields must be free of surrounding whitespace and control
    /// characters and numbers must be finite, so that every valid style
    /// survives a write and read back unchanged.
    ///
    /// # Errors
    ///
    /// - [`StyleValidationError::EmptyName`] if the name is empty
    /// - [`StyleValidationError::PaddedText`] or
    ///   [`StyleValidationError::ControlCharacter`] for a bad name, tag or
    ///   font
    /// - [`StyleValidationError::EndTagWithoutTag`] if the style ends at an
    ///   end tag but has no tag to match
    /// - [`StyleValidationError::NonFiniteNumber`] for a NaN or infinite
    ///   size, spacing or paragraph measure
    pub fn validate(&self) -> Result<(), StyleValidationError> {
        if self.name.is_empty() {
            return Err(StyleValidationError::EmptyName);
        }
        self.check_text("name", &self.name)?;
        self.check_text("tag", &self.tag)?;
        self.check_text("font", self.font.name())?;
        if self.scope == ScopeRule::UntilEndTag && self.tag.is_empty() {
            return Err(StyleValidationError::EndTagWithoutTag {
                name: self.name.clone(),
            });
        }

        let layout = self.paragraph.as_ref();
        let numbers = [
            ("size", Some(self.size)),
            ("space before", Some(self.space_before)),
            ("space after", Some(self.space_after)),
            ("line spacing", layout.map(|l| l.line_spacing)),
            ("first line indent", layout.map(|l| l.first_line_indent)),
            ("left indent", layout.map(|l| l.left_indent)),
        ];
        for (field, value) in numbers {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(StyleValidationError::NonFiniteNumber {
                    name: self.name.clone(),
                    field,
                });
            }
        }
        Ok(())
    }

    fn check_text(&self, field: &'static str, text: &str) -> Result<(), StyleValidationError> {
        if text.trim() != text {
            return Err(StyleValidationError::PaddedText {
                name: self.name.clone(),
                field,
            });
        }
        if text.chars().any(char::is_control) {
            return Err(StyleValidationError::ControlCharacter {
                name: self.name.clone(),
                field,
            });
        }
        Ok(())
    }

    /// Writes this style's attributes onto `target`.
    ///
    /// Font, size and spacing are always written. The paragraph layout and
    /// the color are written only when the style specifies them, so whatever
    /// the target already carries for those survives.
    pub fn apply_to<T: AttributeTarget + ?Sized>(&self, target: &mut T) {
        target.set_font(&self.font, self.size);
        if let Some(layout) = &self.paragraph {
            target.set_paragraph(layout);
        }
        target.set_spacing(self.space_before, self.space_after);
        if let Some(color) = self.color {
            target.set_color(color);
        }
    }

    /// Describes the attributes currently in effect on `source`.
    ///
    /// The result is not a named style; it is the query that
    /// [`StyleSheet::style_for_run`](crate::StyleSheet::style_for_run) and
    /// [`StyleSheet::style_for_paragraph`](crate::StyleSheet::style_for_paragraph)
    /// compare against.
    pub fn pick_from<T: AttributeTarget + ?Sized>(source: &T) -> TextAttributes {
        TextAttributes::capture(source)
    }

    /// Returns `true` if the character attributes in `attrs` match this style.
    ///
    /// Font and size must be equal. The color must be equal only when the
    /// style specifies one.
    pub fn matches_run(&self, attrs: &TextAttributes) -> bool {
        if attrs.font.as_ref() != Some(&self.font) || attrs.size != Some(self.size) {
            return false;
        }
        match self.color {
            Some(color) => attrs.color == Some(color),
            None => true,
        }
    }

    /// Returns `true` if the paragraph attributes in `attrs` match this style.
    ///
    /// Spacing must be equal, with absent spacing in `attrs` read as zero.
    /// The paragraph layout must be equal only when the style specifies one.
    pub fn matches_paragraph(&self, attrs: &TextAttributes) -> bool {
        if attrs.space_before.unwrap_or(0.0) != self.space_before
            || attrs.space_after.unwrap_or(0.0) != self.space_after
        {
            return false;
        }
        match &self.paragraph {
            Some(layout) => attrs.paragraph.as_ref() == Some(layout),
            None => true,
        }
    }

    /// Reads one style record from `reader`.
    ///
    /// Returns `Ok(None)` when the input holds no further record.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::MalformedStyleRecord`] if the record lacks a
    /// `Name`, a value fails to parse, or the style is invalid, and
    /// [`StyleError::Io`] if reading fails.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Option<Style>, StyleError> {
        let mut records = RecordReader::new(reader);
        match records.next_record()? {
            Some(record) => Ok(Some(format::style_from_record(&record)?)),
            None => Ok(None),
        }
    }

    /// Writes this style as one record, followed by a blank delimiter line.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Invalid`] without writing anything if the style
    /// fails [`Style::validate`], and [`StyleError::Io`] if the sink fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), StyleError> {
        self.validate()?;
        let mut out = String::new();
        format::write_style_record(self, &mut out);
        out.push('\n');
        writer
            .write_all(out.as_bytes())
            .map_err(|e| StyleError::io(format!("failed to write style '{}'", self.name), e))
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            name: String::new(),
            tag: String::new(),
            scope: ScopeRule::Unbounded,
            font: Font::default(),
            size: Self::DEFAULT_SIZE,
            paragraph: None,
            space_before: 0.0,
            space_after: 0.0,
            color: None,
            anchor: None,
        }
    }
}
