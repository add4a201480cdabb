//! Value types carried by a [`Style`](super::Style).
//!
//! Each type knows its persisted spelling through `FromStr` and `Display`,
//! so the record reader and writer never deal with raw strings beyond the
//! `key: value` split.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a persisted value does not parse as its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseValueError {
    /// Human-readable description of what was expected.
    pub expected: &'static str,
}

impl fmt::Display for ParseValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}", self.expected)
    }
}

impl std::error::Error for ParseValueError {}

/// How long a style applied by a markup tag stays in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScopeRule {
    /// Holds until another style is applied.
    #[default]
    #[serde(rename = "None")]
    Unbounded,
    /// Holds until the matching closing tag.
    #[serde(rename = "EndTag")]
    UntilEndTag,
    /// Holds until the next line break.
    #[serde(rename = "Line")]
    UntilEndOfLine,
}

impl ScopeRule {
    /// The persisted spelling of this rule.
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeRule::Unbounded => "None",
            ScopeRule::UntilEndTag => "EndTag",
            ScopeRule::UntilEndOfLine => "Line",
        }
    }
}

impl fmt::Display for ScopeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ScopeRule {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(ScopeRule::Unbounded),
            "EndTag" => Ok(ScopeRule::UntilEndTag),
            "Line" => Ok(ScopeRule::UntilEndOfLine),
            _ => Err(ParseValueError {
                expected: "one of None, EndTag, Line",
            }),
        }
    }
}

/// Semantic font descriptor such as `Bold`, `Italic` or `Courier`.
///
/// The descriptor is opaque to this crate: it is compared by name and
/// handed to the host unchanged. The only interpretation is the weight and
/// slant probing used by terminal previews.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Font(String);

impl Font {
    /// The font used when a style does not name one.
    pub const DEFAULT_NAME: &'static str = "Regular";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the descriptor names a bold weight.
    pub fn is_bold(&self) -> bool {
        self.0.to_ascii_lowercase().contains("bold")
    }

    /// Returns `true` if the descriptor names an italic or oblique slant.
    pub fn is_italic(&self) -> bool {
        let lower = self.0.to_ascii_lowercase();
        lower.contains("italic") || lower.contains("oblique")
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME)
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Font {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Font {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Text color.
///
/// Older stylesheets stored either a gray level or a packed RGB value. Both
/// are read into this single RGB form; see [`Color::from_gray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts a legacy gray level (`0.0` black to `1.0` white) into an
    /// RGB color with equal channels.
    ///
    /// Returns `None` for levels outside `0.0..=1.0` or non-finite input.
    ///
    /// ```rust
    /// use htstyle::Color;
    ///
    /// assert_eq!(Color::from_gray(0.0), Some(Color::BLACK));
    /// assert_eq!(Color::from_gray(1.0 / 3.0), Some(Color::rgb(85, 85, 85)));
    /// assert_eq!(Color::from_gray(1.5), None);
    /// ```
    pub fn from_gray(level: f32) -> Option<Self> {
        if !(0.0..=1.0).contains(&level) {
            return None;
        }
        let channel = (level * 255.0).round() as u8;
        Some(Self::rgb(channel, channel, channel))
    }

    /// Unpacks a legacy `0xRRGGBB` integer.
    pub fn from_packed(value: u32) -> Option<Self> {
        if value > 0x00FF_FFFF {
            return None;
        }
        Some(Self::rgb(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ))
    }

    pub fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ParseValueError;

    /// Parses `#RRGGBB` or a packed decimal integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = ParseValueError {
            expected: "#RRGGBB or a packed RGB integer",
        };
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(err);
            }
            let packed = u32::from_str_radix(hex, 16).map_err(|_| err)?;
            return Color::from_packed(packed).ok_or(err);
        }
        let packed: u32 = s.parse().map_err(|_| err)?;
        Color::from_packed(packed).ok_or(err)
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    Justified,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "Left",
            Alignment::Right => "Right",
            Alignment::Center => "Center",
            Alignment::Justified => "Justified",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "right" => Ok(Alignment::Right),
            "center" | "centre" => Ok(Alignment::Center),
            "justified" | "justify" => Ok(Alignment::Justified),
            _ => Err(ParseValueError {
                expected: "one of Left, Right, Center, Justified",
            }),
        }
    }
}

/// Paragraph layout parameters a style may impose.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphLayout {
    pub alignment: Alignment,
    /// Extra space between lines, in points.
    pub line_spacing: f32,
    /// Indentation of the first line relative to the left indent.
    pub first_line_indent: f32,
    pub left_indent: f32,
}

impl ParagraphLayout {
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            ..Self::default()
        }
    }

    pub fn line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    pub fn indent(mut self, first_line: f32, left: f32) -> Self {
        self.first_line_indent = first_line;
        self.left_indent = left;
        self
    }
}

/// Opaque link from a style to a hyperlink anchor.
///
/// Zero is not a valid marker; ordinary styles carry no marker at all.
/// The handle is resolved by the anchor manager and never dereferenced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorMarker(NonZeroU64);

impl AnchorMarker {
    /// The lowest marker, `1`.
    pub const FIRST: AnchorMarker = AnchorMarker(NonZeroU64::MIN);

    /// Returns `None` for zero, the legacy "no anchor" value.
    pub fn new(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for AnchorMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
