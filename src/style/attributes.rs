//! Text attribute snapshots and the host attribute capability.
//!
//! The host editor owns the real text model. This crate only needs to read
//! and write a handful of attributes on a range of it, which is what
//! [`AttributeTarget`] expresses. [`TextAttributes`] is both a plain snapshot
//! of those attributes and the simplest possible target.

use super::value::{Color, Font, ParagraphLayout};

/// Get/set access to the physical attributes of a text range.
///
/// Implemented by the host's text model. Getters return `None` when the
/// range carries no value for an attribute.
pub trait AttributeTarget {
    fn font(&self) -> Option<&Font>;
    fn font_size(&self) -> Option<f32>;
    fn paragraph(&self) -> Option<&ParagraphLayout>;
    /// Returns `(space_before, space_after)` if the range carries spacing.
    fn spacing(&self) -> Option<(f32, f32)>;
    fn color(&self) -> Option<Color>;

    /// Sets font and size together; the size is not meaningful on its own.
    fn set_font(&mut self, font: &Font, size: f32);
    fn set_paragraph(&mut self, layout: &ParagraphLayout);
    fn set_spacing(&mut self, before: f32, after: f32);
    fn set_color(&mut self, color: Color);
}

/// A snapshot of the attributes in effect on a text range.
///
/// Produced by [`Style::pick_from`](super::Style::pick_from) and used as the
/// query for the reverse lookups on [`StyleSheet`](crate::StyleSheet).
///
/// # Example
///
/// ```rust
/// use htstyle::TextAttributes;
///
/// let query = TextAttributes::new().with_font("Bold").with_size(18.0);
/// assert_eq!(query.font.as_ref().map(|f| f.name()), Some("Bold"));
/// assert!(query.color.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextAttributes {
    pub font: Option<Font>,
    pub size: Option<f32>,
    pub paragraph: Option<ParagraphLayout>,
    pub space_before: Option<f32>,
    pub space_after: Option<f32>,
    pub color: Option<Color>,
}

impl TextAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, font: impl Into<Font>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_paragraph(mut self, layout: ParagraphLayout) -> Self {
        self.paragraph = Some(layout);
        self
    }

    pub fn with_spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = Some(before);
        self.space_after = Some(after);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Copies every attribute currently in effect on `target`.
    pub fn capture<T: AttributeTarget + ?Sized>(target: &T) -> Self {
        let (space_before, space_after) = match target.spacing() {
            Some((before, after)) => (Some(before), Some(after)),
            None => (None, None),
        };
        Self {
            font: target.font().cloned(),
            size: target.font_size(),
            paragraph: target.paragraph().copied(),
            space_before,
            space_after,
            color: target.color(),
        }
    }
}

impl AttributeTarget for TextAttributes {
    fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    fn font_size(&self) -> Option<f32> {
        self.size
    }

    fn paragraph(&self) -> Option<&ParagraphLayout> {
        self.paragraph.as_ref()
    }

    fn spacing(&self) -> Option<(f32, f32)> {
        match (self.space_before, self.space_after) {
            (None, None) => None,
            (before, after) => Some((before.unwrap_or(0.0), after.unwrap_or(0.0))),
        }
    }

    fn color(&self) -> Option<Color> {
        self.color
    }

    fn set_font(&mut self, font: &Font, size: f32) {
        self.font = Some(font.clone());
        self.size = Some(size);
    }

    fn set_paragraph(&mut self, layout: &ParagraphLayout) {
        self.paragraph = Some(*layout);
    }

    fn set_spacing(&mut self, before: f32, after: f32) {
        self.space_before = Some(before);
        self.space_after = Some(after);
    }

    fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::value::Alignment;

    #[test]
    fn test_capture_copies_all_fields() {
        let source = TextAttributes::new()
            .with_font("Italic")
            .with_size(10.0)
            .with_paragraph(ParagraphLayout::new(Alignment::Center))
            .with_spacing(4.0, 2.0)
            .with_color(Color::rgb(1, 2, 3));

        assert_eq!(TextAttributes::capture(&source), source);
    }

    #[test]
    fn test_spacing_absent_when_never_set() {
        assert_eq!(TextAttributes::new().spacing(), None);
    }

    #[test]
    fn test_spacing_partial_defaults_to_zero() {
        let attrs = TextAttributes {
            space_before: Some(3.0),
            ..TextAttributes::default()
        };
        assert_eq!(attrs.spacing(), Some((3.0, 0.0)));
    }
}
