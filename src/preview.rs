//! Terminal preview of styles.
//!
//! [`TerminalTarget`] is an [`AttributeTarget`] backed by a terminal instead
//! of a rich-text editor. Styles are applied to it like to any host range,
//! and [`TerminalTarget::render`] then paints text with the closest ANSI
//! approximation of the attributes it holds.

use console::Style as ConsoleStyle;

use crate::style::{AttributeTarget, Color, Font, ParagraphLayout, TextAttributes};
use crate::util::rgb_to_ansi256;

/// Font size at or above which text is drawn bold, as headings are.
pub const BOLD_SIZE_THRESHOLD: f32 = 18.0;

/// An attribute target that renders to ANSI-styled strings.
///
/// # Example
///
/// ```rust
/// use htstyle::{default_sheet, TerminalTarget};
///
/// let mut target = TerminalTarget::new().force_styling(true);
/// default_sheet().style_named("Heading1").unwrap().apply_to(&mut target);
/// assert!(target.render("Title").contains("\x1b[1m"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TerminalTarget {
    attrs: TextAttributes,
    underline: bool,
    force: Option<bool>,
}

impl TerminalTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces ANSI output on or off regardless of terminal detection.
    pub fn force_styling(mut self, value: bool) -> Self {
        self.force = Some(value);
        self
    }

    /// Underlines rendered text; used for anchored styles.
    pub fn set_underline(&mut self, underline: bool) {
        self.underline = underline;
    }

    pub fn attributes(&self) -> &TextAttributes {
        &self.attrs
    }

    /// Builds the console style for the attributes currently held.
    pub fn console_style(&self) -> ConsoleStyle {
        let mut style = ConsoleStyle::new();
        if let Some(force) = self.force {
            style = style.force_styling(force);
        }
        let font_bold = self.attrs.font.as_ref().is_some_and(Font::is_bold);
        let large = self.attrs.size.is_some_and(|s| s >= BOLD_SIZE_THRESHOLD);
        if font_bold || large {
            style = style.bold();
        }
        if self.attrs.font.as_ref().is_some_and(Font::is_italic) {
            style = style.italic();
        }
        if self.underline {
            style = style.underlined();
        }
        if let Some(color) = self.attrs.color {
            style = style.color256(rgb_to_ansi256(color));
        }
        style
    }

    /// Paints `text` with the held attributes.
    pub fn render(&self, text: &str) -> String {
        self.console_style().apply_to(text).to_string()
    }
}

impl AttributeTarget for TerminalTarget {
    fn font(&self) -> Option<&Font> {
        self.attrs.font()
    }

    fn font_size(&self) -> Option<f32> {
        self.attrs.font_size()
    }

    fn paragraph(&self) -> Option<&ParagraphLayout> {
        self.attrs.paragraph()
    }

    fn spacing(&self) -> Option<(f32, f32)> {
        self.attrs.spacing()
    }

    fn color(&self) -> Option<Color> {
        self.attrs.color()
    }

    fn set_font(&mut self, font: &Font, size: f32) {
        self.attrs.set_font(font, size);
    }

    fn set_paragraph(&mut self, layout: &ParagraphLayout) {
        self.attrs.set_paragraph(layout);
    }

    fn set_spacing(&mut self, before: f32, after: f32) {
        self.attrs.set_spacing(before, after);
    }

    fn set_color(&mut self, color: Color) {
        self.attrs.set_color(color);
    }
}
