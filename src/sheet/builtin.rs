//! The built-in default stylesheet.

use once_cell::sync::Lazy;

use super::sheet::StyleSheet;
use crate::style::{Alignment, AnchorMarker, Color, ParagraphLayout, ScopeRule, Style};

/// Name of the built-in sheet.
pub const DEFAULT_SHEET_NAME: &str = "default";

/// Marker carried by the built-in `Anchor` style.
pub const DEFAULT_ANCHOR_MARKER: AnchorMarker = AnchorMarker::FIRST;

static DEFAULT_SHEET: Lazy<StyleSheet> = Lazy::new(build_default_sheet);

/// Returns the shared built-in sheet.
///
/// Loaders fall back to this when a persisted sheet cannot be read. Clone
/// it to get a sheet you can edit.
///
/// ```rust
/// let mut sheet = htstyle::default_sheet().clone();
/// assert!(sheet.style_named("Heading1").is_some());
/// sheet.remove_style("Listing");
/// ```
pub fn default_sheet() -> &'static StyleSheet {
    &DEFAULT_SHEET
}

fn build_default_sheet() -> StyleSheet {
    let styles = [
        Style::new("Normal")
            .tag("P")
            .paragraph(ParagraphLayout::new(Alignment::Left))
            .spacing(0.0, 6.0),
        heading("Heading1", "H1", 24.0, 16.0),
        heading("Heading2", "H2", 18.0, 12.0),
        heading("Heading3", "H3", 14.0, 10.0),
        heading("Heading4", "H4", 12.0, 8.0),
        Style::new("Address")
            .tag("ADDRESS")
            .scope(ScopeRule::UntilEndTag)
            .font("Italic")
            .paragraph(ParagraphLayout::new(Alignment::Right)),
        Style::new("Anchor")
            .tag("A")
            .scope(ScopeRule::UntilEndTag)
            .color(Color::rgb(0, 0, 238))
            .anchor(DEFAULT_ANCHOR_MARKER),
        Style::new("Example")
            .tag("XMP")
            .scope(ScopeRule::UntilEndTag)
            .font("Courier")
            .size(10.0)
            .paragraph(ParagraphLayout::new(Alignment::Left).indent(0.0, 16.0)),
        Style::new("Listing")
            .tag("LISTING")
            .scope(ScopeRule::UntilEndTag)
            .font("Courier")
            .size(8.0)
            .paragraph(ParagraphLayout::new(Alignment::Left).indent(0.0, 16.0)),
        Style::new("List")
            .tag("LI")
            .scope(ScopeRule::UntilEndOfLine)
            .paragraph(ParagraphLayout::new(Alignment::Left).indent(-12.0, 24.0)),
        Style::new("Glossary")
            .tag("DT")
            .scope(ScopeRule::UntilEndOfLine)
            .font("Bold")
            .paragraph(ParagraphLayout::new(Alignment::Left).indent(0.0, 0.0)),
    ];

    let mut sheet = StyleSheet::named(DEFAULT_SHEET_NAME);
    for style in styles {
        // The table above is fixed; a failure here is a programming error.
        if let Err(err) = sheet.add_style(style) {
            log::error!("built-in style rejected: {}", err);
        }
    }
    sheet
}

fn heading(name: &str, tag: &str, size: f32, space_before: f32) -> Style {
    Style::new(name)
        .tag(tag)
        .scope(ScopeRule::UntilEndTag)
        .font("Bold")
        .size(size)
        .spacing(space_before, space_before / 2.0)
}
