//! YAML encoding of whole stylesheets.
//!
//! ```yaml
//! name: html
//! styles:
//!   - name: Heading1
//!     tag: H1
//!     end_rule: EndTag
//!     font: Bold
//!     size: 18
//!     space_before: 12
//!   - name: Quote
//!     color_gray: 0.25
//! ```
//!
//! Omitted fields take the same defaults as [`Style::new`]. `color_gray` is
//! accepted for older files and migrated to RGB; output always uses `color`.

use serde::{Deserialize, Serialize};

use crate::error::{RecordError, RecordErrorKind, StyleError};
use crate::sheet::StyleSheet;
use crate::style::{AnchorMarker, Color, Font, ParagraphLayout, ScopeRule, Style};

#[derive(Debug, Serialize, Deserialize)]
struct SheetDoc {
    #[serde(default)]
    name: String,
    #[serde(default)]
    styles: Vec<StyleDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StyleDoc {
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    tag: String,
    #[serde(default)]
    end_rule: ScopeRule,
    #[serde(default)]
    font: Font,
    #[serde(default = "default_size")]
    size: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    paragraph: Option<ParagraphLayout>,
    #[serde(default)]
    space_before: f32,
    #[serde(default)]
    space_after: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(default, skip_serializing)]
    color_gray: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    anchor: Option<u64>,
}

fn default_size() -> f32 {
    Style::DEFAULT_SIZE
}

impl From<&Style> for StyleDoc {
    fn from(style: &Style) -> Self {
        Self {
            name: style.name.clone(),
            tag: style.tag.clone(),
            end_rule: style.scope,
            font: style.font.clone(),
            size: style.size,
            paragraph: style.paragraph,
            space_before: style.space_before,
            space_after: style.space_after,
            color: style.color,
            color_gray: None,
            anchor: style.anchor.map(AnchorMarker::get),
        }
    }
}

impl StyleDoc {
    fn into_style(self) -> Result<Style, RecordErrorKind> {
        let color = match (self.color, self.color_gray) {
            (Some(color), _) => Some(color),
            (None, Some(level)) => Some(Color::from_gray(level).ok_or_else(|| {
                RecordErrorKind::InvalidValue {
                    key: "color_gray".to_string(),
                    value: level.to_string(),
                    expected: "a gray level between 0 and 1",
                }
            })?),
            (None, None) => None,
        };
        let style = Style {
            name: self.name,
            tag: self.tag,
            scope: self.end_rule,
            font: self.font,
            size: self.size,
            paragraph: self.paragraph,
            space_before: self.space_before,
            space_after: self.space_after,
            color,
            anchor: self.anchor.and_then(AnchorMarker::new),
        };
        style.validate()?;
        Ok(style)
    }
}

impl StyleSheet {
    /// Parses a sheet from a YAML document.
    ///
    /// Like the text loader, this is all-or-nothing. YAML does not keep
    /// line numbers for individual styles, so record errors report line 0.
    ///
    /// # Errors
    ///
    /// - [`StyleError::Yaml`] if the document is not valid YAML for a sheet
    /// - [`StyleError::MalformedStyleSheet`] for an invalid or duplicate style
    pub fn from_yaml(text: &str) -> Result<StyleSheet, StyleError> {
        let doc: SheetDoc = serde_yaml::from_str(text)?;
        let mut sheet = StyleSheet::named(doc.name);

        for (index, style_doc) in doc.styles.into_iter().enumerate() {
            let malformed = |kind| StyleError::MalformedStyleSheet {
                sheet: sheet.name().to_string(),
                index,
                source: RecordError::new(0, kind),
            };
            let style = style_doc.into_style().map_err(malformed)?;
            if sheet.contains(&style.name) {
                return Err(malformed(RecordErrorKind::DuplicateName(style.name)));
            }
            sheet.add_style(style)?;
        }
        Ok(sheet)
    }

    /// Encodes the sheet as a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Yaml`] if serialization fails, or the
    /// [`write_to`](StyleSheet::write_to) errors for styles that no longer
    /// validate.
    pub fn to_yaml(&self) -> Result<String, StyleError> {
        self.check_styles()?;
        let doc = SheetDoc {
            name: self.name().to_string(),
            styles: self.iter().map(StyleDoc::from).collect(),
        };
        Ok(serde_yaml::to_string(&doc)?)
    }
}
