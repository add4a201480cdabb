//! StyleSheet: the ordered, owned collection of styles.

use std::io::{BufRead, Write};

use crate::error::{RecordError, RecordErrorKind, StyleError};
use crate::format::{self, Record, RecordReader, KEY_SHEET_NAME};
use crate::style::{AttributeTarget, Style, TextAttributes};

/// An ordered collection of named styles for one document.
///
/// The sheet owns its styles. Names are unique and looked up
/// case-sensitively. Order matters only for the reverse lookups, where the
/// first matching style wins, so more specific styles should be added before
/// more general ones.
///
/// Readers that need a stable view while the owner keeps editing should
/// `clone()` the sheet and work from the snapshot.
///
/// # Example
///
/// ```rust
/// use htstyle::{ScopeRule, Style, StyleSheet, TextAttributes};
///
/// let mut sheet = StyleSheet::named("html");
/// sheet.add_style(
///     Style::new("Heading1")
///         .tag("H1")
///         .scope(ScopeRule::UntilEndTag)
///         .font("Bold")
///         .size(18.0),
/// )?;
/// sheet.add_style(Style::new("Body").font("Regular").size(12.0))?;
///
/// let query = TextAttributes::new().with_font("Bold").with_size(18.0);
/// assert_eq!(sheet.style_for_run(&query).map(|s| s.name.as_str()), Some("Heading1"));
/// assert!(sheet.style_named("Missing").is_none());
/// # Ok::<(), htstyle::StyleError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleSheet {
    name: String,
    styles: Vec<Style>,
}

impl StyleSheet {
    /// Creates an empty, unnamed sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sheet with the given name.
    ///
    /// Sheet names are kept on one line: control characters become spaces
    /// and surrounding whitespace is dropped.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: clean_sheet_name(name.into()),
            styles: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the sheet, cleaning the name as [`named`](Self::named) does.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = clean_sheet_name(name.into());
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Iterates over the styles in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Style> {
        self.styles.iter()
    }

    /// Iterates over the style names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|s| s.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.styles.iter().position(|s| s.name == name)
    }

    /// Appends a style, taking ownership of it.
    ///
    /// # Errors
    ///
    /// - [`StyleError::DuplicateStyleName`] if a style with the same name is
    ///   already present; the sheet is left unchanged
    /// - [`StyleError::Invalid`] if the style fails [`Style::validate`]
    pub fn add_style(&mut self, style: Style) -> Result<(), StyleError> {
        style.validate()?;
        if self.contains(&style.name) {
            return Err(StyleError::DuplicateStyleName { name: style.name });
        }
        log::debug!("sheet '{}': added style '{}'", self.name, style.name);
        self.styles.push(style);
        Ok(())
    }

    /// Builder form of [`add_style`](Self::add_style) for chaining.
    ///
    /// # Errors
    ///
    /// Same as [`add_style`](Self::add_style).
    pub fn with_style(mut self, style: Style) -> Result<Self, StyleError> {
        self.add_style(style)?;
        Ok(self)
    }

    /// Removes the named style and hands it back to the caller.
    ///
    /// Returns `None` if no style has that name; that is not an error.
    pub fn remove_style(&mut self, name: &str) -> Option<Style> {
        let index = self.position(name)?;
        log::debug!("sheet '{}': removed style '{}'", self.name, name);
        Some(self.styles.remove(index))
    }

    /// Looks up a style by exact, case-sensitive name.
    ///
    /// `None` means no such style; callers typically fall back to a default.
    pub fn style_named(&self, name: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.name == name)
    }

    /// Mutable lookup by name.
    ///
    /// Renaming a style through this reference is not checked for
    /// uniqueness; remove and re-add instead.
    pub fn style_named_mut(&mut self, name: &str) -> Option<&mut Style> {
        self.styles.iter_mut().find(|s| s.name == name)
    }

    /// Returns the first style whose paragraph attributes match `attrs`.
    ///
    /// See [`Style::matches_paragraph`] for the comparison rules.
    pub fn style_for_paragraph(&self, attrs: &TextAttributes) -> Option<&Style> {
        self.styles.iter().find(|s| s.matches_paragraph(attrs))
    }

    /// Returns the first style whose character attributes match `attrs`.
    ///
    /// See [`Style::matches_run`] for the comparison rules.
    pub fn style_for_run(&self, attrs: &TextAttributes) -> Option<&Style> {
        self.styles.iter().find(|s| s.matches_run(attrs))
    }

    /// Answers "what style is this text in?" for a host range.
    ///
    /// Picks the attributes from `target` and tries a run match first, then
    /// a paragraph match.
    pub fn style_at<T: AttributeTarget + ?Sized>(&self, target: &T) -> Option<&Style> {
        let attrs = Style::pick_from(target);
        self.style_for_run(&attrs)
            .or_else(|| self.style_for_paragraph(&attrs))
    }

    /// Reads a whole sheet from the text format.
    ///
    /// The load is all-or-nothing: the first bad record aborts it and no
    /// partial sheet is returned.
    ///
    /// # Errors
    ///
    /// - [`StyleError::MalformedStyleSheet`] naming the sheet, the 0-based
    ///   record index and the underlying record error
    /// - [`StyleError::Io`] if reading fails
    pub fn read_from<R: BufRead>(reader: R) -> Result<StyleSheet, StyleError> {
        let mut records = RecordReader::new(reader);
        let mut sheet = StyleSheet::new();
        let mut index = 0;
        let mut at_start = true;

        while let Some(mut record) = records.next_record().map_err(|e| sheet.wrap(index, e))? {
            if std::mem::take(&mut at_start) {
                if let Some(name) = take_sheet_name(&mut record) {
                    sheet.set_name(name);
                    if record.fields.is_empty() {
                        continue;
                    }
                }
            }

            let style = format::style_from_record(&record).map_err(|e| sheet.malformed(index, e))?;
            if sheet.contains(&style.name) {
                let err = RecordError::new(
                    record.first_line(),
                    RecordErrorKind::DuplicateName(style.name),
                );
                return Err(sheet.malformed(index, err));
            }
            sheet.styles.push(style);
            index += 1;
        }

        log::debug!(
            "loaded sheet '{}' with {} styles",
            sheet.name,
            sheet.styles.len()
        );
        Ok(sheet)
    }

    /// Writes the sheet name and every style, in order.
    ///
    /// The text is rendered in memory first and handed to `writer` in a
    /// single call.
    ///
    /// # Errors
    ///
    /// - [`StyleError::Invalid`] or [`StyleError::DuplicateStyleName`] if a
    ///   style edited through [`style_named_mut`](Self::style_named_mut) no
    ///   longer holds; nothing is written
    /// - [`StyleError::Io`] if the sink fails
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), StyleError> {
        self.check_styles()?;
        let text = self.to_text();
        writer
            .write_all(text.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| StyleError::io(format!("failed to write sheet '{}'", self.name), e))
    }

    /// Re-checks every style, catching edits made in place after insertion.
    pub(crate) fn check_styles(&self) -> Result<(), StyleError> {
        for (index, style) in self.styles.iter().enumerate() {
            style.validate()?;
            if self.styles[..index].iter().any(|s| s.name == style.name) {
                return Err(StyleError::DuplicateStyleName {
                    name: style.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Renders the sheet in the text format.
    ///
    /// This does not re-check styles edited in place; [`write_to`](Self::write_to)
    /// and [`save`](Self::save) do.
    pub fn to_text(&self) -> String {
        let mut out = format!("{}: {}\n", KEY_SHEET_NAME, self.name);
        for style in &self.styles {
            out.push('\n');
            format::write_style_record(style, &mut out);
        }
        out
    }

    fn malformed(&self, index: usize, source: RecordError) -> StyleError {
        StyleError::MalformedStyleSheet {
            sheet: self.name.clone(),
            index,
            source,
        }
    }

    /// Attaches sheet context to record errors raised by the reader.
    fn wrap(&self, index: usize, err: StyleError) -> StyleError {
        match err {
            StyleError::MalformedStyleRecord(source) => self.malformed(index, source),
            StyleError::Io { context, source } => StyleError::Io {
                context: format!("sheet '{}', record {}: {}", self.name, index, context),
                source,
            },
            other => other,
        }
    }
}

fn clean_sheet_name(name: String) -> String {
    if name.trim() == name && !name.chars().any(char::is_control) {
        return name;
    }
    let spaced: String = name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    spaced.trim().to_string()
}

/// Removes a leading `SheetName` field from the record, returning its value.
fn take_sheet_name(record: &mut Record) -> Option<String> {
    if record.fields.first()?.key != KEY_SHEET_NAME {
        return None;
    }
    Some(record.fields.remove(0).value)
}

impl<'a> IntoIterator for &'a StyleSheet {
    type Item = &'a Style;
    type IntoIter = std::slice::Iter<'a, Style>;

    fn into_iter(self) -> Self::IntoIter {
        self.styles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Alignment, Color, ParagraphLayout, ScopeRule};

    fn scenario_sheet() -> StyleSheet {
        StyleSheet::named("html")
            .with_style(
                Style::new("Heading1")
                    .tag("H1")
                    .scope(ScopeRule::UntilEndTag)
                    .font("Bold")
                    .size(18.0),
            )
            .and_then(|s| s.with_style(Style::new("Body").font("Regular").size(12.0)))
            .unwrap()
    }

    #[test]
    fn test_new_is_empty_and_unnamed() {
        let sheet = StyleSheet::new();
        assert!(sheet.is_empty());
        assert_eq!(sheet.name(), "");
    }

    #[test]
    fn test_add_and_lookup() {
        let sheet = scenario_sheet();
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.style_named("Heading1").unwrap().size, 18.0);
        assert_eq!(sheet.style_named("Body").unwrap().font.name(), "Regular");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let sheet = scenario_sheet();
        assert!(sheet.style_named("heading1").is_none());
        assert!(sheet.style_named("nonexistent").is_none());
    }

    #[test]
    fn test_add_duplicate_rejected_and_sheet_unchanged() {
        let mut sheet = scenario_sheet();
        let before = sheet.clone();

        let err = sheet.add_style(Style::new("Body").size(99.0)).unwrap_err();

        assert!(matches!(err, StyleError::DuplicateStyleName { ref name } if name == "Body"));
        assert_eq!(sheet, before);
    }

    #[test]
    fn test_add_invalid_style_rejected() {
        let mut sheet = StyleSheet::new();
        assert!(matches!(
            sheet.add_style(Style::new("Broken").scope(ScopeRule::UntilEndTag)),
            Err(StyleError::Invalid(_))
        ));
        assert!(matches!(
            sheet.add_style(Style::default()),
            Err(StyleError::Invalid(_))
        ));
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_remove_returns_style() {
        let mut sheet = scenario_sheet();
        let removed = sheet.remove_style("Heading1").unwrap();
        assert_eq!(removed.name, "Heading1");
        assert!(!sheet.contains("Heading1"));
        assert_eq!(sheet.names().collect::<Vec<_>>(), vec!["Body"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut sheet = scenario_sheet();
        assert!(sheet.remove_style("Nope").is_none());
        assert_eq!(sheet.len(), 2);
    }

    #[test]
    fn test_removed_style_can_be_re_added() {
        let mut sheet = scenario_sheet();
        let style = sheet.remove_style("Heading1").unwrap();
        sheet.add_style(style).unwrap();
        assert_eq!(sheet.names().collect::<Vec<_>>(), vec!["Body", "Heading1"]);
    }

    #[test]
    fn test_style_for_run_scenario() {
        let sheet = scenario_sheet();
        let bold = TextAttributes::new().with_font("Bold").with_size(18.0);
        let italic = TextAttributes::new().with_font("Italic").with_size(10.0);

        assert_eq!(sheet.style_for_run(&bold).unwrap().name, "Heading1");
        assert!(sheet.style_for_run(&italic).is_none());
    }

    #[test]
    fn test_style_for_run_first_match_wins() {
        let sheet = StyleSheet::new()
            .with_style(Style::new("First").font("Bold").size(14.0))
            .and_then(|s| s.with_style(Style::new("Second").font("Bold").size(14.0)))
            .unwrap();
        let query = TextAttributes::new().with_font("Bold").with_size(14.0);
        assert_eq!(sheet.style_for_run(&query).unwrap().name, "First");
    }

    #[test]
    fn test_style_for_run_colored_style_needs_color() {
        let sheet = StyleSheet::new()
            .with_style(Style::new("Link").font("Regular").size(12.0).color(Color::rgb(0, 0, 255)))
            .and_then(|s| s.with_style(Style::new("Plain").font("Regular").size(12.0)))
            .unwrap();

        let plain = TextAttributes::new().with_font("Regular").with_size(12.0);
        assert_eq!(sheet.style_for_run(&plain).unwrap().name, "Plain");

        let blue = plain.clone().with_color(Color::rgb(0, 0, 255));
        assert_eq!(sheet.style_for_run(&blue).unwrap().name, "Link");
    }

    #[test]
    fn test_style_for_paragraph_specific_before_general() {
        let centered = ParagraphLayout::new(Alignment::Center);
        let sheet = StyleSheet::new()
            .with_style(Style::new("Centered").paragraph(centered))
            .and_then(|s| s.with_style(Style::new("Anything")))
            .unwrap();

        let query = TextAttributes::new().with_paragraph(centered);
        assert_eq!(sheet.style_for_paragraph(&query).unwrap().name, "Centered");

        let other = TextAttributes::new().with_paragraph(ParagraphLayout::new(Alignment::Right));
        assert_eq!(sheet.style_for_paragraph(&other).unwrap().name, "Anything");
    }

    #[test]
    fn test_style_for_paragraph_spacing_must_match() {
        let sheet = StyleSheet::new()
            .with_style(Style::new("Spaced").spacing(12.0, 6.0))
            .unwrap();
        assert!(sheet
            .style_for_paragraph(&TextAttributes::new().with_spacing(12.0, 6.0))
            .is_some());
        assert!(sheet
            .style_for_paragraph(&TextAttributes::new().with_spacing(12.0, 0.0))
            .is_none());
    }

    #[test]
    fn test_style_at_prefers_run_match() {
        let sheet = scenario_sheet();
        let mut target = TextAttributes::new();
        sheet.style_named("Heading1").unwrap().apply_to(&mut target);
        assert_eq!(sheet.style_at(&target).unwrap().name, "Heading1");
    }

    #[test]
    fn test_style_at_falls_back_to_paragraph() {
        let sheet = scenario_sheet();
        let target = TextAttributes::new().with_font("Symbol").with_size(7.0);
        // No run match; Heading1 is first and has no paragraph override.
        assert_eq!(sheet.style_at(&target).unwrap().name, "Heading1");
    }

    #[test]
    fn test_text_round_trip() {
        let sheet = scenario_sheet();
        let mut buf = Vec::new();
        sheet.write_to(&mut buf).unwrap();
        let read = StyleSheet::read_from(buf.as_slice()).unwrap();
        assert_eq!(read, sheet);
    }

    #[test]
    fn test_to_text_layout() {
        let text = scenario_sheet().to_text();
        assert!(text.starts_with("SheetName: html\n\nName: Heading1\n"));
        assert!(text.contains("\n\nName: Body\n"));
    }

    #[test]
    fn test_read_sheet_name_without_blank_line() {
        let sheet = StyleSheet::read_from("SheetName: tight\nName: Only\nSize: 9\n".as_bytes())
            .unwrap();
        assert_eq!(sheet.name(), "tight");
        assert_eq!(sheet.style_named("Only").unwrap().size, 9.0);
    }

    #[test]
    fn test_read_without_sheet_name() {
        let sheet = StyleSheet::read_from("Name: A\n\nName: B\n".as_bytes()).unwrap();
        assert_eq!(sheet.name(), "");
        assert_eq!(sheet.names().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_read_empty_sheet() {
        let sheet = StyleSheet::read_from("SheetName: empty\n".as_bytes()).unwrap();
        assert_eq!(sheet.name(), "empty");
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_read_malformed_record_reports_index() {
        let input = "SheetName: bad\n\nName: A\n\nName: B\nSize: large\n\nName: C\n";
        let err = StyleSheet::read_from(input.as_bytes()).unwrap_err();
        match err {
            StyleError::MalformedStyleSheet {
                sheet,
                index,
                source,
            } => {
                assert_eq!(sheet, "bad");
                assert_eq!(index, 1);
                assert_eq!(source.line, 6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_syntax_error_is_wrapped() {
        let input = "SheetName: bad\n\nName: A\nthis is not a field\n";
        let err = StyleSheet::read_from(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            StyleError::MalformedStyleSheet { index: 0, ref source, .. }
                if matches!(source.kind, RecordErrorKind::Syntax { .. })
        ));
    }

    #[test]
    fn test_read_duplicate_name_rejected() {
        let input = "SheetName: dup\n\nName: A\n\nName: A\n";
        let err = StyleSheet::read_from(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            StyleError::MalformedStyleSheet { index: 1, ref source, .. }
                if source.kind == RecordErrorKind::DuplicateName("A".to_string())
        ));
    }

    #[test]
    fn test_add_rejects_text_that_would_not_read_back() {
        let mut sheet = StyleSheet::named("s");
        let rejected = [
            Style::new(" Body"),
            Style::new("Body "),
            Style::new("Body").tag("\tP"),
            Style::new("A")
                .tag("P\n\nName: Injected")
                .scope(ScopeRule::UntilEndTag),
            Style::new("Body").font("Bold\r"),
            Style::new("Body").size(f32::NAN),
            Style::new("Body").spacing(f32::INFINITY, 0.0),
            Style::new("Body")
                .paragraph(ParagraphLayout::new(Alignment::Left).line_spacing(f32::NAN)),
        ];
        for style in rejected {
            let debug = format!("{style:?}");
            assert!(
                matches!(sheet.add_style(style), Err(StyleError::Invalid(_))),
                "accepted {debug}"
            );
        }
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_punctuated_names_round_trip() {
        let sheet = StyleSheet::named("s: #1")
            .with_style(Style::new("#Body: main").tag("A:B").font("Times New Roman"))
            .and_then(|s| s.with_style(Style::new("Name: x")))
            .unwrap();
        let loaded = StyleSheet::read_from(sheet.to_text().as_bytes()).unwrap();
        assert_eq!(loaded, sheet);
    }

    #[test]
    fn test_sheet_name_is_kept_on_one_line() {
        let mut sheet = StyleSheet::named("  two\nlines ");
        assert_eq!(sheet.name(), "two lines");
        sheet.set_name("tab\there\n\nName: X");
        assert_eq!(sheet.name(), "tab here  Name: X");

        let loaded = StyleSheet::read_from(sheet.to_text().as_bytes()).unwrap();
        assert_eq!(loaded.name(), sheet.name());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_write_refuses_style_broken_in_place() {
        let mut sheet = scenario_sheet();
        sheet.style_named_mut("Body").unwrap().name = "Body\nSize: 1".to_string();

        let mut buf = Vec::new();
        let err = sheet.write_to(&mut buf).unwrap_err();
        assert!(matches!(err, StyleError::Invalid(_)));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_refuses_duplicate_made_in_place() {
        let mut sheet = scenario_sheet();
        sheet.style_named_mut("Body").unwrap().name = "Heading1".to_string();

        let err = sheet.write_to(Vec::new()).unwrap_err();
        assert!(matches!(err, StyleError::DuplicateStyleName { ref name } if name == "Heading1"));
    }
}
