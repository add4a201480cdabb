//! Property tests for sheet invariants.

use htstyle::{
    Alignment, AnchorMarker, Color, ParagraphLayout, ScopeRule, Style, StyleError, StyleSheet,
    TextAttributes,
};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;

fn scope_rule() -> impl Strategy<Value = ScopeRule> {
    prop_oneof![
        Just(ScopeRule::Unbounded),
        Just(ScopeRule::UntilEndTag),
        Just(ScopeRule::UntilEndOfLine),
    ]
}

fn alignment() -> impl Strategy<Value = Alignment> {
    prop_oneof![
        Just(Alignment::Left),
        Just(Alignment::Right),
        Just(Alignment::Center),
        Just(Alignment::Justified),
    ]
}

/// Any single-line text without surrounding whitespace: punctuation, `:`,
/// `#`, inner spaces and non-ASCII included.
fn free_text() -> BoxedStrategy<String> {
    "[ -~\u{a0}àéß漢]{0,16}"
        .prop_map(|s| s.trim().to_string())
        .boxed()
}

/// Plain names, for encodings that are only checked on ordinary input.
fn plain_text() -> BoxedStrategy<String> {
    "([A-Za-z][A-Za-z0-9 ]{0,10}[A-Za-z0-9])?".boxed()
}

/// Every finite value, down to subnormals.
fn any_finite() -> BoxedStrategy<f32> {
    (prop::num::f32::NORMAL | prop::num::f32::SUBNORMAL | prop::num::f32::ZERO).boxed()
}

// Quarter points keep values exact through any decimal form.
fn quarter_points() -> BoxedStrategy<f32> {
    (-64i32..256).prop_map(|q| q as f32 / 4.0).boxed()
}

fn style_from(text: BoxedStrategy<String>, number: BoxedStrategy<f32>) -> BoxedStrategy<Style> {
    let layout = (
        alignment(),
        number.clone(),
        number.clone(),
        number.clone(),
    )
        .prop_map(|(alignment, spacing, first, left)| {
            ParagraphLayout::new(alignment)
                .line_spacing(spacing)
                .indent(first, left)
        });
    (
        text.clone().prop_filter("names are non-empty", |s| !s.is_empty()),
        text.clone(),
        scope_rule(),
        text,
        number.clone(),
        prop::option::of(layout),
        (number.clone(), number),
        prop::option::of(any::<(u8, u8, u8)>()),
        prop::option::of(1u64..1000),
    )
        .prop_map(
            |(name, tag, scope, font, size, paragraph, (before, after), color, anchor)| {
                // An end-tag scope needs a tag to end at.
                let scope = if tag.is_empty() && scope == ScopeRule::UntilEndTag {
                    ScopeRule::Unbounded
                } else {
                    scope
                };
                let mut style = Style::new(name)
                    .tag(tag)
                    .scope(scope)
                    .font(font)
                    .size(size)
                    .spacing(before, after);
                if let Some(layout) = paragraph {
                    style = style.paragraph(layout);
                }
                if let Some((r, g, b)) = color {
                    style = style.color(Color::rgb(r, g, b));
                }
                if let Some(marker) = anchor.and_then(AnchorMarker::new) {
                    style = style.anchor(marker);
                }
                style
            },
        )
        .boxed()
}

fn style() -> BoxedStrategy<Style> {
    style_from(free_text(), any_finite())
}

fn plain_style() -> BoxedStrategy<Style> {
    style_from(plain_text(), quarter_points())
}

/// Styles that may break any validation rule.
fn loose_style() -> impl Strategy<Value = Style> {
    (
        "[ \t\r\na-z:#]{0,6}",
        "[ \t\nA-Z]{0,4}",
        scope_rule(),
        prop_oneof![Just(f32::NAN), Just(f32::INFINITY), -100.0f32..100.0],
        prop_oneof![Just(0.0f32), Just(f32::NEG_INFINITY)],
    )
        .prop_map(|(name, tag, scope, size, before)| {
            Style::new(name)
                .tag(tag)
                .scope(scope)
                .size(size)
                .spacing(before, 0.0)
        })
}

/// Builds a sheet, silently skipping styles whose names are taken.
fn sheet_of(name: String, styles: Vec<Style>) -> StyleSheet {
    let mut sheet = StyleSheet::named(name);
    for style in styles {
        let _ = sheet.add_style(style);
    }
    sheet
}

proptest! {
    #[test]
    fn test_names_stay_unique(styles in prop::collection::vec(style(), 0..12)) {
        let sheet = sheet_of(String::new(), styles);
        let mut names: Vec<&str> = sheet.names().collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), before);
    }

    #[test]
    fn test_generated_styles_are_valid(style in style()) {
        prop_assert_eq!(style.validate(), Ok(()));
    }

    #[test]
    fn test_text_round_trip(
        name in free_text(),
        styles in prop::collection::vec(style(), 0..8),
    ) {
        let sheet = sheet_of(name, styles);
        let mut buf = Vec::new();
        sheet.write_to(&mut buf).unwrap();
        let loaded = StyleSheet::read_from(buf.as_slice()).unwrap();
        prop_assert_eq!(loaded, sheet);
    }

    #[test]
    fn test_yaml_round_trip(styles in prop::collection::vec(plain_style(), 0..8)) {
        let sheet = sheet_of("generated".to_string(), styles);
        let yaml = sheet.to_yaml().unwrap();
        prop_assert_eq!(StyleSheet::from_yaml(&yaml).unwrap(), sheet);
    }

    #[test]
    fn test_add_accepts_exactly_the_valid_styles(style in loose_style()) {
        let mut sheet = StyleSheet::new();
        let valid = style.validate().is_ok();
        match sheet.add_style(style) {
            Ok(()) => {
                prop_assert!(valid);
                let loaded = StyleSheet::read_from(sheet.to_text().as_bytes()).unwrap();
                prop_assert_eq!(loaded, sheet);
            }
            Err(err) => {
                prop_assert!(!valid);
                prop_assert!(matches!(err, StyleError::Invalid(_)));
                prop_assert!(sheet.is_empty());
            }
        }
    }

    #[test]
    fn test_lookup_finds_every_added_style(styles in prop::collection::vec(style(), 1..12)) {
        let sheet = sheet_of(String::new(), styles);
        for style in &sheet {
            prop_assert_eq!(sheet.style_named(&style.name), Some(style));
        }
    }

    #[test]
    fn test_run_lookup_returns_first_match(styles in prop::collection::vec(style(), 1..12)) {
        let sheet = sheet_of(String::new(), styles);
        for style in &sheet {
            let mut run = TextAttributes::new();
            style.apply_to(&mut run);
            let found = sheet.style_for_run(&run).unwrap();
            let first = sheet.iter().find(|s| s.matches_run(&run)).unwrap();
            prop_assert_eq!(&found.name, &first.name);
            // Nothing ahead of the found style matches.
            let position = sheet.iter().position(|s| s.name == found.name).unwrap();
            let own = sheet.iter().position(|s| s.name == style.name).unwrap();
            prop_assert!(position <= own);
        }
    }

    #[test]
    fn test_apply_then_pick_matches(style in style()) {
        let mut run = TextAttributes::new();
        style.apply_to(&mut run);
        let picked = Style::pick_from(&run);
        prop_assert!(style.matches_run(&picked));
        prop_assert!(style.matches_paragraph(&picked));
    }
}
