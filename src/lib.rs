//! # htstyle - style resolution for hypertext
//!
//! `htstyle` maps logical text roles such as "Heading1", "Address" or
//! "Anchor" to physical rendering attributes (font, size, paragraph layout,
//! spacing, color) and back again.
//!
//! ## Concepts
//!
//! - A [`Style`] is one named translation. It can be applied to a host text
//!   range through the [`AttributeTarget`] capability, and the attributes
//!   of a range can be picked back into a [`TextAttributes`] snapshot.
//! - A [`StyleSheet`] owns an ordered set of styles. It answers "which style
//!   is called X?" and, in reverse, "which style produced these
//!   attributes?". The first matching style in insertion order wins.
//! - A [`ScopeRule`] says how long a tag-driven style lasts; the
//!   [`ScopeTracker`] keeps that state for a markup parser.
//!
//! ## Quick start
//!
//! ```rust
//! use htstyle::{ScopeRule, Style, StyleSheet, TextAttributes};
//!
//! let mut sheet = StyleSheet::named("html");
//! sheet.add_style(
//!     Style::new("Heading1")
//!         .tag("H1")
//!         .scope(ScopeRule::UntilEndTag)
//!         .font("Bold")
//!         .size(18.0),
//! )?;
//! sheet.add_style(Style::new("Body").font("Regular").size(12.0))?;
//!
//! // Forward: tag handler applies a style to the text being built.
//! let mut run = TextAttributes::new();
//! sheet.style_named("Heading1").unwrap().apply_to(&mut run);
//!
//! // Reverse: the editor asks which style the cursor is in.
//! assert_eq!(sheet.style_at(&run).map(|s| s.name.as_str()), Some("Heading1"));
//!
//! // Persist and reload.
//! let mut buf = Vec::new();
//! sheet.write_to(&mut buf)?;
//! assert_eq!(StyleSheet::read_from(buf.as_slice())?, sheet);
//! # Ok::<(), htstyle::StyleError>(())
//! ```
//!
//! ## Loading with a fallback
//!
//! Loads are all-or-nothing. [`StyleSheet::load_or_default`] returns a copy
//! of the built-in [`default_sheet`] when a file is missing or malformed.

pub mod error;
pub mod format;
pub mod preview;
pub mod scope;
pub mod sheet;
pub mod style;
mod util;

pub use error::{RecordError, RecordErrorKind, StyleError};
pub use preview::TerminalTarget;
pub use scope::{ScopeError, ScopeState, ScopeTracker};
pub use sheet::{default_sheet, SheetFormat, StyleSheet, DEFAULT_SHEET_NAME};
pub use style::{
    Alignment, AnchorMarker, AttributeTarget, Color, Font, ParagraphLayout, ParseValueError,
    ScopeRule, Style, StyleValidationError, TextAttributes,
};
pub use util::{color_label, gray_level, rgb_to_ansi256};
