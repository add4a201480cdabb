//! Styles: the atomic unit of translation between logical and physical text.
//!
//! This module provides the core styling primitives:
//!
//! - [`Style`]: A named record mapping a text role to fonts, spacing and color
//! - [`ScopeRule`]: How long a tag-driven style stays in effect
//! - [`AttributeTarget`]: The host capability a style is applied to and picked from
//! - [`TextAttributes`]: A snapshot of attributes, used as a reverse-lookup query
//! - [`StyleValidationError`]: Errors from style validation
//!
//! A style never references other styles. Collections live in
//! [`StyleSheet`](crate::StyleSheet).

mod attributes;
mod error;
#[allow(clippy::module_inception)]
mod style;
mod value;

pub use attributes::{AttributeTarget, TextAttributes};
pub use error::StyleValidationError;
pub use style::Style;
pub use value::{Alignment, AnchorMarker, Color, Font, ParagraphLayout, ParseValueError, ScopeRule};
