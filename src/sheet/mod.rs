//! Stylesheets: ordered collections of styles for one document.
//!
//! This module provides:
//!
//! - [`StyleSheet`]: The owned collection, with lookup by name and reverse
//!   lookup from attributes
//! - [`default_sheet`]: The built-in sheet loaders fall back to
//! - [`SheetFormat`]: File encodings understood by [`StyleSheet::load`] and
//!   [`StyleSheet::save`]

mod builtin;
mod persist;
#[allow(clippy::module_inception)]
mod sheet;

pub use builtin::{default_sheet, DEFAULT_ANCHOR_MARKER, DEFAULT_SHEET_NAME};
pub use persist::SheetFormat;
pub use sheet::StyleSheet;
