//! Scope tracking for tag-driven styles.
//!
//! A markup parser walking a document applies styles as it meets start
//! tags. How long each style lasts is governed by its [`ScopeRule`]:
//!
//! | Rule | Ends when |
//! |------|-----------|
//! | `Unbounded` | another style is applied |
//! | `UntilEndTag` | the matching end tag is met |
//! | `UntilEndOfLine` | a line break is met |
//!
//! The model is flat: at most one style is active at a time. [`ScopeTracker`]
//! holds that state for the parser and reports end tags that do not close
//! the active style.

use thiserror::Error;

use crate::style::{ScopeRule, Style};

/// Raised by the markup parser when an end tag does not close the active style.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("unmatched end tag </{found}>{}", expected_suffix(.expected))]
    UnmatchedEndTag {
        /// Tag of the active style, or `None` if no active style ends at an
        /// end tag.
        expected: Option<String>,
        found: String,
    },
}

fn expected_suffix(expected: &Option<String>) -> String {
    match expected {
        Some(tag) => format!(" (expected </{}>)", tag),
        None => " (no style is waiting for an end tag)".to_string(),
    }
}

/// Current scope state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScopeState<'s> {
    Idle,
    Active(&'s Style),
}

/// Tracks which style is in effect while markup is being walked.
///
/// # Example
///
/// ```rust
/// use htstyle::{default_sheet, ScopeTracker};
///
/// let sheet = default_sheet();
/// let mut scope = ScopeTracker::new();
///
/// scope.apply(sheet.style_named("Heading1").unwrap());
/// let closed = scope.end_tag("h1").unwrap();
/// assert_eq!(closed.name, "Heading1");
/// assert!(scope.is_idle());
///
/// assert!(scope.end_tag("ADDRESS").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScopeTracker<'s> {
    active: Option<&'s Style>,
}

impl<'s> ScopeTracker<'s> {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn state(&self) -> ScopeState<'s> {
        match self.active {
            Some(style) => ScopeState::Active(style),
            None => ScopeState::Idle,
        }
    }

    pub fn active(&self) -> Option<&'s Style> {
        self.active
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Makes `style` the active style.
    ///
    /// Returns the style this implicitly terminates, if one was active.
    pub fn apply(&mut self, style: &'s Style) -> Option<&'s Style> {
        let previous = self.active.replace(style);
        if let Some(prev) = previous {
            if prev.scope != ScopeRule::Unbounded {
                log::debug!(
                    "style '{}' ({}) replaced by '{}' before its scope ended",
                    prev.name,
                    prev.scope,
                    style.name
                );
            }
        }
        previous
    }

    /// Handles an end tag `</tag>`.
    ///
    /// Only a style whose rule is [`ScopeRule::UntilEndTag`] is closed by
    /// an end tag. Tags compare ASCII case-insensitively. On a match the
    /// active style is closed and returned.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::UnmatchedEndTag`] if no active style ends at an
    /// end tag, or if the active one has a different tag. The state is left
    /// unchanged.
    pub fn end_tag(&mut self, tag: &str) -> Result<&'s Style, ScopeError> {
        let waiting = self
            .active
            .filter(|style| style.scope == ScopeRule::UntilEndTag);
        match waiting {
            Some(style) if !style.tag.is_empty() && style.tag.eq_ignore_ascii_case(tag) => {
                self.active = None;
                Ok(style)
            }
            other => Err(ScopeError::UnmatchedEndTag {
                expected: other.map(|s| s.tag.clone()),
                found: tag.to_string(),
            }),
        }
    }

    /// Handles a line break.
    ///
    /// Returns the style it terminates, which only happens for styles that
    /// last until the end of the line.
    pub fn line_break(&mut self) -> Option<&'s Style> {
        match self.active {
            Some(style) if style.scope == ScopeRule::UntilEndOfLine => self.active.take(),
            _ => None,
        }
    }

    /// Ends tracking, returning the style still active at end of input.
    pub fn finish(self) -> Option<&'s Style> {
        self.active
    }
}
