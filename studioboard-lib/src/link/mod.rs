//! Field linking and synchronization
//!
//! Binds spreadsheet cells to normalized domain entities: the resolver
//! classifies rows and proposes column-to-field bindings, the synchronizer
//! writes cell edits through to the bound entity.

mod resolver;
mod sync;

pub use resolver::*;
pub use sync::*;

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

/// Returns `true` if the text is a syntactically valid email address.
pub fn is_valid_email(text: &str) -> bool {
    EMAIL_PATTERN.is_match(text.trim())
}
