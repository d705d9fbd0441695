//! HTML tag censoring for guestbook input.
//!
//! Every `<...>` run is replaced with the word `censur`. This is not an HTML
//! parser: nesting and validity are ignored, and a `<` with no closing `>`
//! after it is left in place.

use std::sync::LazyLock;

use regex::Regex;

/// Replacement written in place of each tag.
pub const CENSORED: &str = "censur";

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Replace every HTML-like tag in `text` with [`CENSORED`].
pub fn sanitize(text: &str) -> String {
    HTML_TAG_RE.replace_all(text, CENSORED).into_owned()
}

/// Whether `text` contains anything [`sanitize`] would replace.
pub fn contains_tag(text: &str) -> bool {
    HTML_TAG_RE.is_match(text)
}
