// SPDX-License-Identifier: MIT OR Apache-2.0

//! A read-only view over one pattern match.

use regex::Captures;
use std::ops::Range;

/// One hit of a [`TemplateProcessor`](super::TemplateProcessor) scan.
///
/// Numbered and named groups are individually optional: in a pattern made of
/// named alternatives only the alternative that matched has its groups set.
///
/// ```
/// use extcfg::text::Capture;
/// use regex::Regex;
///
/// let re = Regex::new(r"(?P<word>\w+)|(?P<sign>\W)").unwrap();
/// let caps = re.captures("&").unwrap();
/// let capture = Capture::new(caps);
/// assert_eq!(capture.expr(), "&");
/// assert_eq!(capture.named("word"), None);
/// assert_eq!(capture.named("sign"), Some("&"));
/// ```
#[derive(Debug)]
pub struct Capture<'t> {
    captures: Captures<'t>,
}

impl<'t> Capture<'t> {
    /// Wraps the captures of a single match.
    pub fn new(captures: Captures<'t>) -> Self {
        Self { captures }
    }

    /// The full matched text.
    pub fn expr(&self) -> &'t str {
        self.captures.get(0).map_or("", |m| m.as_str())
    }

    /// Byte range of the full match within the scanned text.
    pub fn range(&self) -> Range<usize> {
        self.captures.get(0).map_or(0..0, |m| m.range())
    }

    /// The numbered group `idx`, if it participated in the match.
    pub fn group(&self, idx: usize) -> Option<&'t str> {
        self.captures.get(idx).map(|m| m.as_str())
    }

    /// The named group `name`, if it exists and participated in the match.
    pub fn named(&self, name: &str) -> Option<&'t str> {
        self.captures.name(name).map(|m| m.as_str())
    }

    /// Number of groups, the full match included, that participated.
    pub fn group_count(&self) -> usize {
        self.captures.iter().flatten().count()
    }
}
