//! # Single-pass multi-pattern literal replacement
//!
//! [`PatternReplacer`] rewrites many fixed substrings in one left-to-right
//! scan. It is how month and day names are localized after layout
//! formatting, e.g. `"February"` → `"กุมภาพันธ์"`, `"Feb"` → `"ก.พ."`.
//!
//! ## Matching rule
//!
//! ```text
//!   table (sorted once at construction):
//!     1. longer patterns first
//!     2. equal length: lexicographically greater pattern first
//!
//!   scan:
//!     pos ──► try table top to bottom
//!              ├─ first full match: emit replacement, pos += pattern.len()
//!              └─ no match:         emit text[pos], pos += 1 char
//! ```
//!
//! Because longer patterns come first, a pattern is never preempted by one of
//! its own prefixes: with `{"Feb", "February"}` the input `"February"` becomes
//! the long-form replacement, not the short one followed by `"ruary"`. Every
//! input character is either consumed by exactly one match or copied once.
//!
//! Patterns are valid UTF-8, so a match can only start on a character
//! boundary. Copying a whole character on a miss is therefore the same as
//! copying one byte at a time.
//!
//! ## Cost
//!
//! At each position the table is walked until the first hit; a mismatching
//! pattern is rejected at its first differing byte. Work is linear in the
//! input length times the (small, fixed) table size.
//!
//! ## Thread Safety
//!
//! The table is immutable after construction. `replace` only reads it and
//! writes into a per-call buffer checked out of a shared [`BufferPool`], so a
//! single replacer can serve any number of threads.
//!
//! ## Example Usage
//!
//! ```
//! use erakit::replace::PatternReplacer;
//!
//! let replacer = PatternReplacer::new([
//!     ("January", "มกราคม"),
//!     ("Jan", "ม.ค."),
//!     ("Monday", "วันจันทร์"),
//! ])
//! .unwrap();
//!
//! assert_eq!(replacer.replace("Monday, January 1"), "วันจันทร์, มกราคม 1");
//! assert_eq!(replacer.replace("1 Jan"), "1 ม.ค.");
//! assert_eq!(replacer.replace("no names"), "no names");
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::ConfigError;
use crate::pool::BufferPool;

/// Extra output capacity reserved beyond the input length.
pub const OUTPUT_SLACK: usize = 64;

/// One `(pattern, replacement)` row of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Replacement {
    pattern: Box<str>,
    replacement: Box<str>,
}

impl Replacement {
    /// Table order: longer first, then lexicographically greater first.
    fn match_order(&self, other: &Self) -> Ordering {
        other
            .pattern
            .len()
            .cmp(&self.pattern.len())
            .then_with(|| other.pattern.cmp(&self.pattern))
    }

    #[inline]
    fn matches_at(&self, rest: &[u8]) -> bool {
        rest.starts_with(self.pattern.as_bytes())
    }
}

/// Immutable literal-to-literal replacement table.
#[derive(Clone)]
pub struct PatternReplacer {
    table: Box<[Replacement]>,
    buffers: Arc<BufferPool>,
}

impl PatternReplacer {
    /// Builds a replacer with its own buffer pool.
    ///
    /// When the same pattern appears more than once, the first mapping wins.
    /// An empty pattern is rejected: it would match everywhere without
    /// consuming any input.
    pub fn new<I, P, R>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (P, R)>,
        P: Into<String>,
        R: Into<String>,
    {
        Self::with_buffer_pool(pairs, Arc::new(BufferPool::new()))
    }

    /// Builds a replacer that draws output buffers from `buffers`.
    pub fn with_buffer_pool<I, P, R>(
        pairs: I,
        buffers: Arc<BufferPool>,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (P, R)>,
        P: Into<String>,
        R: Into<String>,
    {
        let mut seen = FxHashSet::default();
        let mut table = Vec::new();
        for (pattern, replacement) in pairs {
            let pattern: String = pattern.into();
            if pattern.is_empty() {
                return Err(ConfigError::new("replacement pattern must not be empty"));
            }
            if !seen.insert(pattern.clone()) {
                continue;
            }
            table.push(Replacement {
                pattern: pattern.into_boxed_str(),
                replacement: replacement.into().into_boxed_str(),
            });
        }
        table.sort_by(Replacement::match_order);
        debug!(patterns = table.len(), "built replacement table");

        Ok(Self {
            table: table.into_boxed_slice(),
            buffers,
        })
    }

    /// Builds a replacer from a map. Map iteration order does not matter:
    /// keys are unique and the table is sorted.
    pub fn from_map<S: BuildHasher>(map: &HashMap<String, String, S>) -> Result<Self, ConfigError> {
        Self::new(map.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// A replacer with no patterns; `replace` is the identity.
    pub fn empty() -> Self {
        Self {
            table: Box::default(),
            buffers: Arc::new(BufferPool::new()),
        }
    }

    /// Number of patterns in the table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// `(pattern, replacement)` pairs in match order.
    pub fn patterns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.table.iter().map(|r| (&*r.pattern, &*r.replacement))
    }

    /// Replaces every match in `text` in a single forward scan.
    ///
    /// Returns the input unchanged (borrowed) when the table is empty or
    /// nothing matched. An empty table never touches the buffer pool.
    pub fn replace<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.table.is_empty() {
            return Cow::Borrowed(text);
        }

        let mut out = self.buffers.checkout(text.len() + OUTPUT_SLACK);
        if self.replace_into(text, &mut out) == 0 {
            return Cow::Borrowed(text);
        }
        Cow::Owned(out.as_str().to_owned())
    }

    /// Same as [`replace`](Self::replace).
    pub fn replace_all<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.replace(text)
    }

    /// Appends the replaced form of `text` to `out` and returns the number
    /// of pattern matches.
    pub fn replace_into(&self, text: &str, out: &mut String) -> usize {
        let bytes = text.as_bytes();
        let mut matches = 0;
        let mut pos = 0;

        while pos < text.len() {
            let rest = &bytes[pos..];
            if let Some(hit) = self.table.iter().find(|r| r.matches_at(rest)) {
                out.push_str(&hit.replacement);
                pos += hit.pattern.len();
                matches += 1;
                continue;
            }

            // `pos` is always a char boundary: matches start and end on one.
            let ch = text[pos..].chars().next().unwrap_or_default();
            out.push(ch);
            pos += ch.len_utf8().max(1);
        }

        matches
    }
}

impl Default for PatternReplacer {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for PatternReplacer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternReplacer")
            .field("patterns", &self.table.len())
            .finish_non_exhaustive()
    }
}
