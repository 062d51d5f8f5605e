//! Checkout/check-in pool over one compiled regular expression.
//!
//! The pattern is compiled once in [`RegexPool::new`]. Every pooled object is
//! a clone of that compiled `Regex`; a clone shares the compiled program but
//! owns its own matching scratch space, so a checked-out matcher is used by
//! exactly one caller at a time and never contends with other callers.
//!
//! The convenience methods check a matcher out through a [`PooledRegex`]
//! guard, so it is returned on every exit path, including a panic that
//! unwinds out of a caller-supplied closure.
//!
//! ## Example Usage
//!
//! ```
//! use erakit::pool::RegexPool;
//!
//! let years = RegexPool::new(r"\b\d{4}\b").unwrap();
//!
//! let rewritten = years.replace_all_with("14 April 2024", |m| {
//!     let ce: i64 = m.parse().unwrap();
//!     (ce + 543).to_string()
//! });
//! assert_eq!(rewritten, "14 April 2567");
//!
//! assert_eq!(years.find("in 1999 and 2000"), Some("1999"));
//! assert_eq!(years.find_all("1999 2000 2001", Some(2)), vec!["1999", "2000"]);
//! assert!(!years.is_match("no digits"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use regex::{Captures, Regex, Replacer};
use tracing::debug;

use crate::error::ConfigError;
use crate::pool::object::ObjectPool;
use crate::pool::{PoolCounters, PoolStats};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::PoolMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{MetricsReset, MetricsSnapshotProvider};

/// Thread-safe pool of matchers for one pattern.
pub struct RegexPool {
    compiled: Regex,
    idle: ObjectPool<Regex>,
    counters: PoolCounters,
}

impl RegexPool {
    /// Compiles `pattern`, failing fast on invalid syntax.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let compiled = Regex::new(pattern)?;
        debug!(pattern, "compiled matcher pool pattern");
        Ok(Self {
            compiled,
            idle: ObjectPool::with_default_shards(),
            counters: PoolCounters::default(),
        })
    }

    /// Source text of the compiled pattern.
    pub fn as_str(&self) -> &str {
        self.compiled.as_str()
    }

    /// Checks out a matcher. Return it with [`put`](Self::put).
    pub fn get(&self) -> Regex {
        self.counters.record_get();
        self.idle.pop().unwrap_or_else(|| {
            self.counters.record_allocation();
            self.compiled.clone()
        })
    }

    /// Returns a matcher obtained from [`get`](Self::get).
    pub fn put(&self, matcher: Regex) {
        self.counters.record_put();
        self.idle.push(matcher);
    }

    /// Checks out a matcher wrapped in a guard that returns it on drop.
    pub fn checkout(&self) -> PooledRegex<'_> {
        PooledRegex {
            pool: self,
            matcher: Some(self.get()),
        }
    }

    /// Replaces every match with `rep` (supports `$1`-style expansion).
    pub fn replace_all<'t, R: Replacer>(&self, text: &'t str, rep: R) -> Cow<'t, str> {
        self.checkout().replace_all(text, rep)
    }

    /// Replaces every match with the string returned by `f`.
    pub fn replace_all_with<'t, F>(&self, text: &'t str, mut f: F) -> Cow<'t, str>
    where
        F: FnMut(&str) -> String,
    {
        self.checkout()
            .replace_all(text, |caps: &Captures<'_>| f(&caps[0]))
    }

    /// Returns up to `limit` matches (all of them for `None`).
    pub fn find_all<'t>(&self, text: &'t str, limit: Option<usize>) -> Vec<&'t str> {
        let matcher = self.checkout();
        let matches = matcher.find_iter(text).map(|m| m.as_str());
        match limit {
            Some(n) => matches.take(n).collect(),
            None => matches.collect(),
        }
    }

    /// Returns the leftmost match.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.checkout().find(text).map(|m| m.as_str())
    }

    /// Reports whether the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.checkout().is_match(text)
    }

    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot()
    }

    pub fn reset_stats(&self) {
        self.counters.reset();
    }

    /// Number of idle matchers currently retained.
    pub fn idle(&self) -> usize {
        self.idle.idle()
    }
}

impl fmt::Debug for RegexPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexPool")
            .field("pattern", &self.as_str())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(feature = "metrics")]
impl MetricsSnapshotProvider<PoolMetricsSnapshot> for RegexPool {
    fn snapshot(&self) -> PoolMetricsSnapshot {
        PoolMetricsSnapshot::from_stats(self.stats(), self.idle())
    }
}

#[cfg(feature = "metrics")]
impl MetricsReset for RegexPool {
    fn reset_metrics(&self) {
        self.reset_stats();
    }
}

/// A checked-out matcher. Derefs to `Regex`; returns to its pool on drop.
pub struct PooledRegex<'a> {
    pool: &'a RegexPool,
    matcher: Option<Regex>,
}

impl Deref for PooledRegex<'_> {
    type Target = Regex;

    fn deref(&self) -> &Regex {
        // `matcher` is only emptied in `drop`.
        self.matcher.as_ref().unwrap_or(&self.pool.compiled)
    }
}

impl Drop for PooledRegex<'_> {
    fn drop(&mut self) {
        if let Some(matcher) = self.matcher.take() {
            self.pool.put(matcher);
        }
    }
}

impl fmt::Debug for PooledRegex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PooledRegex").field(&self.as_str()).finish()
    }
}
