//! Error types for erakit.
//!
//! Runtime operations (cache lookups, text replacement, pool checkout) are
//! total and never fail. The only hard failures happen at construction time:
//!
//! - [`ConfigError`]: an invalid regex, an empty replacement pattern, or an
//!   invalid builder parameter. Indicates a programming mistake; surface it
//!   immediately instead of degrading.
//! - [`InvariantError`]: returned by debug-only `check_invariants` methods when
//!   internal bookkeeping disagrees with itself.
//!
//! ## Example Usage
//!
//! ```
//! use erakit::error::ConfigError;
//! use erakit::pool::RegexPool;
//!
//! let pool: Result<RegexPool, ConfigError> = RegexPool::new(r"\b\d{4}\b");
//! assert!(pool.is_ok());
//!
//! // An unbalanced group is rejected up front
//! let bad = RegexPool::new(r"(\d{4}");
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal bookkeeping invariants are violated.
///
/// Produced by [`ConversionCache::check_invariants`](crate::cache::ConversionCache::check_invariants)
/// and [`RecencyList::check_invariants`](crate::ds::RecencyList::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when a component is constructed from invalid configuration.
///
/// Produced by [`RegexPool::new`](crate::pool::RegexPool::new),
/// [`PatternReplacer::new`](crate::replace::PatternReplacer::new) and
/// [`ContextBuilder::try_build`](crate::builder::ContextBuilder::try_build).
///
/// # Example
///
/// ```
/// use erakit::replace::PatternReplacer;
///
/// let err = PatternReplacer::new([("", "x")]).unwrap_err();
/// assert!(err.to_string().contains("empty"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

impl From<regex::Error> for ConfigError {
    fn from(err: regex::Error) -> Self {
        Self(format!("invalid pattern: {err}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
