//! Builder for [`FormatContext`].
//!
//! Every setting has a default, so `ContextBuilder::new().try_build()` yields
//! a working context with an empty localization table.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use erakit::builder::ContextBuilder;
//! use erakit::pool::BufferPool;
//!
//! let shared = Arc::new(BufferPool::new());
//! let ctx = ContextBuilder::new()
//!     .cache_capacity(4096)
//!     .replacements([("Monday", "วันจันทร์"), ("Mon", "จ.")])
//!     .buffer_pool(Arc::clone(&shared))
//!     .try_build()
//!     .unwrap();
//!
//! assert_eq!(ctx.cache().capacity(), 4096);
//! assert!(Arc::ptr_eq(ctx.buffers(), &shared));
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::cache::{ConversionCache, DEFAULT_CAPACITY};
use crate::context::FormatContext;
use crate::era::EraRegistry;
use crate::error::ConfigError;
use crate::pool::{BufferPool, RegexPool};
use crate::replace::PatternReplacer;

/// Default pattern for [`FormatContext::rewrite_years`]: a standalone run of
/// exactly four digits.
pub const DEFAULT_YEAR_PATTERN: &str = r"\b\d{4}\b";

/// Builder for creating [`FormatContext`] instances.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    cache_capacity: usize,
    replacements: Vec<(String, String)>,
    year_pattern: String,
    buffer_pool: Option<Arc<BufferPool>>,
    eras: Vec<String>,
}

impl ContextBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            replacements: Vec::new(),
            year_pattern: DEFAULT_YEAR_PATTERN.to_string(),
            buffer_pool: None,
            eras: Vec::new(),
        }
    }

    /// Maximum number of cached year conversions (`0` means the default).
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Adds localization pairs. Can be called more than once; on duplicate
    /// patterns the earliest pair wins.
    pub fn replacements<I, P, R>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, R)>,
        P: Into<String>,
        R: Into<String>,
    {
        self.replacements
            .extend(pairs.into_iter().map(|(p, r)| (p.into(), r.into())));
        self
    }

    /// Pattern used by [`FormatContext::rewrite_years`].
    pub fn year_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.year_pattern = pattern.into();
        self
    }

    /// Share an existing buffer pool instead of creating one.
    pub fn buffer_pool(mut self, pool: Arc<BufferPool>) -> Self {
        self.buffer_pool = Some(pool);
        self
    }

    /// Registers an extra era after the built-in `CE` and `BE`.
    pub fn era(mut self, name: impl Into<String>) -> Self {
        self.eras.push(name.into());
        self
    }

    /// Build the context, validating the replacement table and year pattern.
    pub fn try_build(self) -> Result<FormatContext, ConfigError> {
        let buffers = self
            .buffer_pool
            .unwrap_or_else(|| Arc::new(BufferPool::new()));
        let localizer = PatternReplacer::with_buffer_pool(self.replacements, Arc::clone(&buffers))?;
        let year_matcher = RegexPool::new(&self.year_pattern)?;

        let eras = EraRegistry::with_builtin_eras();
        for name in &self.eras {
            eras.register(name);
        }

        let years = ConversionCache::new(self.cache_capacity);
        debug!(
            capacity = years.capacity(),
            patterns = localizer.len(),
            eras = eras.len(),
            "built format context"
        );
        Ok(FormatContext::from_parts(
            eras,
            years,
            buffers,
            localizer,
            year_matcher,
        ))
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
