//! # Shared formatting context
//!
//! [`FormatContext`] owns one instance of each shared component and is
//! handed to the formatting and parsing layers by reference (usually behind
//! an `Arc`). There are no process-wide singletons: two contexts never share
//! a cache or a pool unless the caller passes the same `Arc<BufferPool>` to
//! both builders.
//!
//! ```text
//!   FormatContext
//!   ├── eras:         EraRegistry        name ⇄ EraId
//!   ├── years:        ConversionCache    (year, era) → converted year
//!   ├── buffers:      Arc<BufferPool>    shared with `localizer`
//!   ├── localizer:    PatternReplacer    month/day name table
//!   └── year_matcher: RegexPool          standalone 4-digit years
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use erakit::builder::ContextBuilder;
//! use erakit::era::EraRegistry;
//!
//! let ctx = ContextBuilder::new()
//!     .replacements([("April", "เมษายน"), ("Apr", "เม.ย.")])
//!     .try_build()
//!     .unwrap();
//!
//! let be = ctx.convert_year(2024, EraRegistry::BE, |ce| ce + 543);
//! assert_eq!(be, 2567);
//!
//! let text = ctx.rewrite_years("14 April 2024", |ce| ce + 543);
//! assert_eq!(ctx.localize(&text), "14 เมษายน 2567");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use crate::cache::{CacheStats, ConversionCache};
use crate::era::{EraId, EraRegistry};
use crate::pool::{BufferPool, PoolStats, RegexPool};
use crate::replace::PatternReplacer;

/// Point-in-time view of the context's counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    pub cache: CacheStats,
    pub cache_hit_rate: f64,
    pub buffers: PoolStats,
    pub cached_entries: usize,
}

/// Shared services for date formatting and parsing.
#[derive(Debug)]
pub struct FormatContext {
    eras: EraRegistry,
    years: ConversionCache,
    buffers: Arc<BufferPool>,
    localizer: PatternReplacer,
    year_matcher: RegexPool,
}

impl FormatContext {
    pub(crate) fn from_parts(
        eras: EraRegistry,
        years: ConversionCache,
        buffers: Arc<BufferPool>,
        localizer: PatternReplacer,
        year_matcher: RegexPool,
    ) -> Self {
        Self {
            eras,
            years,
            buffers,
            localizer,
            year_matcher,
        }
    }

    /// Converts `year` into `era`, computing with `convert` only on a cache
    /// miss.
    pub fn convert_year<F>(&self, year: i64, era: EraId, convert: F) -> i64
    where
        F: FnOnce(i64) -> i64,
    {
        self.years.get_or_insert_with(year, era, || convert(year))
    }

    /// Applies the localization table to already formatted text.
    pub fn localize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.localizer.replace(text)
    }

    /// Rewrites every standalone year in `text` through `convert`.
    ///
    /// Matches that do not fit in an `i64` are left as they are.
    pub fn rewrite_years<'a, F>(&self, text: &'a str, mut convert: F) -> Cow<'a, str>
    where
        F: FnMut(i64) -> i64,
    {
        self.year_matcher.replace_all_with(text, |m| match m.parse::<i64>() {
            Ok(year) => convert(year).to_string(),
            Err(_) => m.to_owned(),
        })
    }

    pub fn eras(&self) -> &EraRegistry {
        &self.eras
    }

    pub fn cache(&self) -> &ConversionCache {
        &self.years
    }

    pub fn buffers(&self) -> &Arc<BufferPool> {
        &self.buffers
    }

    pub fn localizer(&self) -> &PatternReplacer {
        &self.localizer
    }

    pub fn year_matcher(&self) -> &RegexPool {
        &self.year_matcher
    }

    pub fn diagnostics(&self) -> Diagnostics {
        let cache = self.years.stats();
        Diagnostics {
            cache,
            cache_hit_rate: cache.hit_rate(),
            buffers: self.buffers.stats(),
            cached_entries: self.years.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ContextBuilder;

    fn thai() -> FormatContext {
        ContextBuilder::new()
            .cache_capacity(16)
            .replacements([
                ("January", "มกราคม"),
                ("Jan", "ม.ค."),
                ("Monday", "วันจันทร์"),
            ])
            .try_build()
            .unwrap()
    }

    #[test]
    fn convert_year_caches_the_conversion() {
        let ctx = thai();
        let mut calls = 0;
        for _ in 0..3 {
            let year = ctx.convert_year(2024, EraRegistry::BE, |ce| {
                calls += 1;
                ce + 543
            });
            assert_eq!(year, 2567);
        }
        assert_eq!(calls, 1);

        let diag = ctx.diagnostics();
        assert_eq!(diag.cache.hits, 2);
        assert_eq!(diag.cache.misses, 1);
        assert_eq!(diag.cached_entries, 1);
    }

    #[test]
    fn localize_and_rewrite_compose() {
        let ctx = thai();
        let text = ctx.rewrite_years("Monday, 1 January 2024", |ce| ce + 543);
        assert_eq!(text, "Monday, 1 January 2567");
        assert_eq!(ctx.localize(&text), "วันจันทร์, 1 มกราคม 2567");
    }

    #[test]
    fn rewrite_ignores_longer_digit_runs() {
        let ctx = thai();
        let out = ctx.rewrite_years("id 123456, year 1999", |ce| ce + 543);
        assert_eq!(out, "id 123456, year 2542");
        assert!(matches!(ctx.rewrite_years("no years", |y| y), Cow::Borrowed(_)));
    }

    #[test]
    fn localizer_shares_the_context_buffers() {
        let ctx = thai();
        ctx.localize("Jan");
        ctx.localize("Jan");
        let diag = ctx.diagnostics();
        assert_eq!(diag.buffers.gets, 2);
        assert_eq!(diag.buffers.allocations, 1);
    }

    #[test]
    fn diagnostics_start_at_zero() {
        let ctx = thai();
        let diag = ctx.diagnostics();
        assert_eq!(diag.cache, CacheStats::default());
        assert_eq!(diag.cache_hit_rate, 0.0);
        assert_eq!(diag.cached_entries, 0);
    }

    #[test]
    fn custom_eras_key_separately() {
        let ctx = thai();
        let roc = ctx.eras().register("ROC");
        assert_eq!(ctx.convert_year(2024, roc, |ce| ce - 1911), 113);
        assert_eq!(ctx.convert_year(2024, EraRegistry::BE, |ce| ce + 543), 2567);
        assert_eq!(ctx.cache().len(), 2);
    }
}
