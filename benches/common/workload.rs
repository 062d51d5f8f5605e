//! Year streams for hit-rate benchmarks.
//!
//! A stream draws years from a window ending at [`LATEST_YEAR`]. Patterns
//! model what a formatter sees: recent years dominate, old years trickle in,
//! and bulk exports sweep the whole window in order.

use erakit::cache::ConversionCache;
use erakit::era::EraId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Newest year in every window.
pub const LATEST_YEAR: i64 = 2030;

#[derive(Debug, Clone, Copy)]
pub enum YearPattern {
    /// Every year in the window equally likely.
    Uniform,
    /// The newest `recent` years receive `share` of all lookups.
    RecentBias { recent: u32, share: f64 },
    /// Oldest to newest, then wrap.
    Sweep,
    /// Rank `r` (0 = newest year) drawn with weight `1 / (r + 1)^exponent`.
    Zipf { exponent: f64 },
}

/// Endless, seeded sequence of years over a `span`-year window.
pub struct YearStream {
    span: u32,
    pattern: YearPattern,
    rng: StdRng,
    cursor: u32,
    cdf: Vec<f64>,
}

impl YearStream {
    pub fn new(span: u32, pattern: YearPattern, seed: u64) -> Self {
        let span = span.max(1);
        let cdf = match pattern {
            YearPattern::Zipf { exponent } => zipf_cdf(span, exponent),
            _ => Vec::new(),
        };
        Self {
            span,
            pattern,
            rng: StdRng::seed_from_u64(seed),
            cursor: 0,
            cdf,
        }
    }

    /// Offset back from [`LATEST_YEAR`], in `[0, span)`.
    fn next_rank(&mut self) -> u32 {
        match self.pattern {
            YearPattern::Uniform => self.rng.random_range(0..self.span),
            YearPattern::RecentBias { recent, share } => {
                let recent = recent.clamp(1, self.span);
                if recent == self.span || self.rng.random_bool(share.clamp(0.0, 1.0)) {
                    self.rng.random_range(0..recent)
                } else {
                    self.rng.random_range(recent..self.span)
                }
            },
            YearPattern::Sweep => {
                let rank = self.span - 1 - self.cursor;
                self.cursor = (self.cursor + 1) % self.span;
                rank
            },
            YearPattern::Zipf { .. } => {
                let u: f64 = self.rng.random();
                let rank = self.cdf.partition_point(|&p| p < u);
                (rank as u32).min(self.span - 1)
            },
        }
    }
}

impl Iterator for YearStream {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        Some(LATEST_YEAR - i64::from(self.next_rank()))
    }
}

/// Normalized cumulative weights for ranks `0..span`.
fn zipf_cdf(span: u32, exponent: f64) -> Vec<f64> {
    let mut total = 0.0;
    let mut cdf: Vec<f64> = (1..=span)
        .map(|r| {
            total += 1.0 / f64::from(r).powf(exponent);
            total
        })
        .collect();
    for p in &mut cdf {
        *p /= total;
    }
    cdf
}

/// Replays `operations` years through `get_or_insert_with` and returns the
/// cache's hit rate.
pub fn run_hit_rate<I, F>(
    cache: &ConversionCache,
    era: EraId,
    years: I,
    operations: usize,
    convert: F,
) -> f64
where
    I: IntoIterator<Item = i64>,
    F: Fn(i64) -> i64,
{
    for year in years.into_iter().take(operations) {
        cache.get_or_insert_with(year, era, || convert(year));
    }
    cache.hit_rate()
}
