//! erakit: concurrent caching and pooling primitives for era-aware date
//! formatting.
//!
//! The formatting and parsing layers share one [`context::FormatContext`]:
//! a bounded year-conversion cache, a buffer pool, a regex matcher pool and a
//! longest-match literal replacer for month and day names.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod cache;
pub mod context;
pub mod ds;
pub mod era;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod pool;
pub mod prelude;
pub mod replace;

pub use cache::{CacheStats, ConversionCache};
pub use context::FormatContext;
pub use error::{ConfigError, InvariantError};
