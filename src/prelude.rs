pub use crate::builder::ContextBuilder;
pub use crate::cache::{CacheStats, ConversionCache, ConversionKey};
pub use crate::context::{Diagnostics, FormatContext};
pub use crate::ds::{RecencyList, ShardSelector, SlotArena, SlotId};
pub use crate::era::{EraId, EraRegistry};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::exporter::PrometheusTextExporter;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{ConversionCacheMetricsSnapshot, PoolMetricsSnapshot};
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
pub use crate::pool::{BufferPool, ObjectPool, PoolStats, PooledBuffer, PooledRegex, RegexPool};
pub use crate::replace::PatternReplacer;
