use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::{ConversionCacheMetricsSnapshot, PoolMetricsSnapshot};
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache and pool snapshots.
///
/// This exporter writes in the Prometheus text exposition format so it can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector. Write
/// errors are ignored: a failing sink must not break the caller.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_sample(&self, kind: &str, suffix: &str, value: impl std::fmt::Display) {
        let name = self.metric_name(suffix);
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_sample("counter", suffix, value);
    }

    fn write_gauge(&self, suffix: &str, value: impl std::fmt::Display) {
        self.write_sample("gauge", suffix, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W> MetricsExporter<ConversionCacheMetricsSnapshot> for PrometheusTextExporter<W>
where
    W: Write + Send,
{
    fn export(&self, snapshot: &ConversionCacheMetricsSnapshot) {
        self.write_counter("get_calls_total", snapshot.get_calls);
        self.write_counter("get_hits_total", snapshot.get_hits);
        self.write_counter("get_misses_total", snapshot.get_misses);
        self.write_counter("evicted_entries_total", snapshot.evicted_entries);
        self.write_gauge("hit_rate", snapshot.hit_rate);
        self.write_gauge("cache_len", snapshot.cache_len);
        self.write_gauge("capacity", snapshot.capacity);
    }
}

impl<W: Write + Send> MetricsExporter<PoolMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &PoolMetricsSnapshot) {
        self.write_counter("get_calls_total", snapshot.get_calls);
        self.write_counter("put_calls_total", snapshot.put_calls);
        self.write_counter("allocations_total", snapshot.allocations);
        self.write_gauge("reuse_rate", snapshot.reuse_rate);
        self.write_gauge("idle", snapshot.idle);
    }
}
