//! Metrics recording and export traits.
//!
//! Recording is split by mutability: operations that already hold `&mut self`
//! on the cache record through [`CoreMetricsRecorder`] / [`LruMetricsRecorder`],
//! while `&self` read paths (peek, rank scans) record through
//! [`LruMetricsReadRecorder`] backed by [`MetricsCell`](crate::metrics::cell::MetricsCell)
//! counters. Export is decoupled from recording via [`MetricsExporter`].

/// Counters shared by every cache operation set.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// LRU-specific counters recorded on mutating paths.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// LRU-specific counters recorded on `&self` read paths.
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Publishes a metrics snapshot to a monitoring sink.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
