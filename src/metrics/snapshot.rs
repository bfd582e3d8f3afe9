/// Point-in-time copy of [`LruMetrics`](crate::metrics::metrics_impl::LruMetrics)
/// counters plus length/capacity gauges.
#[derive(Debug, Default, Clone, Copy)]
pub struct LruMetricsSnapshot {
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub clear_calls: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,

    pub peek_calls: u64,
    pub peek_found: u64,
    pub peek_lru_calls: u64,
    pub peek_lru_found: u64,

    pub recency_rank_calls: u64,
    pub recency_rank_found: u64,
    pub recency_rank_scan_steps: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl LruMetricsSnapshot {
    /// Hit ratio over all promoting reads, or `None` before the first `get`.
    pub fn hit_rate(&self) -> Option<f64> {
        let total = self.get_hits + self.get_misses;
        if total == 0 {
            return None;
        }
        Some(self.get_hits as f64 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_handles_empty_history() {
        let snap = LruMetricsSnapshot::default();
        assert_eq!(snap.hit_rate(), None);
    }

    #[test]
    fn hit_rate_divides_hits_by_reads() {
        let snap = LruMetricsSnapshot {
            get_hits: 3,
            get_misses: 1,
            ..Default::default()
        };
        assert_eq!(snap.hit_rate(), Some(0.75));
    }
}
