//! Per-header-set cache of column plans

use super::plan::ColumnPlan;
use super::synonyms::ColumnSynonymTable;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Column plans keyed by the exact header list they were resolved from.
///
/// A source keeps the same header set for months at a time, so resolution
/// runs once per distinct set instead of once per trading day. Cached
/// plans are pure functions of the headers; a hit never changes output.
pub struct PlanCache {
    plans: DashMap<Vec<String>, Arc<ColumnPlan>>,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

impl PlanCache {
    pub fn new() -> Self {
        Self {
            plans: DashMap::new(),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
        }
    }

    pub fn get_or_resolve(&self, headers: &[String], synonyms: &ColumnSynonymTable) -> Arc<ColumnPlan> {
        if let Some(plan) = self.plans.get(headers) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            return plan.clone();
        }

        self.cache_misses.fetch_add(1, Ordering::Relaxed);
        let plan = Arc::new(ColumnPlan::resolve(headers, synonyms));
        self.plans
            .entry(headers.to_vec())
            .or_insert_with(|| plan.clone())
            .clone()
    }

    /// Distinct header sets seen so far
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// (hits, misses, hit rate)
    pub fn get_cache_stats(&self) -> (u64, u64, f64) {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };
        (hits, misses, hit_rate)
    }

    pub fn clear(&self) {
        self.plans.clear();
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new()
    }
}
