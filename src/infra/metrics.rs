//! Session metrics collection and reporting
//!
//! Plain counters owned by the session; everything runs on the UI thread so
//! nothing here needs atomics or locks. `report()` takes a snapshot that can
//! be logged or rendered.

use crate::domain::fee::Fee;
use crate::services::entry::ParkInError;
use std::time::Instant;
use tracing::info;

/// Stay-length bucket boundaries (billed minutes)
/// Buckets: ≤15, ≤30, ≤60, ≤120, ≤240, ≤480, >480 min
const STAY_BOUNDS: [u64; 6] = [15, 30, 60, 120, 240, 480];
const NUM_STAY_BUCKETS: usize = 7;

/// Compute bucket index for a stay length using binary search
#[inline]
fn stay_bucket_index(minutes: u64) -> usize {
    STAY_BOUNDS.partition_point(|&bound| bound < minutes)
}

/// Compute percentile from histogram buckets
/// Returns the upper bound of the bucket containing the percentile
fn percentile_from_buckets(buckets: &[u64; NUM_STAY_BUCKETS], percentile: f64) -> u64 {
    let total: u64 = buckets.iter().sum();
    if total == 0 {
        return 0;
    }

    let target = ((total as f64 * percentile).ceil() as u64).max(1);
    let mut cumulative = 0u64;

    // Upper bounds for each bucket (last bucket uses 2x the previous bound)
    const STAY_UPPER_BOUNDS: [u64; NUM_STAY_BUCKETS] = [15, 30, 60, 120, 240, 480, 960];

    for (i, &count) in buckets.iter().enumerate() {
        cumulative += count;
        if cumulative >= target {
            return STAY_UPPER_BOUNDS[i];
        }
    }
    STAY_UPPER_BOUNDS[NUM_STAY_BUCKETS - 1]
}

/// Counters for one run of the application
#[derive(Debug, Clone)]
pub struct Metrics {
    started_at: Instant,
    parks_in: u64,
    parks_out: u64,
    rejected_empty: u64,
    rejected_invalid: u64,
    rejected_duplicate: u64,
    /// Park-in/out calls on a missing or state-mismatched slot
    ignored: u64,
    revenue_cents: u64,
    billed_minutes: u64,
    stay_buckets: [u64; NUM_STAY_BUCKETS],
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            parks_in: 0,
            parks_out: 0,
            rejected_empty: 0,
            rejected_invalid: 0,
            rejected_duplicate: 0,
            ignored: 0,
            revenue_cents: 0,
            billed_minutes: 0,
            stay_buckets: [0; NUM_STAY_BUCKETS],
        }
    }

    pub fn record_park_in(&mut self) {
        self.parks_in += 1;
    }

    pub fn record_rejection(&mut self, error: &ParkInError) {
        match error {
            ParkInError::EmptyInput => self.rejected_empty += 1,
            ParkInError::InvalidFormat => self.rejected_invalid += 1,
            ParkInError::DuplicateVehicle(_) => self.rejected_duplicate += 1,
        }
    }

    pub fn record_ignored(&mut self) {
        self.ignored += 1;
    }

    pub fn record_park_out(&mut self, minutes: u64, fee: Fee) {
        self.parks_out += 1;
        self.revenue_cents = self.revenue_cents.saturating_add(fee.cents());
        self.billed_minutes = self.billed_minutes.saturating_add(minutes);
        self.stay_buckets[stay_bucket_index(minutes)] += 1;
    }

    #[inline]
    pub fn parks_in(&self) -> u64 {
        self.parks_in
    }

    #[inline]
    pub fn parks_out(&self) -> u64 {
        self.parks_out
    }

    #[inline]
    pub fn revenue(&self) -> Fee {
        Fee(self.revenue_cents)
    }

    /// Snapshot for logging/display
    pub fn report(&self, occupied: usize, capacity: usize) -> MetricsSummary {
        let avg_stay_min = if self.parks_out > 0 { self.billed_minutes / self.parks_out } else { 0 };

        MetricsSummary {
            uptime_secs: self.started_at.elapsed().as_secs(),
            parks_in: self.parks_in,
            parks_out: self.parks_out,
            rejected_empty: self.rejected_empty,
            rejected_invalid: self.rejected_invalid,
            rejected_duplicate: self.rejected_duplicate,
            ignored: self.ignored,
            revenue: Fee(self.revenue_cents),
            avg_stay_min,
            stay_p50_min: percentile_from_buckets(&self.stay_buckets, 0.50),
            stay_p95_min: percentile_from_buckets(&self.stay_buckets, 0.95),
            stay_buckets: self.stay_buckets,
            occupied,
            capacity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub uptime_secs: u64,
    pub parks_in: u64,
    pub parks_out: u64,
    pub rejected_empty: u64,
    pub rejected_invalid: u64,
    pub rejected_duplicate: u64,
    pub ignored: u64,
    pub revenue: Fee,
    /// Mean billed minutes per completed stay
    pub avg_stay_min: u64,
    /// Bucket upper bound containing the median stay
    pub stay_p50_min: u64,
    pub stay_p95_min: u64,
    /// Bounds: ≤15, ≤30, ≤60, ≤120, ≤240, ≤480, >480 min
    pub stay_buckets: [u64; NUM_STAY_BUCKETS],
    pub occupied: usize,
    pub capacity: usize,
}

impl MetricsSummary {
    pub fn rejected_total(&self) -> u64 {
        self.rejected_empty + self.rejected_invalid + self.rejected_duplicate
    }

    pub fn log(&self) {
        info!(
            uptime_secs = %self.uptime_secs,
            parks_in = %self.parks_in,
            parks_out = %self.parks_out,
            rejected_empty = %self.rejected_empty,
            rejected_invalid = %self.rejected_invalid,
            rejected_duplicate = %self.rejected_duplicate,
            ignored = %self.ignored,
            revenue = %self.revenue,
            avg_stay_min = %self.avg_stay_min,
            stay_p50_min = %self.stay_p50_min,
            stay_p95_min = %self.stay_p95_min,
            occupied = %self.occupied,
            capacity = %self.capacity,
            "metrics_summary"
        );
    }
}
