//! Regression tripwires: compact per-benchmark summaries of the optimized config
//!
//! A later run compares its own numbers against these to flag slowdowns.

use crate::aggregate::AggregateResult;
use crate::metadata::BenchmarkMetadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tripwire for one benchmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripwireRecord {
    /// Mean time under the optimized config, in ms
    pub mean: f64,
    /// Relative stddev under the optimized config, in percent
    pub rsd_pct: f64,
    /// Microbenchmarks are noisier and usually get looser thresholds
    pub micro: bool,
}

/// Build one tripwire per benchmark from the optimized config's column
///
/// Keys are exactly `aggregate.benchmarks`, since aggregation already
/// requires the optimized config to be complete.
pub fn extract_tripwires<M: BenchmarkMetadata + ?Sized>(
    aggregate: &AggregateResult,
    metadata: &M,
) -> BTreeMap<String, TripwireRecord> {
    let optimized = aggregate.optimized();
    aggregate
        .benchmarks
        .iter()
        .zip(&optimized.rows)
        .filter_map(|(bench, row)| {
            let stats = row.stats?;
            Some((
                bench.clone(),
                TripwireRecord {
                    mean: stats.mean,
                    rsd_pct: stats.rsd_pct,
                    micro: metadata.is_micro(bench),
                },
            ))
        })
        .collect()
}

/// Pretty-printed JSON object keyed by benchmark name
pub fn to_json_pretty(tripwires: &BTreeMap<String, TripwireRecord>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(tripwires)
}
