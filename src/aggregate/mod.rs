// Cross-configuration aggregation of benchmark samples
//
// Turns the raw sample store into per-benchmark, per-config means and
// relative spreads, speedups against the baseline with propagated error,
// the share of instructions retired in the JIT, and memory overheads.
//
// Completeness is checked up front: the comparison fails loudly instead of
// producing a table with silent holes. Only configs whose role allows it
// may miss benchmarks.

mod jit;
mod memory;
mod speed;
mod statistics;

pub use jit::{ceil_mib, combine, total_exit_count, yjit_ratio_pct, JitSummary};
pub use memory::{mem_aggregate, MemAggregateResult, MemColumn, MemRow};
pub use speed::{aggregate, AggregateResult, AggregateRow, ConfigColumn, IterationCount};
pub use statistics::{
    geomean, mean, propagate_rsd_pct, rel_stddev_pct, stddev, SeriesStats, Speedup,
};

use crate::error::{CompareError, Result};
use crate::resolve::{ResolvedConfig, RoleMap};
use crate::store::SampleStore;

/// Benchmarks the optimized config has results for, optionally narrowed to `only`
///
/// # Errors
/// `NoBenchmarks` when nothing is left: the optimized config ran nothing, or
/// `only` names no benchmark it ran.
pub fn benchmark_set<S: SampleStore + ?Sized>(
    roles: &RoleMap,
    store: &S,
    only: &[String],
) -> Result<Vec<String>> {
    let optimized = &roles.optimized().name;
    let benchmarks: Vec<String> = store
        .benchmarks_for(optimized)
        .into_iter()
        .filter(|name| only.is_empty() || only.contains(name))
        .collect();
    if benchmarks.is_empty() {
        return Err(CompareError::NoBenchmarks {
            config: optimized.clone(),
            only: only.to_vec(),
        });
    }
    Ok(benchmarks)
}

/// Fail on a `required` config missing a benchmark, unless its role allows it
///
/// Returns the names of configs that are incomplete but tolerated.
fn check_completeness<R, F>(
    roles: &RoleMap,
    benchmarks: &[String],
    required: R,
    has_data: F,
) -> Result<Vec<String>>
where
    R: Fn(&ResolvedConfig) -> bool,
    F: Fn(&str, &str) -> bool,
{
    let mut incomplete = Vec::new();
    for config in roles.configs() {
        let missing: Vec<String> = benchmarks
            .iter()
            .filter(|bench| !has_data(&config.name, bench))
            .cloned()
            .collect();
        if missing.is_empty() {
            continue;
        }
        if required(config) && !config.allow_incomplete {
            return Err(CompareError::MissingBenchmarkData {
                config: config.name.clone(),
                benchmarks: missing,
            });
        }
        tracing::warn!(
            "Config {} has no results for {:?}, leaving them out of its ratios",
            config.name,
            missing
        );
        incomplete.push(config.name.clone());
    }
    Ok(incomplete)
}

/// Fail if the stats config lacks a usable counter record for any benchmark
fn check_stats<S: SampleStore + ?Sized>(
    roles: &RoleMap,
    store: &S,
    benchmarks: &[String],
) -> Result<()> {
    let stats_config = &roles.stats().name;
    let missing: Vec<String> = benchmarks
        .iter()
        .filter(|bench| {
            store
                .jit_stats(stats_config, bench)
                .and_then(|records| records.first())
                .map_or(true, |record| record.is_empty())
        })
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CompareError::MissingStats {
            benchmarks: missing,
        })
    }
}
