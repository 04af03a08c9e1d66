// Peak memory aggregation and JIT code-region sizes

use super::jit::JitSummary;
use super::{check_completeness, check_stats};
use crate::error::Result;
use crate::resolve::{ResolvedConfig, RoleMap};
use crate::store::SampleStore;

const ONE_MIB: f64 = 1024.0 * 1024.0;

/// Peak memory for one benchmark under one config
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MemRow {
    /// Mean peak memory in MiB, `None` if not measured
    pub peak_mib: Option<f64>,
    /// Mean peak bytes over baseline mean peak bytes; `None` for the baseline
    pub ratio: Option<f64>,
}

/// Memory rows for one config
#[derive(Debug, Clone, PartialEq)]
pub struct MemColumn {
    pub config: ResolvedConfig,
    pub rows: Vec<MemRow>,
}

/// Aggregated memory statistics for one comparison
#[derive(Debug, Clone, PartialEq)]
pub struct MemAggregateResult {
    pub benchmarks: Vec<String>,
    pub columns: Vec<MemColumn>,
    /// sum(optimized peak bytes) / sum(baseline peak bytes) - 1, per benchmark
    pub mem_overhead_factor: Vec<f64>,
    /// Inline code region in whole MiB, rounded up
    pub inline_code_mib: Vec<Option<u64>>,
    /// Outlined code region in whole MiB, rounded up
    pub outlined_code_mib: Vec<Option<u64>>,
    /// Configs with memory holes that were tolerated
    pub incomplete_configs: Vec<String>,
}

impl MemAggregateResult {
    pub fn is_incomplete(&self, config: &str) -> bool {
        self.incomplete_configs.iter().any(|c| c == config)
    }
}

fn mean_bytes(bytes: &[u64]) -> f64 {
    bytes.iter().map(|&b| b as f64).sum::<f64>() / bytes.len() as f64
}

fn sum_bytes(bytes: Option<&[u64]>) -> f64 {
    bytes.map_or(0.0, |b| b.iter().map(|&v| v as f64).sum())
}

/// Aggregate peak memory samples for the resolved configs over `benchmarks`
///
/// The overhead factor uses the sum over repeated runs rather than the mean,
/// which only differs from the ratio of means when run counts differ.
///
/// Only the baseline and optimized configs must have memory for every
/// benchmark; alternates without it get empty rows.
///
/// # Errors
/// `MissingBenchmarkData` if the baseline or optimized config lacks memory
/// samples for a benchmark; `MissingStats` as for `aggregate`.
pub fn mem_aggregate<S: SampleStore + ?Sized>(
    roles: &RoleMap,
    store: &S,
    benchmarks: &[String],
) -> Result<MemAggregateResult> {
    let baseline = &roles.baseline().name;
    let optimized = &roles.optimized().name;

    let incomplete_configs = check_completeness(
        roles,
        benchmarks,
        |config| config.name == *baseline || config.name == *optimized,
        |config, bench| store.peak_memory(config, bench).is_some(),
    )?;
    check_stats(roles, store, benchmarks)?;

    let columns = roles
        .configs()
        .iter()
        .map(|config| {
            let rows = benchmarks
                .iter()
                .map(|bench| {
                    let Some(bytes) = store.peak_memory(&config.name, bench) else {
                        return MemRow::default();
                    };
                    let this_bytes = mean_bytes(bytes);
                    let ratio = if config.name == *baseline {
                        None
                    } else {
                        store
                            .peak_memory(baseline, bench)
                            .map(|base| this_bytes / mean_bytes(base))
                    };
                    MemRow {
                        peak_mib: Some(this_bytes / ONE_MIB),
                        ratio,
                    }
                })
                .collect();
            MemColumn {
                config: config.clone(),
                rows,
            }
        })
        .collect();

    let mut mem_overhead_factor = Vec::with_capacity(benchmarks.len());
    let mut inline_code_mib = Vec::with_capacity(benchmarks.len());
    let mut outlined_code_mib = Vec::with_capacity(benchmarks.len());
    for bench in benchmarks {
        let optimized_sum = sum_bytes(store.peak_memory(optimized, bench));
        let baseline_sum = sum_bytes(store.peak_memory(baseline, bench));
        mem_overhead_factor.push(optimized_sum / baseline_sum - 1.0);

        let summary = store
            .jit_stats(&roles.stats().name, bench)
            .and_then(|records| records.first())
            .map(JitSummary::from_record)
            .unwrap_or_default();
        inline_code_mib.push(summary.inline_code_mib());
        outlined_code_mib.push(summary.outlined_code_mib());
    }

    Ok(MemAggregateResult {
        benchmarks: benchmarks.to_vec(),
        columns,
        mem_overhead_factor,
        inline_code_mib,
        outlined_code_mib,
        incomplete_configs,
    })
}
