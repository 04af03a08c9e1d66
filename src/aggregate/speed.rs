// Timing aggregation: means, spreads, speedups and JIT retirement share

use super::jit::{self, JitSummary};
use super::statistics::{SeriesStats, Speedup};
use super::{check_completeness, check_stats};
use crate::error::Result;
use crate::resolve::{ResolvedConfig, RoleMap};
use crate::store::SampleStore;

/// Statistics for one benchmark under one config
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregateRow {
    /// `None` when the benchmark was not run under this config
    pub stats: Option<SeriesStats>,
    /// `None` for the baseline, or when either mean is missing
    pub speedup: Option<Speedup>,
}

impl AggregateRow {
    pub fn mean(&self) -> Option<f64> {
        self.stats.map(|s| s.mean)
    }

    pub fn rsd_pct(&self) -> Option<f64> {
        self.stats.map(|s| s.rsd_pct)
    }
}

/// Warmup and timed iteration counts for one benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationCount {
    pub warmups: usize,
    pub iterations: usize,
}

/// All rows for one config, indexed like `AggregateResult::benchmarks`
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigColumn {
    pub config: ResolvedConfig,
    pub rows: Vec<AggregateRow>,
    /// Sum of every timed sample across all benchmarks, in ms
    pub total_time_ms: f64,
    pub iterations: Vec<Option<IterationCount>>,
}

/// Aggregated timing statistics for one comparison
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub benchmarks: Vec<String>,
    /// Columns in display order: baseline first, optimized last
    pub columns: Vec<ConfigColumn>,
    /// Percentage of instructions retired in the JIT, per benchmark
    pub yjit_ratio_pct: Vec<f64>,
    /// Counter summary from the first stats record, per benchmark
    pub jit_summaries: Vec<JitSummary>,
    /// Configs allowed to be incomplete that actually are
    pub incomplete_configs: Vec<String>,
}

impl AggregateResult {
    pub fn benchmark_index(&self, benchmark: &str) -> Option<usize> {
        self.benchmarks.iter().position(|b| b == benchmark)
    }

    pub fn column(&self, config: &str) -> Option<&ConfigColumn> {
        self.columns.iter().find(|c| c.config.name == config)
    }

    pub fn baseline(&self) -> &ConfigColumn {
        &self.columns[0]
    }

    pub fn optimized(&self) -> &ConfigColumn {
        &self.columns[self.columns.len() - 1]
    }

    /// Row for (config, benchmark), `None` if either is unknown
    pub fn row(&self, config: &str, benchmark: &str) -> Option<&AggregateRow> {
        let idx = self.benchmark_index(benchmark)?;
        self.column(config)?.rows.get(idx)
    }

    pub fn speedup(&self, config: &str, benchmark: &str) -> Option<Speedup> {
        self.row(config, benchmark)?.speedup
    }

    /// True if `config` is missing results it was allowed to miss
    pub fn is_incomplete(&self, config: &str) -> bool {
        self.incomplete_configs.iter().any(|c| c == config)
    }
}

/// Aggregate timing samples for the resolved configs over `benchmarks`
///
/// # Errors
/// `MissingBenchmarkData` if a config not flagged `allow_incomplete` lacks
/// any benchmark; `MissingStats` if the stats config lacks counters for one.
pub fn aggregate<S: SampleStore + ?Sized>(
    roles: &RoleMap,
    store: &S,
    benchmarks: &[String],
) -> Result<AggregateResult> {
    let incomplete_configs = check_completeness(
        roles,
        benchmarks,
        |_| true,
        |config, bench| store.series(config, bench).is_some(),
    )?;
    check_stats(roles, store, benchmarks)?;

    let mut columns: Vec<ConfigColumn> = roles
        .configs()
        .iter()
        .map(|config| column_for(config, store, benchmarks))
        .collect();

    let baseline_rows = columns[0].rows.clone();
    for column in columns.iter_mut().skip(1) {
        for (row, baseline) in column.rows.iter_mut().zip(&baseline_rows) {
            row.speedup = match (baseline.stats, row.stats) {
                (Some(b), Some(t)) => Speedup::between(&b, &t),
                _ => None,
            };
        }
    }

    let stats_config = &roles.stats().name;
    let mut yjit_ratio_pct = Vec::with_capacity(benchmarks.len());
    let mut jit_summaries = Vec::with_capacity(benchmarks.len());
    for bench in benchmarks {
        let records = store.jit_stats(stats_config, bench).unwrap_or(&[]);
        yjit_ratio_pct.push(jit::yjit_ratio_pct(&jit::combine(records)));
        jit_summaries.push(records.first().map(JitSummary::from_record).unwrap_or_default());
    }

    tracing::debug!(
        "Aggregated {} benchmarks across {} configs",
        benchmarks.len(),
        columns.len()
    );

    Ok(AggregateResult {
        benchmarks: benchmarks.to_vec(),
        columns,
        yjit_ratio_pct,
        jit_summaries,
        incomplete_configs,
    })
}

fn column_for<S: SampleStore + ?Sized>(
    config: &ResolvedConfig,
    store: &S,
    benchmarks: &[String],
) -> ConfigColumn {
    let mut rows = Vec::with_capacity(benchmarks.len());
    let mut iterations = Vec::with_capacity(benchmarks.len());
    let mut total_time_ms = 0.0;

    for bench in benchmarks {
        let series = store.series(&config.name, bench);
        total_time_ms += series.map_or(0.0, |s| s.iter().sum::<f64>());
        rows.push(AggregateRow {
            stats: series.and_then(SeriesStats::from_samples),
            speedup: None,
        });
        iterations.push(series.map(|s| IterationCount {
            warmups: store.warmups(&config.name, bench).map_or(0, <[f64]>::len),
            iterations: s.len(),
        }));
    }

    ConfigColumn {
        config: config.clone(),
        rows,
        total_time_ms,
        iterations,
    }
}
