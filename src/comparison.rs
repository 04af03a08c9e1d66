//! One full comparison for one platform
//!
//! Resolves roles, picks and orders the benchmark set, aggregates timings
//! and memory, and derives tripwires and the headline summary. Charts are
//! laid out on demand per category view.

use crate::aggregate::{
    aggregate, benchmark_set, mem_aggregate, AggregateResult, MemAggregateResult,
};
use crate::config::CompareConfig;
use crate::error::Result;
use crate::headline::{headline_summary, HeadlineSummary};
use crate::layout::{layout, ChartLayout};
use crate::metadata::{category_views, sort_benchmarks, BenchmarkMetadata, CategoryViews};
use crate::resolve::{resolve, RoleMap};
use crate::store::SampleStore;
use crate::tripwire::{extract_tripwires, TripwireRecord};
use std::collections::BTreeMap;

/// Which benchmarks a chart shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartView {
    All,
    Headline,
    Micro,
    /// Neither headline nor micro
    Other,
}

impl ChartView {
    pub const ALL: [ChartView; 4] = [
        ChartView::All,
        ChartView::Headline,
        ChartView::Micro,
        ChartView::Other,
    ];

    /// Suffix used in output file names
    pub fn file_suffix(self) -> &'static str {
        match self {
            ChartView::All => "svg",
            ChartView::Headline => "head.svg",
            ChartView::Micro => "micro.svg",
            ChartView::Other => "back.svg",
        }
    }
}

/// Everything derived for one platform
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub platform: Option<String>,
    pub roles: RoleMap,
    pub speed: AggregateResult,
    /// `None` when no compared config recorded peak memory
    pub memory: Option<MemAggregateResult>,
    pub tripwires: BTreeMap<String, TripwireRecord>,
    pub headline: HeadlineSummary,
    pub views: CategoryViews,
}

impl Comparison {
    /// Benchmarks shown in `view`, in display order
    pub fn view_benchmarks(&self, view: ChartView) -> &[String] {
        match view {
            ChartView::All => &self.speed.benchmarks,
            ChartView::Headline => &self.views.headline,
            ChartView::Micro => &self.views.micro,
            ChartView::Other => &self.views.other,
        }
    }

    /// Lay out the chart for `view`; `None` when the view has no benchmarks
    pub fn chart(&self, view: ChartView) -> Option<Result<ChartLayout>> {
        let benchmarks = self.view_benchmarks(view);
        if benchmarks.is_empty() {
            return None;
        }
        Some(layout(&self.speed, &self.roles.names(), benchmarks))
    }

    /// Human-readable config labels in display order
    pub fn labels(&self) -> Vec<String> {
        self.roles.configs().iter().map(|c| c.label.clone()).collect()
    }
}

/// Run the comparison for `platform` (all configs when `None`)
///
/// `only` narrows the benchmark set; empty means every benchmark the
/// optimized config ran. An empty resulting set is an error.
pub fn compare_platform<S, M>(
    config: &CompareConfig,
    store: &S,
    metadata: &M,
    platform: Option<&str>,
    only: &[String],
) -> Result<Comparison>
where
    S: SampleStore + ?Sized,
    M: BenchmarkMetadata + ?Sized,
{
    let roles = resolve(config, &store.available_configs(), platform)?;

    let mut benchmarks = benchmark_set(&roles, store, only)?;
    sort_benchmarks(&mut benchmarks, metadata);

    let speed = aggregate(&roles, store, &benchmarks)?;

    let has_memory = roles.configs().iter().any(|c| {
        benchmarks
            .iter()
            .any(|bench| store.peak_memory(&c.name, bench).is_some())
    });
    let memory = if has_memory {
        Some(mem_aggregate(&roles, store, &benchmarks)?)
    } else {
        tracing::debug!("No peak memory samples for {:?}, skipping memory table", platform);
        None
    };

    let tripwires = extract_tripwires(&speed, metadata);
    let headline = headline_summary(&speed, metadata, config.headline_benchmark.as_deref());
    let views = category_views(&speed.benchmarks, metadata);

    Ok(Comparison {
        platform: platform.map(str::to_string),
        roles,
        speed,
        memory,
        tripwires,
        headline,
        views,
    })
}
