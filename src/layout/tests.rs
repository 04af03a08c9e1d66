// Geometry tests for the bar chart layout

use super::*;
use crate::aggregate::{aggregate, AggregateResult};
use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::resolve::resolve;
use crate::store::{InMemorySampleStore, JitStatsRecord, SampleStore};

const NO_JIT: &str = "x86_64_prod_ruby_no_jit";
const YJIT: &str = "x86_64_prod_ruby_with_yjit";
const MJIT: &str = "x86_64_prod_ruby_with_mjit";
const STATS: &str = "x86_64_yjit_stats";

fn record() -> JitStatsRecord {
    let mut record = JitStatsRecord::new();
    record.insert("exec_instruction".to_string(), 100);
    record.insert("vm_insns_count".to_string(), 100);
    record
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// fib at 2x with 4% spread, nbody at 3.4x with no spread
fn sample_aggregate(with_mjit: bool) -> AggregateResult {
    let mut store = InMemorySampleStore::new();
    store.add_platform("x86_64");
    store.insert_times(NO_JIT, "fib", vec![100.0, 100.0, 100.0]);
    store.insert_times(YJIT, "fib", vec![50.0, 52.0, 48.0]);
    store.insert_times(NO_JIT, "nbody", vec![34.0, 34.0]);
    store.insert_times(YJIT, "nbody", vec![10.0, 10.0]);
    if with_mjit {
        store.insert_times(MJIT, "fib", vec![80.0, 80.0]);
    }
    for bench in ["fib", "nbody"] {
        store.push_jit_stats(STATS, bench, record());
    }
    let roles = resolve(
        &CompareConfig::default(),
        &store.available_configs(),
        Some("x86_64"),
    )
    .unwrap();
    aggregate(&roles, &store, &names(&["fib", "nbody"])).unwrap()
}

fn configs(result: &AggregateResult) -> Vec<String> {
    result.columns.iter().map(|c| c.config.name.clone()).collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_frame_derivations() {
    let frame = PlotFrame::default();
    assert!(close(frame.plot_width(), 0.94));
    assert!(close(frame.plot_height(), 0.78));
    assert!(close(frame.plot_bottom(), 0.83));
    assert!(close(frame.effective_left(), 0.05 + 0.94 * 0.05));
    assert!(close(frame.effective_width(), 0.94 * 0.9));
    assert!(close(frame.effective_top(), 0.05 + 0.15 * 0.78));
    assert!(close(frame.effective_height(), 0.78 * 0.85));
    // Zero sits on the plot bottom
    assert!(close(frame.y_for(0.0), frame.plot_bottom()));
}

#[test]
fn test_max_ratio_over_drawn_bars() {
    let result = sample_aggregate(false);
    let max = max_ratio(&result, &configs(&result), &result.benchmarks).unwrap();
    assert!(close(max, 3.4));

    // The baseline alone is drawn at 1.0
    let only_base = max_ratio(&result, &names(&[NO_JIT]), &result.benchmarks);
    assert_eq!(only_base, Some(1.0));
    assert_eq!(max_ratio(&result, &configs(&result), &names(&["missing"])), None);
}

/// Baseline bars stay inside the plot when every config is slower
#[test]
fn test_slower_configs_scale_to_baseline() {
    let mut store = InMemorySampleStore::new();
    store.insert_times(NO_JIT, "fib", vec![50.0]);
    store.insert_times(YJIT, "fib", vec![100.0]);
    store.push_jit_stats(STATS, "fib", record());
    let roles = resolve(&CompareConfig::default(), &store.available_configs(), None).unwrap();
    let result = aggregate(&roles, &store, &names(&["fib"])).unwrap();
    let chart = layout(&result, &roles.names(), &result.benchmarks).unwrap();

    assert_eq!(chart.axis.max_ratio, 1.0);
    let base = chart.bars.iter().find(|b| b.config == NO_JIT).unwrap();
    assert!(close(base.top, chart.frame.effective_top()));
}

#[test]
fn test_layout_axis_and_ticks() {
    let result = sample_aggregate(false);
    let chart = layout(&result, &configs(&result), &result.benchmarks).unwrap();

    assert_eq!(chart.axis.division, 0.5);
    assert_eq!(chart.ticks.len(), 8);
    let frame = chart.frame;
    assert!(close(chart.ticks[0].y, frame.plot_bottom()));
    // Ticks move up the canvas as values grow
    assert!(chart.ticks.windows(2).all(|w| w[1].y < w[0].y));
}

#[test]
fn test_layout_bar_positions() {
    let result = sample_aggregate(false);
    let configs = configs(&result);
    let chart = layout(&result, &configs, &result.benchmarks).unwrap();
    let frame = chart.frame;

    let each_bench_width = frame.effective_width() / 2.0;
    assert!(close(chart.bar_width, each_bench_width / 3.0));
    assert_eq!(chart.slots.len(), 2);
    assert!(close(chart.slots[1].left, frame.effective_left() + each_bench_width));
    assert_eq!(chart.bars.len(), 4);

    let yjit_nbody = chart
        .bars
        .iter()
        .find(|b| b.config == YJIT && b.benchmark == "nbody")
        .unwrap();
    assert_eq!(yjit_nbody.config_index, 1);
    assert!(close(yjit_nbody.left, chart.slots[1].left + chart.bar_width));
    assert!(close(yjit_nbody.right - yjit_nbody.left, chart.bar_width));
    // The largest ratio reaches the top of the effective area
    assert!(close(yjit_nbody.top, frame.effective_top()));
    assert!(close(yjit_nbody.bottom, frame.plot_bottom()));
}

#[test]
fn test_baseline_bar_has_no_whisker() {
    let result = sample_aggregate(false);
    let chart = layout(&result, &configs(&result), &result.benchmarks).unwrap();
    let base = chart.bars.iter().find(|b| b.config == NO_JIT).unwrap();
    assert_eq!(base.ratio, 1.0);
    assert_eq!(base.rsd_pct, 0.0);
    assert_eq!(base.whisker_top, base.top);
    assert_eq!(base.whisker_bottom, base.top);
}

#[test]
fn test_whisker_spans_rsd_around_top() {
    let result = sample_aggregate(false);
    let chart = layout(&result, &configs(&result), &result.benchmarks).unwrap();
    let fib = chart
        .bars
        .iter()
        .find(|b| b.config == YJIT && b.benchmark == "fib")
        .unwrap();

    let half = (2.0 / 3.4) * 0.04 * chart.frame.effective_height();
    assert!(close(fib.top - fib.whisker_top, half));
    assert!(close(fib.whisker_bottom - fib.top, half));
}

#[test]
fn test_missing_ratio_gets_no_bar() {
    let result = sample_aggregate(true);
    let configs = configs(&result);
    assert_eq!(configs.len(), 3);
    let chart = layout(&result, &configs, &result.benchmarks).unwrap();

    let mjit: Vec<_> = chart.bars.iter().filter(|b| b.config == MJIT).collect();
    assert_eq!(mjit.len(), 1);
    assert_eq!(mjit[0].benchmark, "fib");
    // One bar slot per config plus a gap
    assert!(close(chart.bar_width, chart.slots[0].width / 4.0));
}

#[test]
fn test_legend_positions() {
    let result = sample_aggregate(false);
    let chart = layout(&result, &configs(&result), &result.benchmarks).unwrap();
    let frame = chart.frame;
    assert_eq!(chart.legend.len(), 2);
    assert!(close(
        chart.legend[0].center_x,
        frame.effective_left() + frame.effective_width() / 4.0
    ));
    assert!(close(chart.legend[1].center_y, frame.plot_top() + 0.025));
}

#[test]
fn test_layout_without_ratios_fails() {
    let result = sample_aggregate(false);
    let err = layout(&result, &configs(&result), &names(&["missing"])).unwrap_err();
    assert_eq!(err, CompareError::AxisScale { max_ratio: None });
}

#[test]
fn test_scaled_layout() {
    let result = sample_aggregate(false);
    let chart = layout(&result, &configs(&result), &result.benchmarks).unwrap();
    let scaled = chart.scaled(1000.0, 600.0);

    assert_eq!(scaled.width, 1000.0);
    let bar = &chart.bars[0];
    let px = &scaled.layout.bars[0];
    assert!(close(px.left, bar.left * 1000.0));
    assert!(close(px.top, bar.top * 600.0));
    assert!(close(scaled.layout.bar_width, chart.bar_width * 1000.0));
    assert_eq!(scaled.layout.axis, chart.axis);
}
