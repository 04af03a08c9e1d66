//! Comprehensive property-based tests for the comparison engine
//!
//! Core properties tested:
//! 1. Relative standard deviation is non-negative and zero only for flat series
//! 2. Speedups are exact ratios of means and invariant under rescaling
//! 3. Tripwire keys always equal the resolved benchmark set
//! 4. Axis scaling always yields 4-10 divisions ending past the maximum
//! 5. Bars never leave the plot frame

use proptest::prelude::*;
use speedboard::aggregate::{aggregate, rel_stddev_pct, SeriesStats};
use speedboard::config::CompareConfig;
use speedboard::layout::{axis_scale, layout};
use speedboard::metadata::StaticMetadata;
use speedboard::resolve::resolve;
use speedboard::store::{InMemorySampleStore, JitStatsRecord, SampleStore};
use speedboard::tripwire::extract_tripwires;

const NO_JIT: &str = "x86_64_prod_ruby_no_jit";
const YJIT: &str = "x86_64_prod_ruby_with_yjit";
const STATS: &str = "x86_64_yjit_stats";

fn series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.5f64..1000.0, 1..12)
}

/// Store with the same benchmarks under baseline and optimized configs
fn store_for(runs: &[(Vec<f64>, Vec<f64>)]) -> (InMemorySampleStore, Vec<String>) {
    let mut store = InMemorySampleStore::new();
    store.add_platform("x86_64");
    let mut record = JitStatsRecord::new();
    record.insert("exec_instruction".to_string(), 1000);
    record.insert("vm_insns_count".to_string(), 10);

    let mut names = Vec::new();
    for (idx, (base, opt)) in runs.iter().enumerate() {
        let name = format!("bench_{idx:02}");
        store.insert_times(NO_JIT, &name, base.clone());
        store.insert_times(YJIT, &name, opt.clone());
        store.push_jit_stats(STATS, &name, record.clone());
        names.push(name);
    }
    (store, names)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_rsd_non_negative(samples in series()) {
        let rsd = rel_stddev_pct(&samples).unwrap();
        prop_assert!(rsd >= 0.0);
    }

    #[test]
    fn prop_rsd_zero_for_flat_series(value in 0.5f64..1000.0, n in 1usize..12) {
        let samples = vec![value; n];
        prop_assert_eq!(rel_stddev_pct(&samples), Some(0.0));
    }

    #[test]
    fn prop_rsd_positive_when_values_differ(
        samples in series(),
        bump in 1.0f64..100.0,
    ) {
        let mut samples = samples;
        samples.push(samples[0] + bump);
        prop_assert!(rel_stddev_pct(&samples).unwrap() > 0.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_speedup_is_ratio_of_means(base in series(), opt in series()) {
        let (store, names) = store_for(&[(base.clone(), opt.clone())]);
        let roles = resolve(
            &CompareConfig::default(),
            &store.available_configs(),
            Some("x86_64"),
        )
        .unwrap();
        let result = aggregate(&roles, &store, &names).unwrap();

        let base_mean = SeriesStats::from_samples(&base).unwrap().mean;
        let opt_mean = SeriesStats::from_samples(&opt).unwrap().mean;
        let ratio = result.speedup(YJIT, &names[0]).unwrap().ratio;
        prop_assert!(((ratio - base_mean / opt_mean) / ratio).abs() < 1e-9);
    }

    #[test]
    fn prop_speedup_invariant_under_rescaling(
        base in series(),
        opt in series(),
        scale in 0.001f64..1000.0,
    ) {
        let scaled = |v: &[f64]| v.iter().map(|x| x * scale).collect::<Vec<_>>();
        let (store, names) = store_for(&[(base.clone(), opt.clone())]);
        let (scaled_store, _) = store_for(&[(scaled(&base), scaled(&opt))]);
        let roles = resolve(&CompareConfig::default(), &store.available_configs(), None).unwrap();

        let plain = aggregate(&roles, &store, &names).unwrap();
        let rescaled = aggregate(&roles, &scaled_store, &names).unwrap();
        let a = plain.speedup(YJIT, &names[0]).unwrap();
        let b = rescaled.speedup(YJIT, &names[0]).unwrap();
        prop_assert!(((a.ratio - b.ratio) / a.ratio).abs() < 1e-9);
        prop_assert!((a.rsd_pct - b.rsd_pct).abs() < 1e-6);
    }

    #[test]
    fn prop_tripwire_keys_match_benchmarks(
        runs in prop::collection::vec((series(), series()), 1..8),
    ) {
        let (store, names) = store_for(&runs);
        let roles = resolve(&CompareConfig::default(), &store.available_configs(), None).unwrap();
        let result = aggregate(&roles, &store, &names).unwrap();
        let tripwires = extract_tripwires(&result, &StaticMetadata::builtin());

        let keys: Vec<String> = tripwires.keys().cloned().collect();
        prop_assert_eq!(keys, names);
    }

    #[test]
    fn prop_bars_stay_in_frame(
        runs in prop::collection::vec((series(), series()), 1..8),
    ) {
        let (store, names) = store_for(&runs);
        let roles = resolve(&CompareConfig::default(), &store.available_configs(), None).unwrap();
        let result = aggregate(&roles, &store, &names).unwrap();
        let chart = layout(&result, &roles.names(), &names).unwrap();

        let frame = chart.frame;
        let right_edge = frame.effective_left() + frame.effective_width();
        for bar in &chart.bars {
            prop_assert!(bar.left >= frame.effective_left() - 1e-12);
            prop_assert!(bar.right <= right_edge + 1e-12);
            prop_assert!(bar.top >= frame.effective_top() - 1e-12);
            prop_assert!(bar.top <= bar.bottom);
        }
        prop_assert_eq!(chart.bars.len(), 2 * names.len());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_axis_division_count(max_ratio in 0.01f64..10_000.0) {
        let axis = axis_scale(max_ratio).unwrap();
        let divs = (max_ratio / axis.division).floor();
        prop_assert!((4.0..=10.0).contains(&divs));

        let last = *axis.ticks.last().unwrap();
        prop_assert!(last > max_ratio);
        prop_assert_eq!(axis.ticks[0], 0.0);
        // Every tick but the last is within range
        prop_assert!(axis.ticks[..axis.ticks.len() - 1].iter().all(|t| *t <= max_ratio));
    }
}
