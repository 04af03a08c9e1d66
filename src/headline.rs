//! Headline summary: one-line speed claims for a comparison
//!
//! Quotes the geometric mean speedup of the optimized config over the
//! baseline across headline benchmarks, plus one designated benchmark.

use crate::aggregate::{geomean, AggregateResult};
use crate::metadata::BenchmarkMetadata;
use serde::Serialize;

/// Speed headline for one comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineSummary {
    /// Headline benchmarks that contributed, in aggregate order
    pub headline_benchmarks: Vec<String>,
    /// Geomean of baseline/optimized speedups; `None` without headline benchmarks
    pub geomean_speedup: Option<f64>,
    /// Designated benchmark and its speedup, when it was part of the run
    pub single_benchmark: Option<(String, f64)>,
}

/// Summarize the optimized config against the baseline
///
/// `single_benchmark` names one benchmark to quote separately
/// (`railsbench` in the default configuration).
pub fn headline_summary<M: BenchmarkMetadata + ?Sized>(
    aggregate: &AggregateResult,
    metadata: &M,
    single_benchmark: Option<&str>,
) -> HeadlineSummary {
    let optimized = &aggregate.optimized().config.name;

    let mut headline_benchmarks = Vec::new();
    let mut ratios = Vec::new();
    for bench in &aggregate.benchmarks {
        if !metadata.is_headline(bench) {
            continue;
        }
        if let Some(speedup) = aggregate.speedup(optimized, bench) {
            headline_benchmarks.push(bench.clone());
            ratios.push(speedup.ratio);
        }
    }

    let single_benchmark = single_benchmark.and_then(|name| {
        aggregate
            .speedup(optimized, name)
            .map(|speedup| (name.to_string(), speedup.ratio))
    });

    HeadlineSummary {
        headline_benchmarks,
        geomean_speedup: geomean(&ratios),
        single_benchmark,
    }
}

impl HeadlineSummary {
    /// Sentences for the summary, labelled with the two config labels
    pub fn to_text(&self, optimized_label: &str, baseline_label: &str) -> String {
        let mut out = String::new();
        if let Some(ratio) = self.geomean_speedup {
            out.push_str(&format!(
                "Overall {} is {} than {} on headline benchmarks ({} benchmarks, geomean {:.3}x).\n",
                optimized_label,
                format_speedup(ratio),
                baseline_label,
                self.headline_benchmarks.len(),
                ratio
            ));
        }
        if let Some((name, ratio)) = &self.single_benchmark {
            out.push_str(&format!(
                "On {}, {} is {} than {} ({:.3}x).\n",
                name,
                optimized_label,
                format_speedup(*ratio),
                baseline_label,
                ratio
            ));
        }
        out
    }
}

/// Describe a speedup ratio in words
///
/// # Example
/// ```
/// use speedboard::headline::format_speedup;
///
/// assert_eq!(format_speedup(1.25), "25.0% faster");
/// assert_eq!(format_speedup(0.8), "20.0% slower");
/// assert_eq!(format_speedup(1.005), "the same speed");
/// ```
pub fn format_speedup(ratio: f64) -> String {
    if ratio >= 1.01 {
        format!("{:.1}% faster", (ratio - 1.0) * 100.0)
    } else if ratio < 0.99 {
        format!("{:.1}% slower", (1.0 - ratio) * 100.0)
    } else {
        "the same speed".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::config::CompareConfig;
    use crate::metadata::StaticMetadata;
    use crate::resolve::resolve;
    use crate::store::{InMemorySampleStore, JitStatsRecord, SampleStore};

    fn fixture() -> AggregateResult {
        let mut store = InMemorySampleStore::new();
        let mut record = JitStatsRecord::new();
        record.insert("exec_instruction".to_string(), 10);
        // railsbench 2x, activerecord 8x, fib 10x (micro, not headline)
        for (bench, base, opt) in [
            ("railsbench", 20.0, 10.0),
            ("activerecord", 40.0, 5.0),
            ("fib", 100.0, 10.0),
        ] {
            store.insert_times("prod_ruby_no_jit", bench, vec![base]);
            store.insert_times("prod_ruby_with_yjit", bench, vec![opt]);
            store.push_jit_stats("yjit_stats", bench, record.clone());
        }
        let roles = resolve(&CompareConfig::default(), &store.available_configs(), None).unwrap();
        let benchmarks: Vec<String> = ["activerecord", "railsbench", "fib"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        aggregate(&roles, &store, &benchmarks).unwrap()
    }

    #[test]
    fn test_geomean_over_headline_only() {
        let summary = headline_summary(&fixture(), &StaticMetadata::builtin(), Some("railsbench"));
        assert_eq!(summary.headline_benchmarks, vec!["activerecord", "railsbench"]);
        assert!((summary.geomean_speedup.unwrap() - 4.0).abs() < 1e-9);

        let (name, ratio) = summary.single_benchmark.unwrap();
        assert_eq!(name, "railsbench");
        assert!((ratio - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_headline_benchmarks() {
        let summary = headline_summary(&fixture(), &StaticMetadata::new(), Some("missing"));
        assert!(summary.headline_benchmarks.is_empty());
        assert_eq!(summary.geomean_speedup, None);
        assert_eq!(summary.single_benchmark, None);
        assert_eq!(summary.to_text("YJIT", "No JIT"), "");
    }

    #[test]
    fn test_format_speedup_thresholds() {
        assert_eq!(format_speedup(1.01), "1.0% faster");
        assert_eq!(format_speedup(0.99), "the same speed");
        assert_eq!(format_speedup(0.5), "50.0% slower");
        assert_eq!(format_speedup(3.0), "200.0% faster");
    }

    #[test]
    fn test_to_text() {
        let summary = headline_summary(&fixture(), &StaticMetadata::builtin(), Some("railsbench"));
        let text = summary.to_text("YJIT", "No JIT");
        assert!(text.contains("YJIT is 300.0% faster than No JIT"));
        assert!(text.contains("On railsbench, YJIT is 100.0% faster"));
    }
}
