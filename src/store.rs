//! Read interface over collected benchmark samples
//!
//! The store is populated by whatever ran the benchmarks and is only read
//! here. `InMemorySampleStore` is the concrete store the binary loads from
//! JSON; the engine itself only sees the `SampleStore` trait.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named JIT counters reported by one benchmark run
pub type JitStatsRecord = BTreeMap<String, i64>;

/// Keyed store of per-config, per-benchmark samples
pub trait SampleStore {
    /// Timed iterations in milliseconds
    fn series(&self, config: &str, benchmark: &str) -> Option<&[f64]>;

    /// Warmup iterations in milliseconds
    fn warmups(&self, config: &str, benchmark: &str) -> Option<&[f64]>;

    /// JIT counters, one record per repeated run
    fn jit_stats(&self, config: &str, benchmark: &str) -> Option<&[JitStatsRecord]>;

    /// Peak resident memory in bytes, one value per repeated run
    fn peak_memory(&self, config: &str, benchmark: &str) -> Option<&[u64]>;

    /// Every config name with any data, sorted
    fn available_configs(&self) -> Vec<String>;

    /// Platforms the samples were collected on
    fn platforms(&self) -> Vec<String>;

    /// Benchmarks with timing data for `config`, sorted
    fn benchmarks_for(&self, config: &str) -> Vec<String>;
}

/// Samples for one (config, benchmark) pair
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSamples {
    #[serde(default)]
    pub times: Vec<f64>,
    #[serde(default)]
    pub warmups: Vec<f64>,
    #[serde(default)]
    pub peak_mem_bytes: Vec<u64>,
    #[serde(default)]
    pub jit_stats: Vec<JitStatsRecord>,
}

/// All samples collected for one config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSamples {
    #[serde(default)]
    pub benchmarks: BTreeMap<String, BenchmarkSamples>,
}

/// Sample store held entirely in memory
///
/// # Example
/// ```
/// use speedboard::store::{InMemorySampleStore, SampleStore};
///
/// let mut store = InMemorySampleStore::new();
/// store.insert_times("x86_64_no_jit", "fib", vec![100.0, 101.0]);
/// assert_eq!(store.series("x86_64_no_jit", "fib"), Some(&[100.0, 101.0][..]));
/// assert_eq!(store.series("x86_64_no_jit", "nbody"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemorySampleStore {
    #[serde(default)]
    platforms: Vec<String>,
    #[serde(default)]
    configs: BTreeMap<String, ConfigSamples>,
}

impl InMemorySampleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a store from its JSON form
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Register a platform name
    pub fn add_platform(&mut self, platform: &str) {
        if !self.platforms.iter().any(|p| p == platform) {
            self.platforms.push(platform.to_string());
        }
    }

    fn entry(&mut self, config: &str, benchmark: &str) -> &mut BenchmarkSamples {
        self.configs
            .entry(config.to_string())
            .or_default()
            .benchmarks
            .entry(benchmark.to_string())
            .or_default()
    }

    /// Append timed iterations
    pub fn insert_times(&mut self, config: &str, benchmark: &str, times: Vec<f64>) {
        self.entry(config, benchmark).times.extend(times);
    }

    /// Append warmup iterations
    pub fn insert_warmups(&mut self, config: &str, benchmark: &str, warmups: Vec<f64>) {
        self.entry(config, benchmark).warmups.extend(warmups);
    }

    /// Append peak memory readings
    pub fn insert_peak_memory(&mut self, config: &str, benchmark: &str, bytes: Vec<u64>) {
        self.entry(config, benchmark).peak_mem_bytes.extend(bytes);
    }

    /// Append one run's JIT counters
    pub fn push_jit_stats(&mut self, config: &str, benchmark: &str, record: JitStatsRecord) {
        self.entry(config, benchmark).jit_stats.push(record);
    }

    fn samples(&self, config: &str, benchmark: &str) -> Option<&BenchmarkSamples> {
        self.configs.get(config)?.benchmarks.get(benchmark)
    }
}

fn non_empty<T>(values: &[T]) -> Option<&[T]> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

impl SampleStore for InMemorySampleStore {
    fn series(&self, config: &str, benchmark: &str) -> Option<&[f64]> {
        non_empty(&self.samples(config, benchmark)?.times)
    }

    fn warmups(&self, config: &str, benchmark: &str) -> Option<&[f64]> {
        Some(&self.samples(config, benchmark)?.warmups)
    }

    fn jit_stats(&self, config: &str, benchmark: &str) -> Option<&[JitStatsRecord]> {
        non_empty(&self.samples(config, benchmark)?.jit_stats)
    }

    fn peak_memory(&self, config: &str, benchmark: &str) -> Option<&[u64]> {
        non_empty(&self.samples(config, benchmark)?.peak_mem_bytes)
    }

    fn available_configs(&self) -> Vec<String> {
        self.configs.keys().cloned().collect()
    }

    fn platforms(&self) -> Vec<String> {
        self.platforms.clone()
    }

    fn benchmarks_for(&self, config: &str) -> Vec<String> {
        let Some(samples) = self.configs.get(config) else {
            return Vec::new();
        };
        samples
            .benchmarks
            .iter()
            .filter(|(_, s)| !s.times.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }
}
