//! Benchmark metadata: category and description lookup
//!
//! Injected into the engine so tests can substitute their own tables.

use crate::error::{CompareError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Benchmark grouping used for chart views and tripwire flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Realistic workloads quoted in summaries
    Headline,
    /// Highly synthetic microbenchmarks
    Micro,
}

/// Lookup of per-benchmark metadata
pub trait BenchmarkMetadata {
    fn category(&self, benchmark: &str) -> Option<Category>;
    fn description(&self, benchmark: &str) -> Option<&str>;

    fn is_micro(&self, benchmark: &str) -> bool {
        self.category(benchmark) == Some(Category::Micro)
    }

    fn is_headline(&self, benchmark: &str) -> bool {
        self.category(benchmark) == Some(Category::Headline)
    }

    /// Display rank: headline 0, uncategorized 1, micro 2
    fn category_rank(&self, benchmark: &str) -> u8 {
        match self.category(benchmark) {
            Some(Category::Headline) => 0,
            None => 1,
            Some(Category::Micro) => 2,
        }
    }
}

/// One metadata entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkInfo {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Table-backed metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticMetadata {
    #[serde(default)]
    benchmarks: BTreeMap<String, BenchmarkInfo>,
}

const BUILTIN: &[(&str, Option<Category>, &str)] = &[
    (
        "30k_ifelse",
        Some(Category::Micro),
        "Thousands of nested methods made of simple if/else statements.",
    ),
    (
        "30k_methods",
        Some(Category::Micro),
        "Thousands of nested methods that mostly call one other method.",
    ),
    (
        "cfunc_itself",
        Some(Category::Micro),
        "Calls the C-implemented 'itself' method in a tight loop.",
    ),
    ("fib", Some(Category::Micro), "Exponential-time recursive Fibonacci."),
    ("getivar", Some(Category::Micro), "Reads instance variables in a tight loop."),
    ("setivar", Some(Category::Micro), "Writes instance variables in a tight loop."),
    ("str_concat", Some(Category::Micro), "Concatenates strings of mixed encodings."),
    ("respond_to", Some(Category::Micro), "Calls respond_to? for existing and missing methods."),
    ("keyword_args", Some(Category::Micro), "Calls methods taking keyword arguments."),
    ("binarytrees", None, "Allocates and walks binary trees (Benchmarks Game)."),
    ("fannkuchredux", None, "Permutes small integer arrays (Benchmarks Game)."),
    ("nbody", None, "Floating-point n-body simulation (Benchmarks Game)."),
    (
        "activerecord",
        Some(Category::Headline),
        "ActiveRecord queries against an in-memory SQLite database.",
    ),
    ("psych-load", Some(Category::Headline), "Loads YAML documents with the Psych parser."),
    ("mail", Some(Category::Headline), "Parses and generates email messages with the mail gem."),
    ("liquid-render", Some(Category::Headline), "Renders Liquid templates."),
    ("jekyll", Some(Category::Headline), "Builds a small static site with Jekyll."),
    ("hexapdf", Some(Category::Headline), "Reads and writes PDF documents with HexaPDF."),
    ("erubi", None, "Compiles and renders ERB templates with erubi."),
    ("erubi_rails", None, "Renders erubi templates through a minimal Rails app."),
    ("lee", None, "Circuit-board layout solver."),
    (
        "railsbench",
        Some(Category::Headline),
        "Read-only SQLite-backed Rails app serving HTML and JSON routes.",
    ),
    ("optcarrot", None, "Headless NES emulator running a fixed number of frames."),
    ("rubykon", None, "Go board game solver running a fixed number of iterations."),
];

impl StaticMetadata {
    /// Empty table: every benchmark uncategorized
    pub fn new() -> Self {
        Self::default()
    }

    /// Table of the standard benchmark suite
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (name, category, description) in BUILTIN {
            table.insert(name, *category, Some(description));
        }
        table
    }

    /// Parse a table from TOML (`[benchmarks.<name>]` sections)
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CompareError::InvalidConfig(e.to_string()))
    }

    /// Add or replace one entry
    pub fn insert(&mut self, name: &str, category: Option<Category>, description: Option<&str>) {
        self.benchmarks.insert(
            name.to_string(),
            BenchmarkInfo {
                category,
                description: description.map(str::to_string),
            },
        );
    }

    /// Overlay another table's entries on this one
    pub fn merge(&mut self, other: StaticMetadata) {
        self.benchmarks.extend(other.benchmarks);
    }
}

impl BenchmarkMetadata for StaticMetadata {
    fn category(&self, benchmark: &str) -> Option<Category> {
        self.benchmarks.get(benchmark)?.category
    }

    fn description(&self, benchmark: &str) -> Option<&str> {
        self.benchmarks.get(benchmark)?.description.as_deref()
    }
}

/// Sort benchmarks headline first, micro last, alphabetically within a category
pub fn sort_benchmarks<M: BenchmarkMetadata + ?Sized>(names: &mut [String], metadata: &M) {
    names.sort_by(|a, b| {
        metadata
            .category_rank(a)
            .cmp(&metadata.category_rank(b))
            .then_with(|| a.cmp(b))
    });
}

/// Benchmarks split into the three chart views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryViews {
    pub headline: Vec<String>,
    pub other: Vec<String>,
    pub micro: Vec<String>,
}

/// Partition benchmarks by category, preserving input order
pub fn category_views<M: BenchmarkMetadata + ?Sized>(
    names: &[String],
    metadata: &M,
) -> CategoryViews {
    let mut views = CategoryViews::default();
    for name in names {
        match metadata.category(name) {
            Some(Category::Headline) => views.headline.push(name.clone()),
            Some(Category::Micro) => views.micro.push(name.clone()),
            None => views.other.push(name.clone()),
        }
    }
    views
}
