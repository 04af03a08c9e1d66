use anyhow::{Context, Result};
use clap::Parser;
use speedboard::cli::{Cli, OutputFormat};
use speedboard::comparison::{compare_platform, ChartView, Comparison};
use speedboard::config::CompareConfig;
use speedboard::metadata::StaticMetadata;
use speedboard::report;
use speedboard::store::{InMemorySampleStore, SampleStore};
use speedboard::{svg_output, tripwire};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_store(path: &Path) -> Result<InMemorySampleStore> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sample store: {}", path.display()))?;
    InMemorySampleStore::from_json_str(&text)
        .with_context(|| format!("Failed to parse sample store JSON: {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<CompareConfig> {
    let Some(path) = path else {
        return Ok(CompareConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    CompareConfig::from_toml_str(&text)
        .with_context(|| format!("Invalid config: {}", path.display()))
}

fn load_metadata(path: Option<&Path>) -> Result<StaticMetadata> {
    let mut metadata = StaticMetadata::builtin();
    if let Some(path) = path {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read benchmark metadata: {}", path.display()))?;
        let overlay = StaticMetadata::from_toml_str(&text)
            .with_context(|| format!("Invalid benchmark metadata: {}", path.display()))?;
        metadata.merge(overlay);
    }
    Ok(metadata)
}

/// Print one platform's results to stdout
fn print_comparison(comparison: &Comparison, format: OutputFormat) -> Result<()> {
    let name = comparison.platform.as_deref().unwrap_or("all platforms");
    match format {
        OutputFormat::Text => {
            println!("=== {} ===", name);
            println!();
            print!(
                "{}",
                comparison.headline.to_text(
                    &comparison.roles.optimized().label,
                    &comparison.roles.baseline().label
                )
            );
            println!();
            print!("{}", report::speed_table(&comparison.speed).to_text());
            println!(
                "\nRSD is relative standard deviation (stddev / mean), expressed as a percent."
            );
            println!(
                "Spd is the speed (iters/second) of the optimized implementation \
                 relative to the baseline."
            );
            if let Some(memory) = &comparison.memory {
                println!();
                print!("{}", report::memory_table(memory).to_text());
            }
            println!();
        }
        OutputFormat::Json => {
            println!("{}", tripwire::to_json_pretty(&comparison.tripwires)?);
        }
        OutputFormat::Csv => {
            print!("{}", report::speed_table(&comparison.speed).to_csv());
        }
    }
    Ok(())
}

/// Write tripwires, tables and charts for one platform into `dir`
fn write_outputs(comparison: &Comparison, dir: &Path, width: f64, height: f64) -> Result<()> {
    let stem = comparison.platform.as_deref().unwrap_or("all");
    let write = |suffix: &str, contents: &str| -> Result<()> {
        let path = dir.join(format!("{}.{}", stem, suffix));
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))
    };

    write(
        "tripwires.json",
        &tripwire::to_json_pretty(&comparison.tripwires)?,
    )?;
    write("csv", &report::speed_table(&comparison.speed).to_csv())?;
    write(
        "iterations.csv",
        &report::iteration_table(&comparison.speed).to_csv(),
    )?;
    write(
        "jit_stats.csv",
        &report::jit_stats_table(&comparison.speed).to_csv(),
    )?;
    if let Some(memory) = &comparison.memory {
        write("mem.csv", &report::memory_table(memory).to_csv())?;
    }

    let labels = comparison.labels();
    for view in ChartView::ALL {
        match comparison.chart(view) {
            None => tracing::debug!("No benchmarks in {:?} view for {}", view, stem),
            Some(Ok(chart)) => {
                let svg = svg_output::render(&chart.scaled(width, height), &labels);
                write(view.file_suffix(), &svg)?;
            }
            Some(Err(e)) => tracing::warn!("Skipping {:?} chart for {}: {}", view, stem, e),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let store = load_store(&args.samples)?;
    let config = load_config(args.config.as_deref())?;
    let metadata = load_metadata(args.metadata.as_deref())?;

    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let platforms: Vec<Option<String>> = if !args.platforms.is_empty() {
        args.platforms.iter().cloned().map(Some).collect()
    } else if store.platforms().is_empty() {
        vec![None]
    } else {
        store.platforms().into_iter().map(Some).collect()
    };

    let mut failed = Vec::new();
    for platform in &platforms {
        let label = platform.as_deref().unwrap_or("all");
        let result = compare_platform(
            &config,
            &store,
            &metadata,
            platform.as_deref(),
            &args.benchmarks,
        );
        let comparison = match result {
            Ok(comparison) => comparison,
            Err(e) => {
                tracing::error!("Comparison failed for {}: {}", label, e);
                eprintln!("speedboard: {}: {}", label, e);
                failed.push(label.to_string());
                continue;
            }
        };

        print_comparison(&comparison, args.format)?;
        if let Some(dir) = &args.out_dir {
            write_outputs(&comparison, dir, config.chart_width, config.chart_height)?;
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("Comparison failed for platform(s): {}", failed.join(", "));
    }
    Ok(())
}
