//! Report tables: speed, memory, iteration counts and JIT counters
//!
//! Tables keep raw values; formats are applied only for the fixed-width text
//! rendering. CSV output carries the unformatted numbers.

use crate::aggregate::{AggregateResult, MemAggregateResult};

/// How a numeric column is printed in the text table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    Text,
    /// `%.Nf`
    Fixed(usize),
    /// `%.Nf%`
    Percent(usize),
    /// `%.Nfx`
    Ratio(usize),
    /// Rounded to a whole number
    Integer,
}

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// Value not available; rendered blank
    Empty,
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }
}

impl From<Option<i64>> for Cell {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Cell::Empty, |v| Cell::Number(v as f64))
    }
}

impl From<Option<u64>> for Cell {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Cell::Empty, |v| Cell::Number(v as f64))
    }
}

impl Cell {
    fn format(&self, format: ColumnFormat) -> String {
        match (self, format) {
            (Cell::Empty, _) => String::new(),
            (Cell::Text(s), _) => s.clone(),
            (Cell::Number(v), ColumnFormat::Text) => v.to_string(),
            (Cell::Number(v), ColumnFormat::Fixed(p)) => format!("{:.*}", p, v),
            (Cell::Number(v), ColumnFormat::Percent(p)) => format!("{:.*}%", p, v),
            (Cell::Number(v), ColumnFormat::Ratio(p)) => format!("{:.*}x", p, v),
            (Cell::Number(v), ColumnFormat::Integer) => format!("{:.0}", v),
        }
    }

    fn raw(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => escape_field(s),
            Cell::Number(v) => v.to_string(),
        }
    }
}

/// A headed table with one row per benchmark
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headings: Vec<String>,
    pub formats: Vec<ColumnFormat>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    fn new(columns: Vec<(String, ColumnFormat)>) -> Self {
        let (headings, formats) = columns.into_iter().unzip();
        Self {
            headings,
            formats,
            rows: Vec::new(),
        }
    }

    /// Fixed-width text: names left-aligned, values right-aligned
    pub fn to_text(&self) -> String {
        let formatted: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.formats)
                    .map(|(cell, format)| cell.format(*format))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .headings
            .iter()
            .enumerate()
            .map(|(col, heading)| {
                formatted
                    .iter()
                    .map(|row| row[col].len())
                    .chain(std::iter::once(heading.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut output = String::new();
        push_line(&mut output, &self.headings, &widths);
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut output, &separator, &widths);
        for row in &formatted {
            push_line(&mut output, row, &widths);
        }
        output
    }

    /// CSV with a heading row; empty cells for missing values
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        let headings: Vec<String> = self.headings.iter().map(|h| escape_field(h)).collect();
        output.push_str(&headings.join(","));
        output.push('\n');
        for row in &self.rows {
            let fields: Vec<String> = row.iter().map(Cell::raw).collect();
            output.push_str(&fields.join(","));
            output.push('\n');
        }
        output
    }
}

fn push_line(output: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, width))| {
            if col == 0 {
                format!("{:<width$}", cell, width = width)
            } else {
                format!("{:>width$}", cell, width = width)
            }
        })
        .collect();
    output.push_str(line.join("  ").trim_end());
    output.push('\n');
}

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Means and spreads per config, speedups per non-baseline config, JIT share
pub fn speed_table(aggregate: &AggregateResult) -> Table {
    let mut columns = vec![("bench".to_string(), ColumnFormat::Text)];
    for column in &aggregate.columns {
        let label = &column.config.label;
        columns.push((format!("{} (ms)", label), ColumnFormat::Fixed(1)));
        columns.push((format!("{} RSD", label), ColumnFormat::Percent(2)));
    }
    for column in aggregate.columns.iter().skip(1) {
        let label = &column.config.label;
        columns.push((format!("{} spd", label), ColumnFormat::Ratio(2)));
        columns.push((format!("{} spd RSD", label), ColumnFormat::Percent(2)));
    }
    columns.push(("% in YJIT".to_string(), ColumnFormat::Percent(2)));

    let mut table = Table::new(columns);
    for (idx, bench) in aggregate.benchmarks.iter().enumerate() {
        let mut row = vec![Cell::Text(bench.clone())];
        for column in &aggregate.columns {
            let entry = &column.rows[idx];
            row.push(entry.mean().into());
            row.push(entry.rsd_pct().into());
        }
        for column in aggregate.columns.iter().skip(1) {
            let speedup = column.rows[idx].speedup;
            row.push(speedup.map(|s| s.ratio).into());
            row.push(speedup.map(|s| s.rsd_pct).into());
        }
        row.push(Cell::Number(aggregate.yjit_ratio_pct[idx]));
        table.rows.push(row);
    }
    table
}

/// Peak memory per config plus JIT code region sizes and overhead
pub fn memory_table(mem: &MemAggregateResult) -> Table {
    let mut columns = vec![("bench".to_string(), ColumnFormat::Text)];
    for column in &mem.columns {
        columns.push((format!("{} mem (MiB)", column.config.label), ColumnFormat::Integer));
    }
    columns.push(("Inline Code (MiB)".to_string(), ColumnFormat::Integer));
    columns.push(("Outlined Code (MiB)".to_string(), ColumnFormat::Integer));
    columns.push(("Mem overhead".to_string(), ColumnFormat::Percent(1)));

    let mut table = Table::new(columns);
    for (idx, bench) in mem.benchmarks.iter().enumerate() {
        let mut row = vec![Cell::Text(bench.clone())];
        for column in &mem.columns {
            row.push(column.rows[idx].peak_mib.into());
        }
        row.push(mem.inline_code_mib[idx].into());
        row.push(mem.outlined_code_mib[idx].into());
        row.push(Cell::Number(mem.mem_overhead_factor[idx] * 100.0));
        table.rows.push(row);
    }
    table
}

/// Warmup and timed iteration counts; blank where a config did not run
pub fn iteration_table(aggregate: &AggregateResult) -> Table {
    let mut columns = vec![("bench".to_string(), ColumnFormat::Text)];
    for column in &aggregate.columns {
        let label = &column.config.label;
        columns.push((format!("{} warmups", label), ColumnFormat::Integer));
        columns.push((format!("{} iters", label), ColumnFormat::Integer));
    }

    let mut table = Table::new(columns);
    for (idx, bench) in aggregate.benchmarks.iter().enumerate() {
        let mut row = vec![Cell::Text(bench.clone())];
        for column in &aggregate.columns {
            let count = column.iterations[idx];
            row.push(count.map(|c| c.warmups as u64).into());
            row.push(count.map(|c| c.iterations as u64).into());
        }
        table.rows.push(row);
    }
    table
}

/// Code sizes and compilation counters from the first stats record
pub fn jit_stats_table(aggregate: &AggregateResult) -> Table {
    let columns = vec![
        ("bench".to_string(), ColumnFormat::Text),
        ("Inline".to_string(), ColumnFormat::Integer),
        ("Outlined".to_string(), ColumnFormat::Integer),
        ("Comp iSeqs".to_string(), ColumnFormat::Integer),
        ("Comp Blocks".to_string(), ColumnFormat::Integer),
        ("Inval".to_string(), ColumnFormat::Integer),
        ("Inval Ratio".to_string(), ColumnFormat::Percent(0)),
    ];

    let mut table = Table::new(columns);
    for (bench, summary) in aggregate.benchmarks.iter().zip(&aggregate.jit_summaries) {
        table.rows.push(vec![
            Cell::Text(bench.clone()),
            summary.inline_code_size.into(),
            summary.outlined_code_size.into(),
            summary.compiled_iseq_count.into(),
            summary.compiled_block_count.into(),
            summary.invalidation_count.into(),
            summary.invalidation_ratio().map(|r| r * 100.0).into(),
        ]);
    }
    table
}
