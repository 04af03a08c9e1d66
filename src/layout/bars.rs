// Bar and whisker geometry for grouped speedup charts
//
// Everything here is in normalized 0..1 coordinates with y growing downward,
// the way SVG does it. The renderer scales to pixels.

use super::axis::{axis_scale, AxisScale};
use crate::aggregate::AggregateResult;
use crate::error::{CompareError, Result};

/// Fixed plot frame and reserved whitespace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    /// Width reserved on the left for tick labels
    pub left_axis_width: f64,
    pub right_whitespace: f64,
    /// Height reserved at the bottom for benchmark names
    pub bottom_key_height: f64,
    pub top_whitespace: f64,
    /// Horizontal padding inside the plot, as a share of plot width, each side
    pub side_padding: f64,
    /// Share of plot height kept free at the top for the legend
    pub legend_reserve: f64,
}

impl Default for PlotFrame {
    fn default() -> Self {
        Self {
            left_axis_width: 0.05,
            right_whitespace: 0.01,
            bottom_key_height: 0.17,
            top_whitespace: 0.05,
            side_padding: 0.05,
            legend_reserve: 0.15,
        }
    }
}

impl PlotFrame {
    pub fn plot_left(&self) -> f64 {
        self.left_axis_width
    }

    pub fn plot_top(&self) -> f64 {
        self.top_whitespace
    }

    pub fn plot_width(&self) -> f64 {
        1.0 - self.left_axis_width - self.right_whitespace
    }

    pub fn plot_height(&self) -> f64 {
        1.0 - self.bottom_key_height - self.top_whitespace
    }

    pub fn plot_bottom(&self) -> f64 {
        1.0 - self.bottom_key_height
    }

    pub fn effective_left(&self) -> f64 {
        self.plot_left() + self.plot_width() * self.side_padding
    }

    pub fn effective_width(&self) -> f64 {
        self.plot_width() * (1.0 - 2.0 * self.side_padding)
    }

    pub fn effective_top(&self) -> f64 {
        self.plot_top() + self.legend_reserve * self.plot_height()
    }

    pub fn effective_height(&self) -> f64 {
        self.plot_height() * (1.0 - self.legend_reserve)
    }

    /// y coordinate of a value that reaches `height_ratio` of the axis
    pub fn y_for(&self, height_ratio: f64) -> f64 {
        self.effective_top() + (1.0 - height_ratio) * self.effective_height()
    }
}

/// One gridline on the vertical axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub y: f64,
}

/// Horizontal span given to one benchmark
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSlot {
    pub benchmark: String,
    pub left: f64,
    pub width: f64,
    /// Anchor for the benchmark's axis tick and label
    pub center: f64,
}

/// One legend entry above the plot
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub config: String,
    pub center_x: f64,
    pub center_y: f64,
}

/// One bar with its error whisker
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub benchmark: String,
    pub config: String,
    /// Position of the config in display order, for colour assignment
    pub config_index: usize,
    pub ratio: f64,
    pub rsd_pct: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    /// Whiskers sit one relative stddev above and below the bar top
    pub whisker_top: f64,
    pub whisker_bottom: f64,
}

impl Bar {
    pub fn center_x(&self) -> f64 {
        0.5 * (self.left + self.right)
    }
}

/// Complete chart geometry
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub frame: PlotFrame,
    pub axis: AxisScale,
    pub ticks: Vec<Tick>,
    pub slots: Vec<BenchmarkSlot>,
    pub legend: Vec<LegendItem>,
    pub bars: Vec<Bar>,
    pub bar_width: f64,
}

/// Coordinates of a chart mapped into a `width` x `height` canvas
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledLayout {
    pub width: f64,
    pub height: f64,
    pub layout: ChartLayout,
}

impl ChartLayout {
    /// Map normalized coordinates into a `width` x `height` canvas
    ///
    /// Frame and axis values stay normalized; positions are scaled.
    pub fn scaled(&self, width: f64, height: f64) -> ScaledLayout {
        let mut layout = self.clone();
        for tick in &mut layout.ticks {
            tick.y *= height;
        }
        for slot in &mut layout.slots {
            slot.left *= width;
            slot.width *= width;
            slot.center *= width;
        }
        for item in &mut layout.legend {
            item.center_x *= width;
            item.center_y *= height;
        }
        for bar in &mut layout.bars {
            bar.left *= width;
            bar.right *= width;
            bar.top *= height;
            bar.bottom *= height;
            bar.whisker_top *= height;
            bar.whisker_bottom *= height;
        }
        layout.bar_width *= width;
        ScaledLayout {
            width,
            height,
            layout,
        }
    }
}

/// Ratio and whisker spread drawn for one (config, benchmark) pair
///
/// The baseline sits at exactly 1.0 with no spread wherever it has a mean.
fn bar_value(aggregate: &AggregateResult, config: &str, benchmark: &str) -> Option<(f64, f64)> {
    if config == aggregate.baseline().config.name {
        return aggregate.row(config, benchmark)?.stats.map(|_| (1.0, 0.0));
    }
    let speedup = aggregate.speedup(config, benchmark)?;
    speedup
        .ratio
        .is_finite()
        .then_some((speedup.ratio, speedup.rsd_pct))
}

/// Largest finite ratio drawn for `configs` over `benchmarks`
pub fn max_ratio(
    aggregate: &AggregateResult,
    configs: &[String],
    benchmarks: &[String],
) -> Option<f64> {
    benchmarks
        .iter()
        .flat_map(|bench| {
            configs
                .iter()
                .filter_map(move |config| bar_value(aggregate, config, bench))
        })
        .map(|(ratio, _)| ratio)
        .fold(None, |max, r| Some(max.map_or(r, |m: f64| m.max(r))))
}

/// Lay out a grouped bar chart of speedups for `configs` over `benchmarks`
///
/// The baseline is drawn at 1.0 without a whisker. Pairs with no speedup get
/// no bar at all.
///
/// # Errors
/// `AxisScale` when nothing in view has a finite ratio or no tick spacing fits.
pub fn layout(
    aggregate: &AggregateResult,
    configs: &[String],
    benchmarks: &[String],
) -> Result<ChartLayout> {
    layout_with_frame(aggregate, configs, benchmarks, PlotFrame::default())
}

/// `layout` with a custom plot frame
pub fn layout_with_frame(
    aggregate: &AggregateResult,
    configs: &[String],
    benchmarks: &[String],
    frame: PlotFrame,
) -> Result<ChartLayout> {
    let max = max_ratio(aggregate, configs, benchmarks)
        .ok_or(CompareError::AxisScale { max_ratio: None })?;
    let axis = axis_scale(max)?;

    let ticks = axis
        .ticks
        .iter()
        .map(|&value| Tick {
            value,
            y: frame.y_for(axis.height_ratio(value)),
        })
        .collect();

    let n_configs = configs.len();
    let each_bench_width = frame.effective_width() / benchmarks.len() as f64;
    let bar_width = each_bench_width / (n_configs + 1) as f64;

    let legend_item_width = frame.effective_width() / n_configs as f64;
    let legend = configs
        .iter()
        .enumerate()
        .map(|(idx, config)| LegendItem {
            config: config.clone(),
            center_x: frame.effective_left() + legend_item_width * (idx as f64 + 0.5),
            center_y: frame.plot_top() + 0.025,
        })
        .collect();

    let mut slots = Vec::with_capacity(benchmarks.len());
    let mut bars = Vec::new();

    for (bench_idx, bench) in benchmarks.iter().enumerate() {
        let slot_left = frame.effective_left() + bench_idx as f64 * each_bench_width;
        slots.push(BenchmarkSlot {
            benchmark: bench.clone(),
            left: slot_left,
            width: each_bench_width,
            center: slot_left + 0.5 * each_bench_width,
        });

        for (config_idx, config) in configs.iter().enumerate() {
            let Some((ratio, rsd_pct)) = bar_value(aggregate, config, bench) else {
                continue;
            };

            let bar_height_ratio = axis.height_ratio(ratio);
            let whisker_ratio = bar_height_ratio * (rsd_pct / 100.0);
            let left = slot_left + config_idx as f64 * bar_width;
            let top = frame.y_for(bar_height_ratio);

            bars.push(Bar {
                benchmark: bench.clone(),
                config: config.clone(),
                config_index: config_idx,
                ratio,
                rsd_pct,
                left,
                right: left + bar_width,
                top,
                bottom: frame.y_for(0.0),
                whisker_top: top - whisker_ratio * frame.effective_height(),
                whisker_bottom: top + whisker_ratio * frame.effective_height(),
            });
        }
    }

    Ok(ChartLayout {
        frame,
        axis,
        ticks,
        slots,
        legend,
        bars,
        bar_width,
    })
}
