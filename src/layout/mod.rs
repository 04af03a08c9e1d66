// Chart layout engine
//
// Computes the geometry of a grouped bar chart of speedups: one slot per
// benchmark, one bar per config inside it, whiskers for the propagated
// relative spread, gridlines on an auto-scaled axis and a legend row.
//
// Output is pure geometry in normalized coordinates. Rendering lives in
// `svg_output`.

mod axis;
mod bars;

pub use axis::{axis_scale, AxisScale};
pub use bars::{
    layout, layout_with_frame, max_ratio, Bar, BenchmarkSlot, ChartLayout, LegendItem, PlotFrame,
    ScaledLayout, Tick,
};

#[cfg(test)]
mod tests;
