//! SVG output for speedup bar charts
//!
//! Renders a scaled `ChartLayout` into a standalone SVG document: plot
//! background, axis ticks, legend, bars with whiskers and rotated benchmark
//! names.

use crate::layout::ScaledLayout;

/// Bar colours, assigned to configs in display order
pub const BAR_COLOURS: [&str; 4] = ["#7070f8", "orange", "green", "#4F3A7A"];

const AXIS_COLOUR: &str = "#000";
const BACKGROUND_COLOUR: &str = "#EEE";
const TEXT_COLOUR: &str = "#111";
const LEGEND_TEXT_COLOUR: &str = "#EEE";
const LEGEND_STROKE_COLOUR: &str = "#888";

/// Tick length, legend box and legend text sizes, normalized
const TICK_LENGTH: f64 = 0.008;
const LEGEND_BOX_WIDTH: f64 = 0.08;
const LEGEND_BOX_HEIGHT: f64 = 0.03;
const LEGEND_TEXT_HEIGHT: f64 = 0.025;

/// Colour for the config at `index`, cycling when there are more configs than colours
pub fn bar_colour(index: usize) -> &'static str {
    BAR_COLOURS[index % BAR_COLOURS.len()]
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Horizontal or vertical axis-coloured line segment
fn push_line(svg: &mut String, x1: f64, y1: f64, x2: f64, y2: f64) {
    svg.push_str(&format!(
        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\"/>\n",
        x1, y1, x2, y2, AXIS_COLOUR
    ));
}

/// Render a chart to an SVG document
///
/// `labels` holds the human-readable name of each config, in the same order
/// as the layout's legend; missing entries fall back to the config name.
pub fn render(scaled: &ScaledLayout, labels: &[String]) -> String {
    let (w, h) = (scaled.width, scaled.height);
    let chart = &scaled.layout;
    let frame = &chart.frame;
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg viewBox=\"0 0 {} {}\" xmlns=\"http://www.w3.org/2000/svg\" \
         xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n",
        w, h
    ));

    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" \
         stroke=\"{}\" fill=\"{}\"/>\n",
        frame.plot_left() * w,
        frame.plot_top() * h,
        frame.plot_width() * w,
        frame.plot_height() * h,
        AXIS_COLOUR,
        BACKGROUND_COLOUR,
    ));

    let plot_left = frame.plot_left() * w;
    for tick in &chart.ticks {
        push_line(&mut svg, plot_left - TICK_LENGTH * w, tick.y, plot_left, tick.y);
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-weight=\"bold\" \
             font-size=\"small\" fill=\"{}\">{:.1}</text>\n",
            plot_left - 3.0 * TICK_LENGTH * w,
            tick.y,
            TEXT_COLOUR,
            tick.value,
        ));
    }

    for (idx, item) in chart.legend.iter().enumerate() {
        let label = labels.get(idx).unwrap_or(&item.config);
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" \
             fill=\"{}\" stroke=\"{}\"/>\n",
            item.center_x - 0.5 * LEGEND_BOX_WIDTH * w,
            item.center_y - 0.5 * LEGEND_BOX_HEIGHT * h,
            LEGEND_BOX_WIDTH * w,
            LEGEND_BOX_HEIGHT * h,
            bar_colour(idx),
            LEGEND_STROKE_COLOUR,
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"small\" text-anchor=\"middle\" \
             font-weight=\"bold\" fill=\"{}\">{}</text>\n",
            item.center_x,
            item.center_y + 0.5 * LEGEND_TEXT_HEIGHT * h,
            LEGEND_TEXT_COLOUR,
            escape_xml(label),
        ));
    }

    for bar in &chart.bars {
        let label = labels.get(bar.config_index).unwrap_or(&bar.config);
        let tooltip = format!("{:.2}x baseline speed ({})", bar.ratio, label);
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" \
             fill=\"{}\" data-tooltip=\"{}\"/>\n",
            bar.left,
            bar.top,
            bar.right - bar.left,
            bar.bottom - bar.top,
            bar_colour(bar.config_index),
            escape_xml(&tooltip),
        ));
        for y in [bar.whisker_top, bar.whisker_bottom] {
            push_line(&mut svg, bar.left, y, bar.right, y);
        }
        let x = bar.center_x();
        push_line(&mut svg, x, bar.whisker_top, x, bar.whisker_bottom);
    }

    let plot_bottom = frame.plot_bottom() * h;
    let tick_px = TICK_LENGTH * h;
    for slot in &chart.slots {
        push_line(
            &mut svg,
            slot.center,
            plot_bottom,
            slot.center,
            plot_bottom + tick_px,
        );
        let text_y = plot_bottom + 3.0 * tick_px;
        let name = slot.benchmark.strip_suffix(".rb").unwrap_or(&slot.benchmark);
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" fill=\"{}\" font-size=\"small\" \
             font-family=\"monospace\" font-weight=\"bold\" text-anchor=\"end\" \
             transform=\"rotate(-60, {:.2}, {:.2})\">{}</text>\n",
            slot.center,
            text_y,
            TEXT_COLOUR,
            slot.center,
            text_y,
            escape_xml(name),
        ));
    }

    svg.push_str("</svg>\n");
    svg
}
