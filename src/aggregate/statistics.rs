// Descriptive statistics for sample series
//
// Only means, relative standard deviations and first-order propagation of
// relative error through a ratio of two means. No hypothesis testing.
//
// The standard deviation is the Bessel-corrected sample deviation (n - 1).
// A series whose samples are all equal (a single sample included) has no
// spread and reports exactly 0, regardless of rounding in the mean.

/// Mean and relative spread of one non-empty series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    /// 100 * stddev / mean
    pub rsd_pct: f64,
}

impl SeriesStats {
    /// Summarize a series; `None` when it is empty
    ///
    /// # Example
    /// ```
    /// use speedboard::aggregate::SeriesStats;
    ///
    /// let stats = SeriesStats::from_samples(&[50.0, 52.0, 48.0]).unwrap();
    /// assert_eq!(stats.mean, 50.0);
    /// assert!((stats.rsd_pct - 4.0).abs() < 1e-9);
    /// assert!(SeriesStats::from_samples(&[]).is_none());
    /// ```
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        Some(Self {
            mean: mean(samples)?,
            rsd_pct: rel_stddev_pct(samples)?,
        })
    }
}

/// Speedup of a config relative to the baseline, with propagated spread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speedup {
    /// baseline mean / config mean; above 1.0 means faster than baseline
    pub ratio: f64,
    /// Combined relative stddev of the ratio, in percent
    pub rsd_pct: f64,
}

impl Speedup {
    /// Ratio of `baseline` to `target`, `None` if the baseline mean is zero
    pub fn between(baseline: &SeriesStats, target: &SeriesStats) -> Option<Self> {
        if baseline.mean == 0.0 {
            return None;
        }
        Some(Self {
            ratio: baseline.mean / target.mean,
            rsd_pct: propagate_rsd_pct(baseline.rsd_pct, target.rsd_pct),
        })
    }
}

/// Arithmetic mean, `None` for an empty series
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Sample standard deviation, 0 for a flat series, `None` when empty
pub fn stddev(samples: &[f64]) -> Option<f64> {
    let xbar = mean(samples)?;
    if samples.iter().all(|v| *v == samples[0]) {
        return Some(0.0);
    }
    let diff_sqrs: f64 = samples.iter().map(|v| (v - xbar) * (v - xbar)).sum();
    Some((diff_sqrs / (samples.len() - 1) as f64).sqrt())
}

/// Relative standard deviation in percent
///
/// A series with no spread reports exactly 0, even when its mean is 0.
pub fn rel_stddev_pct(samples: &[f64]) -> Option<f64> {
    let sd = stddev(samples)?;
    if sd == 0.0 {
        return Some(0.0);
    }
    let xbar = mean(samples)?;
    Some(100.0 * sd / xbar.abs())
}

/// Combine two independent relative errors for a ratio of means
///
/// sqrt(a^2 + b^2) on fractional rates, returned as a percentage.
pub fn propagate_rsd_pct(baseline_rsd_pct: f64, target_rsd_pct: f64) -> f64 {
    let baseline_rate = baseline_rsd_pct / 100.0;
    let target_rate = target_rsd_pct / 100.0;
    (baseline_rate * baseline_rate + target_rate * target_rate).sqrt() * 100.0
}

/// Geometric mean of positive values, `None` when empty
pub fn geomean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    Some((log_sum / values.len() as f64).exp())
}
