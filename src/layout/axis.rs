// Auto-scaled vertical axis for speedup charts
//
// The axis runs from 0 to the largest speedup in view. Tick spacing is the
// first "nice" multiple of the largest power of ten below the maximum that
// yields between 4 and 10 divisions.

use crate::error::{CompareError, Result};

/// Spacing multipliers in order of preference
const CANDIDATE_MULTIPLIERS: [f64; 7] = [5.0, 2.0, 1.0, 0.5, 0.2, 0.1, 0.05];
const MIN_DIVISIONS: f64 = 4.0;
const MAX_DIVISIONS: f64 = 10.0;

/// Chosen axis scale
#[derive(Debug, Clone, PartialEq)]
pub struct AxisScale {
    /// Largest ratio in view; maps to the top of the effective plot area
    pub max_ratio: f64,
    /// Distance between ticks
    pub division: f64,
    /// Tick values from 0 up to the first one past `max_ratio`
    pub ticks: Vec<f64>,
}

impl AxisScale {
    /// Fraction of the effective height a value reaches, 0 at the bottom
    pub fn height_ratio(&self, value: f64) -> f64 {
        value / self.max_ratio
    }
}

/// Pick tick spacing and tick values for an axis topping out at `max_ratio`
///
/// # Example
/// ```
/// use speedboard::layout::axis_scale;
///
/// let axis = axis_scale(3.4).unwrap();
/// assert_eq!(axis.division, 0.5);
/// assert_eq!(axis.ticks, vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5]);
/// ```
pub fn axis_scale(max_ratio: f64) -> Result<AxisScale> {
    if !(max_ratio.is_finite() && max_ratio > 0.0) {
        return Err(CompareError::AxisScale {
            max_ratio: Some(max_ratio),
        });
    }

    let largest_power_of_10 = 10f64.powf(max_ratio.log10().floor());
    let division = CANDIDATE_MULTIPLIERS
        .iter()
        .map(|m| m * largest_power_of_10)
        .find(|d| {
            let divs_shown = (max_ratio / d).floor();
            (MIN_DIVISIONS..=MAX_DIVISIONS).contains(&divs_shown)
        })
        .ok_or(CompareError::AxisScale {
            max_ratio: Some(max_ratio),
        })?;

    let mut ticks = Vec::new();
    for i in 0u32.. {
        let value = f64::from(i) * division;
        ticks.push(value);
        if value > max_ratio {
            break;
        }
    }

    tracing::debug!(
        "Axis scale for max ratio {:.3}: division {}, {} ticks",
        max_ratio,
        division,
        ticks.len()
    );

    Ok(AxisScale {
        max_ratio,
        division,
        ticks,
    })
}
