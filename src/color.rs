//! Stage-change color interpolation for the pipeline chart
//!
//! Maps the percent change between consecutive pipeline stages to a color
//! across three bands: small decreases stay near green, moderate ones move
//! toward orange, and large ones saturate toward red. Later stages are
//! expected to shrink (counts surviving a filter), so a positive percent
//! change is the healthy direction.

use crate::types::Rgba;

/// Fixed color of the first pill (and the fallback for undefined change)
pub const GOOD: Rgba = Rgba::new(34, 153, 84, 0.5);
/// Mid-band endpoint
pub const WARN: Rgba = Rgba::new(255, 153, 51, 0.5);
/// Saturated endpoint for large decreases
pub const BAD: Rgba = Rgba::new(207, 38, 45, 0.5);

/// Upper bound of the green→orange band, in percent
const GREEN_BAND_END: f64 = 5.0;
/// Upper bound of the orange→red band, in percent
const ORANGE_BAND_END: f64 = 18.0;
/// Width of the saturating tail past the orange band, in percent
const SATURATION_SPAN: f64 = 22.0;

/// Linearly interpolate between two colors, per channel, rounding to
/// integer channel values. Alpha is fixed at 0.5 throughout the chart.
fn lerp(start: Rgba, end: Rgba, t: f64) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (a as f64 + t * (b as f64 - a as f64)).round() as u8;
    Rgba::new(
        channel(start.r, end.r),
        channel(start.g, end.g),
        channel(start.b, end.b),
        0.5,
    )
}

/// Color for the pill at `index`, given the previous and current stage
/// values.
///
/// The first pill is always [`GOOD`] green. For later pills the percent
/// decrease from the previous stage selects a band:
///
/// - `≤ 5%`: green→orange
/// - `5..=18%`: orange→red
/// - `> 18%`: orange→red again over a wider span, with the blend factor
///   clamped at 1 so the color never exceeds full red
///
/// An undefined change (previous value 0, or non-finite input) falls back
/// to green and logs a warning; a negative change (the value grew) also
/// renders green since blend factors clamp at 0.
pub fn color_for(index: usize, previous: Option<f64>, current: f64) -> Rgba {
    if index == 0 {
        return GOOD;
    }

    let previous = previous.unwrap_or(0.0);
    let pct = (previous - current) / previous * 100.0;
    if !pct.is_finite() {
        tracing::warn!(
            index,
            previous,
            current,
            "undefined stage change, falling back to green"
        );
        return GOOD;
    }

    if pct <= GREEN_BAND_END {
        lerp(GOOD, WARN, pct / GREEN_BAND_END)
    } else if pct <= ORANGE_BAND_END {
        lerp(WARN, BAD, (pct - GREEN_BAND_END) / (ORANGE_BAND_END - GREEN_BAND_END))
    } else {
        lerp(WARN, BAD, (pct - ORANGE_BAND_END) / SATURATION_SPAN)
    }
}
