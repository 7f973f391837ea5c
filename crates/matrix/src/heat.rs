//! Deterministic count-to-color mapping for the heatmap.
//!
//! The same palette shades techniques and subtechniques so intensity is
//! comparable across the hierarchy. Zero is special-cased to a near-white
//! background; everything else interpolates along a light-to-deep blue
//! ramp that saturates at the display ceiling.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgb(...)` form, what the rendering layer writes into styles.
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Background for nodes with no mapped threats (#f8fafc). Not part of the
/// gradient.
const NO_THREAT: Rgb = Rgb::new(248, 250, 252);

/// Ramp stops, light blue to deep blue.
const STOPS: [Rgb; 5] = [
    Rgb::new(237, 248, 255), // #edf8ff
    Rgb::new(179, 215, 255), // #b3d7ff
    Rgb::new(110, 168, 255), // #6ea8ff
    Rgb::new(41, 121, 255),  // #2979ff
    Rgb::new(0, 84, 255),    // #0054ff
];

pub const DEFAULT_MAX_THREATS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatPalette {
    max_threats: u32,
    stops: [Rgb; 5],
    empty: Rgb,
}

impl Default for HeatPalette {
    fn default() -> Self {
        Self::with_ceiling(DEFAULT_MAX_THREATS)
    }
}

impl HeatPalette {
    /// Palette saturating at `max_threats`; counts at or above it all map
    /// to the deepest stop. A ceiling of zero is clamped to one.
    pub fn with_ceiling(max_threats: u32) -> Self {
        Self {
            max_threats: max_threats.max(1),
            stops: STOPS,
            empty: NO_THREAT,
        }
    }

    pub fn max_threats(&self) -> u32 {
        self.max_threats
    }

    /// Pure count-to-color mapping. Same count, same color, always.
    pub fn color(&self, count: u32) -> Rgb {
        if count == 0 {
            return self.empty;
        }
        self.shade(count as f64)
    }

    fn shade(&self, count: f64) -> Rgb {
        let intensity = (count / self.max_threats as f64).min(1.0);
        let segments = self.stops.len() - 1;
        let segment = ((intensity * segments as f64).floor() as usize).min(segments - 1);
        let t = intensity * segments as f64 - segment as f64;

        let from = self.stops[segment];
        let to = self.stops[segment + 1];
        Rgb {
            r: lerp(from.r, to.r, t),
            g: lerp(from.g, to.g, t),
            b: lerp(from.b, to.b, t),
        }
    }

    /// The five labelled count buckets the heatmap legend renders, each
    /// with its representative swatch (shade of the bucket midpoint).
    pub fn legend(&self) -> [LegendBucket; 5] {
        LEGEND_RANGES.map(|(label, min, max)| LegendBucket {
            label,
            min,
            max,
            color: if min == 0 {
                self.empty
            } else {
                self.shade(min as f64 + (max - min) as f64 / 2.0)
            },
        })
    }
}

const LEGEND_RANGES: [(&str, u32, u32); 5] = [
    ("None", 0, 0),
    ("Low", 1, 2),
    ("Medium", 3, 5),
    ("High", 6, 8),
    ("Very High", 9, 10),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendBucket {
    pub label: &'static str,
    pub min: u32,
    pub max: u32,
    pub color: Rgb,
}

fn lerp(from: u8, to: u8, t: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_the_background_color() {
        let palette = HeatPalette::default();
        assert_eq!(palette.color(0), NO_THREAT);
        // The background is not the first gradient stop.
        assert_ne!(palette.color(0), palette.color(1));
    }

    #[test]
    fn saturates_at_the_ceiling() {
        let palette = HeatPalette::default();
        assert_eq!(palette.color(10), palette.color(15));
        assert_eq!(palette.color(10), STOPS[4]);
    }

    #[test]
    fn ceiling_is_configurable() {
        let palette = HeatPalette::with_ceiling(20);
        assert_ne!(palette.color(10), STOPS[4]);
        assert_eq!(palette.color(20), STOPS[4]);
    }

    #[test]
    fn midpoint_lies_between_the_extremes_per_channel() {
        let palette = HeatPalette::default();
        let low = palette.color(1);
        let mid = palette.color(5);
        let high = palette.color(10);
        for (lo, m, hi) in [
            (low.r, mid.r, high.r),
            (low.g, mid.g, high.g),
            (low.b, mid.b, high.b),
        ] {
            let (min, max) = (lo.min(hi), lo.max(hi));
            if min != max {
                assert!(min < m && m < max, "{} not strictly between {} and {}", m, min, max);
            }
        }
    }

    #[test]
    fn legend_has_five_buckets_covering_the_ceiling() {
        let palette = HeatPalette::default();
        let legend = palette.legend();
        assert_eq!(legend.len(), 5);
        assert_eq!(legend[0].color, NO_THREAT);
        assert_eq!(legend[4].max, DEFAULT_MAX_THREATS);
    }
}
