//! Scale functions for data-to-color mappings.
//!
//! Values travel through two scales: a normalising scale ([`LinearScale`] or
//! [`LogScale`], wrapped by [`Normalizer`]) maps data to `0.0..=1.0`, and a
//! [`ColorScale`] (usually sampled into a [`ColorLut`]) maps that to a color.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// True when `a` and `b` are equal up to float resolution at their magnitude.
fn is_degenerate(a: f32, b: f32) -> bool {
    (a - b).abs() <= f32::EPSILON * a.abs().max(b.abs())
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if is_degenerate(domain.0, domain.1) {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { domain_min: domain.0, domain_max: domain.1, range_min: range.0, range_max: range.1 })
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Logarithmic (base 10) scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LogScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LogScale {
    /// Create a new logarithmic scale.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain contains non-positive values.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if domain.0 <= 0.0 || domain.1 <= 0.0 {
            return Err(Error::ScaleDomain("Log scale domain must be positive".to_string()));
        }

        Ok(Self { domain_min: domain.0, domain_max: domain.1, range_min: range.0, range_max: range.1 })
    }
}

impl Scale<f32, f32> for LogScale {
    fn scale(&self, value: f32) -> f32 {
        let log_min = self.domain_min.log10();
        let log_max = self.domain_max.log10();
        let log_val = value.max(f32::MIN_POSITIVE).log10();

        let t = (log_val - log_min) / (log_max - log_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// How data values are normalised before color lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// `vmin..vmax` maps linearly to `0..1`.
    #[default]
    Linear,
    /// `log10(vmin)..log10(vmax)` maps linearly to `0..1`.
    Log,
}

/// Maps data values to `0.0..=1.0`, or `None` for values that cannot be
/// normalised (non-finite, or non-positive under log normalisation).
#[derive(Debug, Clone, Copy)]
pub enum Normalizer {
    /// Linear mapping.
    Linear(LinearScale),
    /// Logarithmic mapping.
    Log(LogScale),
    /// Degenerate domain (`vmin == vmax`); every valid value maps to `0.0`.
    Constant {
        /// Whether non-positive values are invalid.
        log: bool,
    },
}

impl Normalizer {
    /// Create a normaliser over `vmin..=vmax`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if the bounds are not finite, are
    /// reversed, or are non-positive under [`Normalization::Log`].
    pub fn new(kind: Normalization, (vmin, vmax): (f32, f32)) -> Result<Self> {
        if !vmin.is_finite() || !vmax.is_finite() {
            return Err(Error::ScaleDomain(format!("bounds must be finite, got {vmin}..{vmax}")));
        }
        if vmin > vmax {
            return Err(Error::ScaleDomain(format!("vmin {vmin} is greater than vmax {vmax}")));
        }
        let log = kind == Normalization::Log;
        if log && vmin <= 0.0 {
            return Err(Error::ScaleDomain(format!(
                "log normalization needs positive bounds, got vmin {vmin}"
            )));
        }

        if is_degenerate(vmin, vmax) {
            return Ok(Self::Constant { log });
        }

        Ok(match kind {
            Normalization::Linear => Self::Linear(LinearScale::new((vmin, vmax), (0.0, 1.0))?),
            Normalization::Log => Self::Log(LogScale::new((vmin, vmax), (0.0, 1.0))?),
        })
    }

    /// Normalise a value, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn normalize(&self, value: f32) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }
        let t = match self {
            Self::Linear(s) => s.scale(value),
            Self::Log(_) | Self::Constant { log: true } if value <= 0.0 => return None,
            Self::Log(s) => s.scale(value),
            Self::Constant { .. } => 0.0,
        };
        Some(t.clamp(0.0, 1.0))
    }
}

/// Color scale for mapping values to colors.
///
/// Colors are anchored at stop positions in `0.0..=1.0` of the domain and
/// linearly interpolated in between.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<(f32, Rgba)>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a color scale with evenly spaced colors.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or domain is invalid.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        let last = colors.len().saturating_sub(1).max(1) as f32;
        let stops = colors.into_iter().enumerate().map(|(i, c)| (i as f32 / last, c)).collect();
        Self::with_stops(stops, domain)
    }

    /// Create a color scale from explicit `(position, color)` stops.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no stops, positions are outside
    /// `0.0..=1.0` or not ascending, or the domain is invalid.
    pub fn with_stops(stops: Vec<(f32, Rgba)>, domain: (f32, f32)) -> Result<Self> {
        if stops.is_empty() {
            return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
        }
        if stops.iter().any(|(p, _)| !(0.0..=1.0).contains(p)) {
            return Err(Error::ScaleDomain("Stop positions must lie in 0..=1".to_string()));
        }
        if stops.windows(2).any(|w| w[1].0 < w[0].0) {
            return Err(Error::ScaleDomain("Stop positions must be ascending".to_string()));
        }
        if is_degenerate(domain.0, domain.1) {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { stops, domain_min: domain.0, domain_max: domain.1 })
    }

    /// Create a heat color scale (black-red-yellow-white).
    ///
    /// Stops sit where each channel saturates in the classic `hot` map: red
    /// ramps up first, then green, then blue.
    #[must_use]
    pub fn hot(domain: (f32, f32)) -> Option<Self> {
        Self::with_stops(
            vec![
                (0.0, Rgba::BLACK),
                (0.365_079, Rgba::RED),
                (0.746_032, Rgba::YELLOW),
                (1.0, Rgba::WHITE),
            ],
            domain,
        )
        .ok()
    }

    /// Create a greyscale color scale.
    #[must_use]
    pub fn greyscale(domain: (f32, f32)) -> Option<Self> {
        Self::new(vec![Rgba::BLACK, Rgba::WHITE], domain).ok()
    }

    /// Create a viridis color scale (perceptually uniform).
    #[must_use]
    pub fn viridis(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(68, 1, 84),
                Rgba::rgb(59, 82, 139),
                Rgba::rgb(33, 145, 140),
                Rgba::rgb(94, 201, 98),
                Rgba::rgb(253, 231, 37),
            ],
            domain,
        )
        .ok()
    }

    /// Create a magma color scale (sequential, perceptually uniform).
    #[must_use]
    pub fn magma(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(0, 0, 4),
                Rgba::rgb(81, 18, 124),
                Rgba::rgb(183, 55, 121),
                Rgba::rgb(252, 137, 97),
                Rgba::rgb(252, 253, 191),
            ],
            domain,
        )
        .ok()
    }

    /// Create a sequential blue scale.
    #[must_use]
    pub fn blues(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(247, 251, 255),
                Rgba::rgb(198, 219, 239),
                Rgba::rgb(107, 174, 214),
                Rgba::rgb(33, 113, 181),
                Rgba::rgb(8, 48, 107),
            ],
            domain,
        )
        .ok()
    }

    /// Create a diverging red-blue scale.
    #[must_use]
    pub fn red_blue(domain: (f32, f32)) -> Option<Self> {
        Self::new(
            vec![
                Rgba::rgb(178, 24, 43),
                Rgba::rgb(239, 138, 98),
                Rgba::rgb(247, 247, 247),
                Rgba::rgb(103, 169, 207),
                Rgba::rgb(33, 102, 172),
            ],
            domain,
        )
        .ok()
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        let (first_pos, first) = self.stops[0];
        if self.stops.len() == 1 || t <= first_pos {
            return first;
        }

        for pair in self.stops.windows(2) {
            let (p0, c0) = pair[0];
            let (p1, c1) = pair[1];
            if t <= p1 {
                let span = p1 - p0;
                if span <= 0.0 {
                    return c1;
                }
                return c0.lerp(c1, (t - p0) / span);
            }
        }

        self.stops[self.stops.len() - 1].1
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (self.stops[0].1, self.stops[self.stops.len() - 1].1)
    }
}

/// Color lookup table sampled from a [`ColorScale`].
///
/// A normalised value `t` picks entry `min(floor(t * len), len - 1)`, so the
/// same input always produces the same color regardless of float noise in
/// the interpolation.
#[derive(Debug, Clone)]
pub struct ColorLut {
    colors: Vec<Rgba>,
}

impl ColorLut {
    /// Default number of entries.
    pub const DEFAULT_SIZE: usize = 256;

    /// Sample `size` evenly spaced colors across the scale's domain.
    #[must_use]
    pub fn new(scale: &ColorScale, size: usize) -> Self {
        let size = size.max(2);
        let (lo, hi) = scale.domain();
        let colors = (0..size)
            .map(|i| scale.scale(lo + (hi - lo) * i as f32 / (size - 1) as f32))
            .collect();
        Self { colors }
    }

    /// Look up a normalised value in `0.0..=1.0`.
    #[must_use]
    pub fn lookup(&self, t: f32) -> Rgba {
        let n = self.colors.len();
        let idx = ((t.clamp(0.0, 1.0) * n as f32) as usize).min(n - 1);
        self.colors[idx]
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a table has at least two entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Named color palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    /// Heat (black-red-yellow-white).
    #[default]
    Hot,
    /// Greyscale.
    Greyscale,
    /// Viridis (perceptually uniform, colorblind-safe).
    Viridis,
    /// Magma (perceptually uniform).
    Magma,
    /// Sequential blues.
    Blues,
    /// Diverging red-blue.
    RedBlue,
}

impl Palette {
    /// All palettes, in declaration order.
    pub const ALL: [Self; 6] =
        [Self::Hot, Self::Greyscale, Self::Viridis, Self::Magma, Self::Blues, Self::RedBlue];

    /// Palette name as used in config files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Greyscale => "greyscale",
            Self::Viridis => "viridis",
            Self::Magma => "magma",
            Self::Blues => "blues",
            Self::RedBlue => "red_blue",
        }
    }

    /// Color scale over the unit domain.
    #[must_use]
    pub fn color_scale(self) -> ColorScale {
        let domain = (0.0, 1.0);
        let scale = match self {
            Self::Hot => ColorScale::hot(domain),
            Self::Greyscale => ColorScale::greyscale(domain),
            Self::Viridis => ColorScale::viridis(domain),
            Self::Magma => ColorScale::magma(domain),
            Self::Blues => ColorScale::blues(domain),
            Self::RedBlue => ColorScale::red_blue(domain),
        };
        scale.expect("built-in palettes are valid over the unit domain")
    }

    /// Lookup table with [`ColorLut::DEFAULT_SIZE`] entries.
    #[must_use]
    pub fn lut(self) -> ColorLut {
        ColorLut::new(&self.color_scale(), ColorLut::DEFAULT_SIZE)
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|p| p.name() == wanted).ok_or_else(|| {
            let names: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
            format!("unknown palette '{s}', expected one of: {}", names.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).expect("operation should succeed");
        assert_relative_eq!(scale.scale(0.0), 0.0);
        assert_relative_eq!(scale.scale(50.0), 0.5);
        assert_relative_eq!(scale.scale(100.0), 1.0);
        assert_eq!(scale.domain(), (0.0, 100.0));
        assert_eq!(scale.range(), (0.0, 1.0));
    }

    #[test]
    fn test_linear_scale_equal_domain_error() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_linear_scale_tiny_domain() {
        let scale = LinearScale::new((1e-9, 2e-9), (0.0, 1.0)).expect("distinct bounds");
        assert_relative_eq!(scale.scale(1.5e-9), 0.5, epsilon = 1e-5);
        assert!(LinearScale::new((0.0, 0.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_log_scale() {
        let scale = LogScale::new((1.0, 1000.0), (0.0, 3.0)).expect("operation should succeed");
        assert_relative_eq!(scale.scale(1.0), 0.0, epsilon = 1e-5);
        assert_relative_eq!(scale.scale(10.0), 1.0, epsilon = 1e-5);
        assert_relative_eq!(scale.scale(1000.0), 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_log_scale_invalid_domain() {
        assert!(LogScale::new((-1.0, 100.0), (0.0, 1.0)).is_err());
        assert!(LogScale::new((0.0, 100.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_normalizer_linear() {
        let n = Normalizer::new(Normalization::Linear, (0.0, 4.0)).expect("valid bounds");
        assert_eq!(n.normalize(0.0), Some(0.0));
        assert_eq!(n.normalize(1.0), Some(0.25));
        assert_eq!(n.normalize(4.0), Some(1.0));
        // Clamped outside the bounds.
        assert_eq!(n.normalize(-3.0), Some(0.0));
        assert_eq!(n.normalize(9.0), Some(1.0));
    }

    #[test]
    fn test_normalizer_non_finite_is_bad() {
        let n = Normalizer::new(Normalization::Linear, (0.0, 1.0)).expect("valid bounds");
        assert_eq!(n.normalize(f32::NAN), None);
        assert_eq!(n.normalize(f32::INFINITY), None);
        assert_eq!(n.normalize(f32::NEG_INFINITY), None);
    }

    #[test]
    fn test_normalizer_constant_maps_to_zero() {
        let n = Normalizer::new(Normalization::Linear, (7.0, 7.0)).expect("valid bounds");
        assert_eq!(n.normalize(7.0), Some(0.0));
        assert_eq!(n.normalize(100.0), Some(0.0));
    }

    #[test]
    fn test_normalizer_tiny_range_is_not_constant() {
        let n = Normalizer::new(Normalization::Linear, (1e-9, 2e-9)).expect("valid bounds");
        assert!(matches!(n, Normalizer::Linear(_)));
        assert_eq!(n.normalize(1e-9), Some(0.0));
        assert_eq!(n.normalize(2e-9), Some(1.0));

        let n = Normalizer::new(Normalization::Linear, (0.0, 1e-30)).expect("valid bounds");
        assert!(matches!(n, Normalizer::Linear(_)));
    }

    #[test]
    fn test_normalizer_log() {
        let n = Normalizer::new(Normalization::Log, (1.0, 100.0)).expect("valid bounds");
        let mid = n.normalize(10.0).expect("positive value");
        assert_relative_eq!(mid, 0.5, epsilon = 1e-5);
        assert_eq!(n.normalize(0.0), None);
        assert_eq!(n.normalize(-5.0), None);
    }

    #[test]
    fn test_normalizer_rejects_bad_bounds() {
        assert!(Normalizer::new(Normalization::Linear, (2.0, 1.0)).is_err());
        assert!(Normalizer::new(Normalization::Linear, (f32::NAN, 1.0)).is_err());
        assert!(Normalizer::new(Normalization::Log, (0.0, 1.0)).is_err());
        assert!(Normalizer::new(Normalization::Log, (-1.0, -1.0)).is_err());
    }

    #[test]
    fn test_color_scale() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 1.0))
            .expect("color scale creation should succeed");
        let mid = scale.scale(0.5);
        assert!(mid.r > 100 && mid.r < 150);
        assert_eq!(scale.range(), (Rgba::BLACK, Rgba::WHITE));
    }

    #[test]
    fn test_color_scale_single_color() {
        let scale = ColorScale::new(vec![Rgba::RED], (0.0, 1.0))
            .expect("color scale creation should succeed");
        assert_eq!(scale.scale(0.5), Rgba::RED);
    }

    #[test]
    fn test_color_scale_clamping() {
        let scale = ColorScale::new(vec![Rgba::BLACK, Rgba::WHITE], (0.0, 1.0))
            .expect("color scale creation should succeed");
        assert_eq!(scale.scale(-1.0), Rgba::BLACK);
        assert_eq!(scale.scale(2.0), Rgba::WHITE);
    }

    #[test]
    fn test_color_scale_invalid() {
        assert!(ColorScale::new(vec![], (0.0, 1.0)).is_err());
        assert!(ColorScale::new(vec![Rgba::RED, Rgba::BLUE], (5.0, 5.0)).is_err());
        assert!(ColorScale::with_stops(vec![(0.5, Rgba::RED), (0.2, Rgba::BLUE)], (0.0, 1.0))
            .is_err());
        assert!(ColorScale::with_stops(vec![(1.5, Rgba::RED)], (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_hot_endpoints_and_stops() {
        let hot = ColorScale::hot((0.0, 1.0)).expect("valid domain");
        assert_eq!(hot.scale(0.0), Rgba::BLACK);
        assert_eq!(hot.scale(1.0), Rgba::WHITE);
        assert_eq!(hot.scale(0.365_079), Rgba::RED);
        assert_eq!(hot.scale(0.746_032), Rgba::YELLOW);

        // Between red and yellow only green moves.
        let orange = hot.scale(0.55);
        assert_eq!(orange.r, 255);
        assert!(orange.g > 0 && orange.g < 255);
        assert_eq!(orange.b, 0);
    }

    #[test]
    fn test_builtin_invalid_domain() {
        assert!(ColorScale::hot((5.0, 5.0)).is_none());
        assert!(ColorScale::greyscale((5.0, 5.0)).is_none());
        assert!(ColorScale::viridis((5.0, 5.0)).is_none());
        assert!(ColorScale::magma((5.0, 5.0)).is_none());
        assert!(ColorScale::blues((5.0, 5.0)).is_none());
        assert!(ColorScale::red_blue((5.0, 5.0)).is_none());
    }

    #[test]
    fn test_lut_endpoints() {
        let lut = Palette::Hot.lut();
        assert_eq!(lut.len(), 256);
        assert_eq!(lut.lookup(0.0), Rgba::BLACK);
        assert_eq!(lut.lookup(1.0), Rgba::WHITE);
        assert_eq!(lut.lookup(-1.0), Rgba::BLACK);
        assert_eq!(lut.lookup(2.0), Rgba::WHITE);
    }

    #[test]
    fn test_palette_parse() {
        assert_eq!("hot".parse::<Palette>(), Ok(Palette::Hot));
        assert_eq!("Red-Blue".parse::<Palette>(), Ok(Palette::RedBlue));
        assert_eq!(" viridis ".parse::<Palette>(), Ok(Palette::Viridis));
        let err = "jet".parse::<Palette>().unwrap_err();
        assert!(err.contains("hot"));
    }

    #[test]
    fn test_palette_display_round_trips_through_from_str() {
        for palette in Palette::ALL {
            assert_eq!(palette.to_string().parse::<Palette>(), Ok(palette));
        }
    }

    #[test]
    fn test_every_palette_builds_lut() {
        for palette in Palette::ALL {
            let lut = palette.lut();
            assert_eq!(lut.len(), ColorLut::DEFAULT_SIZE, "{palette}");
            assert!(!lut.is_empty());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_normalized_values_stay_in_unit_range(
            lo in -1.0e6f32..1.0e6,
            span in 0.0f32..1.0e6,
            v in -1.0e7f32..1.0e7,
        ) {
            let n = Normalizer::new(Normalization::Linear, (lo, lo + span)).unwrap();
            let t = n.normalize(v).unwrap();
            prop_assert!((0.0..=1.0).contains(&t));
        }

        #[test]
        fn prop_hot_is_channel_monotonic(a in 0.0f32..1.0, b in 0.0f32..1.0) {
            let lut = Palette::Hot.lut();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let (c0, c1) = (lut.lookup(lo), lut.lookup(hi));
            prop_assert!(c0.r <= c1.r && c0.g <= c1.g && c0.b <= c1.b);
        }
    }
}
