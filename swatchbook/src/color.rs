//! HSL color value used throughout the catalogs. Colors travel as CSS
//! `hsl(h, s%, l%)` strings so the frontend can apply them directly.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use palette::convert::FromColorUnclamped;
use palette::white_point::D65;
use palette::{FromColor, Hsl, Lab, RgbHue, Srgb};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Lab lightness shift applied per unit of lighten/darken amount.
const LAB_LIGHTNESS_STEP: f64 = 18.0;

type HslF64 = Hsl<palette::encoding::Srgb, f64>;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("malformed hsl color: {input:?}")]
    Malformed { input: String },
    #[error("{component} out of range: {value}")]
    OutOfRange { component: &'static str, value: u32 },
}

/// A color in hue/saturation/lightness form.
///
/// Hue is kept in degrees exactly as written and is not wrapped into
/// `0..360`. Saturation and lightness are whole percentages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    hue: u16,
    saturation: u8,
    lightness: u8,
}

impl Color {
    /// Builds a color without range checks; use [`Color::try_new`] or
    /// `str::parse` for untrusted input.
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    pub fn try_new(hue: u16, saturation: u8, lightness: u8) -> Result<Self, ParseColorError> {
        check_percent("saturation", u32::from(saturation))?;
        check_percent("lightness", u32::from(lightness))?;
        Ok(Self::new(hue, saturation, lightness))
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }

    pub fn saturation(&self) -> u8 {
        self.saturation
    }

    pub fn lightness(&self) -> u8 {
        self.lightness
    }

    /// Greys, black and white carry no usable hue.
    pub fn is_achromatic(&self) -> bool {
        self.saturation == 0 || self.has_extreme_lightness()
    }

    fn has_extreme_lightness(&self) -> bool {
        self.lightness == 0 || self.lightness == 100
    }

    /// The triple fed to [`hsl_distance`]: the stored components are read as
    /// an RGB triple on a 0-255 scale and converted to rounded
    /// `[hue°, saturation%, lightness%]`.
    ///
    /// Values above 255 are not clamped, so the result can leave the usual
    /// HSL ranges.
    pub fn distance_coordinates(&self) -> [f64; 3] {
        let rgb = Srgb::new(
            f64::from(self.hue) / 255.0,
            f64::from(self.saturation) / 255.0,
            f64::from(self.lightness) / 255.0,
        );
        let hsl = HslF64::from_color_unclamped(rgb);

        [
            hsl.hue.into_positive_degrees().round(),
            (hsl.saturation * 100.0).round(),
            (hsl.lightness * 100.0).round(),
        ]
    }

    /// Blends toward `other` in HSL space, taking the short way around the
    /// hue circle. `ratio` is clamped to `0.0..=1.0`.
    ///
    /// An achromatic endpoint takes the other endpoint's hue. Black and white
    /// also take its saturation, so a tint toward white keeps its colour.
    pub fn mix(&self, other: &Color, ratio: f64) -> Color {
        let ratio = ratio.clamp(0.0, 1.0);
        let lerp = |from: f64, to: f64| from + ratio * (to - from);

        let from = self.to_hsl();
        let to = other.to_hsl();
        let from_hue = from.hue.into_positive_degrees();
        let to_hue = to.hue.into_positive_degrees();
        let blended_saturation = lerp(from.saturation, to.saturation);

        let (hue, saturation) = match (self.is_achromatic(), other.is_achromatic()) {
            (false, false) => (
                from_hue + ratio * hue_delta(from_hue, to_hue),
                blended_saturation,
            ),
            (false, true) if other.has_extreme_lightness() => (from_hue, from.saturation),
            (false, true) => (from_hue, blended_saturation),
            (true, false) if self.has_extreme_lightness() => (to_hue, to.saturation),
            (true, false) => (to_hue, blended_saturation),
            (true, true) => (0.0, 0.0),
        };

        Self::from_hsl(HslF64::new(hue, saturation, lerp(from.lightness, to.lightness)))
    }

    /// Raises Lab lightness by `18 * amount`.
    pub fn lighten(&self, amount: f64) -> Color {
        self.shift_lab_lightness(LAB_LIGHTNESS_STEP * amount)
    }

    /// Lowers Lab lightness by `18 * amount`.
    pub fn darken(&self, amount: f64) -> Color {
        self.shift_lab_lightness(-LAB_LIGHTNESS_STEP * amount)
    }

    fn shift_lab_lightness(&self, delta: f64) -> Color {
        let rgb: Srgb<f64> = Srgb::from_color(self.to_hsl());
        let mut lab: Lab<D65, f64> = Lab::from_color(rgb);
        lab.l += delta;

        let shifted: Srgb<f64> = Srgb::from_color(lab);
        let mut hsl = HslF64::from_color(shifted);
        if hsl.saturation <= f64::EPSILON {
            hsl.hue = RgbHue::from_degrees(0.0);
        }
        Self::from_hsl(hsl)
    }

    fn to_hsl(self) -> HslF64 {
        HslF64::new(
            f64::from(self.hue),
            f64::from(self.saturation) / 100.0,
            f64::from(self.lightness) / 100.0,
        )
    }

    fn from_hsl(hsl: HslF64) -> Color {
        let hue = hsl.hue.into_positive_degrees().round();
        let saturation = (hsl.saturation * 100.0).round().clamp(0.0, 100.0);
        let lightness = (hsl.lightness * 100.0).round().clamp(0.0, 100.0);

        Color::new(hue as u16, saturation as u8, lightness as u8)
    }
}

/// Euclidean distance over the `[hue, saturation, lightness]` coordinates of
/// [`Color::distance_coordinates`], with every axis treated as linear.
pub fn hsl_distance(a: &Color, b: &Color) -> f64 {
    let [h1, s1, l1] = a.distance_coordinates();
    let [h2, s2, l2] = b.distance_coordinates();

    let dh = h1 - h2;
    let ds = s1 - s2;
    let dl = l1 - l2;
    dl.mul_add(dl, dh.mul_add(dh, ds * ds)).sqrt()
}

/// Signed hue step from `from` to `to`, both in `0..360`. Arcs longer than
/// half a turn go the other way; an exact half turn keeps the sign of
/// `to - from`.
fn hue_delta(from: f64, to: f64) -> f64 {
    let delta = to - from;
    if delta > 180.0 {
        delta - 360.0
    } else if delta < -180.0 {
        delta + 360.0
    } else {
        delta
    }
}

fn check_percent(component: &'static str, value: u32) -> Result<(), ParseColorError> {
    if value > 100 {
        return Err(ParseColorError::OutOfRange { component, value });
    }
    Ok(())
}

fn hsl_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*hsl\(\s*(\d+)\s*,\s*(\d+)%\s*,\s*(\d+)%\s*\)\s*$")
            .expect("hsl pattern compiles")
    })
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseColorError::Malformed {
            input: input.to_string(),
        };

        let captures = hsl_pattern().captures(input).ok_or_else(malformed)?;
        let component = |index: usize| -> Result<u32, ParseColorError> {
            captures[index].parse::<u32>().map_err(|_| malformed())
        };

        let hue = component(1)?;
        let saturation = component(2)?;
        let lightness = component(3)?;

        let hue = u16::try_from(hue).map_err(|_| ParseColorError::OutOfRange {
            component: "hue",
            value: hue,
        })?;
        check_percent("saturation", saturation)?;
        check_percent("lightness", lightness)?;

        Ok(Color::new(hue, saturation as u8, lightness as u8))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}
