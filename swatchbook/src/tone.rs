//! Contrast and shading helpers for single colors.

use serde::Serialize;
use tracing::error;

use crate::color::{Color, ParseColorError};

/// Lightness below which text over the color should be light.
const LIGHT_TEXT_THRESHOLD: u8 = 50;

/// Text shade that stays readable on top of a background color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTone {
    Light,
    Dark,
}

impl TextTone {
    pub fn for_color(background: &Color) -> Self {
        if background.lightness() < LIGHT_TEXT_THRESHOLD {
            TextTone::Light
        } else {
            TextTone::Dark
        }
    }

    pub fn for_css(background: &str) -> Result<Self, ParseColorError> {
        let color: Color = background.parse()?;
        Ok(Self::for_color(&color))
    }

    /// Tailwind utility class for this tone.
    pub fn css_class(self) -> &'static str {
        match self {
            TextTone::Light => "text-gray-200",
            TextTone::Dark => "text-gray-700",
        }
    }
}

/// Lightens an `hsl(...)` string. Unparseable input is logged and returned
/// as-is.
pub fn lighten_css(css: &str, amount: f64) -> String {
    shade_css(css, |color| color.lighten(amount), "lighten")
}

/// Darkens an `hsl(...)` string. Unparseable input is logged and returned
/// as-is.
pub fn darken_css(css: &str, amount: f64) -> String {
    shade_css(css, |color| color.darken(amount), "darken")
}

fn shade_css(css: &str, shade: impl FnOnce(&Color) -> Color, operation: &str) -> String {
    match css.parse::<Color>() {
        Ok(color) => shade(&color).to_string(),
        Err(err) => {
            error!(?err, input = css, operation, "cannot shade color");
            css.to_string()
        }
    }
}
