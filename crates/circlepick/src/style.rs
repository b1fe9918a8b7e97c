use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgba;
use serde::Serialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Color must start with '#': {0}")]
    MissingHash(String),
    #[error("Color must have 6 or 8 hex digits: {0}")]
    Length(String),
    #[error("Invalid hex digits in color: {0}")]
    Digits(String),
}

/// An sRGB color with alpha, written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct Color(Srgba<f64>);

impl Color {
    pub fn cyan() -> Self {
        Self::rgb(0.0, 1.0, 1.0)
    }

    pub fn dark_gray() -> Self {
        let c = f64::from(0x44_u8) / 255.0;
        Self::rgb(c, c, c)
    }

    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self(Srgba::new(red, green, blue, alpha))
    }

    pub fn components(&self) -> (f64, f64, f64, f64) {
        self.0.into_components()
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(ColorParseError::Length(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|c| f64::from(c) / 255.0)
                .map_err(|_| ColorParseError::Digits(s.to_string()))
        };
        let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.components();
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(f, "#{:02x}{:02x}{:02x}", byte(r), byte(g), byte(b))?;
        if a < 1.0 {
            write!(f, "{:02x}", byte(a))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintStyle {
    Stroke,
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Paint {
    pub color: Color,
    pub width: f64,
    pub style: PaintStyle,
}

impl Paint {
    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: PaintStyle::Stroke,
        }
    }

    pub fn fill(color: Color) -> Self {
        Self {
            color,
            width: 0.0,
            style: PaintStyle::Fill,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub color: Color,
    pub size: f64,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    #[default]
    #[strum(serialize = "none", serialize = "hidden")]
    Hidden,
    #[strum(serialize = "above", serialize = "top")]
    Above,
    #[strum(serialize = "below", serialize = "bottom")]
    Below,
    #[strum(serialize = "start", serialize = "left")]
    Start,
    #[strum(serialize = "end", serialize = "right")]
    End,
}

#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, serde::Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

/// Everything the renderer needs besides the picker state.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub wheel_background: Paint,
    pub wheel_active: Paint,
    pub divider: Paint,
    pub pointer: Paint,
    pub pointer_halo: Paint,
    pub pointer_radius: f64,
    pub value_text: TextStyle,
    pub label_text: TextStyle,
    pub show_divider: bool,
    pub show_pointer: bool,
    pub show_value_text: bool,
}

impl Style {
    /// Space the pointer and its halo take beyond the wheel radius.
    ///
    /// Reserved even while the pointer is hidden, so toggling it does not
    /// resize the wheel.
    pub fn pointer_extent(&self) -> f64 {
        self.pointer_radius + self.pointer_halo.width
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            wheel_background: Paint::stroke(Color::dark_gray(), 8.0),
            wheel_active: Paint::stroke(Color::cyan(), 8.0),
            divider: Paint::stroke(Color::dark_gray(), 2.0),
            pointer: Paint::fill(Color::cyan()),
            pointer_halo: Paint::stroke(Color::dark_gray(), 10.0),
            pointer_radius: 8.0,
            value_text: TextStyle {
                color: Color::cyan(),
                size: 25.0,
            },
            label_text: TextStyle {
                color: Color::cyan(),
                size: 25.0,
            },
            show_divider: false,
            show_pointer: true,
            show_value_text: true,
        }
    }
}
