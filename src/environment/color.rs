//! RGB colors as used by lights and backgrounds.
//!
//! Stored as linear-blendable `f32` channels in `0.0..=1.0`; serialized as
//! `#rrggbb`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::lerp::Lerp;
use crate::core::Error;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Quantize to 8-bit channels.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse `#rgb`, `#rrggbb` or `rgb(r, g, b)`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let s = s.trim();
        let invalid = || Error::InvalidColor(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
            return match hex.len() {
                3 => {
                    let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
                    Ok(Self::from_rgb8(expand(0)?, expand(1)?, expand(2)?))
                }
                6 => Ok(Self::from_rgb8(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                )),
                _ => Err(invalid()),
            };
        }

        if let Some(body) = s.strip_prefix("rgb(").and_then(|rest| rest.strip_suffix(')')) {
            let channels = body
                .split(',')
                .map(|c| c.trim().parse::<u8>().map_err(|_| invalid()))
                .collect::<Result<Vec<_>, _>>()?;
            if let [r, g, b] = channels[..] {
                return Ok(Self::from_rgb8(r, g, b));
            }
        }

        Err(invalid())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Lerp for Color {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::rgb(
            self.r.lerp(&other.r, t),
            self.g.lerp(&other.g, t),
            self.b.lerp(&other.b, t),
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
