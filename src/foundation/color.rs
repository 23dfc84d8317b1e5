use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{CaptionError, CaptionResult};

/// Straight-alpha RGBA8 color.
///
/// Parsed from `#RRGGBB`, `#RRGGBBAA`, a handful of CSS color names, or `transparent`.
/// Serializes back to `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

const NAMED: &[(&str, [u8; 4])] = &[
    ("black", [0, 0, 0, 255]),
    ("white", [255, 255, 255, 255]),
    ("red", [255, 0, 0, 255]),
    ("green", [0, 128, 0, 255]),
    ("blue", [0, 0, 255, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("gold", [255, 215, 0, 255]),
    ("orange", [255, 165, 0, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("deepskyblue", [0, 191, 255, 255]),
    ("lightgreen", [144, 238, 144, 255]),
    ("transparent", [0, 0, 0, 0]),
];

impl Rgba8 {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// `true` when the color contributes nothing when drawn.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// `#RRGGBBAA` form.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// `0xRRGGBBAA` form understood by ffmpeg filter options.
    pub fn to_ffmpeg(self) -> String {
        format!("0x{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba8 {
    type Err = CaptionError;

    fn from_str(s: &str) -> CaptionResult<Self> {
        let s = s.trim();
        if let Some(&(_, [r, g, b, a])) = NAMED.iter().find(|(n, _)| n.eq_ignore_ascii_case(s)) {
            return Ok(Self { r, g, b, a });
        }
        parse_hex(s).map_err(CaptionError::invalid_configuration)
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if !hex.is_ascii() {
        return Err(format!("invalid color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    let a = match hex.len() {
        6 => 255,
        8 => hex_byte(&hex[6..8])?,
        _ => {
            return Err(format!(
                "color \"{s}\" must be #RRGGBB, #RRGGBBAA or a known color name"
            ));
        }
    };
    Ok(Rgba8 {
        r: hex_byte(&hex[0..2])?,
        g: hex_byte(&hex[2..4])?,
        b: hex_byte(&hex[4..6])?,
        a,
    })
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                &[r, g, b] => Ok(Self::rgb(r, g, b)),
                &[r, g, b, a] => Ok(Self { r, g, b, a }),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
