// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ACCENT: Rgb = Rgb::new(0x00, 0x38, 0x76);

/// Offset applied to every channel for hover/pressed states.
pub const DARK_DELTA: i16 = -20;
/// Offset applied to every channel for tinted backgrounds.
pub const LIGHT_DELTA: i16 = 40;

pub const ACCENT_PRESETS: [(&str, Rgb); 6] = [
    ("Azul SUNAT", DEFAULT_ACCENT),
    ("Azul", Rgb::new(0x00, 0x66, 0xCC)),
    ("Verde", Rgb::new(0x10, 0xB9, 0x81)),
    ("Rojo", Rgb::new(0xE7, 0x4C, 0x3C)),
    ("Morado", Rgb::new(0x8B, 0x5C, 0xF6)),
    ("Naranja", Rgb::new(0xF5, 0x9E, 0x0B)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional, hex digits in any case).
    pub fn parse_hex(raw: &str) -> Result<Self> {
        let hex = raw.trim().strip_prefix('#').unwrap_or(raw.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("invalid color {raw:?}; expected #rrggbb, for example #003876");
        }
        let channel = |start: usize| u8::from_str_radix(&hex[start..start + 2], 16);
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Adds `delta` to each channel independently, clamping to `0..=255`.
    pub fn adjust(self, delta: i16) -> Self {
        let shift = |channel: u8| (i16::from(channel) + delta).clamp(0, 255) as u8;
        Self::new(shift(self.r), shift(self.g), shift(self.b))
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_hex(s)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        DEFAULT_ACCENT
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// String-level color adjustment, the form the presentation layer consumes.
pub fn adjust_color(hex: &str, delta: i16) -> Result<String> {
    Ok(Rgb::parse_hex(hex)?.adjust(delta).to_hex())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentPalette {
    pub base: Rgb,
    pub dark: Rgb,
    pub light: Rgb,
}

impl AccentPalette {
    pub fn from_accent(base: Rgb) -> Self {
        Self {
            base,
            dark: base.adjust(DARK_DELTA),
            light: base.adjust(LIGHT_DELTA),
        }
    }

    pub fn css_variables(&self) -> [(&'static str, String); 3] {
        [
            ("--accent-color", self.base.to_hex()),
            ("--accent-color-dark", self.dark.to_hex()),
            ("--accent-color-light", self.light.to_hex()),
        ]
    }
}

impl Default for AccentPalette {
    fn default() -> Self {
        Self::from_accent(DEFAULT_ACCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::{AccentPalette, DEFAULT_ACCENT, Rgb, adjust_color};
    use anyhow::Result;

    #[test]
    fn darker_shade_subtracts_without_underflow() -> Result<()> {
        assert_eq!(adjust_color("#003876", -20)?, "#002462");
        assert_eq!(Rgb::new(10, 200, 20).adjust(-20), Rgb::new(0, 180, 0));
        Ok(())
    }

    #[test]
    fn lighter_shade_clamps_at_white() -> Result<()> {
        assert_eq!(adjust_color("#F59E0B", 40)?, "#ffc633");
        assert_eq!(adjust_color("#ffffff", 40)?, "#ffffff");
        Ok(())
    }

    #[test]
    fn parse_accepts_either_case_and_optional_hash() -> Result<()> {
        assert_eq!(Rgb::parse_hex("#0066CC")?, Rgb::parse_hex("0066cc")?);
        Ok(())
    }

    #[test]
    fn parse_rejects_malformed_colors() {
        for raw in ["", "#fff", "#00387", "#0038766", "#00zz76", "blue"] {
            assert!(Rgb::parse_hex(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn palette_exposes_css_variables() {
        let palette = AccentPalette::from_accent(DEFAULT_ACCENT);
        let vars = palette.css_variables();
        assert_eq!(vars[0], ("--accent-color", "#003876".to_owned()));
        assert_eq!(vars[1], ("--accent-color-dark", "#002462".to_owned()));
        assert_eq!(vars[2], ("--accent-color-light", "#28609e".to_owned()));
    }
}
