//! Colors as set on chart lines.
//!
//! A color keeps the form it was given in: a name stays a name (`"k"`,
//! `"red"`), palette entries are RGBA. `to_rgba` resolves either form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// RGBA with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// From 8-bit channels, fully opaque.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        if self.a < 1.0 {
            let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}")
        }
    }

    /// From `[r, g, b]` or `[r, g, b, a]` with every channel in `[0, 1]`.
    pub fn from_channels(channels: &[f64]) -> Option<Self> {
        if !channels.iter().all(|c| (0.0..=1.0).contains(c)) {
            return None;
        }
        match *channels {
            [r, g, b] => Some(Self::new(r, g, b, 1.0)),
            [r, g, b, a] => Some(Self::new(r, g, b, a)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Named(String),
    Rgba(Rgba),
}

impl Color {
    pub fn named(name: impl Into<String>) -> Self {
        Color::Named(name.into())
    }

    /// Parse a name or a `#rrggbb` / `#rrggbbaa` hex string.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(hex) = raw.strip_prefix('#') {
            return parse_hex(hex).map(Color::Rgba);
        }
        lookup_name(raw).map(|_| Color::Named(raw.to_string()))
    }

    pub fn to_rgba(&self) -> Option<Rgba> {
        match self {
            Color::Rgba(c) => Some(*c),
            Color::Named(name) => lookup_name(name),
        }
    }
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::Rgba(c)
    }
}

impl PartialEq<&str> for Color {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Color::Named(name) if name == other)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(name) => f.write_str(name),
            Color::Rgba(c) => f.write_str(&c.to_hex()),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// A color as written in config or JSON: a name, a hex string or channels.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawColor {
    Text(String),
    Channels(Vec<f64>),
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawColor::deserialize(deserializer)? {
            RawColor::Text(raw) => Color::parse(&raw)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown color '{raw}'"))),
            RawColor::Channels(channels) => Rgba::from_channels(&channels)
                .map(Color::Rgba)
                .ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "expected 3 or 4 channels in [0, 1], got {channels:?}"
                    ))
                }),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Rgba::from_rgb8(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(
            Rgba::from_rgb8(channel(0)?, channel(2)?, channel(4)?)
                .with_alpha(f64::from(channel(6)?) / 255.0),
        ),
        _ => None,
    }
}

/// Single-letter shorthands plus the basic named colors.
fn lookup_name(name: &str) -> Option<Rgba> {
    let rgb = match name.to_ascii_lowercase().as_str() {
        "k" | "black" => (0, 0, 0),
        "w" | "white" => (255, 255, 255),
        "r" => (255, 0, 0),
        "red" => (255, 0, 0),
        "g" => (0, 128, 0),
        "green" => (0, 128, 0),
        "b" => (0, 0, 255),
        "blue" => (0, 0, 255),
        "c" | "cyan" => (0, 191, 191),
        "m" | "magenta" => (191, 0, 191),
        "y" | "yellow" => (191, 191, 0),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "brown" => (165, 42, 42),
        "pink" => (255, 192, 203),
        "gray" | "grey" => (128, 128, 128),
        "olive" => (128, 128, 0),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        _ => return None,
    };
    Some(Rgba::from_rgb8(rgb.0, rgb.1, rgb.2))
}
