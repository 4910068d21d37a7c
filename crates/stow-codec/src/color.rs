use std::fmt;

use crate::archive::{KeyedArchiver, KeyedUnarchiver, SecureArchivable};
use crate::error::{CodecError, CodecResult};

/// An RGBA color with components in `0.0..=1.0`.
///
/// Stored as a secure archive so blobs written by earlier releases keep
/// decoding after fields are added.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opaque color from 8-bit channels.
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            1.0,
        )
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|c| f64::from(c) / 255.0)
        };
        let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Returns `true` when every component is finite and within `0.0..=1.0`.
    pub fn is_valid(&self) -> bool {
        [self.red, self.green, self.blue, self.alpha]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            to8(self.red),
            to8(self.green),
            to8(self.blue),
            to8(self.alpha)
        )
    }
}

impl SecureArchivable for Color {
    const CLASS_NAME: &'static str = "Color";

    fn encode_with(&self, archiver: &mut KeyedArchiver) {
        archiver.encode("red", &self.red);
        archiver.encode("green", &self.green);
        archiver.encode("blue", &self.blue);
        archiver.encode("alpha", &self.alpha);
    }

    fn init_with(unarchiver: &KeyedUnarchiver) -> CodecResult<Self> {
        let color = Self {
            red: unarchiver.decode("red")?,
            green: unarchiver.decode("green")?,
            blue: unarchiver.decode("blue")?,
            // Archives without alpha are opaque.
            alpha: unarchiver.decode_optional("alpha")?.unwrap_or(1.0),
        };
        if !color.is_valid() {
            return Err(CodecError::mismatch(
                "color components in 0.0..=1.0",
                color.to_string(),
            ));
        }
        Ok(color)
    }
}

crate::storable_archive!(Color);
