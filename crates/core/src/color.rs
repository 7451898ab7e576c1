//! RGBA color with hex-string serialization.
//!
//! Particles and connection lines are translucent, so unlike an opaque
//! palette color this type carries an alpha channel. Components are f64 in
//! [0, 1]; the hex form is `#rrggbb` or `#rrggbbaa` (8-bit quantized).

use crate::error::AnimationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An sRGB color with alpha, components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Fully opaque color from the three channel values.
    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional, case
    /// insensitive). A 6-digit color gets alpha 1.0.
    pub fn from_hex(hex: &str) -> Result<Rgba, AnimationError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            return Err(AnimationError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {} in {hex:?}",
                digits.len()
            )));
        }
        let channel = |range: std::ops::Range<usize>| -> Result<f64, AnimationError> {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| AnimationError::InvalidColor(format!("{hex:?}: {e}")))
        };
        Ok(Rgba {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
            a: if digits.len() == 8 { channel(6..8)? } else { 1.0 },
        })
    }

    /// Hex form of the color: `#rrggbb` when fully opaque, `#rrggbbaa`
    /// otherwise. Components are quantized to 8 bits with rounding.
    pub fn to_hex(self) -> String {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        if q(self.a) == 255 {
            format!("#{:02x}{:02x}{:02x}", q(self.r), q(self.g), q(self.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                q(self.r),
                q(self.g),
                q(self.b),
                q(self.a)
            )
        }
    }

    /// 8-bit `[r, g, b, a]` form used by raster pixel buffers.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex_as_opaque() {
        let c = Rgba::from_hex("#ff0077").unwrap();
        assert!((c.r - 1.0).abs() < 1e-9);
        assert!((c.g - 0.0).abs() < 1e-9);
        assert!((c.b - 119.0 / 255.0).abs() < 1e-9);
        assert!((c.a - 1.0).abs() < 1e-9);
    }

    #[test]
    fn parses_eight_digit_hex_with_alpha() {
        let c = Rgba::from_hex("ff00774d").unwrap();
        assert!((c.a - 77.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            Rgba::from_hex("#ff007"),
            Err(AnimationError::InvalidColor(_))
        ));
    }

    #[test]
    fn rejects_non_ascii_input() {
        assert!(matches!(
            Rgba::from_hex("ééé"),
            Err(AnimationError::InvalidColor(_))
        ));
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert!(matches!(
            Rgba::from_hex("#gg0000"),
            Err(AnimationError::InvalidColor(_))
        ));
    }

    #[test]
    fn to_hex_omits_alpha_when_opaque() {
        assert_eq!(Rgba::opaque(1.0, 0.0, 119.0 / 255.0).to_hex(), "#ff0077");
    }

    #[test]
    fn to_hex_keeps_alpha_when_translucent() {
        let c = Rgba {
            r: 1.0,
            g: 0.0,
            b: 119.0 / 255.0,
            a: 77.0 / 255.0,
        };
        assert_eq!(c.to_hex(), "#ff00774d");
    }

    #[test]
    fn to_rgba8_quantizes() {
        let c = Rgba::from_hex("#0a141e28").unwrap();
        assert_eq!(c.to_rgba8(), [10, 20, 30, 40]);
    }

    #[test]
    fn serde_uses_hex_string() {
        let c = Rgba::from_hex("#ff007726").unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#ff007726\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hex_round_trip_is_stable(r: u8, g: u8, b: u8, a: u8) {
                let hex = format!("#{r:02x}{g:02x}{b:02x}{a:02x}");
                let c = Rgba::from_hex(&hex).unwrap();
                prop_assert_eq!(c.to_rgba8(), [r, g, b, a]);
            }
        }
    }
}
