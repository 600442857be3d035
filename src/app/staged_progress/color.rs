//! Color helpers for stage transitions
//!
//! Interpolation works channel by channel on `Color32`'s stored (premultiplied,
//! gamma-space) values, which is what the painter consumes directly.

#![warn(clippy::all, rust_2018_idioms)]

use egui::Color32;

use crate::app::error::StageError;

/// Linearly interpolate between two colors
///
/// `t` is clamped to `[0, 1]`; `t = 0` yields `from` and `t = 1` yields `to`.
pub fn lerp_color(from: Color32, to: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| -> u8 {
        egui::lerp(a as f32..=b as f32, t).round().clamp(0.0, 255.0) as u8
    };

    Color32::from_rgba_premultiplied(
        channel(from.r(), to.r()),
        channel(from.g(), to.g()),
        channel(from.b(), to.b()),
        channel(from.a(), to.a()),
    )
}

/// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
pub fn parse_hex_color(value: &str) -> Result<Color32, StageError> {
    let hex = value.trim().trim_start_matches('#');
    let invalid = || StageError::InvalidColor(value.to_string());

    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    let (r, g, b) = (byte(0)?, byte(2)?, byte(4)?);

    if hex.len() == 8 {
        Ok(Color32::from_rgba_unmultiplied(r, g, b, byte(6)?))
    } else {
        Ok(Color32::from_rgb(r, g, b))
    }
}

/// Format a color as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque
pub fn to_hex_color(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Color32::from_rgb(10, 20, 30);
        let b = Color32::from_rgb(250, 120, 0);

        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
    }

    #[test]
    fn test_lerp_midpoint() {
        let black = Color32::from_rgb(0, 0, 0);
        let white = Color32::from_rgb(200, 100, 50);

        assert_eq!(lerp_color(black, white, 0.5), Color32::from_rgb(100, 50, 25));
    }

    #[test]
    fn test_lerp_clamps_t() {
        let a = Color32::RED;
        let b = Color32::BLUE;

        assert_eq!(lerp_color(a, b, -1.0), a);
        assert_eq!(lerp_color(a, b, 3.0), b);
    }

    #[test]
    fn test_lerp_is_symmetric() {
        let a = Color32::from_rgb(33, 150, 243);
        let b = Color32::from_rgb(158, 158, 158);

        for t in [0.0, 0.125, 0.25, 0.5, 0.75, 0.875, 1.0] {
            assert_eq!(lerp_color(a, b, t), lerp_color(b, a, 1.0 - t), "t = {}", t);
        }
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#9E9E9E").unwrap(), Color32::from_rgb(158, 158, 158));
        assert_eq!(parse_hex_color("2196f3").unwrap(), Color32::from_rgb(33, 150, 243));
        assert_eq!(
            parse_hex_color("#FF000080").unwrap(),
            Color32::from_rgba_unmultiplied(255, 0, 0, 128)
        );
    }

    #[test]
    fn test_parse_hex_color_rejects_garbage() {
        for bad in ["", "#12345", "#GGGGGG", "blue", "#1234567"] {
            assert!(
                matches!(parse_hex_color(bad), Err(StageError::InvalidColor(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_hex_format() {
        assert_eq!(to_hex_color(Color32::from_rgb(33, 150, 243)), "#2196F3");
        assert_eq!(
            parse_hex_color(&to_hex_color(Color32::from_rgb(1, 2, 3))).unwrap(),
            Color32::from_rgb(1, 2, 3)
        );
    }
}
