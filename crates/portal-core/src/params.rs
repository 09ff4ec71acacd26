//! Out-of-band tweakable scene parameters (the debug panel's model).

use crate::constants::{
    CLEAR_COLOR, FIREFLY_SIZE_DEFAULT, FIREFLY_SIZE_MAX, FIREFLY_SIZE_MIN, PIXEL_RATIO_MAX,
    PORTAL_COLOR_END, PORTAL_COLOR_START,
};
use crate::error::ParamError;

/// Linear-space RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Parse `#rrggbb` (sRGB) into linear RGB.
    pub fn from_hex(s: &str) -> Result<Self, ParamError> {
        let err = || ParamError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| srgb_to_linear(v as f32 / 255.0))
                .map_err(|_| err())
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.077_399_38
    } else {
        ((c * 0.947_867_3) + 0.052_132_7).powf(2.4)
    }
}

/// Screen pixel ratio capped at `PIXEL_RATIO_MAX`.
#[inline]
pub fn capped_pixel_ratio(device_pixel_ratio: f64) -> f32 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        (device_pixel_ratio as f32).min(PIXEL_RATIO_MAX)
    } else {
        1.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    pub portal_color_start: Rgb,
    pub portal_color_end: Rgb,
    pub clear_color: Rgb,
    fireflies_size: f32,
    pub pixel_ratio: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            portal_color_start: Rgb::from_hex(PORTAL_COLOR_START).unwrap_or(Rgb::BLACK),
            portal_color_end: Rgb::from_hex(PORTAL_COLOR_END).unwrap_or(Rgb::BLACK),
            clear_color: Rgb::from_hex(CLEAR_COLOR).unwrap_or(Rgb::BLACK),
            fireflies_size: FIREFLY_SIZE_DEFAULT,
            pixel_ratio: 1.0,
        }
    }
}

impl SceneParams {
    /// Both colours are validated before either is applied.
    pub fn set_portal_colors(&mut self, start: &str, end: &str) -> Result<(), ParamError> {
        let start = Rgb::from_hex(start)?;
        let end = Rgb::from_hex(end)?;
        self.portal_color_start = start;
        self.portal_color_end = end;
        Ok(())
    }

    pub fn set_clear_color(&mut self, hex: &str) -> Result<(), ParamError> {
        self.clear_color = Rgb::from_hex(hex)?;
        Ok(())
    }

    pub fn fireflies_size(&self) -> f32 {
        self.fireflies_size
    }

    /// Clamped to the panel's slider range; non-finite input is ignored.
    pub fn set_fireflies_size(&mut self, size: f32) {
        if size.is_finite() {
            self.fireflies_size = size.clamp(FIREFLY_SIZE_MIN, FIREFLY_SIZE_MAX);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_into_linear_space() {
        let white = Rgb::from_hex("#ffffff").unwrap();
        assert!((white.r - 1.0).abs() < 1e-5);
        let black = Rgb::from_hex("#000000").unwrap();
        assert_eq!(black, Rgb::BLACK);
        // sRGB mid-grey is darker in linear space.
        let grey = Rgb::from_hex("#808080").unwrap();
        assert!((grey.g - 0.2158).abs() < 1e-3);
        let upper = Rgb::from_hex("#FFFFE5").unwrap();
        assert!(upper.b < upper.r);
    }

    #[test]
    fn rejects_malformed_colours() {
        for bad in [
            "ffffff", "#fff", "#gggggg", "#ffffff0", "", "#ééé", "#+f+f+f", "#-1-1-1",
        ] {
            assert_eq!(
                Rgb::from_hex(bad),
                Err(ParamError::InvalidColor(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn invalid_portal_colour_leaves_both_unchanged() {
        let mut p = SceneParams::default();
        let before = p.clone();
        assert!(p.set_portal_colors("#ff0000", "nope").is_err());
        assert_eq!(p, before);
        p.set_portal_colors("#ff0000", "#00ff00").unwrap();
        assert!((p.portal_color_start.r - 1.0).abs() < 1e-5);
        assert!((p.portal_color_end.g - 1.0).abs() < 1e-5);
    }

    #[test]
    fn fireflies_size_is_clamped() {
        let mut p = SceneParams::default();
        assert_eq!(p.fireflies_size(), 100.0);
        p.set_fireflies_size(0.0);
        assert_eq!(p.fireflies_size(), 1.0);
        p.set_fireflies_size(9000.0);
        assert_eq!(p.fireflies_size(), 500.0);
        p.set_fireflies_size(f32::NAN);
        assert_eq!(p.fireflies_size(), 500.0);
    }

    #[test]
    fn pixel_ratio_is_capped() {
        assert_eq!(capped_pixel_ratio(3.0), 2.0);
        assert_eq!(capped_pixel_ratio(1.5), 1.5);
        assert_eq!(capped_pixel_ratio(0.0), 1.0);
    }
}
