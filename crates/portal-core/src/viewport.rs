use crate::error::PickError;
use glam::Vec2;

/// Viewport size in the same units as the pointer coordinates (CSS pixels).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, PickError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(PickError::InvalidViewport { width, height })
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Map a screen point to normalized device coordinates (y up).
    #[inline]
    pub fn to_ndc(&self, screen_x: f32, screen_y: f32) -> Vec2 {
        Vec2::new(
            (screen_x / self.width) * 2.0 - 1.0,
            -(screen_y / self.height) * 2.0 + 1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(Viewport::new(0.0, 600.0).is_err());
        assert!(Viewport::new(800.0, -1.0).is_err());
        assert!(Viewport::new(f32::NAN, 600.0).is_err());
        assert!(Viewport::new(f32::INFINITY, 600.0).is_err());
        assert_eq!(
            Viewport::new(0.0, 0.0),
            Err(PickError::InvalidViewport {
                width: 0.0,
                height: 0.0
            })
        );
    }

    #[test]
    fn corners_and_center_map_to_ndc_extremes() {
        let vp = Viewport::new(800.0, 600.0).unwrap();
        assert_eq!(vp.to_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(vp.to_ndc(400.0, 300.0), Vec2::ZERO);
    }
}
