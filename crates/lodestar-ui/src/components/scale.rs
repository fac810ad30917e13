use lodestar_engine::coords::Size;

use crate::anchor;

/// Authored size plus a uniform scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleComponent {
    size: Size,
    scale: f32,
}

impl Default for ScaleComponent {
    fn default() -> Self {
        Self { size: Size::zero(), scale: 1.0 }
    }
}

impl ScaleComponent {
    pub fn new(size: Size) -> Self {
        Self { size, ..Self::default() }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.set_scale(scale);
        self
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Negative extents are clamped to zero.
    pub fn set_size(&mut self, size: Size) {
        self.size = Size::new(size.width, size.height);
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Ignores non-positive and NaN factors.
    pub fn set_scale(&mut self, scale: f32) {
        if scale > 0.0 && scale.is_finite() {
            self.scale = scale;
        } else {
            log::debug!("ignoring scale {scale}");
        }
    }

    /// Size in pixels after scaling.
    pub fn scaled_size(&self) -> Size {
        anchor::draw_size(self.size, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_scale() {
        let mut s = ScaleComponent::new(Size::new(10, 10));
        s.set_scale(2.0);
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            s.set_scale(bad);
        }
        assert_eq!(s.scale(), 2.0);
        assert_eq!(s.scaled_size(), Size::new(20, 20));
    }

    #[test]
    fn negative_size_is_clamped() {
        let mut s = ScaleComponent::default();
        s.set_size(Size { width: -5, height: 3 });
        assert_eq!(s.size(), Size::new(0, 3));
    }
}
