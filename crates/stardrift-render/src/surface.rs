//! Surface dimension tracking that normalizes platform resize behavior.
//!
//! Wayland can report zero-size windows before the compositor assigns a
//! size, and macOS/Windows report DPI scale changes separately from
//! resizes. [`SurfaceWrapper`] clamps and deduplicates both into plain
//! physical-pixel dimensions for the GPU surface.

/// Minimum surface dimension (prevents zero-size panics).
pub const MIN_SURFACE_DIMENSION: u32 = 1;

/// Tracks the physical pixel dimensions and scale factor of the surface.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceWrapper {
    physical_width: u32,
    physical_height: u32,
    scale_factor: f64,
}

impl SurfaceWrapper {
    /// Create from initial physical dimensions and scale factor; zero
    /// dimensions are clamped to 1.
    pub fn new(physical_width: u32, physical_height: u32, scale_factor: f64) -> Self {
        Self {
            physical_width: physical_width.max(MIN_SURFACE_DIMENSION),
            physical_height: physical_height.max(MIN_SURFACE_DIMENSION),
            scale_factor,
        }
    }

    /// Handle a window resize. Returns the new clamped dimensions if they
    /// actually changed.
    pub fn handle_resize(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        let width = width.max(MIN_SURFACE_DIMENSION);
        let height = height.max(MIN_SURFACE_DIMENSION);
        if width == self.physical_width && height == self.physical_height {
            return None;
        }
        self.physical_width = width;
        self.physical_height = height;
        Some((width, height))
    }

    /// Handle a DPI scale factor change, which arrives with fresh inner
    /// dimensions from the window.
    pub fn handle_scale_factor_changed(
        &mut self,
        scale_factor: f64,
        width: u32,
        height: u32,
    ) -> Option<(u32, u32)> {
        self.scale_factor = scale_factor;
        self.handle_resize(width, height)
    }

    /// Current physical width in pixels.
    pub fn physical_width(&self) -> u32 {
        self.physical_width
    }

    /// Current physical height in pixels.
    pub fn physical_height(&self) -> u32 {
        self.physical_height
    }

    /// Current DPI scale factor.
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_clamped() {
        let wrapper = SurfaceWrapper::new(0, 0, 1.0);
        assert_eq!(wrapper.physical_width(), 1);
        assert_eq!(wrapper.physical_height(), 1);
    }

    #[test]
    fn test_resize_reports_change() {
        let mut wrapper = SurfaceWrapper::new(1200, 800, 1.0);
        assert_eq!(wrapper.handle_resize(1920, 1080), Some((1920, 1080)));
        assert_eq!(wrapper.physical_width(), 1920);
    }

    #[test]
    fn test_same_size_resize_is_deduplicated() {
        let mut wrapper = SurfaceWrapper::new(1200, 800, 1.0);
        assert_eq!(wrapper.handle_resize(1200, 800), None);
    }

    #[test]
    fn test_scale_change_updates_factor() {
        let mut wrapper = SurfaceWrapper::new(1200, 800, 1.0);
        let changed = wrapper.handle_scale_factor_changed(2.0, 2400, 1600);
        assert_eq!(changed, Some((2400, 1600)));
        assert!((wrapper.scale_factor() - 2.0).abs() < f64::EPSILON);
    }
}
