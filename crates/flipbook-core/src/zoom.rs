//! Zoom level and pan offset of the page being viewed.

use crate::constants::*;
use crate::options::FlipbookOptions;

/// Pan offset in presentation pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pan {
    pub x: f32,
    pub y: f32,
}

impl Pan {
    pub const ZERO: Pan = Pan { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Allowed zoom range and step size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
            step: ZOOM_STEP,
        }
    }
}

impl From<&FlipbookOptions> for ZoomLimits {
    fn from(options: &FlipbookOptions) -> Self {
        Self {
            min: options.min_zoom,
            max: options.max_zoom,
            step: options.zoom_step,
        }
    }
}

impl ZoomLimits {
    pub fn clamp(&self, level: f32) -> f32 {
        level.clamp(self.min, self.max)
    }
}

/// Current zoom level and pan.
///
/// Pan only means something while zoomed in: whenever the level drops back to
/// 1.0 or below the offset is reset to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    level: f32,
    pan: Pan,
    limits: ZoomLimits,
}

impl ZoomState {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            level: DEFAULT_ZOOM,
            pan: Pan::ZERO,
            limits,
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn pan(&self) -> Pan {
        self.pan
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Zoom level as a rounded percentage for display
    pub fn percent(&self) -> u32 {
        (self.level * 100.0).round() as u32
    }

    pub fn is_zoomed_in(&self) -> bool {
        self.level > DEFAULT_ZOOM
    }

    /// Move by a signed number of zoom steps; returns the clamped level
    pub fn adjust(&mut self, steps: i32) -> f32 {
        self.set(self.level + steps as f32 * self.limits.step)
    }

    /// Jump to an absolute level; returns the clamped level. Non-finite input
    /// leaves the state untouched.
    pub fn set(&mut self, level: f32) -> f32 {
        if !level.is_finite() {
            return self.level;
        }
        self.level = self.limits.clamp(level);
        if !self.is_zoomed_in() {
            self.pan = Pan::ZERO;
        }
        self.level
    }

    pub fn reset(&mut self) {
        self.level = DEFAULT_ZOOM;
        self.pan = Pan::ZERO;
    }

    /// Double-click behaviour: unzoomed goes to `zoomed_level`, anything else resets
    pub fn toggle(&mut self, zoomed_level: f32) -> f32 {
        if self.level == DEFAULT_ZOOM {
            self.set(zoomed_level)
        } else {
            self.reset();
            self.level
        }
    }

    /// Drag while zoomed in. Returns false (and ignores the delta) when not zoomed in.
    pub fn pan_by(&mut self, dx: f32, dy: f32) -> bool {
        if !self.is_zoomed_in() || !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        self.pan.x += dx;
        self.pan.y += dy;
        true
    }
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_steps() {
        let mut zoom = ZoomState::default();
        assert_eq!(zoom.adjust(1), 1.25);
        assert_eq!(zoom.adjust(1), 1.5);
        assert_eq!(zoom.adjust(1), 1.75);
        assert_eq!(zoom.percent(), 175);
    }

    #[test]
    fn test_adjust_clamps() {
        let mut zoom = ZoomState::default();
        for _ in 0..50 {
            zoom.adjust(1);
        }
        assert_eq!(zoom.level(), MAX_ZOOM);

        assert_eq!(zoom.adjust(-1000), MIN_ZOOM);
        assert_eq!(zoom.adjust(i32::MIN), MIN_ZOOM);
        assert_eq!(zoom.adjust(i32::MAX), MAX_ZOOM);
    }

    #[test]
    fn test_set_ignores_nan() {
        let mut zoom = ZoomState::default();
        zoom.set(2.0);
        assert_eq!(zoom.set(f32::NAN), 2.0);
        assert_eq!(zoom.set(f32::INFINITY), 2.0);
    }

    #[test]
    fn test_pan_only_when_zoomed_in() {
        let mut zoom = ZoomState::default();
        assert!(!zoom.pan_by(10.0, 5.0));
        assert_eq!(zoom.pan(), Pan::ZERO);

        zoom.set(2.0);
        assert!(zoom.pan_by(10.0, 5.0));
        assert!(zoom.pan_by(-4.0, 1.0));
        assert_eq!(zoom.pan(), Pan::new(6.0, 6.0));
    }

    #[test]
    fn test_pan_resets_when_zoom_returns_to_one() {
        let mut zoom = ZoomState::default();
        zoom.set(2.0);
        zoom.pan_by(10.0, 10.0);

        zoom.adjust(-4);
        assert_eq!(zoom.level(), 1.0);
        assert_eq!(zoom.pan(), Pan::ZERO);
    }

    #[test]
    fn test_toggle() {
        let mut zoom = ZoomState::default();
        assert_eq!(zoom.toggle(TOGGLE_ZOOM_LEVEL), 1.5);
        zoom.pan_by(3.0, 3.0);
        assert_eq!(zoom.toggle(TOGGLE_ZOOM_LEVEL), 1.0);
        assert_eq!(zoom.pan(), Pan::ZERO);

        // Zoomed out below 1 also toggles back to 1
        zoom.set(0.5);
        assert_eq!(zoom.toggle(TOGGLE_ZOOM_LEVEL), 1.0);
    }

    #[test]
    fn test_reset() {
        let mut zoom = ZoomState::default();
        zoom.set(3.0);
        zoom.pan_by(100.0, -50.0);
        zoom.reset();
        assert_eq!(zoom.level(), 1.0);
        assert_eq!(zoom.pan(), Pan::ZERO);
    }
}
