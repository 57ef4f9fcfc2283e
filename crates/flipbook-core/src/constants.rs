//! Shared constants for the flipbook viewer
//!
//! This module centralizes the tuning values used by navigation, zoom and
//! rendering. Most of them are only defaults for [`crate::FlipbookOptions`].

// =============================================================================
// Zoom
// =============================================================================

/// Smallest zoom level a page can be shown at
pub const MIN_ZOOM: f32 = 0.5;

/// Largest zoom level a page can be shown at
pub const MAX_ZOOM: f32 = 3.0;

/// Zoom change applied by one zoom-in/zoom-out step
pub const ZOOM_STEP: f32 = 0.25;

/// Zoom level used when a page is shown unscaled
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Level the double-click toggle switches to
pub const TOGGLE_ZOOM_LEVEL: f32 = 1.5;

// =============================================================================
// Rendering
// =============================================================================

/// Scale factor for base-quality page renders (1.0 = 72 DPI)
pub const BASE_RENDER_SCALE: f32 = 1.5;

/// Scale factor for thumbnail renders
pub const THUMBNAIL_SCALE: f32 = 0.2;

/// Zoom level above which a high-quality render of the current page is made
pub const HIGH_QUALITY_THRESHOLD: f32 = 1.2;

/// Extra oversampling applied on top of `base_scale * zoom` for high-quality renders
pub const HIGH_QUALITY_MULTIPLIER: f32 = 1.5;

// =============================================================================
// Animation
// =============================================================================

/// Duration of a page-turn animation in milliseconds
pub const FLIP_DURATION_MS: u64 = 1000;

/// Rotation (degrees around the Y axis) of a page that has been turned over
pub const TURNED_ROTATION_DEG: f32 = 180.0;

/// Stacking order of the page being looked at
pub const Z_INDEX_FRONT: i32 = 2;

/// Stacking order of a page directly behind (or leaving) the front page
pub const Z_INDEX_BEHIND: i32 = 1;

/// Stacking order of pages already turned
pub const Z_INDEX_TURNED: i32 = 0;
