use crate::constants::*;
use crate::types::*;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Flipbook viewer configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlipbookOptions {
    // Document location (optional; callers may pass one directly)
    pub source: Option<DocumentInput>,

    // Rendering
    pub base_scale: f32,
    pub thumbnail_scale: f32,
    pub high_quality_threshold: f32,
    pub high_quality_multiplier: f32,

    // Zoom
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,
    pub toggle_zoom_level: f32,
    pub zoom_during_transition: bool,

    // Animation
    pub flip_duration_ms: u64,
}

impl Default for FlipbookOptions {
    fn default() -> Self {
        Self {
            source: None,
            base_scale: BASE_RENDER_SCALE,
            thumbnail_scale: THUMBNAIL_SCALE,
            high_quality_threshold: HIGH_QUALITY_THRESHOLD,
            high_quality_multiplier: HIGH_QUALITY_MULTIPLIER,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            toggle_zoom_level: TOGGLE_ZOOM_LEVEL,
            zoom_during_transition: true,
            flip_duration_ms: FLIP_DURATION_MS,
        }
    }
}

impl FlipbookOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| FlipbookError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| FlipbookError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn flip_duration(&self) -> Duration {
        Duration::from_millis(self.flip_duration_ms)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("base_scale", self.base_scale),
            ("thumbnail_scale", self.thumbnail_scale),
            ("high_quality_multiplier", self.high_quality_multiplier),
            ("zoom_step", self.zoom_step),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FlipbookError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if !self.min_zoom.is_finite() || !self.max_zoom.is_finite() {
            return Err(FlipbookError::Config(
                "Zoom limits must be finite".to_string(),
            ));
        }

        if self.min_zoom <= 0.0 || self.min_zoom > DEFAULT_ZOOM || self.max_zoom < DEFAULT_ZOOM {
            return Err(FlipbookError::Config(format!(
                "Zoom range {}..={} must be positive and include {}",
                self.min_zoom, self.max_zoom, DEFAULT_ZOOM
            )));
        }

        if !(self.min_zoom..=self.max_zoom).contains(&self.toggle_zoom_level) {
            return Err(FlipbookError::Config(format!(
                "Toggle zoom level {} is outside {}..={}",
                self.toggle_zoom_level, self.min_zoom, self.max_zoom
            )));
        }

        if !self.high_quality_threshold.is_finite() {
            return Err(FlipbookError::Config(
                "high_quality_threshold must be finite".to_string(),
            ));
        }

        Ok(())
    }
}
