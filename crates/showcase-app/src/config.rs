// crates/showcase-app/src/config.rs
// Page configuration, read from an embedded JSON block

use serde::{Deserialize, Serialize};
use showcase_types::DEFAULT_MAX_QUOTE_CHARS;

use crate::error::{Result, WidgetError};
use crate::fragments::{FragmentSource, default_fragments};

/// Id of the `<script type="application/json">` element holding the config
pub const CONFIG_ELEMENT_ID: &str = "showcase-config";

// ═══════════════════════════════════════
// TOP LEVEL
// ═══════════════════════════════════════

/// Widget configuration for one page. Every field is optional in JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub log_level: String,
    pub smooth_scroll: bool,
    pub carousel: CarouselConfig,
    pub slider: SliderConfig,
    pub fragments: Vec<FragmentSource>,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            smooth_scroll: true,
            carousel: CarouselConfig::default(),
            slider: SliderConfig::default(),
            fragments: default_fragments(),
        }
    }
}

impl ShowcaseConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WidgetError::Config(e.to_string()))?;
        Ok(config.sanitized())
    }

    /// Zero-length timer periods replaced by their defaults
    pub fn sanitized(mut self) -> Self {
        self.carousel = self.carousel.sanitized();
        self.slider = self.slider.sanitized();
        self
    }

    /// Parsed log level, falling back to `Info` for unknown names
    pub fn log_level(&self) -> log::Level {
        self.log_level.trim().parse().unwrap_or(log::Level::Info)
    }
}

// ═══════════════════════════════════════
// CAROUSEL
// ═══════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CarouselConfig {
    pub selectors: CarouselSelectors,
    /// Auto-rotate period on wide viewports
    pub rotate_interval_ms: u32,
    pub medium_interval_ms: u32,
    pub narrow_interval_ms: u32,
    pub medium_max_width: f64,
    pub narrow_max_width: f64,
    /// Quiet period after interaction before auto-rotation resumes
    pub inactivity_delay_ms: u32,
    /// Horizontal travel a swipe must exceed to navigate
    pub swipe_min_distance: f64,
    /// Travel after which a gesture is classified as horizontal or vertical
    pub swipe_lock_distance: f64,
    pub max_quote_chars: usize,
    /// Window events that count as user activity
    pub activity_events: Vec<String>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            selectors: CarouselSelectors::default(),
            rotate_interval_ms: 5000,
            medium_interval_ms: 5500,
            narrow_interval_ms: 6000,
            medium_max_width: 768.0,
            narrow_max_width: 480.0,
            inactivity_delay_ms: 3000,
            swipe_min_distance: 50.0,
            swipe_lock_distance: 10.0,
            max_quote_chars: DEFAULT_MAX_QUOTE_CHARS,
            activity_events: vec!["scroll".to_string(), "keydown".to_string(), "wheel".to_string()],
        }
    }
}

impl CarouselConfig {
    /// A zero period would fire the browser timer back to back, so every
    /// zero timing falls back to its default.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        for (name, value, default) in [
            ("rotate_interval_ms", &mut self.rotate_interval_ms, defaults.rotate_interval_ms),
            ("medium_interval_ms", &mut self.medium_interval_ms, defaults.medium_interval_ms),
            ("narrow_interval_ms", &mut self.narrow_interval_ms, defaults.narrow_interval_ms),
            ("inactivity_delay_ms", &mut self.inactivity_delay_ms, defaults.inactivity_delay_ms),
        ] {
            if *value == 0 {
                log::warn!("carousel.{} must be positive, using {}", name, default);
                *value = default;
            }
        }
        self
    }

    /// Auto-rotate period for a viewport of `width` CSS pixels
    pub fn interval_for_width(&self, width: f64) -> u32 {
        if width <= self.narrow_max_width {
            self.narrow_interval_ms
        } else if width <= self.medium_max_width {
            self.medium_interval_ms
        } else {
            self.rotate_interval_ms
        }
    }
}

/// Selectors for the carousel regions. `mount` is queried on the document,
/// the rest inside the mount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CarouselSelectors {
    pub mount: String,
    pub quote: String,
    pub author: String,
    pub context: String,
    pub nav: String,
    pub prev: String,
    pub next: String,
    pub dots: String,
}

impl Default for CarouselSelectors {
    fn default() -> Self {
        Self {
            mount: ".review-carousel".to_string(),
            quote: ".review-quote".to_string(),
            author: ".review-author".to_string(),
            context: ".review-context".to_string(),
            nav: ".carousel-nav".to_string(),
            prev: ".carousel-prev".to_string(),
            next: ".carousel-next".to_string(),
            dots: ".carousel-dots".to_string(),
        }
    }
}

// ═══════════════════════════════════════
// SLIDER
// ═══════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SliderConfig {
    pub container: String,
    pub after_image: String,
    pub handle: String,
    pub demo_enabled: bool,
    pub demo_delay_ms: u32,
    pub demo_step_ms: u32,
    pub demo_duration_ms: u32,
    pub demo_step: f64,
    pub demo_min: f64,
    pub demo_max: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            container: ".image-slider".to_string(),
            after_image: ".after-image".to_string(),
            handle: ".slider-handle".to_string(),
            demo_enabled: true,
            demo_delay_ms: 1000,
            demo_step_ms: 100,
            demo_duration_ms: 5000,
            demo_step: 2.0,
            demo_min: 20.0,
            demo_max: 80.0,
        }
    }
}

impl SliderConfig {
    pub fn sanitized(mut self) -> Self {
        if self.demo_step_ms == 0 {
            let default = Self::default().demo_step_ms;
            log::warn!("slider.demo_step_ms must be positive, using {}", default);
            self.demo_step_ms = default;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.carousel.rotate_interval_ms, 5000);
        assert_eq!(config.carousel.inactivity_delay_ms, 3000);
        assert_eq!(config.fragments.len(), 3);
        assert!(config.smooth_scroll);
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r##"{
            "log_level": "debug",
            "carousel": { "rotate_interval_ms": 7000, "selectors": { "mount": "#reviews" } }
        }"##;
        let config = ShowcaseConfig::from_json(json).unwrap();
        assert_eq!(config.log_level(), log::Level::Debug);
        assert_eq!(config.carousel.rotate_interval_ms, 7000);
        assert_eq!(config.carousel.narrow_interval_ms, 6000);
        assert_eq!(config.carousel.selectors.mount, "#reviews");
        assert_eq!(config.carousel.selectors.quote, ".review-quote");
        assert_eq!(config.slider, SliderConfig::default());
    }

    #[test]
    fn test_zero_intervals_fall_back_to_defaults() {
        let json = r#"{
            "carousel": { "rotate_interval_ms": 0, "narrow_interval_ms": 0, "medium_interval_ms": 4000 },
            "slider": { "demo_step_ms": 0 }
        }"#;
        let config = ShowcaseConfig::from_json(json).unwrap();
        assert_eq!(config.carousel.rotate_interval_ms, 5000);
        assert_eq!(config.carousel.narrow_interval_ms, 6000);
        assert_eq!(config.carousel.medium_interval_ms, 4000);
        assert_eq!(config.slider.demo_step_ms, 100);
    }

    #[test]
    fn test_zero_inactivity_delay_falls_back() {
        let config = CarouselConfig {
            inactivity_delay_ms: 0,
            ..Default::default()
        };
        let config = config.sanitized();
        assert_eq!(config.inactivity_delay_ms, 3000);
        assert_eq!(config, CarouselConfig::default());
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = ShowcaseConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, WidgetError::Config(_)));
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = ShowcaseConfig {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn test_interval_for_width() {
        let config = CarouselConfig::default();
        assert_eq!(config.interval_for_width(375.0), 6000);
        assert_eq!(config.interval_for_width(480.0), 6000);
        assert_eq!(config.interval_for_width(600.0), 5500);
        assert_eq!(config.interval_for_width(768.0), 5500);
        assert_eq!(config.interval_for_width(1440.0), 5000);
    }
}
