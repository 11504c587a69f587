//! Thresholds and switches of the gesture recognizer, and loading them from TOML.
//!
//! ```toml
//! prevent_default_on_match = true
//!
//! [drag]
//! vertical = false
//! min_distance = 30.0
//!
//! [hold]
//! timeout_ms = 750
//! ```
//!
//! Every key is optional, a missing key keeps its default.
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Prevent the native default action as soon as a session starts.
    pub prevent_default_on_match: bool,

    pub swipe_enabled: bool,
    /// A swipe session must be shorter than this.
    pub swipe_max_time: Duration,
    pub swipe_min_distance: f64,

    pub drag_enabled: bool,
    pub drag_vertical: bool,
    pub drag_horizontal: bool,
    pub drag_min_distance: f64,

    pub transform_enabled: bool,
    /// `|1 - scale|` must exceed this to confirm a transform.
    pub scale_threshold: f64,
    /// `|rotation|` in degrees must exceed this to confirm a transform.
    pub rotation_threshold: f64,

    pub tap_enabled: bool,
    pub tap_double_enabled: bool,
    /// Maximum gap between the end of a tap and the start of the next to merge them.
    pub tap_max_interval: Duration,
    pub tap_max_distance: f64,
    pub tap_double_max_distance: f64,

    pub hold_enabled: bool,
    pub hold_timeout: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            prevent_default_on_match: false,

            swipe_enabled: true,
            swipe_max_time: Duration::from_millis(200),
            swipe_min_distance: 20.0,

            drag_enabled: true,
            drag_vertical: true,
            drag_horizontal: true,
            drag_min_distance: 20.0,

            transform_enabled: true,
            scale_threshold: 0.1,
            rotation_threshold: 15.0,

            tap_enabled: true,
            tap_double_enabled: true,
            tap_max_interval: Duration::from_millis(300),
            tap_max_distance: 10.0,
            tap_double_max_distance: 20.0,

            hold_enabled: true,
            hold_timeout: Duration::from_millis(500),
        }
    }
}

impl GestureConfig {
    /// Parses a configuration from TOML and validates it.
    pub fn from_toml(toml: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(toml).context("Failed to parse TOML gesture configuration")?;
        let config = file.into_config();
        config.validate()?;
        Ok(config)
    }

    /// Rejects distances and thresholds that are negative or not finite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("swipe.min_distance", self.swipe_min_distance),
            ("drag.min_distance", self.drag_min_distance),
            ("transform.scale_threshold", self.scale_threshold),
            ("transform.rotation_threshold", self.rotation_threshold),
            ("tap.max_distance", self.tap_max_distance),
            ("tap.double_max_distance", self.tap_double_max_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("Gesture threshold `{name}` must be a finite, non-negative number, got {value}");
            }
        }
        Ok(())
    }
}

/// Intermediate representation for deserializing TOML configuration files.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    prevent_default_on_match: Option<bool>,
    #[serde(default)]
    swipe: SwipeSection,
    #[serde(default)]
    drag: DragSection,
    #[serde(default)]
    transform: TransformSection,
    #[serde(default)]
    tap: TapSection,
    #[serde(default)]
    hold: HoldSection,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SwipeSection {
    enabled: Option<bool>,
    max_time_ms: Option<u64>,
    min_distance: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DragSection {
    enabled: Option<bool>,
    vertical: Option<bool>,
    horizontal: Option<bool>,
    min_distance: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TransformSection {
    enabled: Option<bool>,
    scale_threshold: Option<f64>,
    rotation_threshold: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TapSection {
    enabled: Option<bool>,
    double_enabled: Option<bool>,
    max_interval_ms: Option<u64>,
    max_distance: Option<f64>,
    double_max_distance: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct HoldSection {
    enabled: Option<bool>,
    timeout_ms: Option<u64>,
}

impl ConfigFile {
    fn into_config(self) -> GestureConfig {
        let d = GestureConfig::default();
        let ms = Duration::from_millis;

        GestureConfig {
            prevent_default_on_match: self
                .prevent_default_on_match
                .unwrap_or(d.prevent_default_on_match),

            swipe_enabled: self.swipe.enabled.unwrap_or(d.swipe_enabled),
            swipe_max_time: self.swipe.max_time_ms.map_or(d.swipe_max_time, ms),
            swipe_min_distance: self.swipe.min_distance.unwrap_or(d.swipe_min_distance),

            drag_enabled: self.drag.enabled.unwrap_or(d.drag_enabled),
            drag_vertical: self.drag.vertical.unwrap_or(d.drag_vertical),
            drag_horizontal: self.drag.horizontal.unwrap_or(d.drag_horizontal),
            drag_min_distance: self.drag.min_distance.unwrap_or(d.drag_min_distance),

            transform_enabled: self.transform.enabled.unwrap_or(d.transform_enabled),
            scale_threshold: self.transform.scale_threshold.unwrap_or(d.scale_threshold),
            rotation_threshold: self
                .transform
                .rotation_threshold
                .unwrap_or(d.rotation_threshold),

            tap_enabled: self.tap.enabled.unwrap_or(d.tap_enabled),
            tap_double_enabled: self.tap.double_enabled.unwrap_or(d.tap_double_enabled),
            tap_max_interval: self.tap.max_interval_ms.map_or(d.tap_max_interval, ms),
            tap_max_distance: self.tap.max_distance.unwrap_or(d.tap_max_distance),
            tap_double_max_distance: self
                .tap
                .double_max_distance
                .unwrap_or(d.tap_double_max_distance),

            hold_enabled: self.hold.enabled.unwrap_or(d.hold_enabled),
            hold_timeout: self.hold.timeout_ms.map_or(d.hold_timeout, ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        assert_eq!(GestureConfig::from_toml("").unwrap(), GestureConfig::default());
    }

    #[test]
    fn sections_override_defaults() {
        let toml = r#"
prevent_default_on_match = true

[swipe]
max_time_ms = 250

[drag]
vertical = false
min_distance = 30.0

[tap]
double_enabled = false

[hold]
enabled = false
timeout_ms = 750
"#;
        let config = GestureConfig::from_toml(toml).unwrap();
        assert!(config.prevent_default_on_match);
        assert_eq!(config.swipe_max_time, Duration::from_millis(250));
        assert_eq!(config.swipe_min_distance, 20.0);
        assert!(!config.drag_vertical);
        assert!(config.drag_horizontal);
        assert_eq!(config.drag_min_distance, 30.0);
        assert!(!config.tap_double_enabled);
        assert!(config.tap_enabled);
        assert!(!config.hold_enabled);
        assert_eq!(config.hold_timeout, Duration::from_millis(750));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = GestureConfig::from_toml("[drag]\nminimum = 3.0\n").unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse TOML gesture configuration"));
    }

    #[test]
    fn negative_thresholds_are_rejected() {
        let err = GestureConfig::from_toml("[tap]\nmax_distance = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("tap.max_distance"));
    }

    #[test]
    fn non_finite_thresholds_are_rejected() {
        let config = GestureConfig {
            scale_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(GestureConfig::default().validate().is_ok());
    }
}
