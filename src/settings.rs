//! Game settings and preferences
//!
//! Physics constants, audio volumes and render quality. Persisted as JSON:
//! a file on native, LocalStorage on the web.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::StartupError;
use crate::sim::WorldConfig;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Triangles used to tessellate the ball
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 24,
            QualityPreset::High => 48,
        }
    }
}

/// Accepted simulation rates; the fixed step stays between 0.1 ms and 1 s
const MIN_PHYSICS_HZ: f64 = 1.0;
const MAX_PHYSICS_HZ: f64 = 10_000.0;
/// Largest accepted frame delta cap in seconds
const MAX_FRAME_DELTA_LIMIT: f64 = 1.0;

/// Physics and world constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub world_width: f64,
    pub world_height: f64,
    /// Share of the world height taken by the ground (0..1)
    pub floor_ratio: f64,
    pub gravity: f64,
    pub force_scale: f64,
    /// Simulation rate in Hz
    pub physics_hz: f64,
    /// Frame delta cap in seconds
    pub max_frame_delta: f64,
    pub move_speed: f64,
    pub ball_radius: i32,
    pub restitution: f64,
    pub horizontal_damping: f64,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            floor_ratio: FLOOR_RATIO,
            gravity: GRAVITY,
            force_scale: FORCE_SCALE,
            physics_hz: PHYSICS_HZ,
            max_frame_delta: MAX_FRAME_DELTA,
            move_speed: MOVE_SPEED,
            ball_radius: BALL_RADIUS,
            restitution: BALL_RESTITUTION,
            horizontal_damping: HORIZONTAL_DAMPING,
        }
    }
}

impl PhysicsSettings {
    fn floor_level(&self) -> f64 {
        self.world_height - self.floor_ratio * self.world_height
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), StartupError> {
        let invalid =
            |msg: String| -> Result<(), StartupError> { Err(StartupError::InvalidConfig(msg)) };

        if !(self.world_width > 0.0
            && self.world_height > 0.0
            && self.world_width.is_finite()
            && self.world_height.is_finite())
        {
            return invalid(format!(
                "world size must be positive, got {}x{}",
                self.world_width, self.world_height
            ));
        }
        if !(0.0..1.0).contains(&self.floor_ratio) {
            return invalid(format!("floor_ratio must be in [0, 1), got {}", self.floor_ratio));
        }
        if !(MIN_PHYSICS_HZ..=MAX_PHYSICS_HZ).contains(&self.physics_hz) {
            return invalid(format!(
                "physics_hz must be in [{}, {}], got {}",
                MIN_PHYSICS_HZ, MAX_PHYSICS_HZ, self.physics_hz
            ));
        }
        if !(self.max_frame_delta > 0.0 && self.max_frame_delta <= MAX_FRAME_DELTA_LIMIT) {
            return invalid(format!(
                "max_frame_delta must be in (0, {}], got {}",
                MAX_FRAME_DELTA_LIMIT, self.max_frame_delta
            ));
        }
        for (name, value) in [
            ("gravity", self.gravity),
            ("force_scale", self.force_scale),
            ("move_speed", self.move_speed),
        ] {
            if !value.is_finite() {
                return invalid(format!("{} must be finite, got {}", name, value));
            }
        }
        if !(0.0..=1.0).contains(&self.horizontal_damping) {
            return invalid(format!(
                "horizontal_damping must be in [0, 1], got {}",
                self.horizontal_damping
            ));
        }
        if self.ball_radius <= 0 {
            return invalid(format!("ball_radius must be positive, got {}", self.ball_radius));
        }
        if !(self.restitution > 0.0 && self.restitution <= 1.0) {
            return invalid(format!("restitution must be in (0, 1], got {}", self.restitution));
        }
        if f64::from(self.ball_radius) * 2.0 > self.floor_level() {
            return invalid(format!(
                "ball of radius {} does not fit above floor at {}",
                self.ball_radius,
                self.floor_level()
            ));
        }
        Ok(())
    }

    /// Derive the simulation's world constants
    pub fn world(&self) -> WorldConfig {
        WorldConfig {
            width: self.world_width,
            height: self.world_height,
            floor_level: self.floor_level(),
            gravity: self.gravity,
            force_scale: self.force_scale,
            fixed_step: Duration::from_secs_f64(1.0 / self.physics_hz),
            max_frame_delta: Duration::from_secs_f64(self.max_frame_delta),
            move_speed: self.move_speed,
            ball_radius: self.ball_radius,
            restitution: self.restitution,
            horizontal_damping: self.horizontal_damping,
            wrap_epsilon: WRAP_EPSILON,
        }
    }
}

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsSettings,
    pub audio: AudioSettings,
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Show the debug text overlay
    pub show_debug: bool,
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, StartupError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.physics.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn world(&self) -> WorldConfig {
        self.physics.world()
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, StartupError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StartupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "kolobok_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.to_json());
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_world_defaults() {
        let settings = Settings::default();
        assert!(settings.physics.validate().is_ok());
        assert_eq!(settings.world(), WorldConfig::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings =
            Settings::from_json(r#"{"physics": {"gravity": 4.9}, "quality": "High"}"#).unwrap();
        assert_eq!(settings.physics.gravity, 4.9);
        assert_eq!(settings.physics.ball_radius, BALL_RADIUS);
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.audio, AudioSettings::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.physics.move_speed = 220.0;
        settings.show_debug = true;
        let parsed = Settings::from_json(&settings.to_json()).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(StartupError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            r#"{"physics": {"restitution": 0.0}}"#,
            r#"{"physics": {"restitution": 1.5}}"#,
            r#"{"physics": {"physics_hz": 0.0}}"#,
            r#"{"physics": {"floor_ratio": 1.0}}"#,
            r#"{"physics": {"ball_radius": 0}}"#,
            r#"{"physics": {"world_width": -5.0}}"#,
            r#"{"physics": {"ball_radius": 400}}"#,
            r#"{"physics": {"physics_hz": 1e-30}}"#,
            r#"{"physics": {"physics_hz": 1e9}}"#,
            r#"{"physics": {"max_frame_delta": 1e30}}"#,
            r#"{"physics": {"max_frame_delta": 0.0}}"#,
            r#"{"physics": {"horizontal_damping": -0.5}}"#,
        ];
        for json in bad {
            assert!(
                matches!(Settings::from_json(json), Err(StartupError::InvalidConfig(_))),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let cases: [fn(&mut PhysicsSettings); 6] = [
            |p| p.world_height = f64::INFINITY,
            |p| p.gravity = f64::INFINITY,
            |p| p.gravity = f64::NAN,
            |p| p.force_scale = f64::NEG_INFINITY,
            |p| p.move_speed = f64::INFINITY,
            |p| p.horizontal_damping = f64::NAN,
        ];
        for (i, edit) in cases.iter().enumerate() {
            let mut physics = PhysicsSettings::default();
            edit(&mut physics);
            assert!(
                matches!(physics.validate(), Err(StartupError::InvalidConfig(_))),
                "case {} accepted",
                i
            );
        }
    }

    #[test]
    fn test_accepted_limits_build_a_world() {
        for json in [
            r#"{"physics": {"physics_hz": 1.0, "max_frame_delta": 1.0}}"#,
            r#"{"physics": {"physics_hz": 10000.0, "max_frame_delta": 0.001}}"#,
        ] {
            let world = Settings::from_json(json).unwrap().world();
            assert!(world.fixed_step > Duration::ZERO);
            assert!(world.max_frame_delta <= Duration::from_secs(1));
        }
    }

    #[test]
    fn test_custom_world() {
        let physics = PhysicsSettings {
            world_width: 640.0,
            world_height: 480.0,
            physics_hz: 120.0,
            ..Default::default()
        };
        let world = physics.world();
        assert!((world.floor_level - 384.0).abs() < 1e-9);
        assert!((world.dt() - 1.0 / 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_quality_preset() {
        assert!(QualityPreset::High.circle_segments() > QualityPreset::Low.circle_segments());
        assert_eq!(QualityPreset::Low.as_str(), "Low");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load_from("/definitely/not/here/kolobok.json").unwrap_err();
        assert!(matches!(err, StartupError::ConfigRead { .. }));
    }
}
