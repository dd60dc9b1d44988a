//! Explorer configuration.
//!
//! Everything tunable lives in one [`ExplorerConfig`] persisted as RON.
//! Loading tries `explorer_config.ron` in the working directory, then the
//! embedded `default_explorer_config.ron`, then the hardcoded defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::levels::ScaleLevel;

const CONFIG_FILE: &str = "explorer_config.ron";

/// Camera placement relative to the anchor when a level is entered.
///
/// target = anchor + `target_offset`, eye = target + `eye_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FramingRule {
    pub target_offset: Vec3,
    pub eye_offset: Vec3,
}

impl FramingRule {
    pub const fn new(target_offset: Vec3, eye_offset: Vec3) -> Self {
        Self {
            target_offset,
            eye_offset,
        }
    }

    /// Resolve the rule against an anchor, returning `(target, eye)`.
    pub fn resolve(&self, anchor: Vec3) -> (Vec3, Vec3) {
        let target = anchor + self.target_offset;
        (target, target + self.eye_offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelSettings {
    pub framing: FramingRule,
    /// Idle rotation about the subtree's Y axis, radians per second.
    pub idle_spin: f32,
}

impl LevelSettings {
    /// Built-in settings for a level.
    pub fn default_for(level: ScaleLevel) -> Self {
        let (target_offset, eye_offset, idle_spin) = match level {
            ScaleLevel::Cell => (Vec3::ZERO, Vec3::new(0.0, 0.0, 800.0), 0.006),
            ScaleLevel::Nucleus => (Vec3::ZERO, Vec3::new(0.0, 0.0, 300.0), 0.012),
            ScaleLevel::Chromosome => (Vec3::ZERO, Vec3::new(0.0, 0.0, 550.0), 0.018),
            ScaleLevel::ChromatinFiber => (Vec3::ZERO, Vec3::new(0.0, 0.0, 400.0), 0.03),
            ScaleLevel::Chromatin => (Vec3::new(0.0, 45.0, 0.0), Vec3::new(0.0, 5.0, 200.0), 0.06),
            ScaleLevel::Dna => (Vec3::ZERO, Vec3::new(0.0, 0.0, 70.0), 0.3),
            ScaleLevel::Transcription => (Vec3::ZERO, Vec3::new(50.0, 0.0, 80.0), 0.0),
        };
        Self {
            framing: FramingRule::new(target_offset, eye_offset),
            idle_spin,
        }
    }
}

/// Orbit camera tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub orbit_sensitivity: f32,
    pub zoom_speed: f32,
    pub enable_spring: bool,
    pub spring_stiffness: f32,
    pub spring_damping: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 2000.0,
            orbit_sensitivity: 0.005,
            zoom_speed: 0.2,
            enable_spring: true,
            spring_stiffness: 50.0,
            spring_damping: 0.9,
        }
    }
}

/// Emissive intensities applied to hovered objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightSettings {
    /// Ordinary objects and whole nucleotide groups.
    pub hover: f32,
    /// A hovered part without a group, e.g. a hydrogen bond.
    pub lone_bond: f32,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            hover: 0x55 as f32 / 255.0,
            lone_bond: 0xaa as f32 / 255.0,
        }
    }
}

/// Transcription animation tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Path fraction advanced per tick.
    pub progress_step: f32,
    /// Minimum distance between consecutive strand points.
    pub threshold: f32,
    /// Maximum number of strand points kept.
    pub capacity: usize,
    /// Offset from the polymerase to a new strand point.
    pub strand_offset: Vec3,
    /// Downward drift per queued point.
    pub sag: f32,
    pub tube_radius: f32,
    pub tube_segments: usize,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            progress_step: 0.001,
            threshold: 1.0,
            capacity: 30,
            strand_offset: Vec3::new(15.0, 0.0, 0.0),
            sag: 0.5,
            tube_radius: 0.3,
            tube_segments: 32,
        }
    }
}

/// Top-level explorer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub camera: CameraSettings,
    /// Per-level overrides. Missing levels use [`LevelSettings::default_for`].
    pub levels: BTreeMap<ScaleLevel, LevelSettings>,
    pub highlight: HighlightSettings,
    pub transcription: TranscriptionSettings,
    /// Seed for procedural model placement. Random when absent.
    pub model_seed: Option<u64>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            levels: ScaleLevel::all()
                .iter()
                .map(|&level| (level, LevelSettings::default_for(level)))
                .collect(),
            highlight: HighlightSettings::default(),
            transcription: TranscriptionSettings::default(),
            model_seed: None,
        }
    }
}

impl ExplorerConfig {
    /// Settings for a level, falling back to the built-in ones.
    pub fn level(&self, level: ScaleLevel) -> LevelSettings {
        self.levels
            .get(&level)
            .copied()
            .unwrap_or_else(|| LevelSettings::default_for(level))
    }

    pub fn framing(&self, level: ScaleLevel) -> FramingRule {
        self.level(level).framing
    }

    pub fn idle_spin(&self, level: ScaleLevel) -> f32 {
        self.level(level).idle_spin
    }

    /// Write `explorer_config.ron` unless it already exists. Returns whether a file was written.
    pub fn save_if_missing(&self) -> Result<bool, ConfigSaveError> {
        self.save_to_if_missing(Path::new(CONFIG_FILE))
    }

    pub fn save_to_if_missing(&self, path: &Path) -> Result<bool, ConfigSaveError> {
        if path.exists() {
            return Ok(false);
        }
        self.save_to(path)?;
        Ok(true)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigSaveError> {
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load configuration from disk, or the embedded default if the file doesn't exist.
    pub fn load() -> Self {
        let path = PathBuf::from(CONFIG_FILE);

        if path.exists() {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    log::info!("Loaded explorer config from {:?}", path);
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to load explorer config: {}. Using embedded default.", e);
                }
            }
        } else {
            log::info!("No explorer config found, using embedded default");
        }

        Self::load_embedded_default()
    }

    fn load_embedded_default() -> Self {
        let embedded_content = include_str!("../default_explorer_config.ron");
        log::debug!("Embedded config length: {} characters", embedded_content.len());

        match ron::from_str::<ExplorerConfig>(embedded_content) {
            Ok(config) => config,
            Err(e) => {
                log::error!(
                    "Failed to parse embedded explorer config: {}. Using hardcoded default.",
                    e
                );
                Self::default()
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = ron::from_str(&contents)?;
        Ok(config)
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Error type for configuration saving.
#[derive(Debug, thiserror::Error)]
pub enum ConfigSaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON serialize error: {0}")]
    Ron(#[from] ron::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_parses_and_matches_builtin() {
        let embedded: ExplorerConfig =
            ron::from_str(include_str!("../default_explorer_config.ron")).unwrap();
        assert_eq!(embedded, ExplorerConfig::default());
    }

    #[test]
    fn test_missing_level_falls_back() {
        let mut config = ExplorerConfig::default();
        config.levels.remove(&ScaleLevel::Chromatin);
        let rule = config.framing(ScaleLevel::Chromatin);
        assert_eq!(rule.target_offset, Vec3::new(0.0, 45.0, 0.0));
        assert_eq!(rule.eye_offset, Vec3::new(0.0, 5.0, 200.0));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ExplorerConfig = ron::from_str("(model_seed: Some(7))").unwrap();
        assert_eq!(config.model_seed, Some(7));
        assert_eq!(config.transcription.capacity, 30);
        assert_eq!(config.idle_spin(ScaleLevel::Transcription), 0.0);
    }

    #[test]
    fn test_save_then_load_file() {
        let path = std::env::temp_dir().join(format!("bio_scales_config_{}.ron", std::process::id()));
        let mut config = ExplorerConfig::default();
        config.highlight.hover = 0.5;
        config.save_to(&path).unwrap();

        let loaded = ExplorerConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.highlight.hover, 0.5);
    }

    #[test]
    fn test_save_if_missing_keeps_existing_file() {
        let path = std::env::temp_dir().join(format!("bio_scales_existing_{}.ron", std::process::id()));
        std::fs::remove_file(&path).ok();

        let config = ExplorerConfig::default();
        assert!(config.save_to_if_missing(&path).unwrap());

        let mut edited = ExplorerConfig::default();
        edited.model_seed = Some(99);
        assert!(!edited.save_to_if_missing(&path).unwrap());

        let loaded = ExplorerConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.model_seed, None);
    }

    #[test]
    fn test_framing_resolve() {
        let rule = FramingRule::new(Vec3::new(0.0, 45.0, 0.0), Vec3::new(0.0, 5.0, 200.0));
        let (target, eye) = rule.resolve(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(target, Vec3::new(10.0, 45.0, 0.0));
        assert_eq!(eye, Vec3::new(10.0, 50.0, 200.0));
    }
}
