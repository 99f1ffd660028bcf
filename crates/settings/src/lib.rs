use directories::ProjectDirs;
use faces::Face;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};
use thiserror::Error;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "cubeview";
const APPLICATION: &str = "cubeview";
const SETTINGS_FILE: &str = "settings.json";

/// Upper bound of the legacy rotation slider.
pub const SLIDER_MAX: f32 = 10.0;
/// Degrees per second contributed by one slider unit (value / 1000 per frame, x50, at 60 fps).
const DEGREES_PER_SECOND_PER_SLIDER_UNIT: f32 = 3.0;
/// Smallest scale the cube may ever reach.
pub const SCALE_FLOOR: f32 = 0.5;
/// Largest scale the cube may ever reach.
pub const SCALE_CEILING: f32 = 2.0;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to resolve platform config directory")]
    MissingProjectDirs,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub cube: CubeSettings,
    pub layout: FaceLayout,
    /// `tracing` filter directive used when `RUST_LOG` is unset (None = "info")
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ZoomMode {
    /// scale +/- zoom_step
    Additive,
    /// scale * (1 +/- zoom_step)
    Multiplicative,
}

/// Tunables of the cube state machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CubeSettings {
    /// Auto-rotation speed in degrees per second.
    pub rotation_speed_dps: f32,
    /// Whether the cube starts auto-rotating.
    pub auto_rotate: bool,
    pub zoom_mode: ZoomMode,
    pub zoom_step: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub initial_scale: f32,
    /// Rotation applied per pixel of pointer drag.
    pub drag_degrees_per_pixel: f32,
    /// Edge length of a face in CSS pixels.
    pub face_size: f32,
    /// Offset applied by one pan step, in CSS pixels.
    pub pan_step: f32,
}

impl Default for CubeSettings {
    fn default() -> Self {
        CubePreset::Canonical.settings()
    }
}

impl CubeSettings {
    /// Returns a copy with every value forced into a usable range, so the
    /// controller's scale and speed invariants hold for any loaded file.
    pub fn sanitized(&self) -> Self {
        let defaults = CubePreset::Canonical.settings();
        let finite_or = |value: f32, fallback: f32| if value.is_finite() { value } else { fallback };

        let mut min_scale = finite_or(self.min_scale, defaults.min_scale);
        let mut max_scale = finite_or(self.max_scale, defaults.max_scale);
        if min_scale > max_scale {
            std::mem::swap(&mut min_scale, &mut max_scale);
        }
        // configured bounds may narrow the scale range, never widen it
        min_scale = min_scale.clamp(SCALE_FLOOR, SCALE_CEILING);
        max_scale = max_scale.clamp(min_scale, SCALE_CEILING);

        let positive_or = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };

        Self {
            rotation_speed_dps: finite_or(self.rotation_speed_dps, defaults.rotation_speed_dps)
                .max(0.0),
            auto_rotate: self.auto_rotate,
            zoom_mode: self.zoom_mode,
            zoom_step: positive_or(self.zoom_step, defaults.zoom_step),
            min_scale,
            max_scale,
            initial_scale: finite_or(self.initial_scale, 1.0).clamp(min_scale, max_scale),
            drag_degrees_per_pixel: finite_or(
                self.drag_degrees_per_pixel,
                defaults.drag_degrees_per_pixel,
            ),
            face_size: positive_or(self.face_size, defaults.face_size),
            pan_step: positive_or(self.pan_step, defaults.pan_step),
        }
    }
}

/// Named configurations observed across the cube variants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CubePreset {
    Canonical,
    /// Starts zoomed out to half size.
    Compact,
    /// Large faces, faster spin, multiplicative zoom.
    Showcase,
}

impl CubePreset {
    pub const ALL: [CubePreset; 3] = [
        CubePreset::Canonical,
        CubePreset::Compact,
        CubePreset::Showcase,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            CubePreset::Canonical => "Canonical",
            CubePreset::Compact => "Compact",
            CubePreset::Showcase => "Showcase",
        }
    }

    pub fn settings(self) -> CubeSettings {
        let canonical = CubeSettings {
            rotation_speed_dps: 30.0,
            auto_rotate: true,
            zoom_mode: ZoomMode::Additive,
            zoom_step: 0.1,
            min_scale: 0.5,
            max_scale: 2.0,
            initial_scale: 1.0,
            drag_degrees_per_pixel: 0.5,
            face_size: 200.0,
            pan_step: 50.0,
        };
        match self {
            CubePreset::Canonical => canonical,
            CubePreset::Compact => CubeSettings {
                initial_scale: 0.5,
                ..canonical
            },
            CubePreset::Showcase => CubeSettings {
                rotation_speed_dps: 45.0,
                zoom_mode: ZoomMode::Multiplicative,
                face_size: 400.0,
                ..canonical
            },
        }
    }
}

/// Converts the legacy 0-10 speed slider into degrees per second.
pub fn speed_from_slider(value: f32) -> f32 {
    let value = if value.is_finite() { value } else { 0.0 };
    value.clamp(0.0, SLIDER_MAX) * DEGREES_PER_SECOND_PER_SLIDER_UNIT
}

/// Inverse of [`speed_from_slider`], clamped to the slider range.
pub fn slider_from_speed(degrees_per_second: f32) -> f32 {
    (degrees_per_second / DEGREES_PER_SECOND_PER_SLIDER_UNIT).clamp(0.0, SLIDER_MAX)
}

/// Content assigned to one face at construction time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FaceSlotConfig {
    pub face: Face,
    /// Content identifier resolved through the content registry. Empty = unassigned.
    pub content: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Replace this face's content when a "component selected" event arrives.
    #[serde(default)]
    pub listens_for_selection: bool,
    /// Counter-rotate the content so it reads upright on this face.
    #[serde(default)]
    pub upright: bool,
}

impl FaceSlotConfig {
    pub fn new(face: Face, content: impl Into<String>) -> Self {
        Self {
            face,
            content: content.into(),
            properties: Map::new(),
            listens_for_selection: false,
            upright: false,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn listening(mut self) -> Self {
        self.listens_for_selection = true;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FaceLayout {
    pub faces: Vec<FaceSlotConfig>,
}

impl Default for FaceLayout {
    fn default() -> Self {
        let slot = |face: Face, content: &str, title: &str, description: &str| {
            FaceSlotConfig::new(face, content)
                .with_property("title", title)
                .with_property("description", description)
        };
        Self {
            faces: vec![
                slot(
                    Face::Front,
                    "AbstractSpec",
                    "Abstract Specification",
                    "High-level system design and requirements",
                )
                .listening(),
                slot(
                    Face::Back,
                    "AbstractSpec",
                    "Abstract View",
                    "Alternative abstract perspective",
                ),
                slot(
                    Face::Left,
                    "ConcreteImpl",
                    "Concrete Implementation",
                    "Actual system implementation details",
                ),
                slot(
                    Face::Right,
                    "ConcreteImpl",
                    "Implementation View",
                    "Technical implementation aspects",
                ),
                slot(
                    Face::Top,
                    "RealisticExpectations",
                    "Realistic Expectations",
                    "Project constraints and limitations",
                ),
                slot(
                    Face::Bottom,
                    "RealisticExpectations",
                    "Practical Considerations",
                    "Real-world implementation factors",
                ),
            ],
        }
    }
}

impl FaceLayout {
    /// Last entry wins when a face is listed more than once.
    pub fn slot(&self, face: Face) -> Option<&FaceSlotConfig> {
        self.faces.iter().rev().find(|slot| slot.face == face)
    }
}

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new() -> Result<Self, SettingsError> {
        let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(SettingsError::MissingProjectDirs)?;
        let config_dir = dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        let path = config_dir.join(SETTINGS_FILE);
        Ok(Self { path })
    }

    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<UserSettings, SettingsError> {
        if !self.path.exists() {
            return Ok(UserSettings::default());
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let settings = serde_json::from_reader(reader)?;
        Ok(settings)
    }

    pub fn save(&self, settings: &UserSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, settings)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clone for SettingsStore {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
        }
    }
}
