use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;

use crate::guidance::CategoryTable;
use crate::ingest::FileConfig;

const DEFAULT_DB_PATH: &str = "visionmate.db";
const DEFAULT_VIDEO_PATH: &str = "stub://walk";
const DEFAULT_TARGET_FPS: u32 = 10;
const DEFAULT_FRAME_WIDTH: u32 = 640;
const DEFAULT_FRAME_HEIGHT: u32 = 480;

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    db_path: Option<String>,
    video: Option<VideoConfigFile>,
    speech: Option<SpeechConfigFile>,
    categories: Option<CategoryConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct VideoConfigFile {
    path: Option<String>,
    target_fps: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct SpeechConfigFile {
    enabled: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct CategoryConfigFile {
    critical: Option<Vec<String>>,
    stop: Option<Vec<String>>,
    traffic_control: Option<Vec<String>>,
    go_control: Option<Vec<String>>,
    path_guidance: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct VisionmateConfig {
    pub db_path: String,
    pub video: VideoSettings,
    pub speech: SpeechSettings,
    pub categories: CategorySettings,
}

#[derive(Debug, Clone)]
pub struct VideoSettings {
    pub path: String,
    pub target_fps: u32,
    pub width: u32,
    pub height: u32,
}

impl VideoSettings {
    pub fn file_config(&self) -> FileConfig {
        FileConfig {
            path: self.path.clone(),
            target_fps: self.target_fps,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpeechSettings {
    pub enabled: bool,
}

/// The five category label sets, injectable per deployment.
#[derive(Debug, Clone)]
pub struct CategorySettings {
    pub critical: Vec<String>,
    pub stop: Vec<String>,
    pub traffic_control: Vec<String>,
    pub go_control: Vec<String>,
    pub path_guidance: Vec<String>,
}

impl CategorySettings {
    /// Build the category table, validating disjointness.
    pub fn table(&self) -> Result<CategoryTable> {
        CategoryTable::from_sets(
            &self.critical,
            &self.stop,
            &self.traffic_control,
            &self.go_control,
            &self.path_guidance,
        )
    }
}

impl VisionmateConfig {
    /// Load from the `VISIONMATE_CONFIG` JSON file (when set), then apply
    /// env overrides, then validate.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("VISIONMATE_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: ConfigFile) -> Self {
        let db_path = file.db_path.unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let video = VideoSettings {
            path: file
                .video
                .as_ref()
                .and_then(|video| video.path.clone())
                .unwrap_or_else(|| DEFAULT_VIDEO_PATH.to_string()),
            target_fps: file
                .video
                .as_ref()
                .and_then(|video| video.target_fps)
                .unwrap_or(DEFAULT_TARGET_FPS),
            width: file
                .video
                .as_ref()
                .and_then(|video| video.width)
                .unwrap_or(DEFAULT_FRAME_WIDTH),
            height: file
                .video
                .as_ref()
                .and_then(|video| video.height)
                .unwrap_or(DEFAULT_FRAME_HEIGHT),
        };
        let speech = SpeechSettings {
            enabled: file
                .speech
                .and_then(|speech| speech.enabled)
                .unwrap_or(true),
        };
        let defaults = CategorySettings::default();
        let categories = match file.categories {
            Some(categories) => CategorySettings {
                critical: categories.critical.unwrap_or(defaults.critical),
                stop: categories.stop.unwrap_or(defaults.stop),
                traffic_control: categories
                    .traffic_control
                    .unwrap_or(defaults.traffic_control),
                go_control: categories.go_control.unwrap_or(defaults.go_control),
                path_guidance: categories.path_guidance.unwrap_or(defaults.path_guidance),
            },
            None => defaults,
        };
        Self {
            db_path,
            video,
            speech,
            categories,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("VISIONMATE_DB_PATH") {
            if !path.trim().is_empty() {
                self.db_path = path;
            }
        }
        if let Ok(path) = std::env::var("VISIONMATE_VIDEO_PATH") {
            if !path.trim().is_empty() {
                self.video.path = path;
            }
        }
        if let Ok(fps) = std::env::var("VISIONMATE_TARGET_FPS") {
            let fps: u32 = fps
                .parse()
                .map_err(|_| anyhow!("VISIONMATE_TARGET_FPS must be an integer"))?;
            self.video.target_fps = fps;
        }
        if let Ok(audio) = std::env::var("VISIONMATE_AUDIO") {
            self.speech.enabled = match audio.trim() {
                "1" | "true" | "on" => true,
                "0" | "false" | "off" => false,
                other => {
                    return Err(anyhow!("VISIONMATE_AUDIO must be a boolean, got '{}'", other))
                }
            };
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.video.width == 0 || self.video.height == 0 {
            return Err(anyhow!(
                "frame dimensions must be positive, got {}x{}",
                self.video.width,
                self.video.height
            ));
        }
        if self.video.target_fps == 0 {
            return Err(anyhow!("target_fps must be >= 1"));
        }
        // Rejects overlapping category sets up front.
        self.categories.table()?;
        Ok(())
    }
}

impl Default for CategorySettings {
    fn default() -> Self {
        let owned = |labels: &[&str]| -> Vec<String> {
            labels.iter().map(|label| label.to_string()).collect()
        };
        Self {
            critical: owned(&[
                "blind_road",
                "ashcan",
                "fire_hydrant",
                "pole",
                "reflective_cone",
                "warning_column",
            ]),
            stop: owned(&[
                "person",
                "car",
                "bus",
                "truck",
                "motorcycle",
                "tricycle",
                "bicycle",
            ]),
            traffic_control: owned(&["red_light", "stop sign"]),
            go_control: owned(&["green_light"]),
            path_guidance: owned(&[
                "crosswalk",
                "sign",
                "sidewalk",
                "square",
                "intersection",
                "bridge",
            ]),
        }
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
