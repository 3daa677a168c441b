use balltrack_calibration::depth::DepthModel;
use balltrack_detection::color::ColorRange;
use balltrack_detection::hough::HoughParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub system: SystemConfig,
    pub web: WebConfig,
    pub sensor: SensorConfig,
    pub detection: DetectionConfig,
    pub depth: DepthConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SystemConfig {
    pub log_level: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WebConfig {
    pub port: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    Synthetic,
    Camera,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SensorConfig {
    pub source: SensorKind,
    pub device_id: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct DetectionConfig {
    // Contours below this area never reach circle detection.
    pub min_area: f32,
    pub color: ColorRange,
    pub hough: HoughParams,
}

// Depth sampling knobs. The offset and guard are ad hoc tuning values
// for a 640x480 sensor, carried as calibration constants; samples are
// additionally bounds-checked against the real frame.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct DepthConfig {
    pub model: DepthModel,
    pub sample_offset_x: i32,
    pub edge_guard_x: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RunConfig {
    // Stop after this many iterations; absent means run until killed.
    pub max_iterations: Option<u64>,
    // Append computed z distances to this file, one per line.
    pub distance_log: Option<PathBuf>,
    #[serde(default = "default_distance_log_samples")]
    pub distance_log_samples: u64,
}

fn default_distance_log_samples() -> u64 {
    100
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            max_iterations: None,
            distance_log: None,
            distance_log_samples: default_distance_log_samples(),
        }
    }
}

// The runtime-tunable slice of the config, exchanged with the
// dashboard and re-read by the pipeline every iteration.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Tuning {
    pub detection: DetectionConfig,
    pub depth: DepthConfig,
}

impl Config {
    // Load config from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    // Load default config
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_file("config/default.toml")
    }

    pub fn tuning(&self) -> Tuning {
        Tuning {
            detection: self.detection,
            depth: self.depth,
        }
    }

    pub fn apply_tuning(&mut self, tuning: Tuning) {
        self.detection = tuning.detection;
        self.depth = tuning.depth;
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            system: SystemConfig {
                log_level: "info".to_string(),
            },
            web: WebConfig { port: 8080 },
            sensor: SensorConfig {
                source: SensorKind::Synthetic,
                device_id: 0,
                width: 640,
                height: 480,
                fps: 30,
            },
            detection: DetectionConfig {
                min_area: 100.0,
                // Starting values for a red ball.
                color: ColorRange {
                    hue_min: 163,
                    hue_max: 180,
                    sat_min: 139,
                    sat_max: 224,
                    val_min: 176,
                    val_max: 200,
                },
                hough: HoughParams {
                    accumulator_scale: 2,
                    min_center_dist: 120.0,
                    vote_threshold: 50,
                    min_radius: 10,
                    max_radius: 0,
                },
            },
            depth: DepthConfig {
                model: DepthModel::Tangent,
                sample_offset_x: 25,
                edge_guard_x: 600,
            },
            run: RunConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_default_file_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/default.toml");
        let config = Config::from_file(path).expect("config/default.toml should parse");
        assert_eq!(config.sensor.width, 640);
        assert_eq!(config.detection.hough.accumulator_scale, 2);
        assert_eq!(config.depth.model, DepthModel::Tangent);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).expect("serialize");
        let parsed: Config = toml::from_str(&text).expect("parse");
        assert_eq!(parsed.detection.color, config.detection.color);
        assert_eq!(parsed.depth, config.depth);
        assert_eq!(parsed.run.distance_log_samples, 100);
    }

    #[test]
    fn tuning_applies_back_onto_config() {
        let mut config = Config::default();
        let mut tuning = config.tuning();
        tuning.detection.color.hue_min = 40;
        tuning.depth.model = DepthModel::Linear;
        config.apply_tuning(tuning);
        assert_eq!(config.detection.color.hue_min, 40);
        assert_eq!(config.depth.model, DepthModel::Linear);
    }
}
