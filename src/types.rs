use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub arena: ArenaConfig,
    pub counting: CountingConfig,
    pub sensor: SensorConfig,
    pub logging: LoggingConfig,
}

/// Sensor arena in spherical coordinates (cm and degrees).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub r_min: f64,
    pub r_max: f64,
    pub r_res: f64,
    pub theta_min: f64,
    pub theta_max: f64,
    pub theta_res: f64,
    pub phi_min: f64,
    pub phi_max: f64,
    pub phi_res: f64,
    /// Sensor detection threshold
    pub threshold: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            r_min: 10.0,
            r_max: 60.0,
            r_res: 2.0,
            theta_min: -10.0,
            theta_max: 10.0,
            theta_res: 10.0,
            phi_min: -10.0,
            phi_max: 10.0,
            phi_res: 2.0,
            threshold: 15.0,
        }
    }
}

impl ArenaConfig {
    /// Largest lateral (y) coordinate a target can reach inside the arena.
    pub fn max_lateral_extent(&self) -> f64 {
        self.r_max * self.theta_max.to_radians().cos() * self.phi_max.to_radians().sin()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CountingConfig {
    /// Dead-zone half width around the doorway center (cm)
    pub ignored_length: f64,
    /// Seconds of silence after which a burst is considered finished
    pub sensitivity_secs: f64,
    /// One-sided bursts need |tendency| above this to count
    pub tendency_lower_bound: f64,
    /// Overrides the extent derived from the arena
    pub max_lateral_extent: Option<f64>,
    /// Overrides frame_rate × sensitivity_secs
    pub grace_frames: Option<u32>,
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            ignored_length: 3.0,
            sensitivity_secs: 0.25,
            tendency_lower_bound: 0.1,
            max_lateral_extent: None,
            grace_frames: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Scans per second
    pub frame_rate: f64,
    /// Recorded scans to replay
    pub replay_path: String,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            replay_path: "demos/doorway_replay.yaml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "doorway_counter=info".to_string(),
        }
    }
}

/// One raw target reported by the sensor (cm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorTarget {
    pub x: f64,
    /// Signed lateral distance from the doorway center
    pub y: f64,
    pub z: f64,
}

impl SensorTarget {
    pub fn distance(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Best candidate of a single scan, reduced to its lateral position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub lateral_cm: f64,
}

impl From<SensorTarget> for Detection {
    fn from(target: SensorTarget) -> Self {
        Self {
            lateral_cm: target.y,
        }
    }
}

/// Time-ordered lateral positions of one crossing.
pub type Burst = Vec<f64>;
