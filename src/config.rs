use crate::analysis::{AccumulatorConfig, TendencyConfig};
use crate::types::Config;
use anyhow::{ensure, Context, Result};
use std::fs;

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.arena.r_max > 0.0, "arena.r_max must be positive");
        ensure!(
            self.max_lateral_extent() > 0.0,
            "max lateral extent must be positive, got {}",
            self.max_lateral_extent()
        );
        ensure!(self.sensor.frame_rate > 0.0, "sensor.frame_rate must be positive");
        ensure!(
            self.counting.sensitivity_secs >= 0.0,
            "counting.sensitivity_secs must not be negative"
        );
        ensure!(
            self.counting.ignored_length >= 0.0,
            "counting.ignored_length must not be negative"
        );
        ensure!(
            self.counting.tendency_lower_bound >= 0.0,
            "counting.tendency_lower_bound must not be negative"
        );
        Ok(())
    }

    pub fn max_lateral_extent(&self) -> f64 {
        self.counting
            .max_lateral_extent
            .unwrap_or_else(|| self.arena.max_lateral_extent())
    }

    pub fn tendency_config(&self) -> TendencyConfig {
        TendencyConfig {
            max_lateral_extent: self.max_lateral_extent(),
            tendency_lower_bound: self.counting.tendency_lower_bound,
            ignored_length: self.counting.ignored_length,
        }
    }

    pub fn accumulator_config(&self) -> AccumulatorConfig {
        match self.counting.grace_frames {
            Some(grace_frames) => AccumulatorConfig { grace_frames },
            None => AccumulatorConfig::from_sensitivity(
                self.sensor.frame_rate,
                self.counting.sensitivity_secs,
            ),
        }
    }
}
