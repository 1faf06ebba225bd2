// src/sensor.rs
//
// The scan-tick collaborator. Real hardware lives behind `ScanSource`; the
// replay source feeds recorded scans through the same interface.

use crate::types::SensorTarget;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use tracing::info;

pub trait ScanSource {
    /// Block until the next scan completes.
    ///
    /// `Ok(None)` means the source has no more scans. An empty vector is a
    /// scan with no targets.
    fn scan(&mut self) -> Result<Option<Vec<SensorTarget>>>;
}

/// Recorded scans on disk: one list of targets per frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayRecording {
    pub frames: Vec<Vec<SensorTarget>>,
}

pub struct ReplaySource {
    frames: VecDeque<Vec<SensorTarget>>,
}

impl ReplaySource {
    pub fn new(frames: Vec<Vec<SensorTarget>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    pub fn load(path: &str) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading replay {}", path))?;
        let recording: ReplayRecording = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing replay {}", path))?;
        info!("Loaded {} recorded scans from {}", recording.frames.len(), path);
        Ok(Self::new(recording.frames))
    }

    /// Build a replay from one optional lateral position per scan.
    pub fn from_lateral(positions: &[Option<f64>]) -> Self {
        Self::new(
            positions
                .iter()
                .map(|p| match p {
                    Some(y) => vec![SensorTarget { x: 0.0, y: *y, z: 30.0 }],
                    None => Vec::new(),
                })
                .collect(),
        )
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl ScanSource for ReplaySource {
    fn scan(&mut self) -> Result<Option<Vec<SensorTarget>>> {
        Ok(self.frames.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_replay_yields_frames_then_ends() {
        let mut source = ReplaySource::from_lateral(&[None, Some(5.0)]);
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.scan().unwrap(), Some(vec![]));
        let frame = source.scan().unwrap().unwrap();
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].y, 5.0);
        assert!(source.scan().unwrap().is_none());
    }

    #[test]
    fn test_load_recording_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "frames:\n  - []\n  - [{{x: 1.0, y: -6.0, z: 40.0}}, {{x: 0.0, y: 2.0, z: 12.0}}]\n  - []"
        )
        .unwrap();

        let mut source = ReplaySource::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(source.remaining(), 3);
        source.scan().unwrap();
        let frame = source.scan().unwrap().unwrap();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame[0].y, -6.0);
    }

    #[test]
    fn test_malformed_recording_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "frames: not-a-list").unwrap();
        assert!(ReplaySource::load(file.path().to_str().unwrap()).is_err());
    }
}
