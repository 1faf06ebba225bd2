// src/analysis/burst_accumulator.rs
//
// Groups per-scan detections into bursts. There is no timer: time only
// advances when the caller pushes the next scan.
//
//   IDLE ──detection──▶ COLLECTING ──grace_frames empty scans──▶ emit, IDLE
//                          ▲    │
//                          └────┘ detection (quiet counter reset)

use crate::types::{Burst, Detection, SensorTarget};
use tracing::debug;

// ============================================================================
// CONFIGURATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct AccumulatorConfig {
    /// Consecutive empty scans that close an open burst
    pub grace_frames: u32,
}

impl AccumulatorConfig {
    /// Grace period expressed in scans: `ceil(frame_rate × sensitivity_secs)`.
    ///
    /// Zero is a valid result: every detection is then a burst of its own.
    pub fn from_sensitivity(frame_rate: f64, sensitivity_secs: f64) -> Self {
        let frames = (frame_rate * sensitivity_secs).ceil();
        let grace_frames = if frames.is_finite() && frames > 0.0 {
            frames.min(u32::MAX as f64) as u32
        } else {
            0
        };
        Self { grace_frames }
    }
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self::from_sensitivity(30.0, 0.25)
    }
}

// ============================================================================
// SELECTION
// ============================================================================

/// Reduce one scan to its best candidate: the target farthest from the sensor.
/// On equal distance the earlier target wins.
pub fn select_best_target(targets: &[SensorTarget]) -> Option<Detection> {
    targets
        .iter()
        .reduce(|best, t| if t.distance() > best.distance() { t } else { best })
        .map(|t| Detection::from(*t))
}

// ============================================================================
// ACCUMULATOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccumulatorState {
    Idle,
    Collecting,
}

pub struct BurstAccumulator {
    config: AccumulatorConfig,
    state: AccumulatorState,
    burst: Burst,
    quiet_frames: u32,
}

impl BurstAccumulator {
    pub fn new(config: AccumulatorConfig) -> Self {
        Self {
            config,
            state: AccumulatorState::Idle,
            burst: Vec::new(),
            quiet_frames: 0,
        }
    }

    /// Feed one scan's best candidate. Returns the sealed burst on the scan
    /// that completes the grace period.
    pub fn push(&mut self, detection: Option<Detection>) -> Option<Burst> {
        match (self.state, detection) {
            (AccumulatorState::Idle, None) => None,

            (AccumulatorState::Idle, Some(d)) if self.config.grace_frames == 0 => {
                debug!("Single-sample burst at y={:.1}", d.lateral_cm);
                Some(vec![d.lateral_cm])
            }

            (AccumulatorState::Idle, Some(d)) => {
                self.state = AccumulatorState::Collecting;
                self.burst.clear();
                self.burst.push(d.lateral_cm);
                self.quiet_frames = 0;
                debug!("Burst opened at y={:.1}", d.lateral_cm);
                None
            }

            (AccumulatorState::Collecting, Some(d)) => {
                self.burst.push(d.lateral_cm);
                self.quiet_frames = 0;
                None
            }

            (AccumulatorState::Collecting, None) => {
                self.quiet_frames += 1;
                if self.quiet_frames >= self.config.grace_frames {
                    self.state = AccumulatorState::Idle;
                    self.quiet_frames = 0;
                    let burst = std::mem::take(&mut self.burst);
                    debug!("Burst sealed with {} samples", burst.len());
                    Some(burst)
                } else {
                    None
                }
            }
        }
    }

    /// Select the best target of a raw scan and feed it.
    pub fn push_targets(&mut self, targets: &[SensorTarget]) -> Option<Burst> {
        self.push(select_best_target(targets))
    }

    /// Drop any open burst without emitting it. Returns how many samples
    /// were thrown away.
    pub fn discard(&mut self) -> usize {
        let dropped = self.burst.len();
        self.burst.clear();
        self.state = AccumulatorState::Idle;
        self.quiet_frames = 0;
        dropped
    }

    pub fn state(&self) -> AccumulatorState {
        self.state
    }

    pub fn is_collecting(&self) -> bool {
        self.state == AccumulatorState::Collecting
    }
}
