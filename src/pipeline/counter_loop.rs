// src/pipeline/counter_loop.rs
//
// The single processing loop. It owns the accumulator, classifier and count,
// pulls one scan at a time from the source and hands every classified burst
// to the announcer. Shutdown is only observed between scans.

use crate::analysis::{
    filter_burst, AccumulatorConfig, BurstAccumulator, OccupancyTracker, Outcome,
    TendencyClassifier, TendencyConfig,
};
use crate::announce::Announcer;
use crate::pipeline::metrics::CounterMetrics;
use crate::sensor::ScanSource;
use crate::types::{Burst, SensorTarget};
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Shutdown,
    SourceExhausted,
}

pub struct CounterLoop {
    accumulator: BurstAccumulator,
    classifier: TendencyClassifier,
    tracker: OccupancyTracker,
    metrics: CounterMetrics,
}

impl CounterLoop {
    pub fn new(
        accumulator: AccumulatorConfig,
        tendency: TendencyConfig,
        initial_count: u32,
        metrics: CounterMetrics,
    ) -> Self {
        Self {
            accumulator: BurstAccumulator::new(accumulator),
            classifier: TendencyClassifier::new(tendency),
            tracker: OccupancyTracker::new(initial_count),
            metrics,
        }
    }

    pub fn count(&self) -> i64 {
        self.tracker.count()
    }

    /// Classify a sealed burst and update the count.
    ///
    /// Returns `None` when every sample fell inside the dead-zone; such a
    /// burst is not announced.
    pub fn handle_burst(&mut self, burst: &Burst) -> Option<Outcome> {
        self.metrics.inc(&self.metrics.bursts_sealed);

        let filtered = filter_burst(burst, self.classifier.config().ignored_length);
        if filtered.is_empty() {
            debug!("Burst of {} samples was all dead-zone noise", burst.len());
            self.metrics.inc(&self.metrics.bursts_filtered_out);
            return None;
        }

        let tendency = self.classifier.classify(&filtered);
        let outcome = self.tracker.record(tendency);
        self.metrics.record_label(outcome.label);

        info!(
            "{} (tendency={:.4}, samples={}) → {} inside",
            outcome.label.as_str(),
            tendency,
            filtered.len(),
            outcome.count
        );
        Some(outcome)
    }

    /// Process a single scan. Returns an outcome when this scan closed a burst
    /// that survived filtering.
    pub fn step(&mut self, targets: &[SensorTarget]) -> Option<Outcome> {
        self.metrics.inc(&self.metrics.total_scans);
        if !targets.is_empty() {
            self.metrics.inc(&self.metrics.scans_with_target);
        }

        let burst = self.accumulator.push_targets(targets)?;
        self.handle_burst(&burst)
    }

    /// Run until `shutdown` is raised or the source runs dry. An open burst at
    /// that point is dropped unclassified.
    pub fn run<S, A>(
        &mut self,
        source: &mut S,
        announcer: &mut A,
        shutdown: &Arc<AtomicBool>,
    ) -> Result<StopReason>
    where
        S: ScanSource + ?Sized,
        A: Announcer + ?Sized,
    {
        let reason = loop {
            if shutdown.load(Ordering::SeqCst) {
                break StopReason::Shutdown;
            }

            let targets = match source.scan()? {
                Some(targets) => targets,
                None => break StopReason::SourceExhausted,
            };

            if let Some(outcome) = self.step(&targets) {
                announcer.announce(&outcome);
            }
        };

        let dropped = self.accumulator.discard();
        if dropped > 0 {
            warn!("Dropped open burst of {} samples on stop", dropped);
            self.metrics.inc(&self.metrics.bursts_discarded);
        }

        info!("Counting stopped ({:?}), {} people inside", reason, self.count());
        Ok(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CrossingLabel;
    use crate::announce::RecordingAnnouncer;
    use crate::sensor::ReplaySource;

    fn counter(grace: u32, initial: u32) -> CounterLoop {
        CounterLoop::new(
            AccumulatorConfig {
                grace_frames: grace,
            },
            TendencyConfig {
                max_lateral_extent: 20.0,
                tendency_lower_bound: 0.1,
                ignored_length: 3.0,
            },
            initial,
            CounterMetrics::new(),
        )
    }

    fn quiet(n: usize) -> Vec<Option<f64>> {
        vec![None; n]
    }

    #[test]
    fn test_weak_one_sided_burst_is_ambiguous() {
        let mut ticks = vec![None, Some(5.0), Some(3.0)];
        ticks.extend(quiet(3));
        let mut source = ReplaySource::from_lateral(&ticks);
        let mut announcer = RecordingAnnouncer::default();
        let shutdown = Arc::new(AtomicBool::new(false));

        let mut counter = counter(3, 4);
        let reason = counter.run(&mut source, &mut announcer, &shutdown).unwrap();

        assert_eq!(reason, StopReason::SourceExhausted);
        assert_eq!(announcer.outcomes.len(), 1);
        let outcome = announcer.outcomes[0];
        assert_eq!(outcome.label, CrossingLabel::Ambiguous);
        assert_eq!(outcome.tendency, 0.0);
        assert_eq!(outcome.count, 4);
    }

    #[test]
    fn test_entries_and_exits_update_count() {
        let mut ticks = vec![Some(12.0), Some(6.0), Some(-5.0), Some(-11.0)];
        ticks.extend(quiet(2));
        ticks.extend([Some(-4.0), Some(6.0)]);
        ticks.extend(quiet(2));
        ticks.extend([Some(-9.0), Some(-7.0), Some(8.0), Some(10.0)]);
        ticks.extend(quiet(2));
        let mut source = ReplaySource::from_lateral(&ticks);
        let mut announcer = RecordingAnnouncer::default();
        let shutdown = Arc::new(AtomicBool::new(false));

        let mut counter = counter(2, 0);
        counter.run(&mut source, &mut announcer, &shutdown).unwrap();

        let labels: Vec<CrossingLabel> = announcer.outcomes.iter().map(|o| o.label).collect();
        assert_eq!(
            labels,
            vec![CrossingLabel::Entry, CrossingLabel::Exit, CrossingLabel::Exit]
        );
        assert_eq!(counter.count(), -1);
    }

    #[test]
    fn test_dead_zone_burst_is_not_announced() {
        let mut ticks = vec![Some(1.0), Some(-2.0), Some(0.5)];
        ticks.extend(quiet(2));
        let mut source = ReplaySource::from_lateral(&ticks);
        let mut announcer = RecordingAnnouncer::default();
        let shutdown = Arc::new(AtomicBool::new(false));
        let metrics = CounterMetrics::new();

        let mut counter = CounterLoop::new(
            AccumulatorConfig { grace_frames: 2 },
            TendencyConfig {
                max_lateral_extent: 20.0,
                tendency_lower_bound: 0.1,
                ignored_length: 3.0,
            },
            2,
            metrics.clone(),
        );
        counter.run(&mut source, &mut announcer, &shutdown).unwrap();

        assert!(announcer.outcomes.is_empty());
        assert_eq!(counter.count(), 2);
        let summary = metrics.summary();
        assert_eq!(summary.bursts_sealed, 1);
        assert_eq!(summary.bursts_filtered_out, 1);
        assert_eq!(summary.total_scans, 5);
    }

    #[test]
    fn test_shutdown_stops_before_next_scan() {
        let mut source = ReplaySource::from_lateral(&[Some(-8.0), Some(8.0), None, None]);
        let mut announcer = RecordingAnnouncer::default();
        let shutdown = Arc::new(AtomicBool::new(true));

        let mut counter = counter(2, 1);
        let reason = counter.run(&mut source, &mut announcer, &shutdown).unwrap();

        assert_eq!(reason, StopReason::Shutdown);
        assert_eq!(source.remaining(), 4);
        assert!(announcer.outcomes.is_empty());
    }

    #[test]
    fn test_open_burst_dropped_when_source_ends() {
        let mut source = ReplaySource::from_lateral(&[Some(-8.0), Some(8.0), None]);
        let mut announcer = RecordingAnnouncer::default();
        let shutdown = Arc::new(AtomicBool::new(false));
        let metrics = CounterMetrics::new();

        let mut counter = CounterLoop::new(
            AccumulatorConfig { grace_frames: 5 },
            TendencyConfig {
                max_lateral_extent: 20.0,
                tendency_lower_bound: 0.1,
                ignored_length: 3.0,
            },
            1,
            metrics.clone(),
        );
        counter.run(&mut source, &mut announcer, &shutdown).unwrap();

        assert!(announcer.outcomes.is_empty());
        assert_eq!(counter.count(), 1);
        assert_eq!(metrics.summary().bursts_discarded, 1);
    }

    #[test]
    fn test_demo_recording_with_shipped_config() {
        let root = env!("CARGO_MANIFEST_DIR");
        let config = crate::Config::load(&format!("{}/config.yaml", root)).unwrap();
        let mut source =
            ReplaySource::load(&format!("{}/{}", root, config.sensor.replay_path)).unwrap();
        let mut announcer = RecordingAnnouncer::default();
        let shutdown = Arc::new(AtomicBool::new(false));

        let mut counter = CounterLoop::new(
            config.accumulator_config(),
            config.tendency_config(),
            0,
            CounterMetrics::new(),
        );
        let reason = counter.run(&mut source, &mut announcer, &shutdown).unwrap();

        assert_eq!(reason, StopReason::SourceExhausted);
        let labels: Vec<CrossingLabel> = announcer.outcomes.iter().map(|o| o.label).collect();
        assert_eq!(
            labels,
            vec![
                CrossingLabel::Entry,
                CrossingLabel::Exit,
                CrossingLabel::Ambiguous
            ]
        );
        assert_eq!(counter.count(), 0);
    }
}
