// src/analysis/occupancy.rs

use tracing::warn;

/// What a classified burst meant for the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingLabel {
    Exit,
    Entry,
    Ambiguous,
}

impl CrossingLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exit => "EXIT",
            Self::Entry => "ENTRY",
            Self::Ambiguous => "AMBIGUOUS",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Exit => "Someone has left!",
            Self::Entry => "Someone has entered!",
            Self::Ambiguous => "Someone is at the door!",
        }
    }
}

/// Result of applying one burst to the running count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub label: CrossingLabel,
    pub tendency: f64,
    pub count: i64,
}

/// Running head count. The count is not floored at zero: repeated exits
/// keep decrementing.
#[derive(Debug, Clone)]
pub struct OccupancyTracker {
    count: i64,
}

impl OccupancyTracker {
    pub fn new(initial: u32) -> Self {
        Self {
            count: i64::from(initial),
        }
    }

    /// Positive tendency is an exit, negative an entry, anything else
    /// (zero or NaN) leaves the count alone.
    pub fn apply(tendency: f64, count: i64) -> (i64, CrossingLabel) {
        if tendency > 0.0 {
            (count - 1, CrossingLabel::Exit)
        } else if tendency < 0.0 {
            (count + 1, CrossingLabel::Entry)
        } else {
            (count, CrossingLabel::Ambiguous)
        }
    }

    pub fn record(&mut self, tendency: f64) -> Outcome {
        let (count, label) = Self::apply(tendency, self.count);
        if count < 0 {
            warn!("Occupancy count went negative ({})", count);
        }
        self.count = count;
        Outcome {
            label,
            tendency,
            count,
        }
    }

    pub fn count(&self) -> i64 {
        self.count
    }
}
