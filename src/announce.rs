// src/announce.rs
//
// Rendering of classification results. The counting core never calls this
// directly; the loop is handed an `Announcer`.

use crate::analysis::Outcome;
use chrono::Local;

pub trait Announcer {
    fn announce(&mut self, outcome: &Outcome);
}

/// `HH:MM:SS: Someone has left!       Currently 3 people in the room.`
pub fn format_announcement(time: &str, outcome: &Outcome) -> String {
    let result = format!(": {}", outcome.label.message());
    format!(
        "{}{:<25} Currently {} people in the room.",
        time, result, outcome.count
    )
}

/// Prints timestamped lines to stdout.
#[derive(Debug, Default)]
pub struct ConsoleAnnouncer;

impl Announcer for ConsoleAnnouncer {
    fn announce(&mut self, outcome: &Outcome) {
        let now = Local::now().format("%H:%M:%S").to_string();
        println!("{}", format_announcement(&now, outcome));
    }
}

/// Keeps every outcome in memory.
#[derive(Debug, Default)]
pub struct RecordingAnnouncer {
    pub outcomes: Vec<Outcome>,
}

impl Announcer for RecordingAnnouncer {
    fn announce(&mut self, outcome: &Outcome) {
        self.outcomes.push(*outcome);
    }
}
