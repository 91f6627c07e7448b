use serde::Serialize;
use std::time::Instant;

/// Per-photo outcome of a composite run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoOutcome {
    Drawn,
    DecodeFailed,
    DrawFailed,
}

/// Collects what happened while compositing one card.
pub struct CompositeStats {
    outcomes: Vec<(usize, PhotoOutcome)>,
    photos_considered: usize,
    start_time: Instant,
}

/// Snapshot of a finished composite, for logs and callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeReport {
    pub photos_considered: usize,
    pub drawn: Vec<usize>,
    pub failed: Vec<usize>,
    pub elapsed_ms: f64,
    pub encoded_bytes: usize,
}

impl CompositeStats {
    pub fn new(photos_considered: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(photos_considered),
            photos_considered,
            start_time: Instant::now(),
        }
    }

    /// Record the result for one photo index.
    pub fn record(&mut self, index: usize, outcome: PhotoOutcome) {
        self.outcomes.push((index, outcome));
    }

    /// Freeze the stats into a report once the encoded size is known.
    pub fn finish(&self, encoded_bytes: usize) -> CompositeReport {
        let mut drawn = Vec::new();
        let mut failed = Vec::new();
        for &(index, outcome) in &self.outcomes {
            match outcome {
                PhotoOutcome::Drawn => drawn.push(index),
                PhotoOutcome::DecodeFailed | PhotoOutcome::DrawFailed => failed.push(index),
            }
        }
        drawn.sort_unstable();
        failed.sort_unstable();

        CompositeReport {
            photos_considered: self.photos_considered,
            drawn,
            failed,
            elapsed_ms: self.start_time.elapsed().as_secs_f64() * 1000.0,
            encoded_bytes,
        }
    }
}

impl CompositeReport {
    /// True when every considered photo made it onto the card.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.drawn.len() == self.photos_considered
    }
}
