use std::collections::BTreeMap;

use crate::model::Sample;

/// Summary statistics over one recording's samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingStats {
    pub samples: usize,
    pub on_beat: usize,
    pub off_beat: usize,
    /// Longest run of consecutive on-beat presses.
    pub longest_on_beat_streak: usize,
    pub delta: DeltaStats,
    /// Per-key breakdown, keyed by the client's key code. BTreeMap keeps
    /// report order stable.
    pub per_key: BTreeMap<i32, DeltaStats>,
}

impl RecordingStats {
    pub fn on_beat_rate(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.on_beat as f64 / self.samples as f64
        }
    }
}

/// Mean and spread of a delta population.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeltaStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl DeltaStats {
    pub fn of(deltas: impl IntoIterator<Item = f64>) -> Self {
        let values: Vec<f64> = deltas.into_iter().collect();
        if values.is_empty() {
            return Self::default();
        }

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }
}

/// Compute summary statistics for one recording.
pub fn recording_stats(samples: &[Sample]) -> RecordingStats {
    let mut stats = RecordingStats {
        samples: samples.len(),
        ..Default::default()
    };

    let mut streak = 0usize;
    let mut per_key: BTreeMap<i32, Vec<f64>> = BTreeMap::new();

    for sample in samples {
        if sample.on_beat != 0 {
            stats.on_beat += 1;
            streak += 1;
            stats.longest_on_beat_streak = stats.longest_on_beat_streak.max(streak);
        } else {
            stats.off_beat += 1;
            streak = 0;
        }
        per_key.entry(sample.key).or_default().push(sample.delta);
    }

    stats.delta = DeltaStats::of(samples.iter().map(|s| s.delta));
    stats.per_key = per_key
        .into_iter()
        .map(|(key, deltas)| (key, DeltaStats::of(deltas)))
        .collect();

    stats
}
