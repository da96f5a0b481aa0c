// Statistics over corrected recordings.

pub mod histogram;
pub mod stats;

pub use histogram::DeltaHistogram;
pub use stats::{DeltaStats, RecordingStats, recording_stats};
