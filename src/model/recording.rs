use anyhow::{Result, bail};
use chrono::NaiveDateTime;

use super::Sample;
use crate::repair;

/// One session's ordered keypress samples, identified by the capture
/// timestamp embedded in the source file stem.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    /// Identifier: the source file stem, without any corrected-artifact
    /// suffix.
    pub id: String,
    /// Capture time parsed from the identifier, when it matches a known
    /// timestamp shape.
    pub captured_at: Option<NaiveDateTime>,
    /// Samples in recording order.
    pub samples: Vec<Sample>,
    /// Whether the repair passes have already been applied. The passes are
    /// not idempotent, so this gates re-application.
    pub repaired: bool,
}

impl Recording {
    pub fn new(id: impl Into<String>, samples: Vec<Sample>) -> Self {
        let id = id.into();
        let captured_at = parse_capture_time(&id);
        Self {
            id,
            captured_at,
            samples,
            repaired: false,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Apply both repair passes and mark the recording as repaired.
    ///
    /// Errors if the recording is already repaired: running the passes a
    /// second time reinterprets already-valid beats and corrupts the data.
    pub fn repair(mut self) -> Result<Self> {
        if self.repaired {
            bail!(
                "recording '{}' is already repaired; repairing again would corrupt it",
                self.id
            );
        }
        repair::repair_samples(&mut self.samples);
        self.repaired = true;
        Ok(self)
    }
}

/// Parse a capture timestamp from a recording identifier.
///
/// The recording client names files after the capture wall-clock time;
/// identifiers that don't match a known shape keep a `None` timestamp and are
/// treated as opaque.
pub fn parse_capture_time(id: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &["%Y-%m-%d_%H-%M-%S", "%Y-%m-%d-%H-%M-%S"];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(id, format).ok())
}
