//! Recording CSV load/save and corrected-artifact naming.
//!
//! Recordings are four-column CSVs written by the capture client:
//! `BeatNumber,OnBeat,BeatDiff,Key`. Repairs are written to a sibling
//! `<stem>.fixed.csv` artifact; the source file is never rewritten in place.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::{Recording, Sample};

/// Column header the capture client writes.
pub const HEADER: &str = "BeatNumber,OnBeat,BeatDiff,Key";

/// Filename suffix marking a corrected artifact.
const FIXED_SUFFIX: &str = ".fixed.csv";

/// Whether a path names a corrected artifact.
pub fn is_fixed_artifact(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(FIXED_SUFFIX))
}

/// Derive the corrected-artifact path for a recording.
/// Stable under repeated application: the artifact maps to itself.
pub fn fixed_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("recording");
    let stem = stem.strip_suffix(".fixed").unwrap_or(stem);
    path.with_file_name(format!("{stem}{FIXED_SUFFIX}"))
}

/// Load one recording from a CSV file.
///
/// The header row is skipped. Rows that don't have exactly four parseable
/// numeric fields are dropped before they reach the repair passes; integer
/// columns tolerate float formatting ("5.0"), matching what the client
/// emits. Loading a corrected artifact marks the recording repaired.
pub fn load_recording(path: &Path) -> Result<Recording> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read recording: {}", path.display()))?;

    let mut samples = Vec::new();
    let mut dropped = 0usize;
    for line in content.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_row(line) {
            Some(sample) => samples.push(sample),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::debug!("dropped {dropped} malformed rows from {}", path.display());
    }

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("recording");
    let id = stem.strip_suffix(".fixed").unwrap_or(stem);

    let mut recording = Recording::new(id, samples);
    recording.repaired = is_fixed_artifact(path);
    Ok(recording)
}

/// Save a recording in the client's CSV format, header included.
pub fn save_recording(recording: &Recording, path: &Path) -> Result<()> {
    let mut out = String::with_capacity(HEADER.len() + 1 + recording.len() * 24);
    out.push_str(HEADER);
    out.push('\n');
    for sample in &recording.samples {
        out.push_str(&format!(
            "{},{},{},{}\n",
            sample.beat, sample.on_beat, sample.delta, sample.key
        ));
    }

    fs::write(path, out).with_context(|| format!("failed to write recording: {}", path.display()))
}

/// Parse one data row. Returns `None` for rows the loader must drop: wrong
/// field count, unparseable numerics, negative beat numbers, non-finite
/// deltas.
fn parse_row(line: &str) -> Option<Sample> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 4 {
        return None;
    }

    let beat = u32::try_from(int_field(fields[0])?).ok()?;
    let on_beat = i32::try_from(int_field(fields[1])?).ok()?;
    let delta = fields[2].trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    let key = i32::try_from(int_field(fields[3])?).ok()?;

    Some(Sample::new(beat, on_beat, delta, key))
}

/// Integer column, tolerating float formatting. Truncates like the client's
/// own readback does.
fn int_field(field: &str) -> Option<i64> {
    let value = field.trim().parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc() as i64)
}
