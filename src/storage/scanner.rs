use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::csv;

/// Collect recording CSV files under the given roots.
///
/// A root may be a single CSV file or a directory to walk recursively.
/// Missing roots are logged and contribute nothing. The result is sorted so
/// processing order is deterministic regardless of filesystem order.
pub fn scan_csv_files(roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for root in roots {
        if root.is_file() {
            if is_csv_file(root) {
                found.push(root.clone());
            } else {
                tracing::warn!("not a csv recording: {}", root.display());
            }
        } else if root.is_dir() {
            scan_directory(root, &mut found)?;
        } else {
            tracing::warn!("recording path not found: {}", root.display());
        }
    }

    found.sort();
    Ok(found)
}

/// When a recording is present both raw and as a corrected artifact, keep
/// only the artifact. Order is preserved.
pub fn prefer_fixed(files: Vec<PathBuf>) -> Vec<PathBuf> {
    let fixed: HashSet<PathBuf> = files
        .iter()
        .filter(|path| csv::is_fixed_artifact(path))
        .cloned()
        .collect();

    files
        .into_iter()
        .filter(|path| csv::is_fixed_artifact(path) || !fixed.contains(&csv::fixed_path(path)))
        .collect()
}

/// Recursively scan a single directory, skipping unreadable entries.
fn scan_directory(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("cannot read directory {}: {e}", dir.display());
            return Ok(());
        }
    };

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            scan_directory(&path, found)?;
        } else if is_csv_file(&path) {
            found.push(path);
        }
    }

    Ok(())
}

/// Check if a path has a CSV file extension.
fn is_csv_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
