use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Parser;

use offbeat::analysis::{DeltaHistogram, recording_stats};
use offbeat::cli::{Cli, Command};
use offbeat::config::Settings;
use offbeat::model::Recording;
use offbeat::storage::{csv, scanner};
use offbeat::util::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_dir.as_deref(), cli.verbose)?;

    match cli.command {
        Command::Fix { paths, force } => run_fix(&paths, force),
        Command::Stats {
            paths,
            bpm,
            per_key,
        } => run_stats(&paths, bpm, per_key),
    }
}

fn run_fix(paths: &[PathBuf], force: bool) -> Result<()> {
    let files = scanner::scan_csv_files(paths)?;
    if files.is_empty() {
        bail!("no recordings found");
    }

    let mut repaired = 0usize;
    for file in &files {
        if csv::is_fixed_artifact(file) && !force {
            tracing::info!("already corrected, skipping: {}", file.display());
            continue;
        }
        match fix_one(file, force) {
            Ok(out) => {
                repaired += 1;
                tracing::info!("repaired {} -> {}", file.display(), out.display());
            }
            Err(e) => tracing::warn!("skipped {}: {e:#}", file.display()),
        }
    }

    tracing::info!("repaired {repaired} of {} recordings", files.len());
    Ok(())
}

fn fix_one(path: &Path, force: bool) -> Result<PathBuf> {
    let mut recording = csv::load_recording(path)?;
    if force {
        // Deliberate re-run; the caller has been warned that the passes are
        // not idempotent.
        recording.repaired = false;
    }
    let recording = recording.repair()?;

    let out = csv::fixed_path(path);
    if out.exists() && !force {
        bail!("output already exists: {}", out.display());
    }
    csv::save_recording(&recording, &out)?;
    Ok(out)
}

fn run_stats(paths: &[PathBuf], bpm: Option<f64>, per_key: bool) -> Result<()> {
    let mut settings = Settings::load();
    if let Some(bpm) = bpm {
        if bpm <= 0.0 {
            bail!("--bpm must be positive");
        }
        settings.bpm = bpm;
    }

    let files = scanner::prefer_fixed(scanner::scan_csv_files(paths)?);
    if files.is_empty() {
        bail!("no recordings found");
    }

    for file in &files {
        match csv::load_recording(file) {
            Ok(recording) => print_report(&recording, &settings, per_key),
            Err(e) => tracing::warn!("skipped {}: {e:#}", file.display()),
        }
    }
    Ok(())
}

fn print_report(recording: &Recording, settings: &Settings, per_key: bool) {
    let stats = recording_stats(&recording.samples);

    println!("== {} ==", recording.id);
    if let Some(captured_at) = recording.captured_at {
        println!("captured:  {captured_at}");
    }
    if !recording.repaired {
        println!("note: raw recording, statistics reflect uncorrected beats");
    }
    println!("samples:   {}", stats.samples);
    println!(
        "on beat:   {} of {} ({:.1}%), longest streak {}",
        stats.on_beat,
        stats.samples,
        stats.on_beat_rate() * 100.0,
        stats.longest_on_beat_streak
    );
    println!(
        "delta:     mean {:+.4}s, sd {:.4}s, range {:+.4}s to {:+.4}s",
        stats.delta.mean, stats.delta.std_dev, stats.delta.min, stats.delta.max
    );

    if per_key {
        for (key, key_stats) in &stats.per_key {
            println!(
                "  key {key:>4}: {} samples, mean {:+.4}s, sd {:.4}s",
                key_stats.count, key_stats.mean, key_stats.std_dev
            );
        }
    }

    let histogram = DeltaHistogram::build(
        &recording.samples,
        settings.max_delta(),
        settings.histogram_buckets,
    );
    println!("{}", histogram.render());
}
