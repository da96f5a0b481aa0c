use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// offbeat — repair and analyze rhythm-game keypress recordings.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Show debug-level log output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to a daily-rolling file in this directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Repair recording defects, writing <name>.fixed.csv next to each source.
    Fix {
        /// Recording CSV files or directories to scan.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Repair already-corrected artifacts again and overwrite existing
        /// output files. The passes are not idempotent: forcing a re-run on
        /// corrected data shifts its beat numbers further.
        #[arg(long)]
        force: bool,
    },
    /// Report timing statistics for recordings.
    ///
    /// When a recording is present both raw and corrected, the corrected
    /// artifact is used.
    Stats {
        /// Recording CSV files or directories to scan.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Tempo override in beats per minute.
        #[arg(long)]
        bpm: Option<f64>,

        /// Include a per-key breakdown.
        #[arg(long)]
        per_key: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fix_with_force() {
        let cli = Cli::try_parse_from(["offbeat", "fix", "--force", "data/"]).unwrap();
        match cli.command {
            Command::Fix { paths, force } => {
                assert_eq!(paths, vec![PathBuf::from("data/")]);
                assert!(force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_stats_with_overrides() {
        let cli =
            Cli::try_parse_from(["offbeat", "-v", "stats", "--bpm", "120", "--per-key", "a.csv"])
                .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Stats { paths, bpm, per_key } => {
                assert_eq!(paths.len(), 1);
                assert_eq!(bpm, Some(120.0));
                assert!(per_key);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_paths() {
        assert!(Cli::try_parse_from(["offbeat", "fix"]).is_err());
        assert!(Cli::try_parse_from(["offbeat", "stats"]).is_err());
    }
}
