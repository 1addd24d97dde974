//! Command-line arguments.
//!
//! Flags override the matching keys of `shoal-config.yaml`; anything not
//! given on the command line keeps its configured value. Paths given on the
//! command line are relative to the working directory, not to the config
//! file.

use std::path::{Path, PathBuf};

use clap::Parser;
use shoal_core::ShoalConfig;

/// Derive closed-form population formulas and check them.
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Args {
    /// Configuration file; defaults are used when it does not exist.
    #[clap(long, default_value = "shoal-config.yaml")]
    pub config: PathBuf,

    /// File with comma-separated initial ages.
    #[clap(long)]
    pub input: Option<PathBuf>,

    /// Horizon to solve, in days. Repeat for several horizons.
    #[clap(long = "days")]
    pub days: Vec<usize>,

    /// Print the total expression for every simulated day.
    #[clap(long)]
    pub print_expr: bool,

    /// Skip building the per-day coefficient table.
    #[clap(long)]
    pub no_coefficients: bool,

    /// Write a JSON report to this path.
    #[clap(long)]
    pub report: Option<PathBuf>,
}

impl Args {
    /// Fold command-line overrides into `config`.
    ///
    /// Relative `--input` and `--report` paths are anchored at `cwd` so the
    /// runner does not re-resolve them against the config directory.
    pub fn apply(&self, config: &mut ShoalConfig, cwd: &Path) {
        if let Some(input) = &self.input {
            config.verification.input = Some(cwd.join(input));
        }
        if !self.days.is_empty() {
            config.run.horizons.clone_from(&self.days);
        }
        if self.print_expr {
            config.run.print_expressions = true;
        }
        if self.no_coefficients {
            config.run.generate_coefficients = false;
        }
        if let Some(report) = &self.report {
            config.output.report_path = Some(cwd.join(report));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shoal_types::RunId;

    use super::*;
    use crate::runner;

    #[test]
    fn defaults_leave_config_untouched() {
        let args = Args::try_parse_from(["shoal-engine"]).unwrap();
        assert_eq!(args.config, PathBuf::from("shoal-config.yaml"));

        let mut config = ShoalConfig::default();
        args.apply(&mut config, Path::new("/work"));
        assert_eq!(config, ShoalConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "shoal-engine",
            "--config",
            "conf/shoal.yaml",
            "--input",
            "puzzle.txt",
            "--days",
            "18",
            "--days",
            "40",
            "--print-expr",
            "--no-coefficients",
            "--report",
            "out.json",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("conf/shoal.yaml"));

        let mut config = ShoalConfig::default();
        args.apply(&mut config, Path::new("/work"));
        assert_eq!(
            config.verification.input,
            Some(PathBuf::from("/work/puzzle.txt"))
        );
        assert_eq!(config.run.horizons, vec![18, 40]);
        assert!(config.run.print_expressions);
        assert!(!config.run.generate_coefficients);
        assert_eq!(
            config.output.report_path,
            Some(PathBuf::from("/work/out.json"))
        );
    }

    #[test]
    fn absolute_flag_paths_are_kept() {
        let args = Args::try_parse_from([
            "shoal-engine",
            "--input",
            "/data/puzzle.txt",
            "--report",
            "/tmp/out.json",
        ])
        .unwrap();

        let mut config = ShoalConfig::default();
        args.apply(&mut config, Path::new("/work"));
        assert_eq!(
            config.verification.input,
            Some(PathBuf::from("/data/puzzle.txt"))
        );
        assert_eq!(
            config.output.report_path,
            Some(PathBuf::from("/tmp/out.json"))
        );
    }

    #[test]
    fn input_flag_is_read_from_working_dir_not_config_dir() {
        let cwd = std::env::temp_dir().join(format!("shoal-cli-{}", RunId::new()));
        std::fs::create_dir_all(cwd.join("conf")).unwrap();
        std::fs::write(cwd.join("puzzle.txt"), "3,4,3,1,2\n").unwrap();

        let args = Args::try_parse_from([
            "shoal-engine",
            "--config",
            "conf/shoal.yaml",
            "--input",
            "puzzle.txt",
            "--days",
            "18",
        ])
        .unwrap();
        let mut config = ShoalConfig::default();
        args.apply(&mut config, &cwd);

        let config_dir = cwd.join(args.config.parent().unwrap());
        let report = runner::run(&config, &config_dir).unwrap();
        assert_eq!(report.horizons.first().and_then(|h| h.population), Some(26));
    }

    #[test]
    fn rejects_non_numeric_days() {
        assert!(Args::try_parse_from(["shoal-engine", "--days", "soon"]).is_err());
    }

    #[test]
    fn rejects_undocumented_export_flag() {
        assert!(Args::try_parse_from(["shoal-engine", "--coefficients-out", "x.json"]).is_err());
    }
}
