//! CLI argument definitions.

use crate::cli::validators::parse_threshold;
use crate::dataset::{Segment, SourceSpec};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Build image/mask segmentation datasets from fluid simulation snapshots.
#[derive(Debug, Parser)]
#[command(name = "flowmask")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "FLOWMASK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only print warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Copy snapshots into train/dev/test segments with derived masks.
    Generate(GenerateArgs),
    /// Delete every generated file below a directory, keeping the tree.
    Clean {
        /// Directory to empty (e.g. the destination root).
        dir: PathBuf,
    },
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the generate command.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Destination root (receives `<segment>/image/img` and `<segment>/mask/img`).
    #[arg(long, env = "FLOWMASK_DEST")]
    pub dest: Option<PathBuf>,

    /// Root directory holding the simulation dataset directories.
    #[arg(long, env = "FLOWMASK_LOC")]
    pub loc: Option<PathBuf>,

    /// Plan file with `[[train]]`, `[[dev]]` and `[[test]]` sources.
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// Train source as NAME or NAME=COUNT (COUNT is a number or '*'). Repeatable.
    #[arg(long = "train", value_name = "NAME[=COUNT]")]
    pub train: Vec<SourceSpec>,

    /// Dev source as NAME or NAME=COUNT. Repeatable.
    #[arg(long = "dev", value_name = "NAME[=COUNT]")]
    pub dev: Vec<SourceSpec>,

    /// Test source as NAME or NAME=COUNT. Repeatable.
    #[arg(long = "test", value_name = "NAME[=COUNT]")]
    pub test: Vec<SourceSpec>,

    /// Minimum curl magnitude for a masked pixel (encodable range 0.0-0.5).
    #[arg(long, value_parser = parse_threshold, env = "FLOWMASK_CURL_THRESHOLD")]
    pub curl_threshold: Option<f64>,

    /// Minimum velocity magnitude for a masked pixel.
    #[arg(long, value_parser = parse_threshold, env = "FLOWMASK_VELOCITY_THRESHOLD")]
    pub velocity_threshold: Option<f64>,

    /// Disable progress bars.
    #[arg(long)]
    pub no_progress: bool,
}

impl GenerateArgs {
    /// Sources given on the command line for `segment`.
    pub fn sources(&self, segment: Segment) -> &[SourceSpec] {
        match segment {
            Segment::Train => &self.train,
            Segment::Dev => &self.dev,
            Segment::Test => &self.test,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;
    use crate::dataset::CountSpec;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::try_parse_from(["flowmask"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::try_parse_from([
            "flowmask",
            "generate",
            "--dest",
            "data",
            "--loc",
            "datasets",
            "--train",
            "karman=*",
            "--train",
            "cavity=40",
            "--dev",
            "jet",
            "--curl-threshold",
            "0.45",
            "-q",
        ])
        .unwrap();

        let Some(Command::Generate(args)) = cli.command else {
            panic!("expected generate command");
        };
        assert_eq!(args.dest, Some(PathBuf::from("data")));
        assert_eq!(
            args.train,
            vec![
                SourceSpec::new("karman", CountSpec::All),
                SourceSpec::new("cavity", CountSpec::Limit(40)),
            ]
        );
        assert_eq!(args.sources(Segment::Dev), &[SourceSpec::new("jet", CountSpec::All)]);
        assert!(args.test.is_empty());
        assert_eq!(args.curl_threshold, Some(0.45));
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_parse_rejects_bad_count() {
        let cli = Cli::try_parse_from(["flowmask", "generate", "--train", "karman=lots"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_rejects_negative_threshold() {
        let cli = Cli::try_parse_from(["flowmask", "generate", "--velocity-threshold", "-3"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_clean() {
        let cli = Cli::try_parse_from(["flowmask", "clean", "data"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Clean { .. })));
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["flowmask", "config", "show"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_global_verbosity_after_subcommand() {
        let cli = Cli::try_parse_from(["flowmask", "generate", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
