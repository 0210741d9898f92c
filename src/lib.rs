//! flowmask - segmentation dataset builder for fluid simulation snapshots.
//!
//! Scans directories of simulation frames, derives a binary mask from each
//! frame's velocity and curl fields, and copies (image, mask) pairs into
//! train/dev/test segments with sequential numeric file names.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod utils;

use clap::Parser;
use cli::{Cli, Command, GenerateArgs};
use config::{
    Config, config_file_path, load_config, save_config, save_default_config, validate_config,
    validate_plan, validate_thresholds,
};
use dataset::{Segment, Thresholds, load_plan_file};
use pipeline::{GenerateRequest, GenerateSummary, generate};
use std::path::Path;
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for flowmask CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    // Load configuration
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(command) => handle_command(command, &config, cli.config.as_deref(), cli.quiet),
        None => {
            cli::help::print_smart_help(&config);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_command(
    command: Command,
    config: &Config,
    config_path: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    match command {
        Command::Generate(args) => generate_dataset(&args, config, quiet),
        Command::Clean { dir } => {
            let report = utils::clean::clean_data_dir(&dir)?;
            info!(
                "Removed {} file(s) from {} ({} directories kept)",
                report.files_removed,
                dir.display(),
                report.dirs_visited
            );
            Ok(())
        }
        Command::Config { action } => handle_config_command(action, config_path),
    }
}

/// Resolve CLI arguments against the configuration into a generate request.
///
/// Precedence: command-line flag, then plan file, then configuration file.
/// Sources given with `--train/--dev/--test` replace that segment's planned
/// sources.
pub fn build_request(args: &GenerateArgs, config: &Config, quiet: bool) -> Result<GenerateRequest> {
    let mut plan = match &args.plan {
        Some(path) => load_plan_file(path)?,
        None => config.plan.clone(),
    };

    for segment in Segment::ALL {
        let sources = args.sources(segment);
        if !sources.is_empty() {
            plan.set_sources(segment, sources.to_vec());
        }
    }

    let thresholds = Thresholds {
        curl: args.curl_threshold.unwrap_or(config.thresholds.curl),
        velocity: args
            .velocity_threshold
            .unwrap_or(config.thresholds.velocity),
    };

    Ok(GenerateRequest {
        dest: args.dest.clone().unwrap_or_else(|| config.paths.dest.clone()),
        loc: args.loc.clone().unwrap_or_else(|| config.paths.loc.clone()),
        plan,
        thresholds,
        progress: !quiet && !args.no_progress && config.output.progress,
    })
}

/// Run the generate command.
fn generate_dataset(args: &GenerateArgs, config: &Config, quiet: bool) -> Result<()> {
    let request = build_request(args, config, quiet)?;
    validate_thresholds(&request.thresholds)?;
    validate_plan(&request.plan)?;

    info!(
        "Generating from {} into {} (curl >= {}, velocity >= {})",
        request.loc.display(),
        request.dest.display(),
        request.thresholds.curl,
        request.thresholds.velocity
    );

    let summary = generate(&request)?;
    log_summary(&summary);
    Ok(())
}

fn log_summary(summary: &GenerateSummary) {
    for report in &summary.sources {
        match (report.first_index, report.last_index) {
            (Some(first), Some(last)) => info!(
                "  {}/{}: {} of {} written as {}..={} ({} skipped)",
                report.segment,
                report.dataset,
                report.written,
                report.available,
                first,
                last,
                report.skipped
            ),
            _ => info!(
                "  {}/{}: nothing written ({} available, {} skipped)",
                report.segment, report.dataset, report.available, report.skipped
            ),
        }
    }

    for segment in Segment::ALL {
        let written = summary.written_to(segment);
        if written > 0 {
            info!("{segment}: {written} new pair(s)");
        }
    }

    info!(
        "Complete: {} written, {} skipped in {:.2}s",
        summary.written(),
        summary.skipped(),
        summary.duration_secs
    );

    if summary.skipped() > 0 {
        warn!(
            "{} snapshot(s) were skipped because files were missing or unreadable",
            summary.skipped()
        );
    }
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction, config_path: Option<&Path>) -> Result<()> {
    use cli::ConfigAction;

    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => config_file_path()?,
    };

    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let config = Config::default();
                let saved_path = if config_path.is_some() {
                    save_config(&config, &path)?;
                    path
                } else {
                    save_default_config(&config)?
                };
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!("  add [[plan.train]] / [[plan.dev]] / [[plan.test]] entries, then run");
                println!("  flowmask generate");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            if let Err(e) = validate_config(&config) {
                warn!("{e}");
            }
            let text = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("{text}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
