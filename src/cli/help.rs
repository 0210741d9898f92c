//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::config::Config;

/// Print help message based on configuration state.
pub fn print_smart_help(config: &Config) {
    if config.plan.is_empty() {
        print_first_time_help();
    } else {
        print_configured_help(config);
    }
}

/// Print detailed setup guide for first-time users.
pub fn print_first_time_help() {
    println!("No dataset plan configured. Get started with flowmask:");
    println!();
    println!("1. Lay out simulation snapshots, one directory per run:");
    println!("   datasets/<run>/<base>_<idx>.png      principal frame (copied as the image)");
    println!("   datasets/<run>/<base>_v_<idx>.png    velocity field");
    println!("   datasets/<run>/<base>_c_<idx>.png    curl field");
    println!();
    println!("2. Generate train/dev/test pairs:");
    println!("   flowmask generate --loc datasets --dest data --train run_a='*' --dev run_b=50");
    println!();
    println!("3. Or keep the plan in configuration:");
    println!("   flowmask config init");
    println!("   (then add [[plan.train]] entries to the file printed by 'flowmask config path')");
    println!();
    println!("Run 'flowmask -h' for all options.");
}

/// Print brief usage reminder for configured users.
pub fn print_configured_help(config: &Config) {
    println!("Usage: flowmask <COMMAND> [OPTIONS]");
    println!();
    println!(
        "Configured plan: {} source(s), {} -> {}",
        config.plan.source_count(),
        config.paths.loc.display(),
        config.paths.dest.display()
    );
    println!();
    println!("Run 'flowmask generate' to apply it, or 'flowmask -h' for all options.");
}
