//! The main library for the `slic-runner` application.
//!
//! This crate validates SLIC superpixel parameters and turns them into a single
//! invocation of the external `slic_image_segmenter` backend. The primary entry
//! point is the `run` function, which takes the parsed CLI arguments and drives
//! the whole pipeline: validate, compose, launch, wait.
//!
//! The library is structured into several modules:
//! - `cli`: Defines the command-line interface.
//! - `config`: Validates parsed arguments into a `Configuration`.
//! - `composer`: Maps a `Configuration` onto the backend's flags.
//! - `invoker`: Runs the backend and propagates its exit status.
//! - `preflight`: Logs what the backend will find in the input directory.
//! - `diagnostics`: JSON failure reports.
//! - `error`: Defines the application's custom error type and exit codes.

use anyhow::{Context, Result};

pub mod cli;
pub mod composer;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod invoker;
pub mod preflight;

use crate::cli::Cli;
use crate::composer::BackendCommand;
use crate::config::Configuration;
use crate::error::SegmenterError;

/// The main entry point for the application logic.
///
/// This function orchestrates the entire process:
/// 1.  It validates the arguments and composes the backend command.
/// 2.  It logs the command and what the input directory holds.
/// 3.  Unless `--dry-run` is set, it runs the backend and waits for it.
///
/// All validation happens before anything is launched.
///
/// # Errors
///
/// Returns a `SegmenterError` (possibly wrapped in context) if validation
/// fails, the backend cannot be started, or the backend exits non-zero.
pub fn run(cli: &Cli) -> Result<()> {
    let (config, cmd) = prepare(cli)?;
    log::info!("{}", cmd);
    preflight::report(&config);

    if cli.dry_run {
        println!("{}", render_dry_run(&cmd, cli.json)?);
        return Ok(());
    }

    invoker::invoke(&cmd).with_context(|| {
        format!(
            "Segmentation of '{}' failed",
            config.input_path.display()
        )
    })?;

    log::info!("Done.");
    Ok(())
}

/// Renders the `--dry-run` output: the command line, or a JSON array of argv
/// tokens when `json` is set.
pub fn render_dry_run(cmd: &BackendCommand, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(&cmd.argv_lossy())?)
    } else {
        Ok(cmd.to_string())
    }
}

/// Validates the arguments and composes the backend command without running it.
pub fn prepare(cli: &Cli) -> Result<(Configuration, BackendCommand), SegmenterError> {
    let config = Configuration::from_cli(cli)?;
    let cmd = composer::compose(&config, &cli.bin_dir);
    Ok((config, cmd))
}
