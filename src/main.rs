//! dirstat - Concurrent Per-Directory Disk Usage Scanner
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use dirstat::config::{CliArgs, OutputFormat, ScanConfig};
use dirstat::error::DirstatError;
use dirstat::progress::{print_header, print_summary, ProgressReporter};
use dirstat::report;
use dirstat::walker::ScanCoordinator;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = ScanConfig::from_args(args).context("Invalid configuration")?;

    // Log output format
    if config.output_format != OutputFormat::Csv {
        info!("Using {} output format", format_name(config.output_format));
    }

    // Print header
    if config.show_progress {
        print_header(
            &config.root.display().to_string(),
            config.worker_count,
            &config.output_path.display().to_string(),
        );
    }

    // Create coordinator
    let coordinator = ScanCoordinator::new(config.clone());

    // Setup signal handler for graceful shutdown
    let shutdown_flag = coordinator.shutdown_flag();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, shutting down...");
        shutdown_flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to set signal handler")?;

    // Run the scan, with or without the live spinner
    let result = if config.show_progress {
        let reporter = ProgressReporter::new();
        reporter.set_status("Enumerating directories...");

        let ticker = reporter.clone();
        let result = coordinator.run_with_progress(move |p| ticker.update(&p));

        match &result {
            Ok(_) => reporter.finish_and_clear(),
            Err(DirstatError::Interrupted) => reporter.finish("Scan interrupted"),
            Err(_) => reporter.finish("Scan failed"),
        }
        result.context("Scan failed")?
    } else {
        coordinator.run().context("Scan failed")?
    };

    // Write the report artifact
    report::write_report(&config, &result).context("Failed to write report")?;
    let report_size = std::fs::metadata(&config.output_path).ok().map(|m| m.len());

    // Print summary
    print_summary(
        result.total_dirs,
        result.total_files,
        result.total_bytes,
        result.failed_dirs,
        result.duration,
        &config.output_path.display().to_string(),
        report_size,
    );

    if result.failed_dirs > 0 {
        info!(
            failures = result.failed_dirs,
            "Scan completed with unreadable directories"
        );
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("dirstat=debug,warn")
    } else {
        EnvFilter::new("dirstat=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

fn format_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Csv => "CSV",
        OutputFormat::Json => "JSON",
    }
}
