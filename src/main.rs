#[cfg(not(feature = "cli"))]
compile_error!("The `ibdscan` binary requires the `cli` feature. Build with `--features cli`.");

use clap::Parser;
use env_logger::{Builder, Env};
use log::error;
use std::fs::File;
use std::io::Write;
use std::process;

use pagescan::cli;
use pagescan::cli::app::{Cli, ColorMode, Commands};
use pagescan::ScanError;

fn init_logger() {
    // RUST_LOG overrides, e.g. RUST_LOG=debug ibdscan scan -f t.ibd
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();
    let cli = Cli::parse();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {} // colored auto-detects tty
    }

    let writer_result: Result<Box<dyn Write>, ScanError> = match &cli.output {
        Some(path) => File::create(path)
            .map(|f| Box::new(f) as Box<dyn Write>)
            .map_err(|e| ScanError::Io(format!("Cannot create {}: {}", path, e))),
        None => Ok(Box::new(std::io::stdout()) as Box<dyn Write>),
    };

    let mut writer = match writer_result {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Scan {
            file,
            page,
            no_empty,
            summary,
            json,
            page_size,
            threads,
        } => {
            if threads > 0 {
                if let Err(e) = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()
                {
                    error!("Cannot configure {} decode threads: {}", threads, e);
                }
            }
            cli::scan::execute(
                &cli::scan::ScanOptions {
                    file,
                    page,
                    no_empty,
                    summary,
                    json,
                    page_size,
                },
                &mut writer,
            )
        }

        Commands::Dump {
            file,
            page,
            offset,
            length,
            page_size,
        } => cli::dump::execute(
            &cli::dump::DumpOptions {
                file,
                page,
                offset,
                length,
                page_size,
            },
            &mut writer,
        ),
    };

    if let Err(e) = writer.flush() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
