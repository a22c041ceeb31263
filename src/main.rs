//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::{
    fs,
    io::{self, Write},
    path::Path,
    time::Instant,
};

use hufvault::tools::cli::{hufopts_init, HufOpts, Mode, Output};
use hufvault::tools::report::Report;
use hufvault::{compress, decompress, Error, Result};

use log::{error, info, warn, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};
use tikv_jemallocator::Jemalloc;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() {
    // Log to stderr so --stdout output stays clean. The level is narrowed once the options are read.
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Could not start the logger.");
    }

    let opts = hufopts_init();

    //----- Figure how what we need to do and go do it
    let mut failed = 0;
    for file in &opts.files {
        let result = match opts.op_mode {
            Mode::Zip => zip_file(&opts, file),
            Mode::Unzip => unzip_file(&opts, file),
            Mode::Test => test_file(&opts, file),
        };
        if let Err(e) = result {
            if e.is_auth() {
                error!("{}: {}. Try again with the right --password.", file, e);
            } else {
                error!("{}: {}", file, e);
            }
            failed += 1;
        }
    }

    info!("Done.\n");
    if failed > 0 {
        std::process::exit(1);
    }
}

/// Compress one file and print a summary of the savings.
fn zip_file(opts: &HufOpts, file: &str) -> Result<()> {
    let start = Instant::now();
    let data = fs::read(file)?;
    let packed = compress(&data, opts.password.as_deref())?;
    write_output(opts, file, &packed)?;

    let report = Report {
        name: file.to_string(),
        original: data.len(),
        compressed: packed.len(),
        elapsed: start.elapsed(),
    };
    if report.reduction() < 0.0 {
        warn!("{} grew during compression.", file);
    }
    info!("{}", report);
    Ok(())
}

fn unzip_file(opts: &HufOpts, file: &str) -> Result<()> {
    let packed = fs::read(file)?;
    let data = decompress(&packed, opts.password.as_deref())?;
    write_output(opts, file, &data)
}

/// Decompress in memory only. Nothing is written and the input is always kept.
fn test_file(opts: &HufOpts, file: &str) -> Result<()> {
    let packed = fs::read(file)?;
    let data = decompress(&packed, opts.password.as_deref())?;
    info!("{}: ok ({} bytes)", file, data.len());
    Ok(())
}

/// Write to stdout or to the derived output file, then remove the input unless asked not to.
fn write_output(opts: &HufOpts, file: &str, bytes: &[u8]) -> Result<()> {
    match opts.output {
        Output::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
        Output::File => {
            let name = opts.output_name(file);
            if Path::new(&name).exists() && !opts.force_overwrite {
                return Err(Error::Input(format!(
                    "{} already exists, use --force to overwrite it",
                    name
                )));
            }
            fs::write(&name, bytes)?;
            info!("Wrote {} bytes to {}.", bytes.len(), name);
            if !opts.keep_input_files {
                fs::remove_file(file)?;
            }
        }
    }
    Ok(())
}
