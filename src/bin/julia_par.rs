extern crate clap;
extern crate env_logger;
extern crate julia;
#[macro_use]
extern crate log;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use julia::planes::Dimensions;
use julia::report::append_to_csv;
use julia::JuliaRenderer;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

const RESOLUTION: &str = "n";
const OUTPUT: &str = "output";
const REPORT: &str = "report";
const WORKERS: &str = "workers";
const MAX_WORKERS: usize = 1024;

fn validate_resolution(s: &str) -> Result<(), String> {
    match usize::from_str(s) {
        Ok(n) => Dimensions::from_resolution(n)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Err(_) => Err("<n> must be a positive integer".to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn args<'a>(default_workers: &'a str) -> ArgMatches<'a> {
    App::new("julia_par")
        .version("0.1.0")
        .about("Renders a 2n x n Julia set into a BMP file with a ring of workers")
        .arg(
            Arg::with_name(RESOLUTION)
                .required(true)
                .index(1)
                .validator(|s| validate_resolution(&s))
                .help("Image height; the width is twice this"),
        )
        .arg(
            Arg::with_name(WORKERS)
                .long(WORKERS)
                .short("w")
                .takes_value(true)
                .default_value(default_workers)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        MAX_WORKERS,
                        "Could not parse worker count",
                        &format!("Worker count must be between 1 and {}", MAX_WORKERS),
                    )
                })
                .help("Number of workers in the ring"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("images/julia_mpi.bmp")
                .help("Output file"),
        )
        .arg(
            Arg::with_name(REPORT)
                .long(REPORT)
                .short("r")
                .takes_value(true)
                .default_value("reports/benchmark.csv")
                .help("Benchmark CSV to append the run time to"),
        )
        .get_matches()
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let default_workers = num_cpus::get().min(MAX_WORKERS).to_string();
    let matches = args(&default_workers);
    let n = matches
        .value_of(RESOLUTION)
        .and_then(|s| usize::from_str(s).ok())
        .unwrap_or(0);
    let workers = matches
        .value_of(WORKERS)
        .and_then(|s| usize::from_str(s).ok())
        .unwrap_or(1);
    let output = Path::new(matches.value_of(OUTPUT).unwrap_or("images/julia_mpi.bmp"));
    let report = Path::new(matches.value_of(REPORT).unwrap_or("reports/benchmark.csv"));

    let renderer = match JuliaRenderer::new(n) {
        Ok(renderer) => renderer,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = ensure_parent(output) {
        eprintln!("Render failure: cannot create {}: {}", output.display(), e);
        std::process::exit(1);
    }

    let started = Instant::now();
    match renderer.render_ring(output, workers) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(timings) => {
            let elapsed = started.elapsed();
            for timing in &timings {
                println!("{}", timing);
            }
            let appended = ensure_parent(report)
                .map_err(|e| e.to_string())
                .and_then(|_| append_to_csv(report, workers, n, elapsed).map_err(|e| e.to_string()));
            if let Err(e) = appended {
                warn!("{}", e);
            }
        }
    }
}
