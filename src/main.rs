extern crate clap;
extern crate env_logger;
extern crate julia;
#[macro_use]
extern crate log;

use clap::{App, Arg, ArgMatches};
use julia::planes::Dimensions;
use julia::report::append_to_csv;
use julia::JuliaRenderer;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

const RESOLUTION: &str = "n";
const OUTPUT: &str = "output";
const REPORT: &str = "report";

fn validate_resolution(s: &str) -> Result<(), String> {
    match usize::from_str(s) {
        Ok(n) => Dimensions::from_resolution(n)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Err(_) => Err("<n> must be a strictly positive integer".to_string()),
    }
}

fn args<'a>() -> ArgMatches<'a> {
    App::new("julia")
        .version("0.1.0")
        .about("Renders a 2n x n Julia set into a BMP file, single-threaded")
        .arg(
            Arg::with_name(RESOLUTION)
                .required(true)
                .index(1)
                .validator(|s| validate_resolution(&s))
                .help("Image height; the width is twice this"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("images/julia.bmp")
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

    let matches = args();
    let n = matches
        .value_of(RESOLUTION)
        .and_then(|s| usize::from_str(s).ok())
        .unwrap_or(0);
    let output = Path::new(matches.value_of(OUTPUT).unwrap_or("images/julia.bmp"));
    let report = Path::new(matches.value_of(REPORT).unwrap_or("reports/benchmark.csv"));

    let renderer = match JuliaRenderer::new(n) {
        Ok(renderer) => renderer,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let dims = renderer.dimensions();
    println!("Generating Julia set image of size {}x{}...", dims.width, dims.height);

    if let Err(e) = ensure_parent(output) {
        eprintln!("Render failure: cannot create {}: {}", output.display(), e);
        std::process::exit(1);
    }

    let stdout = io::stdout();
    match renderer.render_single(output, &mut stdout.lock()) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(summary) => {
            println!(
                "Julia set successfully saved to '{}' [{:.2} MB].",
                output.display(),
                summary.file_size as f64 / (1024.0 * 1024.0)
            );
            let appended = ensure_parent(report)
                .map_err(|e| e.to_string())
                .and_then(|_| append_to_csv(report, 1, n, summary.elapsed).map_err(|e| e.to_string()));
            if let Err(e) = appended {
                warn!("{}", e);
            }
        }
    }
}
