// Compares every fixed-step method on y' = 30 y (x - 0.2)(x - 0.7), y(0) = 0.1.
//
// cargo run --example compare -- --points 25 --output ./outputs/compare.csv

use clap::{Parser, ValueEnum};
use fixed_step_odes::*;
use log::{error, info, warn, LevelFilter};

use std::error::Error;
use std::{fs::File, io::BufWriter, io::Write, path::PathBuf};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(about = "Compare fixed-step ODE methods against the exact solution")]
struct CommandlineArgs {
    /// Number of grid points
    #[arg(short, long, default_value_t = 10)]
    points: usize,

    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Write the results to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep going when a single method fails
    #[arg(long)]
    isolate: bool,

    /// One of off, error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = CommandlineArgs::parse();
    if let Err(e) = initialize_logging(&args.log_level) {
        eprintln!("{}", e);
    }
    if let Err(e) = run(&args) {
        error!("An error occurred: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &CommandlineArgs) -> Result<(), Box<dyn Error>> {
    let problem = lab_problem();
    if !problem.has_solution() {
        warn!("The problem defines no exact solution, errors are not reported.");
    }
    let policy = if args.isolate {
        FailurePolicy::Isolate
    } else {
        FailurePolicy::Abort
    };
    let report = Comparison::new(&problem)
        .with_failure_policy(policy)
        .run(args.points)?;

    for curve in report.curves() {
        if let Some(error) = curve.error {
            info!(
                "{:<20} order {}  max error {:.3e}  rms {:.3e}",
                curve.label, curve.order, error.max_abs, error.rms
            );
        }
    }
    for failure in report.failures() {
        error!("{}: {}", failure.label, failure.error);
    }

    let rendered = match args.format {
        Format::Csv => report.to_csv(),
        Format::Json => serde_json::to_string_pretty(&report)?,
    };
    match &args.output {
        Some(path) => {
            let mut buf = BufWriter::new(File::create(path)?);
            buf.write_all(rendered.as_bytes())?;
            buf.flush()?;
            info!("Results saved in: {:?}", path);
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn lab_problem() -> Problem {
    Problem::new(0.1, |x, y| 30. * y * (x - 0.2) * (x - 0.7))
        .with_partial(Partial::X, |x, y| y * (60. * x - 27.))
        .with_partial(Partial::XX, |_x, y| y * 60.)
        .with_partial(Partial::Y, |x, _y| 30. * (x - 0.7) * (x - 0.2))
        .with_partial(Partial::YY, |_x, _y| 0.)
        .with_partial(Partial::XY, |x, _y| 60. * x - 27.)
        .with_solution(|x| 0.1 * (x * (10. * x * x - 13.5 * x + 4.2)).exp())
}

fn initialize_logging(log_level: &str) -> Result<(), Box<dyn Error>> {
    let level = log_level.parse::<LevelFilter>().ok();
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level.unwrap_or(LevelFilter::Info))
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| format!("Unable to apply logger configuration ({:?})", e))?;

    if level.is_none() {
        error!(
            "Unknown log filter level '{}', using INFO instead.",
            log_level
        );
    }
    Ok(())
}
