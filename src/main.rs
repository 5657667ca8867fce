//! Animation of the thermal evolution of a dyke intrusion in 1D
//!
//! Evaluates the error-function cooling profile for every frame and writes a
//! numbered PNG sequence, optionally with a CSV dump of the profiles.
//!
//! Usage:
//!   dyke_animation [--config props.json] [--out dir] [--stride n] [--csv file]
//!                  [--frames n] [--report n] [--abort-on-error] [--debug]

use colored::Colorize;
use dyke_thermal_rust::animation::{
    Animation, AnimationProps, CsvProfileWriterOp, FrameErrorPolicy,
    PngFrameWriterOp, ProgressReporterOp,
};
use dyke_thermal_rust::dyke_props::DykeProps;
use dyke_thermal_rust::render::PlotStyle;
use std::error::Error;
use std::process::ExitCode;

struct CliArgs {
    config: Option<String>,
    out_dir: String,
    stride: u32,
    csv: Option<String>,
    frames: Option<u32>,
    report_interval: u32,
    abort_on_error: bool,
    debug: bool,
}

/// Value following `--flag`, if present.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}

fn parse_number(args: &[String], flag: &str, default: u32) -> Result<u32, String> {
    match flag_value(args, flag) {
        Some(v) => v
            .parse()
            .map_err(|e| format!("{} expects a whole number, got {:?}: {}", flag, v, e)),
        None => Ok(default),
    }
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    Ok(CliArgs {
        config: flag_value(args, "--config"),
        out_dir: flag_value(args, "--out").unwrap_or_else(|| "dyke_frames".to_string()),
        stride: parse_number(args, "--stride", 40)?,
        csv: flag_value(args, "--csv"),
        frames: match flag_value(args, "--frames") {
            Some(_) => Some(parse_number(args, "--frames", 0)?),
            None => None,
        },
        report_interval: parse_number(args, "--report", 400)?,
        abort_on_error: args.iter().any(|a| a == "--abort-on-error"),
        debug: args.iter().any(|a| a == "--debug"),
    })
}

fn run(cli: CliArgs) -> Result<(), Box<dyn Error>> {
    let mut dyke = match &cli.config {
        Some(path) => DykeProps::load_json(path)?,
        None => DykeProps::default(),
    };
    if let Some(frames) = cli.frames {
        dyke.animation.frame_count = frames;
    }

    let mut ops = vec![
        ProgressReporterOp::handle(cli.report_interval),
        PngFrameWriterOp::handle(&cli.out_dir, "dyke", cli.stride, PlotStyle::default()),
    ];
    if let Some(csv) = cli.csv {
        ops.push(CsvProfileWriterOp::handle(csv, cli.stride));
    }

    let mut animation = Animation::new(AnimationProps {
        name: "DykeAnimation",
        dyke,
        ops,
        error_policy: if cli.abort_on_error {
            FrameErrorPolicy::Abort
        } else {
            FrameErrorPolicy::Skip
        },
        debug: cli.debug,
    })?;

    animation.run()?;
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::from(2);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
