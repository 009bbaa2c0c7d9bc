// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Batch driver for the gap-bound verification run.
//!
//! Validates the configuration, explores the full state space, checks the
//! invariant, and emits the requested artifacts. Exit status is 0 when the
//! bound holds and 1 on a violation or a configuration error.

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use gapsim::engine::explore;
use gapsim::layout::{LayoutConfig, Layouter};
use gapsim::report::{write_dot, write_histogram};
use gapsim::verify::verify_gap_bound;

const USAGE: &str = "\
Usage: gapsim [OPTIONS]

Options:
  --unit N         Ring unit in bytes, a power of two (default: 16)
  --sizes A,B,...  Allowed allocation sizes, ascending powers of two
                   (default: every power of two up to the unit)
  --dot PATH       Write the transition graph as Graphviz DOT ('-' = stdout)
  --hist PATH      Write the gap-size histogram ('-' = stdout)
  --help           Show this message
";

struct Options {
    unit: u32,
    sizes: Option<Vec<u32>>,
    dot: Option<String>,
    hist: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options {
        unit: 16,
        sizes: None,
        dot: None,
        hist: None,
    };
    let mut it = args.iter();
    while let Some(arg) = it.next() {
        let mut value = |name: &str| {
            it.next()
                .cloned()
                .ok_or_else(|| format!("Missing value for {}", name))
        };
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--unit" => {
                options.unit = value("--unit")?
                    .parse()
                    .map_err(|_| "Invalid --unit value".to_string())?;
            }
            "--sizes" => {
                let sizes = value("--sizes")?
                    .split(',')
                    .map(|s| s.trim().parse())
                    .collect::<Result<Vec<u32>, _>>()
                    .map_err(|_| "Invalid --sizes value".to_string())?;
                options.sizes = Some(sizes);
            }
            "--dot" => options.dot = Some(value("--dot")?),
            "--hist" => options.hist = Some(value("--hist")?),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(Some(options))
}

fn artifact(path: &str) -> io::Result<Box<dyn Write>> {
    if path == "-" {
        Ok(Box::new(io::stdout().lock()))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}

fn run(options: &Options) -> Result<(), Box<dyn Error>> {
    let config = match &options.sizes {
        Some(sizes) => LayoutConfig::new(options.unit, sizes.clone())?,
        None => LayoutConfig::all_sizes(options.unit)?,
    };
    let unit = config.unit();
    let layouter = Layouter::new(config);

    let reachable = explore(&layouter);
    let verification = verify_gap_bound(&reachable, unit)?;

    if let Some(path) = &options.dot {
        let mut out = artifact(path)?;
        write_dot(&mut *out, &reachable)?;
        out.flush()?;
    }
    if let Some(path) = &options.hist {
        let mut out = artifact(path)?;
        write_histogram(&mut *out, &verification.histogram)?;
        out.flush()?;
    }

    println!(
        "Gap bound holds: {} states, {} edges, worst slack {} of {} bytes",
        reachable.state_count(),
        reachable.edge_count(),
        verification.histogram.worst(),
        unit
    );
    println!("Transitions by kind: {}", verification.statistics);
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{}", message);
            eprint!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("gapsim: {}", error);
            ExitCode::FAILURE
        }
    }
}
