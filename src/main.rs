use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use aqavm::{Machine, logging};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, info};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about = "Run an AQA assembly program", long_about = None)]
struct Args {
    /// Assembly source file to execute.
    program: String,

    /// Memory cell to pre-load before the run, as ADDR=VALUE. Repeatable.
    #[arg(long = "input", short = 'i', value_parser = parse_poke)]
    inputs: Vec<(i64, i64)>,

    /// Memory cell to print after the run. Repeatable.
    #[arg(long = "output", short = 'o')]
    outputs: Vec<i64>,

    /// Abort after executing this many instructions.
    #[arg(long)]
    max_steps: Option<u64>,

    /// Debug filter to specify log topics (e.g., "vm,instructions")
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
}

fn parse_poke(s: &str) -> Result<(i64, i64), String> {
    let (addr, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ADDR=VALUE, got '{}'", s))?;
    let addr = addr
        .trim()
        .parse()
        .map_err(|_| format!("invalid address '{}'", addr.trim()))?;
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid value '{}'", value.trim()))?;
    Ok((addr, value))
}

/// Write an error followed by each underlying cause
fn report(err: &dyn Error, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "error: {}", err)?;
    let mut source = err.source();
    while let Some(cause) = source {
        writeln!(out, "  caused by: {}", cause)?;
        source = cause.source();
    }
    Ok(())
}

/// Poke the inputs, run the program and write each requested output cell as `ADDR: VALUE`
fn execute(args: &Args, source: &str, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let mut machine = Machine::new();
    if let Some(limit) = args.max_steps {
        machine = machine.with_step_limit(limit);
    }
    for &(addr, value) in &args.inputs {
        machine.poke(addr, value)?;
    }

    info!("Running {}", args.program);
    machine.run(source)?;

    for &addr in &args.outputs {
        writeln!(out, "{}: {}", addr, machine.peek(addr)?)?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let source = fs::read_to_string(&args.program)
        .map_err(|e| format!("cannot read '{}': {}", args.program, e))?;
    execute(args, &source, &mut io::stdout().lock())
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init_logger(args.log_level.into(), args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = report(&*e, &mut io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}
