//! `ocm`: anytime one-sided crossing minimization solver.
//!
//! Reads a PACE OCR instance from a file or standard input, searches within
//! the configured wall-clock budget, and writes the best free-layer order to
//! a file or standard output. SIGTERM/SIGINT request early emission of the
//! best order found so far.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::{Parser, ValueEnum};
use ocm_core::{ErrorInfo, InterruptFlag, OcmError};
use ocm_graph::{write_solution, Instance};
use ocm_search::{Outcome, RunConfig, RunMode};

#[derive(Parser, Debug)]
#[command(name = "ocm", about = "Anytime one-sided crossing minimization solver")]
struct Cli {
    /// Instance file; read standard input when absent (disables progress).
    instance: Option<PathBuf>,
    /// Output file; write standard output when absent.
    output: Option<PathBuf>,
    /// Operating mode (overrides the config file).
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Master seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,
    /// Wall-clock budget in seconds (overrides the config file).
    #[arg(long = "time-limit")]
    time_limit: Option<f64>,
    /// YAML run configuration; explicit flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Always emit the best order found.
    Heuristic,
    /// Refuse to emit without certification or pool consensus.
    Exact,
}

impl From<ModeArg> for RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Heuristic => RunMode::Heuristic,
            ModeArg::Exact => RunMode::Exact,
        }
    }
}

/// Stop flag shared with the signal handler. The handler performs a single
/// atomic store; emission always happens on the main control path.
static INTERRUPT: OnceLock<InterruptFlag> = OnceLock::new();

extern "C" fn on_termination_signal(_signal: libc::c_int) {
    if let Some(flag) = INTERRUPT.get() {
        flag.raise();
    }
}

fn register_signal_handlers(flag: &InterruptFlag) {
    let _ = INTERRUPT.set(flag.clone());
    let handler = on_termination_signal as extern "C" fn(libc::c_int);
    unsafe {
        libc::signal(libc::SIGTERM, handler as libc::sighandler_t);
        libc::signal(libc::SIGINT, handler as libc::sighandler_t);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match solve(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn solve(cli: Cli) -> Result<ExitCode, OcmError> {
    let mut config = load_config(&cli)?;
    config.progress = cli.instance.is_some();

    let instance = read_instance(&cli)?;
    if let (true, Some(path)) = (config.progress, &cli.instance) {
        eprintln!(
            "read {} with {} + {}({}) vertices, {} edges, max degree {}",
            path.display(),
            instance.fixed_count(),
            instance.free_count(),
            instance.active().len(),
            instance.edge_count(),
            instance.max_free_degree()
        );
    }

    let interrupt = InterruptFlag::new();
    register_signal_handlers(&interrupt);

    match ocm_search::run(&instance, &config, interrupt) {
        Ok(outcome) => {
            emit(&instance, &outcome, &cli)?;
            if config.progress {
                eprintln!(
                    "solution has {} crossings, confidence {}",
                    outcome.crossings,
                    describe_confidence(&outcome)
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(OcmError::Search(info)) => {
            eprintln!("no emission: {info}");
            Ok(ExitCode::FAILURE)
        }
        Err(other) => Err(other),
    }
}

fn describe_confidence(outcome: &Outcome) -> String {
    if outcome.certified {
        "OPTIMAL".to_string()
    } else {
        format!("{}/{}", outcome.tied, outcome.pool_target)
    }
}

fn load_config(cli: &Cli) -> Result<RunConfig, OcmError> {
    let mut config = match &cli.config {
        Some(path) => {
            let file = File::open(path).map_err(|err| config_error(path, err.to_string()))?;
            serde_yaml::from_reader(BufReader::new(file))
                .map_err(|err| config_error(path, err.to_string()))?
        }
        None => RunConfig::for_mode(cli.mode.map(RunMode::from).unwrap_or_default()),
    };

    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(limit) = cli.time_limit {
        config.time_budget_secs = limit;
    }
    Ok(config)
}

fn config_error(path: &std::path::Path, message: String) -> OcmError {
    OcmError::Config(
        ErrorInfo::new("config-unreadable", message)
            .with_context("path", path.display().to_string()),
    )
}

fn read_instance(cli: &Cli) -> Result<Instance, OcmError> {
    match &cli.instance {
        Some(path) => {
            let file = File::open(path).map_err(|err| {
                OcmError::Instance(
                    ErrorInfo::new("instance-unreadable", err.to_string())
                        .with_context("path", path.display().to_string()),
                )
            })?;
            Instance::parse(BufReader::new(file))
        }
        None => {
            let stdin = io::stdin();
            Instance::parse(stdin.lock())
        }
    }
}

fn emit(instance: &Instance, outcome: &Outcome, cli: &Cli) -> Result<(), OcmError> {
    match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|err| {
                OcmError::Arrangement(
                    ErrorInfo::new("output-unwritable", err.to_string())
                        .with_context("path", path.display().to_string()),
                )
            })?;
            write_solution(instance, &outcome.order, &mut BufWriter::new(file))
        }
        None => {
            let stdout = io::stdout();
            write_solution(instance, &outcome.order, &mut stdout.lock())
        }
    }
}
