//! `index_lookup`: time every operation family and log the results.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use lookup_bench::logging::{self, LogSink, DEFAULT_LOG_FILE};
use lookup_bench::{BenchConfig, Driver, Stopwatch};

#[derive(Parser, Debug)]
#[command(
    name = "index_lookup",
    version,
    about = "Insert/lookup latency of f64 timestamp -> index structures"
)]
struct Args {
    /// Nbr of runs
    #[arg(short = 'c', long = "count", default_value_t = 100)]
    count: usize,

    /// Nbr of indices per run (also the probe table capacity)
    #[arg(short = 's', long = "size", default_value_t = 10_000)]
    size: usize,

    /// Lookups procent
    #[arg(short = 'p', long = "procent", default_value_t = 20)]
    procent: u32,

    /// Seed workload and lookup draws for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Append log records to this file
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Log to stderr instead of the log file
    #[arg(long, conflicts_with = "log_file")]
    log_stderr: bool,
}

impl Args {
    fn config(&self) -> BenchConfig {
        BenchConfig {
            runs: self.count,
            size: self.size,
            percent: self.procent,
            seed: self.seed,
            ..BenchConfig::default()
        }
    }

    fn sink(&self) -> LogSink {
        if self.log_stderr {
            LogSink::Stderr
        } else {
            LogSink::File(self.log_file.clone())
        }
    }
}

/// Help and version requests are successful exits; anything else is a usage error.
fn exit_code_for(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Usage line shown after argument errors.
fn usage() -> String {
    Args::command().render_usage().to_string()
}

/// Full stderr text for an argument error; always ends with the usage line.
fn usage_error_text(err: &clap::Error) -> String {
    let message = err.to_string();
    if message.contains("Usage:") {
        message
    } else {
        format!("{}\n{}\n", message.trim_end(), usage())
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = exit_code_for(err.kind());
            if code == 0 {
                if let Err(io_err) = err.print() {
                    eprintln!("error: {}", io_err);
                    return ExitCode::from(1);
                }
            } else {
                eprint!("{}", usage_error_text(&err));
            }
            return ExitCode::from(code);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> lookup_bench::Result<()> {
    let config = args.config();
    config.validate()?;
    logging::init(&args.sink())?;

    log::info!("===== Start test ============");
    log::info!(
        "Args: {}",
        std::env::args().skip(1).collect::<Vec<_>>().join(" ")
    );
    log::info!(
        "{} runs x {} items, {} lookups ({}%)",
        config.runs,
        config.size,
        config.lookups(),
        config.percent
    );

    let mut total = Stopwatch::new();
    total.start()?;
    let mut driver = Driver::from_config(config)?;
    let results = driver.run_all()?;
    total.stop()?;
    println!();

    let failures: usize = results.iter().map(|m| m.failures).sum();
    if failures > 0 {
        println!("{} lookups failed", failures);
        log::error!("{} lookups failed", failures);
    }
    let dropped: usize = results.iter().map(|m| m.dropped).sum();
    if dropped > 0 {
        println!("{} inserts dropped", dropped);
    }

    log::info!("Total time: {}s", total.elapsed_seconds());
    Ok(())
}
