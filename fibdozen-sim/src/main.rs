mod aggregate;
mod reports;
mod runner;
mod seeds;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use fibdozen_engine::SimulationConfig;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use aggregate::aggregate_runs;
use runner::{BatchRunner, RunOutcome};
use seeds::resolve_seed_inputs;
use util::split_csv;

#[derive(Debug, Parser)]
#[command(name = "fibdozen-sim", version)]
#[command(
    about = "Simulate a Fibonacci betting progression on the third dozen of a single-zero roulette wheel"
)]
struct Args {
    /// JSON file with simulation parameters; individual flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting bankroll
    #[arg(long)]
    balance: Option<Decimal>,

    /// Base stake multiplied by the Fibonacci term
    #[arg(long)]
    unit_bet: Option<Decimal>,

    /// Ceiling on a single wager (0 disables the cap)
    #[arg(long)]
    max_bet: Option<Decimal>,

    /// Profit at which the run stops
    #[arg(long)]
    target_profit: Option<Decimal>,

    /// Stop after this many spins
    #[arg(long)]
    max_spins: Option<u64>,

    /// Seeds to run (comma-separated, `random` for a fresh seed)
    #[arg(long, default_value = "random")]
    seeds: String,

    /// Number of runs per seed
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    iterations: u64,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json", "markdown", "csv"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output, including the per-spin table in console reports
    #[arg(short, long)]
    verbose: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    show_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = resolve_config(&args)?;

    if args.show_config {
        let mut output_target = OutputTarget::new(args.output.clone())?;
        writeln!(output_target, "{}", serde_json::to_string_pretty(&config)?)?;
        output_target.flush_inner()?;
        return Ok(());
    }

    if args.report == "console" {
        announce_banner();
    }

    let start_time = Instant::now();
    let seed_tokens = split_csv(&args.seeds);
    let seeds = resolve_seed_inputs(&seed_tokens)?;
    log::debug!("resolved seeds: {seeds:?}");

    let outcomes = BatchRunner::new(args.verbose).run(&config, &seeds, args.iterations)?;

    write_reports(&args, &outcomes, start_time)
}

fn announce_banner() {
    println!("{}", "🎰 Fibonacci Dozens Simulator".bright_cyan().bold());
    println!("{}", "=============================".cyan());
}

/// Load the optional config file, then apply flag overrides and validate.
fn resolve_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = if let Some(path) = &args.config {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        SimulationConfig::from_json(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?
    } else {
        SimulationConfig::default()
    };

    if let Some(balance) = args.balance {
        config.start_balance = balance;
    }
    if let Some(unit_bet) = args.unit_bet {
        config.unit_bet = unit_bet;
    }
    if let Some(max_bet) = args.max_bet {
        config.max_bet = Some(max_bet);
    }
    if let Some(target_profit) = args.target_profit {
        config.target_profit = target_profit;
    }
    if let Some(max_spins) = args.max_spins {
        config.max_spins = Some(max_spins);
    }

    config.validate().context("invalid simulation parameters")?;
    Ok(config)
}

fn write_reports(args: &Args, outcomes: &[RunOutcome], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    let aggregate = (outcomes.len() > 1).then(|| aggregate_runs(outcomes));

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, outcomes, aggregate.as_ref())?,
        "markdown" => {
            reports::generate_markdown_report(&mut output_target, outcomes, aggregate.as_ref())?;
        }
        "csv" => reports::generate_csv_report(&mut output_target, outcomes)?,
        _ => reports::generate_console_report(
            &mut output_target,
            outcomes,
            aggregate.as_ref(),
            args.verbose,
            start_time.elapsed(),
        )?,
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        self.writer().flush()
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_args() -> Args {
        Args {
            config: None,
            balance: None,
            unit_bet: None,
            max_bet: None,
            target_profit: None,
            max_spins: Some(20),
            seeds: "42".to_string(),
            iterations: 1,
            report: "json".to_string(),
            output: None,
            verbose: false,
            show_config: false,
        }
    }

    fn temp_file(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fibdozen-{label}-{}", std::process::id()))
    }

    fn outcomes(args: &Args) -> Vec<RunOutcome> {
        let config = resolve_config(args).unwrap();
        BatchRunner::new(false).run(&config, &[42, 43], 1).unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args {
            balance: Some(dec!(250)),
            unit_bet: Some(dec!(2.5)),
            max_bet: Some(dec!(40)),
            target_profit: Some(dec!(0)),
            ..base_args()
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.start_balance, dec!(250));
        assert_eq!(config.unit_bet, dec!(2.5));
        assert_eq!(config.max_bet, Some(dec!(40)));
        assert_eq!(config.target_profit, Decimal::ZERO);
        assert_eq!(config.max_spins, Some(20));
    }

    #[test]
    fn config_file_is_loaded_then_overridden() {
        let path = temp_file("config.json");
        std::fs::write(&path, r#"{ "start_balance": "300", "unit_bet": "3" }"#).unwrap();
        let args = Args {
            config: Some(path.clone()),
            unit_bet: Some(dec!(4)),
            ..base_args()
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.start_balance, dec!(300));
        assert_eq!(config.unit_bet, dec!(4));
        assert_eq!(config.target_profit, dec!(100));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn invalid_flags_are_rejected() {
        let args = Args {
            unit_bet: Some(dec!(-1)),
            ..base_args()
        };
        let err = resolve_config(&args).unwrap_err();
        assert!(format!("{err:#}").contains("unit bet must be positive"));
    }

    #[test]
    fn missing_config_file_reports_path() {
        let args = Args {
            config: Some(PathBuf::from("/nonexistent/fibdozen.json")),
            ..base_args()
        };
        let err = resolve_config(&args).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/fibdozen.json"));
    }

    #[test]
    fn write_reports_emits_json_output() {
        let path = temp_file("report.json");
        let args = Args {
            output: Some(path.clone()),
            ..base_args()
        };
        write_reports(&args, &outcomes(&args), Instant::now()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["runs"].as_array().unwrap().len(), 2);
        assert!(value.get("aggregate").is_some());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn write_reports_emits_csv_output() {
        let path = temp_file("report.csv");
        let args = Args {
            report: "csv".to_string(),
            output: Some(path.clone()),
            ..base_args()
        };
        write_reports(&args, &outcomes(&args), Instant::now()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("run,seed,spin,"));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn output_target_writes_to_file() {
        let path = temp_file("target.txt");
        let mut target = OutputTarget::new(Some(path.clone())).unwrap();
        writeln!(target, "hello").unwrap();
        target.flush_inner().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        let _ = std::fs::remove_file(path);
    }
}
