//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::{CsvAdapter, write_ledger, write_ticks};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::layered_config_adapter::LayeredConfig;
use crate::adapters::synthetic_adapter::{SyntheticAdapter, SyntheticConfig};
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::baseline::momentum_baseline;
use crate::domain::classifier::Classifier;
use crate::domain::config_validation::{
    build_classifier, build_latencies, build_simulation_config, get_count, validate_classifier_config,
    validate_data_config, validate_evaluation_config, validate_simulation_config,
};
use crate::domain::error::LatencyWarsError;
use crate::domain::evaluation::{EvaluationReport, LatencySweep};
use crate::domain::execution::simulate;
use crate::domain::metrics::TradeStats;
use crate::domain::price_series::PriceSeries;
use crate::logging::init_logging;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;
use crate::ports::report_port::ReportPort;

const DEFAULT_EXPORT_LATENCY: usize = 100;

#[derive(Parser, Debug)]
#[command(
    name = "latency-wars",
    about = "Measure how execution latency erodes a tick-level classifier"
)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a synthetic random-walk tick file
    Generate {
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        ticks: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        start_price: Option<f64>,
        #[arg(long)]
        volatility: Option<f64>,
    },
    /// Run the zero-latency momentum baseline
    Baseline {
        #[arg(short, long)]
        prices: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Run one latency-aware simulation
    Simulate {
        #[arg(short, long)]
        prices: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        latency: Option<usize>,
        #[arg(long)]
        window: Option<usize>,
        #[arg(long)]
        train_ratio: Option<f64>,
        /// logistic or threshold
        #[arg(long)]
        classifier: Option<String>,
        /// Write the trade ledger to this CSV file
        #[arg(long)]
        ledger: Option<PathBuf>,
    },
    /// Sweep latencies and compare against the baseline
    Evaluate {
        #[arg(short, long)]
        prices: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Comma-separated latencies, e.g. 1,5,10
        #[arg(long)]
        latencies: Option<String>,
        #[arg(long)]
        classifier: Option<String>,
        /// Write the JSON report to this file
        #[arg(long)]
        json: Option<PathBuf>,
        #[arg(long)]
        export_latency: Option<usize>,
        /// Write the ledger of the export latency to this CSV file
        #[arg(long)]
        ledger: Option<PathBuf>,
        /// Run latencies one after another instead of on the thread pool
        #[arg(long)]
        sequential: bool,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(&cli.log_level);

    let result = match cli.command {
        Command::Generate {
            output,
            config,
            ticks,
            seed,
            start_price,
            volatility,
        } => run_generate(
            &output,
            config.as_ref(),
            SyntheticOverrides {
                ticks,
                seed,
                start_price,
                volatility,
            },
        ),
        Command::Baseline { prices, config } => run_baseline(prices.as_ref(), config.as_ref()),
        Command::Simulate {
            prices,
            config,
            latency,
            window,
            train_ratio,
            classifier,
            ledger,
        } => {
            let file = match config.as_ref().map(load_config).transpose() {
                Ok(f) => f,
                Err(e) => return fail(&e),
            };
            let mut layered = layer(file.as_ref(), prices.as_ref());
            layered.set_opt("simulation", "latency_ticks", latency);
            layered.set_opt("simulation", "window_size", window);
            layered.set_opt("simulation", "train_ratio", train_ratio);
            layered.set_opt("classifier", "kind", classifier);
            run_simulate(&layered, ledger.as_deref())
        }
        Command::Evaluate {
            prices,
            config,
            latencies,
            classifier,
            json,
            export_latency,
            ledger,
            sequential,
        } => {
            let file = match config.as_ref().map(load_config).transpose() {
                Ok(f) => f,
                Err(e) => return fail(&e),
            };
            let mut layered = layer(file.as_ref(), prices.as_ref());
            layered.set_opt("evaluation", "latencies", latencies);
            layered.set_opt("classifier", "kind", classifier);
            layered.set_opt("evaluation", "export_latency", export_latency);
            layered.set_opt("evaluation", "export_path", ledger.map(|p| p.display().to_string()));
            run_evaluate(&layered, json.as_deref(), !sequential)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(err: &LatencyWarsError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err)
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, LatencyWarsError> {
    eprintln!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

/// Layers a `--prices` flag over the file config. An explicit CSV path
/// always wins over a configured synthetic source.
fn layer<'a>(file: Option<&'a FileConfigAdapter>, prices: Option<&PathBuf>) -> LayeredConfig<'a> {
    let mut layered = LayeredConfig::new(file.map(|f| f as &dyn ConfigPort));
    if let Some(path) = prices {
        layered.set("data", "csv_path", path.display());
        layered.set("data", "synthetic", false);
    }
    layered
}

pub fn build_synthetic_config(config: &dyn ConfigPort) -> Result<SyntheticConfig, LatencyWarsError> {
    let defaults = SyntheticConfig::default();
    Ok(SyntheticConfig {
        seed: config.get_uint("data", "seed", defaults.seed)?,
        num_ticks: get_count(config, "data", "num_ticks", defaults.num_ticks)?,
        start_price: config.get_double("data", "start_price", defaults.start_price)?,
        volatility: config.get_double("data", "volatility", defaults.volatility)?,
        ..defaults
    })
}

/// Picks the price source named by `[data]`: the synthetic generator when
/// `synthetic` is set, the CSV at `csv_path` otherwise.
pub fn resolve_price_source(
    config: &dyn ConfigPort,
) -> Result<Box<dyn PriceDataPort>, LatencyWarsError> {
    validate_data_config(config)?;
    if config.get_bool("data", "synthetic", false)? {
        return Ok(Box::new(SyntheticAdapter::new(build_synthetic_config(config)?)));
    }
    let path = config
        .get_string("data", "csv_path")
        .ok_or_else(|| LatencyWarsError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_path".to_string(),
        })?;
    Ok(Box::new(CsvAdapter::new(PathBuf::from(path.trim()))))
}

fn load_prices(config: &dyn ConfigPort) -> Result<PriceSeries, LatencyWarsError> {
    let source = resolve_price_source(config)?;
    eprintln!("Loading prices from {}", source.describe());
    let series = source.load_prices()?;
    eprintln!("  {} ticks", series.len());
    Ok(series)
}

struct SyntheticOverrides {
    ticks: Option<usize>,
    seed: Option<u64>,
    start_price: Option<f64>,
    volatility: Option<f64>,
}

fn run_generate(
    output: &Path,
    config_path: Option<&PathBuf>,
    overrides: SyntheticOverrides,
) -> Result<(), LatencyWarsError> {
    let file = config_path.map(load_config).transpose()?;
    let mut layered = LayeredConfig::new(file.as_ref().map(|f| f as &dyn ConfigPort));
    layered.set("data", "synthetic", true);
    layered.set_opt("data", "num_ticks", overrides.ticks);
    layered.set_opt("data", "seed", overrides.seed);
    layered.set_opt("data", "start_price", overrides.start_price);
    layered.set_opt("data", "volatility", overrides.volatility);
    validate_data_config(&layered)?;

    let adapter = SyntheticAdapter::new(build_synthetic_config(&layered)?);
    eprintln!("Generating {}", adapter.describe());
    let ticks = adapter.generate()?;
    write_ticks(output, &ticks)?;
    eprintln!("Wrote {} ticks to {}", ticks.len(), output.display());
    Ok(())
}

fn run_baseline(
    prices: Option<&PathBuf>,
    config_path: Option<&PathBuf>,
) -> Result<(), LatencyWarsError> {
    let file = config_path.map(load_config).transpose()?;
    let layered = layer(file.as_ref(), prices);
    let series = load_prices(&layered)?;

    let pnl = momentum_baseline(&series);
    println!("Baseline momentum PnL: {pnl:.2}");
    Ok(())
}

pub fn run_simulate(config: &dyn ConfigPort, ledger_path: Option<&Path>) -> Result<(), LatencyWarsError> {
    validate_simulation_config(config)?;
    validate_classifier_config(config)?;
    let sim_config = build_simulation_config(config)?;
    let classifier = build_classifier(config)?;
    let series = load_prices(config)?;

    eprintln!(
        "Simulating {} classifier at {} ticks latency (window {}, train ratio {})",
        classifier.name(),
        sim_config.latency_ticks,
        sim_config.window_size,
        sim_config.train_ratio
    );
    let result = simulate(&series, &sim_config, &classifier)?;
    let stats = TradeStats::compute(&result.ledger);

    println!("Train examples:   {}", result.train_examples);
    println!("Test examples:    {}", result.test_examples);
    println!("PnL:              {:.2}", result.pnl);
    println!("Trades:           {}", stats.num_trades);
    println!("Avg Profit/Trade: {:.4}", stats.avg_profit);
    println!("Win Rate:         {:.2}%", stats.win_rate * 100.0);
    println!("Final Position:   {}", result.final_position);

    if let Some(path) = ledger_path {
        write_ledger(path, &result.ledger)?;
        eprintln!("Trade log saved to {}", path.display());
    }
    Ok(())
}

pub fn run_evaluate(
    config: &dyn ConfigPort,
    json_path: Option<&Path>,
    parallel: bool,
) -> Result<(), LatencyWarsError> {
    let report = evaluate(config, parallel)?;
    print!("{}", TextReportAdapter::new().render(&report)?);

    if let Some(path) = json_path {
        JsonReportAdapter::new().write(&report, &path.display().to_string())?;
        eprintln!("Report written to {}", path.display());
    }

    if let Some(path) = config.get_string("evaluation", "export_path") {
        let export_latency =
            get_count(config, "evaluation", "export_latency", DEFAULT_EXPORT_LATENCY)?;
        match report.row(export_latency) {
            Some(row) => {
                write_ledger(Path::new(path.trim()), &row.ledger)?;
                eprintln!(
                    "Trade log for latency {} saved to {}",
                    export_latency,
                    path.trim()
                );
            }
            None => eprintln!(
                "warning: latency {export_latency} was not evaluated; no trade log written"
            ),
        }
    }
    Ok(())
}

/// Validates every section, loads prices and runs the latency sweep.
pub fn evaluate(config: &dyn ConfigPort, parallel: bool) -> Result<EvaluationReport, LatencyWarsError> {
    validate_simulation_config(config)?;
    validate_classifier_config(config)?;
    validate_evaluation_config(config)?;

    let sim_config = build_simulation_config(config)?;
    let classifier = build_classifier(config)?;
    let latencies = build_latencies(config)?;
    let series = load_prices(config)?;

    eprintln!(
        "Running {} classifier over {} latencies...",
        classifier.name(),
        latencies.len()
    );
    LatencySweep::new(&series, sim_config, &classifier)
        .with_parallelism(parallel)
        .run(&latencies)
}
