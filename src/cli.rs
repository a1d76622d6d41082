//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::text_report_adapter::{TextReportAdapter, SIGNAL_LOG_ROWS};
use crate::domain::config_validation::{validate_evaluation_config, validate_strategy_config};
use crate::domain::error::PulsetraderError;
use crate::domain::evaluate::{evaluate_strategy, Evaluation, EvaluationWindow};
use crate::domain::execution::ExecutionMode;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::strategy::StrategyParams;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "pulsetrader", about = "EMA/RSI strategy evaluator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate the configured strategy over historical bars
    Evaluate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        json: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show available data range for a ticker
    Info {
        #[arg(long)]
        ticker: Option<String>,
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Evaluate {
            config,
            ticker,
            output,
            json,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_evaluate(&config, ticker.as_deref(), output.as_ref(), json.as_ref())
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::Info { ticker, config } => run_info(ticker.as_deref(), &config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PulsetraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_evaluate(
    config_path: &PathBuf,
    ticker_override: Option<&str>,
    output_path: Option<&PathBuf>,
    json_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Validate evaluation + strategy config
    if let Err(e) = validate_evaluation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 3: Build window and parameters
    let window = match build_window(&adapter, ticker_override) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let params = match build_params(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Evaluating {} from {} to {} ({})",
        window.ticker, window.start, window.end, params.execution_mode
    );

    // Stage 4: Fetch data
    let csv_dir = adapter
        .get_string("data", "csv_dir")
        .expect("csv_dir validated above");
    let data_port = CsvAdapter::new(PathBuf::from(csv_dir));

    let bars = match data_port.fetch_daily(&window.ticker, window.start, window.end) {
        Ok(bars) => bars,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 5: Validate series shape (non-empty, strictly ordered)
    let series = match PriceSeries::new(window.ticker.clone(), bars) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loaded {} bars for {}", series.len(), series.ticker());

    // Stage 6: Run the engine
    let evaluation = evaluate_strategy(series, &params);

    // Stage 7: Print console summary to stderr
    print_summary(&evaluation);

    // Stage 8: Write reports
    if let Some(path) = output_path {
        if let Err(e) = TextReportAdapter.write(&evaluation, path) {
            eprintln!("error: failed to write report: {e}");
            return (&e).into();
        }
        eprintln!("\nReport written to: {}", path.display());
    }
    if let Some(path) = json_path {
        if let Err(e) = JsonReportAdapter.write(&evaluation, path) {
            eprintln!("error: failed to write JSON report: {e}");
            return (&e).into();
        }
        eprintln!("JSON report written to: {}", path.display());
    }

    ExitCode::SUCCESS
}

fn print_summary(evaluation: &Evaluation) {
    let report = &evaluation.report;

    eprintln!("\n=== Results ===");
    eprintln!("Total Return:     {:.2}%", report.total_return * 100.0);
    match report.sharpe_ratio {
        Some(sharpe) => eprintln!("Sharpe Ratio:     {sharpe:.2}"),
        None => eprintln!("Sharpe Ratio:     N/A"),
    }
    eprintln!("Max Drawdown:     {:.2}%", report.max_drawdown * 100.0);
    eprintln!("Trade Count:      {}", report.trade_count);
    match report.win_rate {
        Some(rate) => eprintln!("Win Rate:         {:.1}%", rate * 100.0),
        None => eprintln!("Win Rate:         N/A"),
    }
    eprintln!("CAGR:             {:.2}%", report.cagr * 100.0);

    let rows = evaluation.recent_signals(SIGNAL_LOG_ROWS);
    if !rows.is_empty() {
        eprintln!("\n=== Recent Signals ===");
        for row in rows {
            eprintln!(
                "  {}  close {:.2}  RSI {:.1}  {}",
                row.bar.date, row.bar.close, row.rsi, row.signal
            );
        }
    }
}

pub fn build_window(
    adapter: &dyn ConfigPort,
    ticker_override: Option<&str>,
) -> Result<EvaluationWindow, PulsetraderError> {
    let ticker = match ticker_override {
        Some(t) => t.to_string(),
        None => adapter.get_string("evaluation", "ticker").ok_or_else(|| {
            PulsetraderError::ConfigMissing {
                section: "evaluation".into(),
                key: "ticker".into(),
            }
        })?,
    };

    let start = parse_config_date(adapter, "start_date")?;
    let end = parse_config_date(adapter, "end_date")?;
    if start >= end {
        return Err(PulsetraderError::InvalidDateRange { start, end });
    }

    Ok(EvaluationWindow { ticker, start, end })
}

fn parse_config_date(
    adapter: &dyn ConfigPort,
    key: &str,
) -> Result<NaiveDate, PulsetraderError> {
    let raw = adapter.get_string("evaluation", key).ok_or_else(|| {
        PulsetraderError::ConfigMissing {
            section: "evaluation".into(),
            key: key.into(),
        }
    })?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| PulsetraderError::ConfigInvalid {
        section: "evaluation".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

pub fn build_params(adapter: &dyn ConfigPort) -> Result<StrategyParams, PulsetraderError> {
    let defaults = StrategyParams::default();

    let execution_mode = match adapter.get_string("strategy", "execution_mode") {
        Some(raw) => raw
            .parse::<ExecutionMode>()
            .map_err(|reason| PulsetraderError::ConfigInvalid {
                section: "strategy".into(),
                key: "execution_mode".into(),
                reason,
            })?,
        None => defaults.execution_mode,
    };

    Ok(StrategyParams {
        short_period: adapter.get_int("strategy", "short_period", defaults.short_period as i64)
            as usize,
        long_period: adapter.get_int("strategy", "long_period", defaults.long_period as i64)
            as usize,
        rsi_period: adapter.get_int("strategy", "rsi_period", defaults.rsi_period as i64) as usize,
        overbought: adapter.get_double("strategy", "overbought", defaults.overbought),
        oversold: adapter.get_double("strategy", "oversold", defaults.oversold),
        execution_mode,
    })
}

pub fn run_dry_run(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_evaluation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Config validated successfully");

    let window = match build_window(&adapter, None) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let params = match build_params(&adapter) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nEvaluation window:");
    eprintln!("  ticker: {}", window.ticker);
    eprintln!("  start:  {}", window.start);
    eprintln!("  end:    {}", window.end);

    eprintln!("\nStrategy parameters:");
    eprintln!("  short EMA period: {}", params.short_period);
    eprintln!("  long EMA period:  {}", params.long_period);
    eprintln!("  RSI period:       {}", params.rsi_period);
    eprintln!("  overbought:       {}", params.overbought);
    eprintln!("  oversold:         {}", params.oversold);
    eprintln!("  execution mode:   {}", params.execution_mode);

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_evaluation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_strategy_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    eprintln!("Configuration is valid");
    ExitCode::SUCCESS
}

fn run_info(ticker_override: Option<&str>, config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let ticker = match ticker_override {
        Some(t) => t.to_string(),
        None => match adapter.get_string("evaluation", "ticker") {
            Some(t) => t,
            None => {
                eprintln!("error: no ticker given (use --ticker or set [evaluation] ticker)");
                return ExitCode::from(2);
            }
        },
    };

    let csv_dir = match adapter.get_string("data", "csv_dir") {
        Some(d) => d,
        None => {
            let err = PulsetraderError::ConfigMissing {
                section: "data".into(),
                key: "csv_dir".into(),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let data_port = CsvAdapter::new(PathBuf::from(csv_dir));
    match data_port.data_range(&ticker) {
        Ok(Some((first, last, count))) => {
            eprintln!("{ticker}: {first} to {last} ({count} bars)");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{ticker}: no data");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
