//! quantamental: score a stock from a filled-in analysis form and print the report.
//!
//! Usage:
//!   quantamental --input acme.form
//!   quantamental --input acme.json --format json
//!   quantamental --input acme.form --set rsi=72 --set above200=no
//!   cat acme.form | quantamental --input - --format markdown

use std::path::PathBuf;

use analysis_core::{AnalysisInput, FormData};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use quantamental_engine::QuantamentalEngine;
use report_renderer::{render, OutputFormat, ReportBuilder};

mod config;
mod input;

use config::CliConfig;

#[derive(Debug, Parser)]
#[command(name = "quantamental", version, about = "Quantamental stock scoring report")]
struct Cli {
    /// Form file (`key=value` lines or a JSON object); `-` reads stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format: text, markdown or json (default from QUANTAMENTAL_FORMAT)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Set or override a single form field, e.g. `--set rsi=72`
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    set: Vec<(String, String)>,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    FormData::parse_pair(s).map_err(|e| e.to_string())
}

/// Used when `RUST_LOG` is unset: the binary and the form collector log at info.
const DEFAULT_LOG_FILTER: &str = "quantamental_cli=info,analysis_core=info";

fn init_tracing(json_logging: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    // Stdout carries the report, so logs go to stderr
    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn collect_form(cli: &Cli) -> Result<FormData> {
    let mut form = match &cli.input {
        Some(path) => input::load_form(path)?,
        None => FormData::new(),
    };
    form.merge(cli.set.iter().cloned().collect());

    if form.is_empty() {
        bail!("no input fields: pass --input <file> and/or --set key=value");
    }
    Ok(form)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = CliConfig::from_env()?;
    init_tracing(config.json_logging);
    let cli = Cli::parse();

    let format = cli.format.unwrap_or(config.format);
    tracing::debug!(%format, currency = %config.currency, "Configuration loaded");

    let form = collect_form(&cli)?;
    tracing::info!("Collected {} form fields", form.len());

    let input = AnalysisInput::from_form(&form).context("invalid analysis input")?;
    let analysis = QuantamentalEngine::new()
        .analyze(&input)
        .with_context(|| format!("failed to score {}", input.ticker))?;

    tracing::info!(
        ticker = %input.ticker,
        conviction = analysis.conviction,
        regime = %analysis.regime,
        valuation = %analysis.valuation_label,
        "Analysis complete"
    );

    let report = ReportBuilder::new(config.currency.as_str()).build(&input, &analysis, Utc::now());
    println!("{}", render(&report, format)?);
    Ok(())
}
