use clap::{Args, Parser, Subcommand, ValueEnum};
use feecalc::application::engine::FeeEngine;
use feecalc::domain::setup::{SetupInput, TerminalType};
use feecalc::infrastructure::settings;
use feecalc::interfaces::csv::report_writer::ReportWriter;
use feecalc::interfaces::csv::setup_reader::SetupReader;
use feecalc::interfaces::text::report::render_comparison;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Compare Dual Pricing and Flat Rate merchant economics",
    long_about = None
)]
struct Cli {
    /// Fee configuration file (TOML or JSON). Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare both pricing models for a single merchant setup
    Quote(QuoteArgs),
    /// Compare both pricing models for every merchant in a CSV file
    Batch {
        /// Merchant setups CSV file
        input: PathBuf,
    },
}

#[derive(Args)]
struct QuoteArgs {
    /// Monthly processing volume, e.g. "15,000" or "$15000.00"
    #[arg(long, default_value = "15,000", allow_hyphen_values = true)]
    volume: String,

    /// Terminal hardware to purchase
    #[arg(long, value_enum, default_value_t = TerminalArg::None)]
    terminal: TerminalArg,

    /// Add a stand (Dejavoo P8 only)
    #[arg(long)]
    stand: bool,

    /// Number of terminals
    #[arg(long, allow_negative_numbers = true)]
    terminals: Option<i64>,

    /// Number of mobile devices
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    mobile_devices: i64,

    /// Number of identical merchants for a portfolio projection
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    merchants: i64,

    /// Skip the Dual Pricing compliance fee where policy makes it optional
    #[arg(long)]
    no_compliance: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum TerminalArg {
    None,
    #[value(alias = "p8")]
    TerminalA,
    #[value(alias = "p18")]
    TerminalB,
    #[value(alias = "p12-mini")]
    TerminalC,
}

impl From<TerminalArg> for TerminalType {
    fn from(arg: TerminalArg) -> Self {
        match arg {
            TerminalArg::None => TerminalType::None,
            TerminalArg::TerminalA => TerminalType::TerminalA,
            TerminalArg::TerminalB => TerminalType::TerminalB,
            TerminalArg::TerminalC => TerminalType::TerminalC,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let config = settings::load(cli.config.as_deref()).into_diagnostic()?;
    let engine = FeeEngine::new(config);

    match cli.command {
        Command::Quote(args) => quote(&engine, args),
        Command::Batch { input } => batch(&engine, input),
    }
}

fn quote(engine: &FeeEngine, args: QuoteArgs) -> Result<()> {
    let input = SetupInput {
        name: None,
        volume: args.volume,
        terminal: Some(args.terminal.into()),
        stand: Some(args.stand),
        terminals: args.terminals,
        mobile_devices: Some(args.mobile_devices),
        merchants: Some(args.merchants),
        compliance: Some(!args.no_compliance),
    };
    let setup = input.normalize(&engine.config().schedule.policy);
    let comparison = engine.compare(&setup);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => {
            render_comparison(&mut out, &comparison, engine.config()).into_diagnostic()?
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &comparison).into_diagnostic()?;
            writeln!(out).into_diagnostic()?;
        }
    }
    Ok(())
}

fn batch(engine: &FeeEngine, input: PathBuf) -> Result<()> {
    let file = File::open(input).into_diagnostic()?;
    let reader = SetupReader::new(file);
    let policy = &engine.config().schedule.policy;

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    for (row, input_result) in reader.setups().enumerate() {
        match input_result {
            Ok(input) => {
                let setup = input.normalize(policy);
                let name = input
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("merchant-{}", row + 1));
                writer
                    .write_comparison(&name, &engine.compare(&setup))
                    .into_diagnostic()?;
            }
            Err(e) => {
                eprintln!("Error reading merchant setup: {}", e);
            }
        }
    }
    writer.flush().into_diagnostic()?;

    Ok(())
}
