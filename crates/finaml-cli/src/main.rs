mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::cash_flow::NpvArgs;
use commands::portfolio::PortfolioArgs;
use commands::scenarios::SensitivityArgs;
use commands::valuation::ValueArgs;

/// Time-value-of-money valuation for stocks, bonds and options
#[derive(Parser)]
#[command(
    name = "finaml",
    version,
    about = "Time-value-of-money valuation for stocks, bonds and options",
    long_about = "Values stocks, bonds and options with decimal precision: present value, \
                  future value, portfolio totals, NPV of cash flows and discount-rate \
                  sensitivity. Run `finaml demo` for the reference report."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the reference valuation report
    Demo,
    /// Present and future value of a single instrument
    Value(ValueArgs),
    /// Total present value of a portfolio
    Portfolio(PortfolioArgs),
    /// Net present value of a cash flow series
    Npv(NpvArgs),
    /// NPV across a range of discount rates
    Sensitivity(SensitivityArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "finaml=debug,finaml_core=debug"
    } else {
        "finaml=warn,finaml_core=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Demo => match commands::demo::render_report() {
            Ok(report) => {
                print!("{report}");
                return;
            }
            Err(e) => Err(e),
        },
        Commands::Value(args) => commands::valuation::run_value(args),
        Commands::Portfolio(args) => commands::portfolio::run_portfolio(args),
        Commands::Npv(args) => commands::cash_flow::run_npv(args),
        Commands::Sensitivity(args) => commands::scenarios::run_sensitivity(args),
        Commands::Version => {
            println!("finaml {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
