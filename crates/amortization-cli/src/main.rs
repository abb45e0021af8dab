mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use flexi_logger::{Logger, LoggerHandle};
use std::process;

use commands::loan::{PaymentArgs, ScheduleArgs};

/// Loan payment and amortization schedule calculations
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan payment and amortization schedule calculations",
    long_about = "Computes the periodic payment for interest-only and fixed-installment \
                  loans with decimal precision, and the full amortization schedule for \
                  fixed-installment loans. Terms come from flags, a JSON/YAML file, or \
                  JSON piped on stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter written to stderr (e.g. "debug", "amortization_core=trace")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Periodic payment and amortization schedule for any loan type
    Schedule(ScheduleArgs),
    /// Interest-only payment for a principal and per-period rate
    Payment(PaymentArgs),
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

fn init_logging(filter: &str) -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    Logger::try_with_str(filter)?.log_to_stderr().start()
}

fn main() {
    let cli = Cli::parse();

    let _logger = match init_logging(&cli.log_level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("{}: logging disabled: {}", "warning".yellow().bold(), e);
            None
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("event=command_failed error={}", e);
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
