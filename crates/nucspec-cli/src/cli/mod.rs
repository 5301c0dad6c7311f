mod commands;
mod helpers;

use clap::{ArgAction, Parser};
use nucspec_core::domain::NucError;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "NUCSPEC_LOG";

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_nuc_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            diagnostic.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("nucspec".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            init_logging(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

/// `NUCSPEC_LOG` wins over `-v`; logs go to stderr so reports stay parseable.
fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "nucspec",
    version,
    about = "Isotope identity, decay and neutron activation calculator"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Parse an isotope designator and show its identity and nuclear data
    Isotope(commands::IsotopeArgs),
    /// Evaluate a decaying quantity at a time or solve for when it reaches a target
    Quantity(commands::QuantityArgs),
    /// Compute the product of a neutron irradiation
    Activate(commands::ActivateArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Isotope(args) => commands::run_isotope_command(args),
        CliCommand::Quantity(args) => commands::run_quantity_command(args),
        CliCommand::Activate(args) => commands::run_activate_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Compute(#[from] NucError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_nuc_error(&self) -> NucError {
        match self {
            Self::Usage(message) => NucError::input("INPUT.CLI_USAGE", message.trim_end()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => NucError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
