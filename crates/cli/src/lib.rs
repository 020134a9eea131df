pub mod commands;
pub mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rebate_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};
use rust_decimal::Decimal;

#[derive(Debug, Parser)]
#[command(
    name = "rebate",
    about = "Rebate calculation operator CLI",
    long_about = "Calculate rebates against the configured catalog, list reference data, and inspect configuration.",
    after_help = "Examples:\n  rebate calculate --rebate REB-1 --product PROD-1\n  rebate calculate --rebate REB-2 --product PROD-1 --volume 10\n  rebate catalog\n  rebate config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a rebate.toml config file; it must exist")]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_name = "LEVEL", help = "Override logging.level")]
    log_level: Option<String>,

    #[arg(
        long,
        global = true,
        value_name = "FORMAT",
        help = "Override logging.format (compact|pretty|json)"
    )]
    log_format: Option<LogFormat>,

    #[arg(long, global = true, value_name = "PATH", help = "Override catalog.path")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Calculate one rebate and record the result")]
    Calculate {
        #[arg(long = "rebate", help = "Rebate identifier, e.g. REB-1")]
        rebate_id: String,
        #[arg(long = "product", help = "Product identifier, e.g. PROD-1")]
        product_id: String,
        #[arg(long, help = "Purchased volume; required for rate and per-unit rebates")]
        volume: Option<Decimal>,
    },
    #[command(about = "List the rebates and products available for calculation")]
    Catalog,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Cli {
    /// Config loading options derived from the global flags. An explicit
    /// `--config` must point at an existing file.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                log_level: self.log_level.clone(),
                log_format: self.log_format,
                catalog_path: self.catalog.clone(),
            },
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.load_options();

    // A broken config is reported by the command itself.
    if let Ok(config) = AppConfig::load(options.clone()) {
        logging::init(&config.logging);
    }

    let result = match cli.command {
        Command::Calculate { rebate_id, product_id, volume } => commands::calculate::run(
            &options,
            commands::calculate::CalculateArgs { rebate_id, product_id, volume },
        ),
        Command::Catalog => commands::catalog::run(&options),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(&options) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
