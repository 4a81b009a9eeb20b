pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "weatherwear",
    about = "Weatherwear operator CLI",
    long_about = "Operate the Weatherwear catalog database, inspect configuration, and query forecasts.",
    after_help = "Examples:\n  weatherwear doctor --json\n  weatherwear seed\n  weatherwear forecast --city Marseille --date tomorrow"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the deterministic demo catalog and verify it")]
    Seed,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, weather API readiness, and DB connectivity checks")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Fetch one forecast day for a city and show its clothing category")]
    Forecast {
        #[arg(long, help = "City name passed to the forecast provider")]
        city: String,
        #[arg(long, help = "`today`, `tomorrow`, or a day number from 1 to 14")]
        date: Option<String>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Forecast { city, date } => commands::forecast::run(&city, date.as_deref()),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn forecast_date_is_optional() {
        let cli = Cli::try_parse_from(["weatherwear", "forecast", "--city", "Nice"])
            .expect("args should parse");
        assert!(matches!(
            cli.command,
            Command::Forecast { ref city, date: None } if city == "Nice"
        ));
    }

    #[test]
    fn forecast_requires_city() {
        assert!(Cli::try_parse_from(["weatherwear", "forecast", "--date", "3"]).is_err());
    }
}
