use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

#[derive(Debug, Clone, Parser)]
#[command(name = "small-utils")]
#[command(about = "String, date and number theory utilities")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run a single operation, e.g. `call gcd 12 18`
    Call {
        /// Operation name (`isPrime` and `is_prime` are both accepted)
        operation: String,

        /// Arguments, parsed as JSON where possible and as text otherwise
        #[arg(allow_hyphen_values = true, allow_negative_numbers = true)]
        args: Vec<String>,
    },

    /// Run every call listed in a TOML batch file
    Batch {
        /// Path to the batch file
        #[arg(short, long, default_value = "batch.toml")]
        config: String,

        /// Override the output directory from the batch file
        #[arg(long)]
        output_path: Option<String>,

        /// Validate and list the calls without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// List the available operations
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

/// `5` becomes a number and `"5"` a string; anything that is not valid JSON
/// is taken as plain text.
pub fn parse_cli_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
