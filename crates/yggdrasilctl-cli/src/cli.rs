//! CLI argument definitions for the admin client.

use clap::Parser;

use crate::output::OutputFormat;

const CONFIGURATION_HELP: &str = "\
Configuration flags must precede COMMAND:
  -endpoint, --endpoint <HOST:PORT>  Admin socket endpoint [default: localhost:9001]
  --config-path <PATH>               Configuration file to load
  --log-filter <FILTER>              Diagnostic log filter [default: warn]
  --log-format <FORMAT>              Diagnostic log format: compact or json";

/// Command-line interface for the admin client.
#[derive(Parser, Debug)]
#[command(
    name = "yggdrasilctl",
    about = "Sends one request to the daemon's admin socket and prints the reply",
    disable_help_subcommand = true,
    after_help = CONFIGURATION_HELP
)]
pub(crate) struct Cli {
    /// Controls how the reply is printed.
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub(crate) output: OutputFormat,
    /// The admin command to run (for example `getPeers`).
    #[arg(value_name = "COMMAND")]
    pub(crate) command: Option<String>,
    /// Command parameters, each of the form `key=value`.
    #[arg(
        value_name = "KEY=VALUE",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub(crate) parameters: Vec<String>,
}
