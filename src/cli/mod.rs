pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "geoedit")]
#[command(about = "GeoEdit CLI - tokens, upload checks and helpers for the GeoEdit API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Issue and verify identity tokens")]
    Token {
        #[command(subcommand)]
        cmd: commands::token::TokenCommands,
    },

    #[command(about = "Inspect shapefile ZIP archives")]
    Archive {
        #[command(subcommand)]
        cmd: commands::archive::ArchiveCommands,
    },

    #[command(about = "Small helpers (timestamps, credentials, random strings)")]
    Util {
        #[command(subcommand)]
        cmd: commands::util::UtilCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Token { cmd } => commands::token::handle(cmd, output_format),
        Commands::Archive { cmd } => commands::archive::handle(cmd, output_format),
        Commands::Util { cmd } => commands::util::handle(cmd, output_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_commands() {
        let cli = Cli::try_parse_from(["geoedit", "--json", "util", "random", "--size", "8"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        assert!(matches!(
            cli.command,
            Commands::Util {
                cmd: commands::util::UtilCommands::Random { size: 8, .. }
            }
        ));
    }

    #[test]
    fn rejects_unknown_command() {
        assert!(Cli::try_parse_from(["geoedit", "server", "start"]).is_err());
    }
}
