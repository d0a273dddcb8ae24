use clap::Subcommand;
use serde_json::Value;

use crate::cli::utils::{output_error, output_value};
use crate::cli::OutputFormat;
use crate::util::{
    basic_credentials_base64, current_timestamp, is_valid_identifier, random_token, Timestamp,
    DEFAULT_TOKEN_ALPHABET, DEFAULT_TOKEN_SIZE,
};

#[derive(Subcommand)]
pub enum UtilCommands {
    #[command(about = "Print the current local time")]
    Now {
        #[arg(long, help = "Print the full timestamp instead of YYYY-MM-DD HH:MM")]
        raw: bool,
    },

    #[command(about = "Encode user:password as base64 for a Basic Authorization header")]
    BasicAuth {
        #[arg(help = "Username")]
        user: String,
        #[arg(help = "Password")]
        password: String,
    },

    #[command(about = "Generate a random string (not for secrets)")]
    Random {
        #[arg(long, default_value_t = DEFAULT_TOKEN_SIZE)]
        size: usize,
        #[arg(long, default_value = DEFAULT_TOKEN_ALPHABET)]
        alphabet: String,
    },

    #[command(about = "Check whether a word is usable as a table or column name")]
    Identifier {
        #[arg(help = "Word to check")]
        word: String,
    },
}

pub fn handle(cmd: UtilCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UtilCommands::Now { raw } => {
            let now = match current_timestamp(!raw) {
                Timestamp::Structured(dt) => dt.to_string(),
                Timestamp::Formatted(s) => s,
            };
            output_value(output_format, "now", Value::String(now))
        }
        UtilCommands::BasicAuth { user, password } => output_value(
            output_format,
            "credentials",
            Value::String(basic_credentials_base64(&user, &password)),
        ),
        UtilCommands::Random { size, alphabet } => {
            output_value(output_format, "random", Value::String(random_token(size, &alphabet)))
        }
        UtilCommands::Identifier { word } => {
            if is_valid_identifier(&word) {
                output_value(output_format, "identifier", Value::String(word))
            } else {
                output_error(
                    output_format,
                    &format!("'{}' is not a valid identifier", word),
                    Some("INVALID_IDENTIFIER"),
                )?;
                anyhow::bail!("invalid identifier")
            }
        }
    }
}
