use anyhow::Context;
use clap::Subcommand;
use serde_json::Value;

use crate::auth::{Claims, TokenService};
use crate::cli::utils::{output_error, output_success, output_value};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Sign a claims object with the configured secret")]
    Issue {
        #[arg(long, help = "Claims as a JSON object, e.g. '{\"user_id\": 1}'")]
        claims: String,
    },

    #[command(about = "Verify a token and print its claims")]
    Verify {
        #[arg(help = "Encoded token")]
        token: String,
    },
}

pub fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = AppConfig::from_env().context("invalid configuration")?;
    let tokens = TokenService::from_config(&config.security)?;

    match cmd {
        TokenCommands::Issue { claims } => {
            let claims = parse_claims(&claims)?;
            let token = tokens.issue(&claims)?;
            output_value(output_format, "token", Value::String(token))
        }
        TokenCommands::Verify { token } => match tokens.verify(&token) {
            Ok(claims) => match output_format {
                OutputFormat::Json => output_success(
                    output_format,
                    "Token is valid",
                    Some(serde_json::json!({ "claims": claims })),
                ),
                OutputFormat::Text => output_value(output_format, "claims", Value::Object(claims)),
            },
            Err(e) => {
                output_error(output_format, &format!("Invalid Token. ({})", e), Some("INVALID_TOKEN"))?;
                anyhow::bail!("token rejected")
            }
        },
    }
}

fn parse_claims(raw: &str) -> anyhow::Result<Claims> {
    match serde_json::from_str::<Value>(raw).context("claims must be valid JSON")? {
        Value::Object(claims) => Ok(claims),
        _ => anyhow::bail!("claims must be a JSON object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_must_be_object() {
        assert!(parse_claims(r#"{"user_id": 1}"#).is_ok());
        assert!(parse_claims("[1, 2]").is_err());
        assert!(parse_claims("{not json").is_err());
    }
}
