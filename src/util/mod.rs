use base64::{engine::general_purpose, Engine as _};
use chrono::{Local, NaiveDateTime};
use once_cell::sync::Lazy;
use rand::{seq::SliceRandom, thread_rng};
use regex::Regex;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub const DEFAULT_TOKEN_SIZE: usize = 6;
pub const DEFAULT_TOKEN_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// Two `+` quantifiers: at least two characters overall.
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_]+[a-zA-Z0-9_]+$").expect("identifier pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    Structured(NaiveDateTime),
    Formatted(String),
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timestamp::Structured(dt) => write!(f, "{}", dt.format(TIMESTAMP_FORMAT)),
            Timestamp::Formatted(s) => f.write_str(s),
        }
    }
}

/// Local wall-clock time, optionally rendered as `YYYY-MM-DD HH:MM`.
pub fn current_timestamp(formatted: bool) -> Timestamp {
    let now = Local::now().naive_local();
    if formatted {
        Timestamp::Formatted(now.format(TIMESTAMP_FORMAT).to_string())
    } else {
        Timestamp::Structured(now)
    }
}

/// `user:pass` in standard base64, as used in Basic authorization headers.
pub fn basic_credentials_base64(user: &str, password: &str) -> String {
    general_purpose::STANDARD.encode(format!("{}:{}", user, password))
}

/// Characters drawn independently, with replacement. Not for secrets.
/// An empty alphabet yields an empty string.
pub fn random_token(size: usize, alphabet: &str) -> String {
    let chars: Vec<char> = alphabet.chars().collect();
    let mut rng = thread_rng();

    (0..size)
        .filter_map(|_| chars.choose(&mut rng).copied())
        .collect()
}

pub fn random_token_default() -> String {
    random_token(DEFAULT_TOKEN_SIZE, DEFAULT_TOKEN_ALPHABET)
}

/// Spaces count as underscores; a single character is rejected.
pub fn is_valid_identifier(word: &str) -> bool {
    IDENTIFIER.is_match(&word.replace(' ', "_"))
}
