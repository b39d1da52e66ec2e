//! Build tool option tokenization
//!
//! Operators hand options through to the build tool as single strings, often
//! quoted in their shell as one word. A string carrying a short flag plus a
//! value, or a long flag with an `=`-joined value, must reach the tool as two
//! separate arguments; everything else passes through unchanged.

use std::sync::OnceLock;

use regex::Regex;

fn short_flag_with_value() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(-\S)\s+(.+)$").expect("invalid short flag pattern"))
}

fn long_flag_with_value() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(--[^\s=]+)=(.+)$").expect("invalid long flag pattern"))
}

/// Split one passthrough option into the arguments the build tool receives
///
/// `-d foo` becomes `-d` and `foo`; `--define=foo bar` becomes `--define`
/// and `foo bar`. Anything else stays one argument so quoted values like
/// `-d'foo bar'` survive intact.
pub fn split_option(option: &str) -> Vec<String> {
    if let Some(captures) = short_flag_with_value().captures(option) {
        return vec![captures[1].to_string(), captures[2].to_string()];
    }
    if let Some(captures) = long_flag_with_value().captures(option) {
        return vec![captures[1].to_string(), captures[2].to_string()];
    }
    vec![option.to_string()]
}

/// Tokenize every passthrough option in order
pub fn tokenize_options(options: &[String]) -> Vec<String> {
    options
        .iter()
        .flat_map(|option| split_option(option))
        .collect()
}
