//! Line tokenizing and stanza-start detection

use once_cell::sync::Lazy;
use regex::Regex;

static STANZA_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(iface|mapping|auto|allow-|source).*").expect("valid stanza regex")
});

/// Split a raw line into whitespace-separated tokens.
///
/// Each token loses one layer of surrounding double quotes; tokens that end
/// up empty are dropped.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace()
        .map(strip_quotes)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_quotes(token: &str) -> &str {
    let token = token.trim();
    let token = token.strip_prefix('"').unwrap_or(token);
    token.strip_suffix('"').unwrap_or(token)
}

/// Whether a (trimmed, non-comment) line opens a new stanza
pub fn is_stanza_start(line: &str) -> bool {
    STANZA_START.is_match(line)
}

/// Whether a raw line carries no content for the parser
pub fn is_blank_or_comment(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}
