//! Name transcoding between SCREAMING_SNAKE_CASE and camelCase
//!
//! Words are split on case transitions and on any character that is not an
//! ASCII letter or digit. Casing is ASCII-only.

use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

/// Unanchored: matches if any substring has the env var name shape.
static KEY_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][A-Z0-9_]+").unwrap());

static STRICT_KEY_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]+$").unwrap());

/// Split an identifier into its words.
///
/// Boundaries:
/// - lowercase letter or digit followed by an uppercase letter (`myApp` → `my`, `App`)
/// - uppercase letter followed by an uppercase letter that starts a
///   lowercase run (`XMLHttp` → `XML`, `Http`)
/// - any run of characters other than ASCII letters and digits
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            flush(&mut words, &mut current);
            continue;
        }
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                flush(&mut words, &mut current);
            }
        }
        current.push(c);
    }
    flush(&mut words, &mut current);
    words
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// Convert an identifier to camelCase.
///
/// A word after the first that starts with a digit keeps an underscore in
/// front of it (`FOO_1_BAR` → `foo_1Bar`), otherwise the digit would merge
/// into the previous word.
///
/// A trip back through [`to_constant_case`] restores the words but not always
/// the separators: consecutive one-letter words fuse into an uppercase run
/// (`AB_C_D` → `abCD` → `AB_CD`).
pub fn to_camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(index, word)| {
            if index == 0 {
                return word.to_ascii_lowercase();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) if first.is_ascii_digit() => {
                    format!("_{}{}", first, chars.as_str().to_ascii_lowercase())
                }
                Some(first) => format!(
                    "{}{}",
                    first.to_ascii_uppercase(),
                    chars.as_str().to_ascii_lowercase()
                ),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert an identifier to SCREAMING_SNAKE_CASE.
pub fn to_constant_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| word.to_ascii_uppercase())
        .join("_")
}

/// Check whether `s` looks like an environment variable name.
///
/// This is a search, not a full match: `fooBAR` passes because `BAR` has the
/// right shape. Use [`is_strict_key_name`] to require the whole key to match.
pub fn is_valid_key_name(s: &str) -> bool {
    KEY_NAME_REGEX.is_match(s)
}

/// Check that the whole of `s` is an uppercase env var name.
pub fn is_strict_key_name(s: &str) -> bool {
    STRICT_KEY_NAME_REGEX.is_match(s)
}
