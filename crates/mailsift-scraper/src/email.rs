//! Syntactic email address matching over plain text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// `local@label(.label)*.tld`, where the TLD is two or more ASCII letters.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}\b")
        .expect("valid email regex")
});

/// Returns every email address in `text`, deduplicated in first-seen order.
///
/// Dedup is case-sensitive: `Info@x.com` and `info@x.com` are both kept.
/// Matches glued to a longer token are discarded: those that start inside a
/// run of local-part characters (`+++a@b.com`, `é.x@y.com`), those preceded
/// by `@`, and those followed by `@` or by a hyphenated continuation of the
/// domain.
#[must_use]
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut emails = Vec::new();

    for m in EMAIL_RE.find_iter(text) {
        if is_fragment(text, m.start(), m.end()) {
            continue;
        }
        let email = m.as_str();
        if seen.insert(email) {
            emails.push(email.to_owned());
        }
    }

    emails
}

fn is_fragment(text: &str, start: usize, end: usize) -> bool {
    if text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c == '@' || c.is_alphanumeric() || "._%+-".contains(c))
    {
        return true;
    }

    let mut after = text[end..].chars();
    match after.next() {
        Some('@') => true,
        Some('-') => after.next().is_some_and(char::is_alphanumeric),
        _ => false,
    }
}
