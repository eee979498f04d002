//! Candidate number extraction from noisy fragment text.
//!
//! Provider output for printed card digits is unreliable: adjacent cells get
//! merged ("6063"), letters get misread as digits and vice versa (O↔0, S↔5).
//! Three complementary strategies run over every text and their results are
//! unioned; false positives are cheap because the cell resolver validates
//! every candidate against its column range anyway.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Pattern to match 1-2 digit runs inside fragment text.
const NUMBER_PATTERN: &str = r"\d{1,2}";

/// Letter-to-digit confusions seen in provider output for card digits.
const CHAR_CORRECTIONS: &[(char, char)] = &[
    ('O', '0'),
    ('o', '0'),
    ('Q', '0'),
    ('l', '1'),
    ('I', '1'),
    ('|', '1'),
    ('i', '1'),
    ('Z', '2'),
    ('z', '2'),
    ('S', '5'),
    ('s', '5'),
    ('G', '6'),
    ('b', '6'),
    ('T', '7'),
    ('t', '7'),
    ('B', '8'),
    ('g', '9'),
];

/// Smallest number a card can carry.
pub const MIN_NUMBER: u32 = 1;
/// Largest number a card can carry.
pub const MAX_NUMBER: u32 = 75;

static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

fn number_regex() -> &'static Regex {
    NUMBER_REGEX.get_or_init(|| Regex::new(NUMBER_PATTERN).unwrap())
}

/// Extracts every plausible card number from `text`.
///
/// Union of three strategies:
/// 1. Direct: scan the raw text for 1-2 digit runs.
/// 2. Corrected: apply the letter-to-digit table, then scan again.
/// 3. Sliding window: test every 1- and 2-character digit substring of the
///    raw text, which recovers numbers a greedy run-scan splits badly.
///
/// Every returned value is in [1, 75]. The set is ordered, so iteration
/// order (and therefore everything downstream) is deterministic.
pub fn candidate_numbers(text: &str) -> BTreeSet<u32> {
    let mut found = BTreeSet::new();
    scan_digit_runs(text, &mut found);
    scan_digit_runs(&apply_corrections(text), &mut found);
    sliding_window(text, &mut found);
    found
}

/// Replaces commonly confused letters with the digits they were misread from.
fn apply_corrections(text: &str) -> String {
    text.chars()
        .map(|c| {
            CHAR_CORRECTIONS
                .iter()
                .find(|(from, _)| *from == c)
                .map(|&(_, to)| to)
                .unwrap_or(c)
        })
        .collect()
}

/// Strategy 1: regex scan for 1-2 digit runs, keeping in-range values.
fn scan_digit_runs(text: &str, out: &mut BTreeSet<u32>) {
    for m in number_regex().find_iter(text) {
        if let Ok(value) = m.as_str().parse::<u32>() {
            insert_in_range(value, out);
        }
    }
}

/// Strategy 3: per-position scan of 1- and 2-digit substrings.
///
/// Handles merged multi-cell text like "6063", which the non-overlapping
/// run scan splits into {60, 63} already but which loses interior values
/// like 06→6 or the 2-digit window "06" when runs are longer.
fn sliding_window(text: &str, out: &mut BTreeSet<u32>) {
    let chars: Vec<char> = text.chars().collect();
    for i in 0..chars.len() {
        let Some(d) = chars[i].to_digit(10) else {
            continue;
        };
        insert_in_range(d, out);
        if let Some(d2) = chars.get(i + 1).and_then(|c| c.to_digit(10)) {
            insert_in_range(d * 10 + d2, out);
        }
    }
}

fn insert_in_range(value: u32, out: &mut BTreeSet<u32>) {
    if (MIN_NUMBER..=MAX_NUMBER).contains(&value) {
        out.insert(value);
    }
}
