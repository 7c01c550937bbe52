//! Chunk-based version ordering
//!
//! Store versions do not follow semver, so versions are compared as the
//! sequence of digit runs, letter runs, and separator runs they are made of.
//! Digit runs compare numerically (at arbitrary magnitude), and a digit run
//! always orders before a non-digit run at the same position.

use std::cmp::Ordering;
use std::fmt;

/// A version string parsed into comparable chunks.
///
/// Ordering rules, applied at the first position where two versions differ:
/// - two digit runs compare numerically;
/// - a digit run orders before any non-digit run;
/// - two non-digit runs compare lexicographically.
///
/// When one chunk sequence is a strict prefix of the other, the shorter one
/// orders first. The empty version parses to an empty chunk sequence and
/// orders before every non-empty version.
#[derive(Debug, Clone)]
pub struct Version {
    original: String,
    chunks: Vec<Chunk>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk {
    /// Run of ASCII digits, normalized by stripping leading zeros
    Number(String),
    /// Run of letters, or run of any other non-digit characters
    Text(String),
}

#[derive(PartialEq, Clone, Copy)]
enum CharClass {
    Digit,
    Alpha,
    Other,
}

fn classify(c: char) -> CharClass {
    if c.is_ascii_digit() {
        CharClass::Digit
    } else if c.is_ascii_alphabetic() {
        CharClass::Alpha
    } else {
        CharClass::Other
    }
}

fn parse_chunks(s: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut run = String::new();
    let mut run_class: Option<CharClass> = None;

    for c in s.chars() {
        let class = classify(c);
        if run_class != Some(class) {
            if let Some(previous) = run_class.take() {
                chunks.push(finish_run(std::mem::take(&mut run), previous));
            }
            run_class = Some(class);
        }
        run.push(c);
    }
    if let Some(class) = run_class {
        chunks.push(finish_run(run, class));
    }
    chunks
}

fn finish_run(run: String, class: CharClass) -> Chunk {
    match class {
        CharClass::Digit => {
            let trimmed = run.trim_start_matches('0');
            let digits = if trimmed.is_empty() { "0" } else { trimmed };
            Chunk::Number(digits.to_string())
        }
        CharClass::Alpha | CharClass::Other => Chunk::Text(run),
    }
}

/// Numeric comparison of normalized digit runs: more digits means a larger
/// number, equal lengths fall back to lexicographic digit order.
fn cmp_numbers(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl Version {
    pub fn new(s: &str) -> Self {
        Self {
            original: s.to_string(),
            chunks: parse_chunks(s),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.chunks == other.chunks
    }
}

impl Eq for Version {}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.chunks.iter().zip(&other.chunks) {
            let ord = match (a, b) {
                (Chunk::Number(x), Chunk::Number(y)) => cmp_numbers(x, y),
                (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
                (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
                (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.chunks.len().cmp(&other.chunks.len())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
