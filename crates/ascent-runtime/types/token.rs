//! Recognized tokens and the recognizer abstraction (spec §3 "Token", §4.3,
//! §6 "Recognizer interface"), grounded on `sherpa-rust-rt/types/parse_action.rs`'s
//! `ScannerToken`/`ParseToken` field shape.

use ascent_core::TerminalId;
use std::collections::HashMap;
use std::fmt;

/// A recognized occurrence of a terminal in the input (spec §3).
///
/// `value` is the matched substring; `additional_data` is an opaque payload a
/// recognizer may attach and that is forwarded to user actions verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
  pub terminal:        TerminalId,
  pub value:            String,
  pub start:            usize,
  pub length:           usize,
  pub additional_data:  Option<String>,
}

impl Token {
  pub fn end(&self) -> usize {
    self.start + self.length
  }
}

/// The result of one recognizer's attempt to match at a position (spec §4.3:
/// `(input, pos) -> Option<(matched_length, value, additional_data?)>`).
#[derive(Clone, Debug)]
pub struct Match {
  pub length:          usize,
  pub value:            String,
  pub additional_data:  Option<String>,
}

/// A pure function from `(input, pos)` to an optional match. Implemented for
/// the three `RecognizerSpec` kinds of `ascent-core` (spec §3 terminal
/// flags), plus a user-registered `Custom` lookup table supplied at parse
/// time for non-text input streams.
pub trait Recognizer: fmt::Debug {
  fn recognize(&self, input: &str, pos: usize) -> Option<Match>;
}

/// Matches a literal string at `pos`. If `keyword` is set, the byte
/// immediately following the match (if any) must not be a word character,
/// so `ifx` is not mistaken for the keyword `if` (spec §3, §4.3).
#[derive(Debug)]
pub struct StrRecognizer {
  pub literal: String,
  pub keyword: bool,
}

impl Recognizer for StrRecognizer {
  fn recognize(&self, input: &str, pos: usize) -> Option<Match> {
    let rest = input.get(pos..)?;
    if !rest.starts_with(self.literal.as_str()) {
      return None;
    }
    if self.keyword {
      if let Some(next) = rest[self.literal.len()..].chars().next() {
        if next.is_alphanumeric() || next == '_' {
          return None;
        }
      }
    }
    Some(Match { length: self.literal.len(), value: self.literal.clone(), additional_data: None })
  }
}

/// Matches a regular expression anchored at `pos` (spec §4.3). Grounded on
/// `pwil3058-rs_lalr1_parsers/lexan`'s use of the `regex` crate for the same
/// purpose — the teacher's own scanner is bytecode-compiled and does not
/// expose a pluggable recognizer this way.
#[derive(Debug)]
pub struct RegexRecognizer {
  pub pattern: regex::Regex,
}

impl RegexRecognizer {
  pub fn new(pattern: &str) -> Result<Self, regex::Error> {
    // Anchor at the start so a match at `pos` cannot skip ahead in the
    // input; regex itself only ever sees the suffix starting at `pos`.
    let anchored = if pattern.starts_with('^') { pattern.to_string() } else { format!("^(?:{})", pattern) };
    Ok(Self { pattern: regex::Regex::new(&anchored)? })
  }
}

impl Recognizer for RegexRecognizer {
  fn recognize(&self, input: &str, pos: usize) -> Option<Match> {
    let rest = input.get(pos..)?;
    let m = self.pattern.find(rest)?;
    if m.start() != 0 {
      return None;
    }
    Some(Match { length: m.end(), value: m.as_str().to_string(), additional_data: None })
  }
}

/// A user-registered callable invoked by name (spec §3 "custom" recognizer,
/// for non-text input). Boxed so callers may close over arbitrary state.
pub type CustomRecognizerFn = Box<dyn Fn(&str, usize) -> Option<Match>>;

/// Registry of custom recognizers, keyed by the name supplied to
/// `RecognizerSpec::Custom` in the grammar. Passed to the driver at parse
/// time rather than baked into the tables, since custom recognition may
/// depend on non-text input the grammar builder never sees.
#[derive(Default)]
pub struct CustomRecognizers {
  by_name: HashMap<String, CustomRecognizerFn>,
}

impl fmt::Debug for CustomRecognizers {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CustomRecognizers").field("names", &self.by_name.keys().collect::<Vec<_>>()).finish()
  }
}

impl CustomRecognizers {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&mut self, name: &str, f: CustomRecognizerFn) {
    self.by_name.insert(name.to_string(), f);
  }

  pub fn get(&self, name: &str) -> Option<&CustomRecognizerFn> {
    self.by_name.get(name)
  }
}
