//! Scannerless token recognizer runtime (C4, spec §4.3), grounded on
//! `radlr-core/compile/states/build_graph/flow/complete.rs`'s derivation of
//! a per-state acceptable-terminal set; the recognizer-trait plumbing itself
//! is an enrichment (see SPEC_FULL §10.6) since the teacher's own scanner is
//! bytecode-compiled rather than exposing pluggable recognizers.

use crate::error::{DisambiguationError, ErrorContext, GlrHeadSnapshot, ParseError, RuntimeResult};
use crate::types::token::{CustomRecognizers, Recognizer, RegexRecognizer, StrRecognizer, Token};
use ascent_core::{Grammar, RecognizerSpec, SymbolId, Tables, TerminalId};
use std::collections::BTreeSet;

/// A terminal's recognizer, compiled once from its `RecognizerSpec`. Custom
/// recognizers are resolved by name at call time against a
/// [`CustomRecognizers`] registry supplied by the caller, since they may
/// depend on non-text input the grammar never sees.
enum Compiled {
  Static(Box<dyn Recognizer>),
  Custom(String),
}

/// The compiled form of every terminal's recognizer, built once per grammar
/// alongside (but independent of) the ACTION/GOTO tables.
pub struct RecognizerTable {
  compiled:           Vec<Compiled>,
  /// Terminals reachable from `LAYOUT`'s right-hand sides, used to match
  /// layout as a flat longest-match loop rather than a full nested parse
  /// (a deliberate simplification for whitespace/comment-shaped layout
  /// languages — see DESIGN.md).
  layout_terminals:   BTreeSet<TerminalId>,
}

impl RecognizerTable {
  pub fn build(grammar: &Grammar) -> Result<Self, regex::Error> {
    let mut compiled = Vec::with_capacity(grammar.terminal_count());
    for t in &grammar.terminals {
      let c = match &t.recognizer {
        RecognizerSpec::Str(lit) => Compiled::Static(Box::new(StrRecognizer { literal: lit.clone(), keyword: t.keyword })),
        RecognizerSpec::Regex(pat) => Compiled::Static(Box::new(RegexRecognizer::new(pat)?)),
        RecognizerSpec::Custom(name) => Compiled::Custom(name.clone()),
      };
      compiled.push(c);
    }

    let mut layout_terminals = BTreeSet::new();
    if let Some(layout) = grammar.layout {
      let mut seen_nonterms = BTreeSet::new();
      let mut stack = vec![layout];
      while let Some(n) = stack.pop() {
        if !seen_nonterms.insert(n) {
          continue;
        }
        for &pid in &grammar.nonterm(n).productions {
          for sym in &grammar.production(pid).rhs {
            match sym {
              SymbolId::Terminal(t) => {
                layout_terminals.insert(*t);
              }
              SymbolId::NonTerminal(m) => stack.push(*m),
              _ => {}
            }
          }
        }
      }
    }

    Ok(Self { compiled, layout_terminals })
  }

  fn try_match(&self, terminal: TerminalId, input: &str, pos: usize, customs: &CustomRecognizers) -> Option<(usize, String, Option<String>)> {
    match &self.compiled[terminal.0 as usize] {
      Compiled::Static(r) => r.recognize(input, pos).map(|m| (m.length, m.value, m.additional_data)),
      Compiled::Custom(name) => customs.get(name).and_then(|f| f(input, pos)).map(|m| (m.length, m.value, m.additional_data)),
    }
  }

  /// Attempts `terminal`'s recognizer at `pos` regardless of whether it is
  /// acceptable in the current state — used by the default recovery
  /// procedure (spec §7), which scans forward trying specific terminals one
  /// at a time rather than whatever `terms(state)` happens to allow.
  pub fn try_recognize(&self, terminal: TerminalId, input: &str, pos: usize, customs: &CustomRecognizers) -> Option<Token> {
    let (length, value, additional_data) = self.try_match(terminal, input, pos, customs)?;
    Some(Token { terminal, value, start: pos, length, additional_data })
  }

  /// Consumes as much layout as possible starting at `pos` — whitespace
  /// bytes if `LAYOUT` is undefined, else a greedy longest-match loop over
  /// `LAYOUT`'s terminals. Returns the end position of the consumed span.
  pub fn consume_layout(&self, grammar: &Grammar, input: &str, pos: usize, customs: &CustomRecognizers) -> usize {
    if grammar.layout.is_none() {
      let bytes = input.as_bytes();
      let mut p = pos;
      while p < bytes.len() && grammar.whitespace.contains(&bytes[p]) {
        p += 1;
      }
      return p;
    }

    let mut p = pos;
    loop {
      let mut best: Option<usize> = None;
      for &t in &self.layout_terminals {
        if let Some((len, _, _)) = self.try_match(t, input, p, customs) {
          if len > 0 {
            best = Some(best.map_or(len, |b| b.max(len)));
          }
        }
      }
      match best {
        Some(len) => p += len,
        None => break,
      }
    }
    p
  }
}

/// `terms(I)`: the terminals with an ACTION entry in state `state` (spec
/// §4.3), cached on [`Tables::terms_of_state`] at build time.
pub fn acceptable_terminals(tables: &Tables, state: usize) -> &BTreeSet<TerminalId> {
  &tables.terms_of_state[state]
}

/// Every terminal in the whole grammar (not just `terms(state)`) that
/// matches at `pos`, filtered to terminals not flagged `unexpected: false`
/// (spec §7 `tokens_ahead`: "what the recognizer could produce here, for a
/// user-facing message").
pub fn tokens_ahead(grammar: &Grammar, recognizers: &RecognizerTable, customs: &CustomRecognizers, input: &str, pos: usize) -> Vec<Token> {
  let mut out = Vec::new();
  for t in &grammar.terminals {
    if !t.unexpected {
      continue;
    }
    if let Some(tok) = recognizers.try_recognize(t.id, input, pos, customs) {
      out.push(tok);
    }
  }
  out
}

/// The context a [`TokenRecognitionHook`] sees: enough to reason about where
/// in the parse recognition is happening, without exposing driver-internal
/// stack/GSS state it has no business touching.
pub struct TokenHookContext<'a> {
  pub grammar: &'a Grammar,
  pub state:   usize,
  pub input:   &'a str,
  pub position: usize,
}

/// Override hook for both token recognition and lexical disambiguation (spec
/// §4.3): receives the parsing context and a thunk running the default
/// procedure, and returns the list of tokens to use instead. Distinct from
/// [`CustomRecognizers`], which only replaces a single terminal's match
/// function — this hook replaces the whole recognize-then-disambiguate step.
pub trait TokenRecognitionHook {
  fn recognize(&self, ctx: &TokenHookContext, default: &mut dyn FnMut() -> RuntimeResult<Vec<Token>>) -> RuntimeResult<Vec<Token>>;
}

/// Runs recognition + the 4-stage lexical disambiguation ladder of spec
/// §4.3 at `pos` for state `state`, returning every surviving candidate (one
/// for the LR driver, possibly several for GLR to fork on). `symbols_before`
/// and `last_heads` are folded into any raised [`ParseError`]'s
/// [`ErrorContext`] (spec §7); `custom_hook`, if installed, is consulted
/// instead of running the default procedure directly.
#[allow(clippy::too_many_arguments)]
pub fn recognize(
  grammar: &Grammar,
  tables: &Tables,
  recognizers: &RecognizerTable,
  customs: &CustomRecognizers,
  state: usize,
  input: &str,
  pos: usize,
  symbols_before: Vec<SymbolId>,
  last_heads: Option<Vec<GlrHeadSnapshot>>,
  custom_hook: Option<&dyn TokenRecognitionHook>,
) -> RuntimeResult<Vec<Token>> {
  match custom_hook {
    Some(hook) => {
      let ctx = TokenHookContext { grammar, state, input, position: pos };
      let mut default = || recognize_default(grammar, tables, recognizers, customs, state, input, pos, symbols_before.clone(), last_heads.clone());
      hook.recognize(&ctx, &mut default)
    }
    None => recognize_default(grammar, tables, recognizers, customs, state, input, pos, symbols_before, last_heads),
  }
}

#[allow(clippy::too_many_arguments)]
fn recognize_default(
  grammar: &Grammar,
  tables: &Tables,
  recognizers: &RecognizerTable,
  customs: &CustomRecognizers,
  state: usize,
  input: &str,
  pos: usize,
  symbols_before: Vec<SymbolId>,
  last_heads: Option<Vec<GlrHeadSnapshot>>,
) -> RuntimeResult<Vec<Token>> {
  let layout_end = recognizers.consume_layout(grammar, input, pos, customs);

  let mut matches: Vec<(TerminalId, usize, String, Option<String>)> = Vec::new();
  for &t in acceptable_terminals(tables, state) {
    if let Some((len, value, data)) = recognizers.try_match(t, input, layout_end, customs) {
      matches.push((t, len, value, data));
    }
  }

  if matches.is_empty() {
    let symbols_expected = tables.states[state].action.keys().copied().collect();
    let context = ErrorContext { symbols_expected, tokens_ahead: tokens_ahead(grammar, recognizers, customs, input, layout_end), symbols_before, last_heads };
    return Err(ParseError::UnexpectedInput { position: layout_end, state, context });
  }

  // 1. Highest terminal priority.
  let max_prio = matches.iter().map(|(t, ..)| grammar.terminal(*t).priority).max().unwrap();
  matches.retain(|(t, ..)| grammar.terminal(*t).priority == max_prio);

  // 2. String recognizers over regex recognizers.
  let any_str = matches.iter().any(|(t, ..)| matches!(grammar.terminal(*t).recognizer, RecognizerSpec::Str(_)));
  if any_str {
    matches.retain(|(t, ..)| matches!(grammar.terminal(*t).recognizer, RecognizerSpec::Str(_)));
  }

  // 3. Longest match.
  let max_len = matches.iter().map(|(_, len, ..)| *len).max().unwrap();
  matches.retain(|(_, len, ..)| *len == max_len);

  // 4. `prefer` flag.
  let any_prefer = matches.iter().any(|(t, ..)| grammar.terminal(*t).prefer);
  if any_prefer {
    matches.retain(|(t, ..)| grammar.terminal(*t).prefer);
  }

  let tokens: Vec<Token> = matches
    .into_iter()
    .map(|(terminal, length, value, additional_data)| Token { terminal, value, start: layout_end, length, additional_data })
    .collect();

  // Whether more than one candidate surviving the ladder is fatal (LR) or a
  // fork point (GLR) is the driver's call, not the recognizer's — it
  // returns every survivor and lets the caller decide.
  Ok(tokens)
}

/// Turns a multi-candidate recognition result into the single token the LR
/// driver requires, or the disambiguation error spec §4.3 step 5 names.
pub fn require_single(mut tokens: Vec<Token>, position: usize) -> RuntimeResult<Token> {
  match tokens.len() {
    1 => Ok(tokens.pop().unwrap()),
    0 => unreachable!("recognize() never returns an empty, non-erroring candidate list"),
    _ => {
      let candidates = tokens.iter().map(|t| t.terminal).collect();
      Err(ParseError::Ambiguous(DisambiguationError { position, candidates }))
    }
  }
}
