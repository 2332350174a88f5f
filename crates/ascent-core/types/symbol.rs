use std::fmt::{self, Display};

/// Interned index of a terminal within a [`super::Grammar`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TerminalId(pub u32);

/// Interned index of a non-terminal within a [`super::Grammar`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NonTermId(pub u32);

/// Interned index of a production within a [`super::Grammar`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ProdId(pub u32);

/// A grammar symbol: a terminal, a non-terminal, or one of the two
/// sentinels (`STOP`, `EMPTY`) from spec §3.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum SymbolId {
  Terminal(TerminalId),
  NonTerminal(NonTermId),
  /// Synthetic end-of-input sentinel. Appears only in the augmented
  /// production `S' -> S STOP`.
  Stop,
  /// Sentinel denoting the empty right-hand side of a production. Never a
  /// member of FIRST(_), but contributes to nullability.
  Empty,
}

impl SymbolId {
  pub fn is_terminal(&self) -> bool {
    matches!(self, SymbolId::Terminal(_) | SymbolId::Stop)
  }

  pub fn is_non_terminal(&self) -> bool {
    matches!(self, SymbolId::NonTerminal(_))
  }

  pub fn as_terminal(&self) -> Option<TerminalId> {
    match self {
      SymbolId::Terminal(t) => Some(*t),
      _ => None,
    }
  }

  pub fn as_non_terminal(&self) -> Option<NonTermId> {
    match self {
      SymbolId::NonTerminal(n) => Some(*n),
      _ => None,
    }
  }
}

impl Display for SymbolId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SymbolId::Terminal(t) => write!(f, "t{}", t.0),
      SymbolId::NonTerminal(n) => write!(f, "N{}", n.0),
      SymbolId::Stop => write!(f, "$STOP"),
      SymbolId::Empty => write!(f, "$EMPTY"),
    }
  }
}

/// Associativity of a production, consulted during conflict resolution
/// (spec §4.2 rule 2).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Assoc {
  #[default]
  None,
  Left,
  Right,
}

/// Describes how a terminal's recognizer matches input. The recognizer
/// itself (a callable) is supplied at parse time by the runtime crate,
/// keyed by [`TerminalId`] — the IR only carries enough of a "handle" to
/// describe it (spec §6 Recognizer interface, §9 "keep them as indexed
/// tables on the Grammar IR").
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RecognizerSpec {
  /// Matches a literal string at the current position.
  Str(String),
  /// Matches a regular expression pattern at the current position.
  Regex(String),
  /// Matched by a user-registered callable, looked up by name at parse
  /// time. Used for non-text input streams.
  Custom(String),
}
