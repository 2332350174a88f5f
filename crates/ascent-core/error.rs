//! Build-time error hierarchy (spec §7, `GrammarError`).
//!
//! Modeled on the teacher's hand-rolled `HCError`/`SherpaError` enums
//! (`hctk-core/types/error.rs`, `sherpa-core/types/error_types.rs`): one
//! variant per failure class, a manual `Display` impl, and a `Many`
//! aggregate variant rather than a `thiserror`-derived hierarchy.

use crate::types::{NonTermId, ProdId, SymbolId};
use std::fmt::{self, Display};

pub type AscentResult<T> = Result<T, AscentError>;

#[derive(Clone, Debug, PartialEq)]
pub enum AscentError {
  /// A production's right-hand side refers to a name that is neither a
  /// declared terminal nor a declared non-terminal.
  UndefinedSymbol { production: ProdId, name: String },

  /// A non-terminal reachable from the augmented start symbol has no
  /// productions at all.
  EmptyNonTerminal { nonterm: NonTermId, name: String },

  /// `STOP` was used somewhere other than the synthetic augmented
  /// production `S' -> S STOP`.
  MisplacedStop { production: ProdId },

  /// Closure construction detected a cycle of epsilon (EMPTY) productions
  /// that would never reach a fixed point.
  EmptyProductionCycle { nonterms: Vec<NonTermId> },

  /// `LAYOUT` was declared but does not admit the empty string via an
  /// explicit alternative (spec §9 Open Questions: required so
  /// layout-at-end-of-input is well defined).
  LayoutNotNullable { nonterm: NonTermId },

  /// After the full static conflict-resolution ladder (spec §4.2) more than
  /// one action remained under a terminal in a state, and the LR driver
  /// (which requires a unique action per cell) was requested.
  UnresolvedConflict { state: usize, terminal: SymbolId, actions: Vec<String> },

  /// Aggregates multiple errors collected during a single build pass, the
  /// way `HCError::Many` does.
  Many { message: String, errors: Vec<AscentError> },
}

impl Display for AscentError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AscentError::UndefinedSymbol { production, name } => {
        write!(f, "production p{} references undefined symbol `{}`", production.0, name)
      }
      AscentError::EmptyNonTerminal { nonterm, name } => {
        write!(f, "non-terminal `{}` (N{}) is reachable from the start symbol but has no productions", name, nonterm.0)
      }
      AscentError::MisplacedStop { production } => {
        write!(f, "STOP used outside the augmented production in p{}", production.0)
      }
      AscentError::EmptyProductionCycle { nonterms } => {
        write!(f, "cycle of empty productions among non-terminals {:?} would never converge", nonterms)
      }
      AscentError::LayoutNotNullable { nonterm } => {
        write!(f, "LAYOUT non-terminal N{} must admit the empty string via an explicit alternative", nonterm.0)
      }
      AscentError::UnresolvedConflict { state, terminal, actions } => {
        write!(f, "unresolved conflict in state {} under {}: {}", state, terminal, actions.join(", "))
      }
      AscentError::Many { message, errors } => {
        writeln!(f, "{}", message)?;
        for e in errors {
          writeln!(f, "  - {}", e)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for AscentError {}
