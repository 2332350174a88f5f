//! The context record exposed to user actions (spec §4.4, §6 "Context
//! record"), grounded on `sherpa-rust-rt/types/parse_context.rs`.

use super::token::Token;
use ascent_core::{NonTermId, ProdId};
use std::any::Any;

/// Read-only view of a reduction's surroundings, plus the user-owned `extra`
/// scratchpad carried through the whole parse (spec §5 "Shared resources").
pub struct ParseContext<'a> {
  pub start_position:  usize,
  pub end_position:    usize,
  pub input:            &'a str,
  pub production:       ProdId,
  pub symbol:            NonTermId,
  pub state:             usize,
  /// Whitespace/comments consumed before the production's first token, if
  /// any was attached (spec §4.3 `layout_content`).
  pub layout_content:    Option<&'a str>,
  pub extra:             &'a mut dyn Any,
}

impl<'a> ParseContext<'a> {
  pub fn span(&self) -> &'a str {
    &self.input[self.start_position..self.end_position]
  }
}

/// One child result handed to a user action: either a fully reduced
/// semantic value or the raw matched token, depending on build mode and
/// whether the child position held a terminal or non-terminal.
#[derive(Debug, Clone)]
pub enum Child<V> {
  Terminal(Token),
  Value(V),
}
