//! Public facade over the two halves of the parser generator:
//! `ascent_core` builds the LR/LALR tables from a grammar, `ascent_runtime`
//! consumes them to recognize tokens and drive an LR or GLR parse.
//!
//! Most applications only need this crate; reach into `ascent_core` or
//! `ascent_runtime` directly for the lower-level types this facade doesn't
//! re-export.

pub use ascent_core::{
  build_tables, AscentError, AscentResult, Grammar, GrammarBuilder, Item, ItemSet, Journal, NonTermId, ParserConfig, ProdId, Production, SymbolId,
  Tables, TablesKind, Terminal, TerminalId,
};

pub use ascent_runtime::{
  Actions, BuiltinActions, CustomRecognizers, DisambiguationError, Forest, GlrDriver, GlrOutcome, LrDriver, ParseContext, ParseError, ParseTree,
  RecognizerTable, RuntimeResult, Token, Value,
};

pub use ascent_runtime::recognize;
