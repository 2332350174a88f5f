#![allow(non_snake_case)]
//! Grammar IR, FIRST/FOLLOW analysis, and LR(1)/LALR automaton construction.
//!
//! This crate is the build-time half of the parser generator: it turns a
//! [`types::Grammar`] into an immutable [`compile::tables::Tables`] value. The
//! runtime half (scannerless recognition, the LR and GLR drivers, the SPPF)
//! lives in the sibling `ascent_runtime` crate.

pub mod analysis;
pub mod compile;
pub mod config;
pub mod error;
pub mod journal;
pub mod types;

pub use config::{ParserConfig, TablesKind};
pub use error::{AscentError, AscentResult};
pub use journal::Journal;
pub use types::*;

pub use compile::tables::Tables;

/// Builds the ACTION/GOTO tables for `grammar` under `config`.
///
/// This is the single public entry point C3 exposes to the rest of the
/// system: `Grammar IR -> (C2, C3) -> Tables`, threading a [`Journal`] through
/// the process for diagnostics as the teacher repo's own compiler pipeline
/// does.
pub fn build_tables(grammar: &types::Grammar, config: &ParserConfig) -> AscentResult<Tables> {
  let mut j = Journal::new();
  compile::build(&mut j, grammar, config)
}
