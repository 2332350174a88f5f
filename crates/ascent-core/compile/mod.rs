//! LR automaton builder (component C3, spec §4.2) and table emission.

pub mod closure;
pub mod states;
pub mod tables;

use crate::config::ParserConfig;
use crate::error::AscentResult;
use crate::journal::Journal;
use crate::types::Grammar;
use tables::Tables;

/// Runs the full build pipeline: FIRST/FOLLOW -> canonical collection (with
/// LALR-style merging) -> ACTION/GOTO emission with static conflict
/// resolution. Mirrors the data flow of spec §2: "Grammar IR -> (C2,C3) ->
/// Tables".
pub fn build(j: &mut Journal, grammar: &Grammar, config: &ParserConfig) -> AscentResult<Tables> {
  j.start_timer("first_follow");
  let nullable = crate::analysis::nullable_nonterms(grammar);
  let first = crate::analysis::first_sets(grammar, &nullable);
  let follow = crate::analysis::follow_sets(grammar, &nullable, &first);
  j.stop_timer("first_follow");

  j.start_timer("states");
  let automaton = states::build_states(grammar, &nullable, &first);
  j.stop_timer("states");
  j.note(format!("constructed {} states", automaton.states.len()));

  j.start_timer("tables");
  let tables = tables::build_tables(grammar, &automaton, config, &follow);
  j.stop_timer("tables");

  Ok(tables)
}
