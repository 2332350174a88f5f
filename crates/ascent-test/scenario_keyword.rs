//! Spec §8 scenario 6: `FOR`/`TO` keyword terminals that must not match as a
//! prefix of a longer identifier (spec §4.3 "keyword boundary").

use ascent_core::{Grammar, GrammarBuilder, ParserConfig, RecognizerSpec, SymbolId};
use ascent_runtime::{CustomRecognizers, LrDriver, ParseError, ParseHooks, RecognizerTable};

fn build() -> Grammar {
  let mut b = GrammarBuilder::new();
  let for_t = b.add_terminal("FOR", RecognizerSpec::Str("for".into()));
  b.set_terminal_keyword(for_t, true);
  let to_t = b.add_terminal("TO", RecognizerSpec::Str("to".into()));
  b.set_terminal_keyword(to_t, true);
  let id_t = b.add_terminal("ID", RecognizerSpec::Regex(r"[A-Za-z_][A-Za-z0-9_]*".into()));
  let eq_t = b.add_terminal("EQ", RecognizerSpec::Str("=".into()));
  let int_t = b.add_terminal("INT", RecognizerSpec::Regex(r"\d+".into()));

  let s_nt = b.non_terminal("S");
  b.add_production(
    s_nt,
    vec![
      SymbolId::Terminal(for_t),
      SymbolId::Terminal(id_t),
      SymbolId::Terminal(eq_t),
      SymbolId::Terminal(int_t),
      SymbolId::Terminal(to_t),
      SymbolId::Terminal(int_t),
    ],
  );
  b.set_start(s_nt);

  b.build().expect("grammar builds")
}

#[test]
fn keyword_prefix_of_identifier_is_rejected() {
  let grammar = build();
  let config = ParserConfig::new();
  let tables = ascent_core::build_tables(&grammar, &config).expect("tables build");
  tables.ensure_deterministic().expect("grammar is LR");
  let recognizers = RecognizerTable::build(&grammar).expect("recognizers compile");
  let driver = LrDriver::new(&grammar, &tables, &recognizers);
  let customs = CustomRecognizers::new();

  // "fora" must not be recognized as the keyword FOR followed by "a": the
  // keyword boundary check means FOR simply never matches here, so the
  // only acceptable terminal in the start state (FOR) has no candidate.
  let hooks = ParseHooks::default();
  let mut errors = Vec::new();
  let err = driver.parse_tree("fora=10 to20", &customs, &hooks, &mut errors).unwrap_err();
  assert!(matches!(err, ParseError::UnexpectedInput { .. }), "expected UnexpectedInput, got {err:?}");
}

#[test]
fn keyword_boundary_accepts_well_formed_input() {
  let grammar = build();
  let config = ParserConfig::new();
  let tables = ascent_core::build_tables(&grammar, &config).expect("tables build");
  tables.ensure_deterministic().expect("grammar is LR");
  let recognizers = RecognizerTable::build(&grammar).expect("recognizers compile");
  let driver = LrDriver::new(&grammar, &tables, &recognizers);
  let customs = CustomRecognizers::new();

  let hooks = ParseHooks::default();
  let mut errors = Vec::new();
  let tree = driver.parse_tree("for a = 10 to 20", &customs, &hooks, &mut errors).expect("well-formed input parses");
  match tree {
    ascent_runtime::ParseTree::Node { children, .. } => assert_eq!(children.len(), 6),
    ascent_runtime::ParseTree::Leaf(_) => panic!("root of a 6-symbol production is never a bare leaf"),
  }
}
