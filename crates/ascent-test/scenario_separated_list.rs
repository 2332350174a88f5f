//! Spec §8 scenario 4: a comma-separated list via left recursion, and the
//! `NoAction` error path when a required list element is missing.

use ascent_core::{Grammar, GrammarBuilder, ParserConfig, ProdId, RecognizerSpec, SymbolId, TerminalId};
use ascent_runtime::recognize::acceptable_terminals;
use ascent_runtime::types::context::Child;
use ascent_runtime::{Actions, CustomRecognizers, LrDriver, ParseContext, ParseError, ParseHooks, RecognizerTable, RuntimeResult};

struct ListActions {
  elist_one:  ProdId,
  elist_many: ProdId,
  s_prod:     ProdId,
}

fn text_of(child: &Child<Vec<String>>) -> String {
  match child {
    Child::Terminal(t) => t.value.clone(),
    Child::Value(_) => panic!("E never reduces to a list"),
  }
}

impl Actions<Vec<String>> for ListActions {
  fn reduce(&self, ctx: &mut ParseContext, mut children: Vec<Child<Vec<String>>>) -> RuntimeResult<Vec<String>> {
    let p = ctx.production;
    if p == self.elist_one {
      Ok(vec![text_of(&children[0])])
    } else if p == self.elist_many {
      let tail = text_of(&children[2]);
      let mut head = match children.remove(0) {
        Child::Value(v) => v,
        Child::Terminal(_) => panic!("EList's first child is always a reduced list"),
      };
      head.push(tail);
      Ok(head)
    } else if p == self.s_prod {
      match children.into_iter().nth(1) {
        Some(Child::Value(v)) => Ok(v),
        _ => panic!("S's second child is always the reduced EList"),
      }
    } else {
      unreachable!("no other production reduces in this grammar")
    }
  }
}

fn build() -> (Grammar, ListActions, TerminalId) {
  let mut b = GrammarBuilder::new();
  let x_t = b.add_terminal("x", RecognizerSpec::Str("x".into()));
  let e_t = b.add_terminal("e", RecognizerSpec::Regex(r"[0-9]+".into()));
  let comma_t = b.add_terminal(",", RecognizerSpec::Str(",".into()));

  let elist_nt = b.non_terminal("EList");
  let s_nt = b.non_terminal("S");

  let elist_one = b.add_production(elist_nt, vec![SymbolId::Terminal(e_t)]);
  let elist_many = b.add_production(elist_nt, vec![SymbolId::NonTerminal(elist_nt), SymbolId::Terminal(comma_t), SymbolId::Terminal(e_t)]);
  let s_prod = b.add_production(s_nt, vec![SymbolId::Terminal(x_t), SymbolId::NonTerminal(elist_nt)]);
  b.set_start(s_nt);

  let g = b.build().expect("grammar builds");
  (g, ListActions { elist_one, elist_many, s_prod }, e_t)
}

#[test]
fn separated_list_collects_all_elements() {
  let (grammar, actions, _) = build();
  let config = ParserConfig::new();
  let tables = ascent_core::build_tables(&grammar, &config).expect("tables build");
  tables.ensure_deterministic().expect("grammar is LR");
  let recognizers = RecognizerTable::build(&grammar).expect("recognizers compile");
  let driver = LrDriver::new(&grammar, &tables, &recognizers);
  let customs = CustomRecognizers::new();

  let hooks = ParseHooks::default();
  let mut errors = Vec::new();
  let result = driver.parse_inline("x1,2,3", &customs, &actions, &mut (), &hooks, &mut errors).expect("parse succeeds");
  assert_eq!(result, vec!["1".to_string(), "2".to_string(), "3".to_string()]);
}

#[test]
fn separated_list_requires_at_least_one_element() {
  let (grammar, actions, e_t) = build();
  let config = ParserConfig::new();
  let tables = ascent_core::build_tables(&grammar, &config).expect("tables build");
  tables.ensure_deterministic().expect("grammar is LR");
  let recognizers = RecognizerTable::build(&grammar).expect("recognizers compile");
  let driver = LrDriver::new(&grammar, &tables, &recognizers);
  let customs = CustomRecognizers::new();

  let hooks = ParseHooks::default();
  let mut errors = Vec::new();
  let err = driver.parse_inline("x", &customs, &actions, &mut (), &hooks, &mut errors).expect_err("a bare 'x' has no list elements");
  match err {
    ParseError::NoAction { state, .. } => {
      assert!(acceptable_terminals(&tables, state).contains(&e_t), "state after 'x' must still accept a list element");
    }
    other => panic!("expected ParseError::NoAction, got {other:?}"),
  }
}
