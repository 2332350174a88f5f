//! Spec §8 scenario 3: an optional middle symbol via an EMPTY alternative,
//! exercising the EMPTY-production reduce path of the deterministic LR
//! driver.

use ascent_core::{Grammar, GrammarBuilder, ParserConfig, ProdId, RecognizerSpec, SymbolId};
use ascent_runtime::types::context::Child;
use ascent_runtime::{Actions, CustomRecognizers, LrDriver, ParseContext, ParseHooks, RecognizerTable, RuntimeResult};

#[derive(Clone, Debug, PartialEq)]
enum V {
  Str(String),
  Opt(Option<String>),
  List(Vec<V>),
}

struct OptActions {
  a_prod:   ProdId,
  b_prod:   ProdId,
  c_prod:   ProdId,
  opt_some: ProdId,
  opt_none: ProdId,
  s_prod:   ProdId,
}

fn text_of(child: &Child<V>) -> String {
  match child {
    Child::Terminal(t) => t.value.clone(),
    Child::Value(V::Str(s)) => s.clone(),
    _ => panic!("expected a terminal or string value"),
  }
}

impl Actions<V> for OptActions {
  fn reduce(&self, ctx: &mut ParseContext, children: Vec<Child<V>>) -> RuntimeResult<V> {
    let p = ctx.production;
    if p == self.a_prod || p == self.b_prod || p == self.c_prod {
      Ok(V::Str(text_of(&children[0])))
    } else if p == self.opt_none {
      Ok(V::Opt(None))
    } else if p == self.opt_some {
      Ok(V::Opt(Some(text_of(&children[0]))))
    } else if p == self.s_prod {
      let opt = match &children[1] {
        Child::Value(V::Opt(o)) => o.clone(),
        _ => panic!("expected an Opt value in the middle position"),
      };
      Ok(V::List(vec![V::Str(text_of(&children[0])), V::Opt(opt), V::Str(text_of(&children[2]))]))
    } else {
      unreachable!("no other production reduces in this grammar")
    }
  }
}

fn build() -> (Grammar, OptActions) {
  let mut b = GrammarBuilder::new();
  let a_t = b.add_terminal("a", RecognizerSpec::Str("a".into()));
  let b_t = b.add_terminal("b", RecognizerSpec::Str("b".into()));
  let c_t = b.add_terminal("c", RecognizerSpec::Str("c".into()));

  let a_nt = b.non_terminal("A");
  let b_nt = b.non_terminal("B");
  let c_nt = b.non_terminal("C");
  let opt_nt = b.non_terminal("Opt");
  let s_nt = b.non_terminal("S");

  let a_prod = b.add_production(a_nt, vec![SymbolId::Terminal(a_t)]);
  let b_prod = b.add_production(b_nt, vec![SymbolId::Terminal(b_t)]);
  let c_prod = b.add_production(c_nt, vec![SymbolId::Terminal(c_t)]);
  let opt_some = b.add_production(opt_nt, vec![SymbolId::NonTerminal(b_nt)]);
  let opt_none = b.add_production(opt_nt, vec![SymbolId::Empty]);
  let s_prod = b.add_production(s_nt, vec![SymbolId::NonTerminal(a_nt), SymbolId::NonTerminal(opt_nt), SymbolId::NonTerminal(c_nt)]);
  b.set_start(s_nt);

  let g = b.build().expect("grammar builds");
  (g, OptActions { a_prod, b_prod, c_prod, opt_some, opt_none, s_prod })
}

fn run(input: &str) -> V {
  let (grammar, actions) = build();
  let config = ParserConfig::new();
  let tables = ascent_core::build_tables(&grammar, &config).expect("tables build");
  tables.ensure_deterministic().expect("grammar is LR with the optional middle symbol resolved");
  let recognizers = RecognizerTable::build(&grammar).expect("recognizers compile");
  let driver = LrDriver::new(&grammar, &tables, &recognizers);
  let customs = CustomRecognizers::new();
  let hooks = ParseHooks::default();
  let mut errors = Vec::new();
  driver.parse_inline(input, &customs, &actions, &mut (), &hooks, &mut errors).expect("parse succeeds")
}

#[test]
fn optional_middle_symbol_absent() {
  let result = run("ac");
  assert_eq!(result, V::List(vec![V::Str("a".into()), V::Opt(None), V::Str("c".into())]));
}

#[test]
fn optional_middle_symbol_present() {
  let result = run("abc");
  assert_eq!(result, V::List(vec![V::Str("a".into()), V::Opt(Some("b".into())), V::Str("c".into())]));
}
