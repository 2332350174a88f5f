//! Spec §8 scenario 1: arithmetic with priorities `* > +`, left-associative,
//! evaluated with the deterministic LR driver.

use ascent_core::{Assoc, Grammar, GrammarBuilder, ParserConfig, ProdId, RecognizerSpec, SymbolId};
use ascent_runtime::types::context::Child;
use ascent_runtime::{Actions, CustomRecognizers, LrDriver, ParseContext, ParseHooks, RecognizerTable, RuntimeResult};

struct ArithActions {
  num:  ProdId,
  plus: ProdId,
  mul:  ProdId,
  div:  ProdId,
  pow:  ProdId,
}

fn value_of(child: &Child<f64>) -> f64 {
  match child {
    Child::Value(v) => *v,
    Child::Terminal(t) => t.value.parse().expect("numeric token"),
  }
}

impl Actions<f64> for ArithActions {
  fn reduce(&self, ctx: &mut ParseContext, children: Vec<Child<f64>>) -> RuntimeResult<f64> {
    let p = ctx.production;
    if p == self.num {
      return Ok(value_of(&children[0]));
    }
    let lhs = value_of(&children[0]);
    let rhs = value_of(&children[2]);
    let v = if p == self.plus {
      lhs + rhs
    } else if p == self.mul {
      lhs * rhs
    } else if p == self.div {
      lhs / rhs
    } else if p == self.pow {
      lhs.powf(rhs)
    } else {
      unreachable!("no other production reduces in this grammar")
    };
    Ok(v)
  }
}

fn build() -> (Grammar, ArithActions) {
  let mut b = GrammarBuilder::new();
  let num = b.add_terminal("NUM", RecognizerSpec::Regex(r"\d+(\.\d+)?".into()));
  let plus_t = b.add_terminal("+", RecognizerSpec::Str("+".into()));
  let mul_t = b.add_terminal("*", RecognizerSpec::Str("*".into()));
  let div_t = b.add_terminal("/", RecognizerSpec::Str("/".into()));
  let pow_t = b.add_terminal("^", RecognizerSpec::Str("^".into()));
  b.set_terminal_priority(plus_t, 1);
  b.set_terminal_priority(mul_t, 2);
  b.set_terminal_priority(div_t, 2);
  b.set_terminal_priority(pow_t, 3);

  let expr = b.non_terminal("Expr");
  let num_prod = b.add_production(expr, vec![SymbolId::Terminal(num)]);
  let plus_prod = b.add_production(expr, vec![SymbolId::NonTerminal(expr), SymbolId::Terminal(plus_t), SymbolId::NonTerminal(expr)]);
  let mul_prod = b.add_production(expr, vec![SymbolId::NonTerminal(expr), SymbolId::Terminal(mul_t), SymbolId::NonTerminal(expr)]);
  let div_prod = b.add_production(expr, vec![SymbolId::NonTerminal(expr), SymbolId::Terminal(div_t), SymbolId::NonTerminal(expr)]);
  let pow_prod = b.add_production(expr, vec![SymbolId::NonTerminal(expr), SymbolId::Terminal(pow_t), SymbolId::NonTerminal(expr)]);
  b.set_production_priority(plus_prod, 1);
  b.set_production_assoc(plus_prod, Assoc::Left);
  b.set_production_priority(mul_prod, 2);
  b.set_production_assoc(mul_prod, Assoc::Left);
  b.set_production_priority(div_prod, 2);
  b.set_production_assoc(div_prod, Assoc::Left);
  b.set_production_priority(pow_prod, 3);
  b.set_production_assoc(pow_prod, Assoc::Left);
  b.set_start(expr);

  let g = b.build().expect("grammar builds");
  (g, ArithActions { num: num_prod, plus: plus_prod, mul: mul_prod, div: div_prod, pow: pow_prod })
}

#[test]
fn arithmetic_with_priorities_evaluates_to_700_8() {
  let (grammar, actions) = build();
  let config = ParserConfig::new();
  let tables = ascent_core::build_tables(&grammar, &config).expect("tables build");
  tables.ensure_deterministic().expect("grammar is LR under these priorities");
  let recognizers = RecognizerTable::build(&grammar).expect("recognizers compile");
  let driver = LrDriver::new(&grammar, &tables, &recognizers);
  let customs = CustomRecognizers::new();

  let hooks = ParseHooks::default();
  let mut errors = Vec::new();
  let result = driver.parse_inline("34 + 4.6 / 2 * 4^2^2 + 78", &customs, &actions, &mut (), &hooks, &mut errors).expect("parse succeeds");
  assert!((result - 700.8).abs() < 1e-9, "expected 700.8, got {result}");
}
