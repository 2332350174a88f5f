//! Spec §8 scenario 2: an ambiguous sum grammar with no associativity
//! declared, parsed with the GLR driver — the SPPF must carry both
//! derivations rather than picking one (spec §4.6).

use ascent_core::{Grammar, GrammarBuilder, ParserConfig, ProdId, RecognizerSpec, SymbolId};
use ascent_runtime::forest::sppf::Tree;
use ascent_runtime::{CustomRecognizers, GlrDriver, ParseHooks, RecognizerTable};
use std::collections::HashSet;

fn build() -> (Grammar, ProdId, ProdId) {
  let mut b = GrammarBuilder::new();
  let num = b.add_terminal("NUM", RecognizerSpec::Regex(r"\d+".into()));
  let minus = b.add_terminal("-", RecognizerSpec::Str("-".into()));

  let expr = b.non_terminal("E");
  let num_prod = b.add_production(expr, vec![SymbolId::Terminal(num)]);
  let sub_prod = b.add_production(expr, vec![SymbolId::NonTerminal(expr), SymbolId::Terminal(minus), SymbolId::NonTerminal(expr)]);
  b.set_start(expr);

  let g = b.build().expect("grammar builds");
  (g, num_prod, sub_prod)
}

fn eval_tree(tree: &Tree, num_prod: ProdId, sub_prod: ProdId) -> f64 {
  match tree {
    Tree::Leaf(t) => t.value.parse().expect("numeric token"),
    Tree::Node { production, children, .. } => {
      if *production == num_prod {
        eval_tree(&children[0], num_prod, sub_prod)
      } else if *production == sub_prod {
        let lhs = eval_tree(&children[0], num_prod, sub_prod);
        let rhs = eval_tree(&children[2], num_prod, sub_prod);
        lhs - rhs
      } else {
        unreachable!("no other production reduces in this grammar")
      }
    }
  }
}

#[test]
fn ambiguous_subtraction_forks_into_two_derivations() {
  let (grammar, num_prod, sub_prod) = build();
  // Leave the genuine E -> E '-' E / E -> E '-' E shift/reduce conflict
  // unresolved: the default `prefer_shifts` would otherwise silently
  // collapse it into a single (left-associative) derivation.
  let config = ParserConfig::new().use_prefer_shifts(false).use_prefer_shifts_over_empty(false);
  let tables = ascent_core::build_tables(&grammar, &config).expect("tables build");
  let recognizers = RecognizerTable::build(&grammar).expect("recognizers compile");
  let driver = GlrDriver::new(&grammar, &tables, &recognizers);
  let customs = CustomRecognizers::new();

  let hooks = ParseHooks::default();
  let mut errors = Vec::new();
  let outcome = driver.parse("9-1-1", &customs, &hooks, None, &mut errors).expect("parse succeeds");
  assert_eq!(outcome.forest.solutions(), 2, "expected exactly two derivations of the ambiguous subtraction");
  assert!(outcome.forest.ambiguities() >= 1, "expected at least one ambiguous SPPF node");

  let values: HashSet<i64> = (0..outcome.forest.solutions())
    .map(|i| {
      let tree = outcome.forest.tree(i).expect("tree index in range");
      eval_tree(&tree, num_prod, sub_prod).round() as i64
    })
    .collect();

  assert_eq!(values, HashSet::from([9, 7]), "left- and right-bracketed subtraction must disagree: (9-1)-1=7, 9-(1-1)=9");
}
