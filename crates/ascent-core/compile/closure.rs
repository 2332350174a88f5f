//! Item-set closure and goto (spec §4.2), grounded on
//! `radlr-core/compile/states/build_graph_beta/flow/goto.rs` for the
//! closure/goto split between kernel items and their closed completion.

use crate::analysis::first_of_seq;
use crate::types::{Grammar, Item, ItemSet, SymbolId};
use std::collections::BTreeSet;

/// Closes `kernel` under the standard LR(1) closure rule: for every item
/// `(p, dot, la)` with `p.rhs[dot] = N`, add `(N -> ·γ, x)` for every
/// production `N -> γ` and every `x ∈ FIRST(p.rhs[dot+1:] la)`. Iterates to a
/// fixed point.
pub fn closure(kernel: ItemSet, g: &Grammar, nullable: &[bool], first: &[BTreeSet<SymbolId>]) -> ItemSet {
  let mut items = kernel;
  loop {
    let mut additions: Vec<(Item, BTreeSet<SymbolId>)> = Vec::new();
    for (item, la) in items.iter() {
      if let Some(SymbolId::NonTerminal(n)) = item.symbol_at_dot(g) {
        let rest = item.rest_after_dot(g);
        let new_la = first_of_seq(rest, nullable, first, la);
        for &pid in &g.nonterm(n).productions {
          additions.push((Item::start(pid), new_la.clone()));
        }
      }
    }
    let mut changed = false;
    for (item, la) in additions {
      let entry = items.entry(item).or_default();
      let before = entry.len();
      entry.extend(la);
      if entry.len() != before {
        changed = true;
      }
    }
    if !changed {
      break;
    }
  }
  items
}

/// The kernel of `GOTO(I, X)`: every item `(p, dot+1, la)` for `(p, dot, la)
/// ∈ I` with `p.rhs[dot] = X`. Not yet closed — call [`closure`] on the
/// result.
pub fn goto_kernel(items: &ItemSet, symbol: SymbolId, g: &Grammar) -> ItemSet {
  let mut kernel = ItemSet::new();
  for (item, la) in items {
    if item.symbol_at_dot(g) == Some(symbol) {
      kernel.entry(item.advanced()).or_default().extend(la.iter().cloned());
    }
  }
  kernel
}

/// `GOTO(I, X)`, closed.
pub fn goto(items: &ItemSet, symbol: SymbolId, g: &Grammar, nullable: &[bool], first: &[BTreeSet<SymbolId>]) -> ItemSet {
  closure(goto_kernel(items, symbol, g), g, nullable, first)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{GrammarBuilder, RecognizerSpec};

  #[test]
  fn closure_adds_productions_of_nonterminal_at_dot() {
    let mut b = GrammarBuilder::new();
    let plus = b.add_terminal("+", RecognizerSpec::Str("+".into()));
    let num = b.add_terminal("num", RecognizerSpec::Regex(r"\d+".into()));
    let e = b.non_terminal("E");
    b.add_production(e, vec![SymbolId::NonTerminal(e), SymbolId::Terminal(plus), SymbolId::Terminal(num)]);
    b.add_production(e, vec![SymbolId::Terminal(num)]);
    b.set_start(e);
    let g = b.build().unwrap();

    let nullable = crate::analysis::nullable_nonterms(&g);
    let first = crate::analysis::first_sets(&g, &nullable);

    let mut kernel = ItemSet::new();
    kernel.insert(Item::start(g.aug_start_prod), BTreeSet::new());
    let closed = closure(kernel, &g, &nullable, &first);
    // Closure over S' -> ·E STOP must pull in both E productions.
    let e_prods = &g.nonterm(e).productions;
    for pid in e_prods {
      assert!(closed.contains_key(&Item::start(*pid)));
    }
  }
}
