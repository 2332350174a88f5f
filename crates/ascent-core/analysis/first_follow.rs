use crate::types::{Grammar, SymbolId};
use std::collections::BTreeSet;

/// `NULLABLE(N)` for every non-terminal, by fixed-point iteration (spec
/// §4.1). `EMPTY` contributes to nullability but is never a FIRST member.
pub fn nullable_nonterms(g: &Grammar) -> Vec<bool> {
  let mut nullable = vec![false; g.nonterm_count()];
  loop {
    let mut changed = false;
    for p in &g.productions {
      let nt = p.nonterm.0 as usize;
      if nullable[nt] {
        continue;
      }
      let is_null = p.is_empty()
        || p.rhs.iter().all(|s| match s {
          SymbolId::NonTerminal(n) => nullable[n.0 as usize],
          SymbolId::Empty => true,
          _ => false,
        });
      if is_null {
        nullable[nt] = true;
        changed = true;
      }
    }
    if !changed {
      break;
    }
  }
  nullable
}

/// `FIRST(N)` for every non-terminal: the set of terminals (and `STOP`,
/// never `EMPTY`) that can begin a sentential form derived from `N`.
pub fn first_sets(g: &Grammar, nullable: &[bool]) -> Vec<BTreeSet<SymbolId>> {
  let mut first = vec![BTreeSet::new(); g.nonterm_count()];
  loop {
    let mut changed = false;
    for p in &g.productions {
      let nt = p.nonterm.0 as usize;
      for sym in &p.rhs {
        match sym {
          SymbolId::Terminal(_) | SymbolId::Stop => {
            if first[nt].insert(*sym) {
              changed = true;
            }
            break;
          }
          SymbolId::NonTerminal(n) => {
            let additions: Vec<_> = first[n.0 as usize].iter().cloned().collect();
            for a in additions {
              if first[nt].insert(a) {
                changed = true;
              }
            }
            if !nullable[n.0 as usize] {
              break;
            }
          }
          SymbolId::Empty => break,
        }
      }
    }
    if !changed {
      break;
    }
  }
  first
}

/// `FIRST(seq · trailing)`: the set of terminals that can begin a sentential
/// form derived from `seq`, falling back to `trailing` if every symbol in
/// `seq` is nullable (including the empty sequence). Used both by closure
/// (spec §4.2, with `trailing` the enclosing item's lookahead set) and by
/// [`follow_sets`].
pub fn first_of_seq(seq: &[SymbolId], nullable: &[bool], first: &[BTreeSet<SymbolId>], trailing: &BTreeSet<SymbolId>) -> BTreeSet<SymbolId> {
  let mut result = BTreeSet::new();
  for sym in seq {
    match sym {
      SymbolId::Terminal(_) | SymbolId::Stop => {
        result.insert(*sym);
        return result;
      }
      SymbolId::NonTerminal(n) => {
        result.extend(first[n.0 as usize].iter().cloned());
        if !nullable[n.0 as usize] {
          return result;
        }
      }
      SymbolId::Empty => return result,
    }
  }
  result.extend(trailing.iter().cloned());
  result
}

/// `FOLLOW(N)` for every non-terminal, including `STOP` for the (augmented)
/// start symbol, by fixed-point iteration over every production's rhs.
pub fn follow_sets(g: &Grammar, nullable: &[bool], first: &[BTreeSet<SymbolId>]) -> Vec<BTreeSet<SymbolId>> {
  let mut follow = vec![BTreeSet::new(); g.nonterm_count()];
  loop {
    let mut changed = false;
    for p in &g.productions {
      for (i, sym) in p.rhs.iter().enumerate() {
        if let SymbolId::NonTerminal(n) = sym {
          let rest = &p.rhs[i + 1..];
          let trailing = follow[p.nonterm.0 as usize].clone();
          let additions = first_of_seq(rest, nullable, first, &trailing);
          for a in additions {
            if follow[n.0 as usize].insert(a) {
              changed = true;
            }
          }
        }
      }
    }
    if !changed {
      break;
    }
  }
  follow
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{GrammarBuilder, RecognizerSpec};

  /// `S -> A ; A -> 'a' A | EMPTY` — A is nullable, FIRST(A) = {a}, FOLLOW(A)
  /// includes STOP.
  #[test]
  fn nullable_and_first_follow_basic() {
    let mut b = GrammarBuilder::new();
    let a_tok = b.add_terminal("a", RecognizerSpec::Str("a".into()));
    let s = b.non_terminal("S");
    let a = b.non_terminal("A");
    b.add_production(s, vec![SymbolId::NonTerminal(a)]);
    b.add_production(a, vec![SymbolId::Terminal(a_tok), SymbolId::NonTerminal(a)]);
    b.add_production(a, vec![SymbolId::Empty]);
    b.set_start(s);
    let g = b.build().unwrap();

    let nullable = nullable_nonterms(&g);
    assert!(nullable[a.0 as usize]);
    assert!(!nullable[s.0 as usize]);

    let first = first_sets(&g, &nullable);
    assert!(first[a.0 as usize].contains(&SymbolId::Terminal(a_tok)));
    assert!(first[s.0 as usize].contains(&SymbolId::Terminal(a_tok)));

    let follow = follow_sets(&g, &nullable, &first);
    assert!(follow[a.0 as usize].contains(&SymbolId::Stop));
  }
}
