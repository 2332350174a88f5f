//! ACTION/GOTO emission and static conflict resolution (spec §4.2).

use super::states::Automaton;
use crate::config::{ParserConfig, TablesKind};
use crate::error::{AscentError, AscentResult};
use crate::types::{Assoc, Grammar, NonTermId, ProdId, SymbolId, TerminalId};
use std::collections::{BTreeMap, BTreeSet};

/// One entry the driver may take in a given state under a given terminal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
  Shift(usize),
  Reduce(ProdId),
  Accept,
}

#[derive(Clone, Copy, Debug)]
enum RawCandidate {
  Shift { term: SymbolId, target: usize },
  Reduce { prod: ProdId },
  Accept,
}

fn priority_of(c: &RawCandidate, g: &Grammar) -> i32 {
  match c {
    RawCandidate::Shift { term: SymbolId::Terminal(t), .. } => g.terminal(*t).priority,
    RawCandidate::Shift { term: SymbolId::Stop, .. } => i32::MAX,
    RawCandidate::Shift { .. } => 10,
    RawCandidate::Reduce { prod } => g.production(*prod).prior,
    RawCandidate::Accept => i32::MAX,
  }
}

/// Applies the static conflict-resolution ladder of spec §4.2: priority,
/// then associativity, then `prefer_shifts`, then `prefer_shifts_over_empty`,
/// leaving dynamic-marked or otherwise-unresolved candidates in the list.
fn resolve_cell(mut cands: Vec<RawCandidate>, g: &Grammar, cfg: &ParserConfig) -> Vec<RawCandidate> {
  if cands.len() <= 1 {
    return cands;
  }
  if cands.iter().any(|c| matches!(c, RawCandidate::Accept)) {
    return cands;
  }

  // 1. Priority.
  let maxp = cands.iter().map(|c| priority_of(c, g)).max().unwrap();
  cands.retain(|c| priority_of(c, g) == maxp);
  if cands.len() <= 1 {
    return cands;
  }

  // 2. Associativity, for a single shift vs a single reduce of equal priority.
  if cands.len() == 2 {
    let shift = cands.iter().copied().find(|c| matches!(c, RawCandidate::Shift { .. }));
    let reduce = cands.iter().copied().find(|c| matches!(c, RawCandidate::Reduce { .. }));
    if let (Some(s), Some(RawCandidate::Reduce { prod })) = (shift, reduce) {
      match g.production(prod).assoc {
        Assoc::Left => return vec![RawCandidate::Reduce { prod }],
        Assoc::Right => return vec![s],
        Assoc::None => {}
      }
    }
  }

  // 3 & 4. prefer_shifts / prefer_shifts_over_empty.
  let has_shift = cands.iter().any(|c| matches!(c, RawCandidate::Shift { .. }));
  if has_shift {
    cands.retain(|c| match c {
      RawCandidate::Shift { .. } | RawCandidate::Accept => true,
      RawCandidate::Reduce { prod } => {
        let p = g.production(*prod);
        let drop_general = cfg.prefer_shifts && !p.nops;
        let drop_empty = cfg.prefer_shifts_over_empty && p.is_empty() && !p.nopse;
        !(drop_general || drop_empty)
      }
    });
  }

  // 5. Dynamic candidates, and anything else left tied, are returned
  // unresolved — the LR driver rejects len > 1, GLR forks on it.
  cands
}

#[derive(Clone, Debug, Default)]
pub struct StateTables {
  pub action: BTreeMap<SymbolId, Vec<Action>>,
  pub goto:   BTreeMap<NonTermId, usize>,
}

/// The immutable, pure-function-of-the-grammar ACTION/GOTO tables (spec §2,
/// §6 "Persisted tables").
#[derive(Clone, Debug)]
pub struct Tables {
  pub states:     Vec<StateTables>,
  pub start:      usize,
  pub accepting:  BTreeSet<usize>,
  /// The set of terminals acceptable in each state, `terms(I)` in spec
  /// §4.3, cached so the token recognizer runtime need not re-derive it.
  pub terms_of_state: Vec<BTreeSet<TerminalId>>,
}

impl Tables {
  /// Validates the table-determinism property of spec §8: for the LR
  /// driver, every ACTION cell must resolve to exactly one action.
  pub fn ensure_deterministic(&self) -> AscentResult<()> {
    let mut errors = vec![];
    for (sid, st) in self.states.iter().enumerate() {
      for (term, actions) in &st.action {
        if actions.len() > 1 {
          errors.push(AscentError::UnresolvedConflict {
            state:    sid,
            terminal: *term,
            actions:  actions.iter().map(|a| format!("{:?}", a)).collect(),
          });
        }
      }
    }
    if errors.is_empty() {
      Ok(())
    } else {
      Err(AscentError::Many { message: "grammar is not LR under the selected policy".to_string(), errors })
    }
  }
}

pub fn build_tables(g: &Grammar, automaton: &Automaton, cfg: &ParserConfig, follow: &[BTreeSet<SymbolId>]) -> Tables {
  let mut states = vec![StateTables::default(); automaton.states.len()];
  let mut accepting = BTreeSet::new();
  let mut terms_of_state = vec![BTreeSet::new(); automaton.states.len()];

  let mut raw: Vec<BTreeMap<SymbolId, Vec<RawCandidate>>> = vec![BTreeMap::new(); automaton.states.len()];

  for st in &automaton.states {
    for (item, la) in &st.items {
      match item.symbol_at_dot(g) {
        Some(sym) => {
          if let Some(&target) = st.goto.get(&sym) {
            if sym.is_terminal() {
              raw[st.id].entry(sym).or_default().push(RawCandidate::Shift { term: sym, target });
            }
          }
        }
        None => {
          // Complete item.
          if item.prod == g.aug_start_prod {
            raw[st.id].entry(SymbolId::Stop).or_default().push(RawCandidate::Accept);
          } else {
            let lookaheads: Vec<SymbolId> = match cfg.tables_kind {
              TablesKind::Lalr => la.iter().copied().collect(),
              TablesKind::Slr => follow[g.production(item.prod).nonterm.0 as usize].iter().copied().collect(),
            };
            for t in lookaheads {
              raw[st.id].entry(t).or_default().push(RawCandidate::Reduce { prod: item.prod });
            }
          }
        }
      }
    }
  }

  for (sid, cells) in raw.into_iter().enumerate() {
    for (term, cands) in cells {
      let resolved = resolve_cell(cands, g, cfg);
      let actions: Vec<Action> = resolved
        .into_iter()
        .map(|c| match c {
          RawCandidate::Shift { target, .. } => Action::Shift(target),
          RawCandidate::Reduce { prod } => Action::Reduce(prod),
          RawCandidate::Accept => Action::Accept,
        })
        .collect();
      if actions.iter().any(|a| matches!(a, Action::Accept)) {
        accepting.insert(sid);
      }
      if let SymbolId::Terminal(t) = term {
        terms_of_state[sid].insert(t);
      }
      states[sid].action.insert(term, actions);
    }
    for (sym, target) in &automaton.states[sid].goto {
      if let SymbolId::NonTerminal(n) = sym {
        states[sid].goto.insert(*n, *target);
      }
    }
  }

  Tables { states, start: automaton.start, accepting, terms_of_state }
}
