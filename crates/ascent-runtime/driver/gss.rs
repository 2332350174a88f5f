//! Generalized LR driver over a Graph-Structured Stack (C6, spec §4.5).
//!
//! The teacher's retrieved slice has no GLR support to ground this against
//! directly; the engineering *style* (frontier-indexed processing, shared
//! immutable tables) follows `radlr-core/types/parser_db.rs`'s
//! `SharedParserDatabase = Arc<ParserDatabase>` pattern, while the algorithm
//! itself is taken straight from spec §4.5.

use crate::error::{GlrHeadSnapshot, ParseError, RuntimeResult};
use crate::forest::sppf::{Forest, SppfRef};
use crate::hooks::{ParseHooks, RecoveryContext};
use crate::recognize::{self, RecognizerTable};
use crate::types::token::{CustomRecognizers, Token};
use ascent_core::compile::tables::Action;
use ascent_core::{Grammar, ProdId, SymbolId, Tables};
use std::collections::{BTreeSet, HashMap, HashSet};

type GssNodeId = usize;

/// One predecessor edge. `label` is the SPPF node produced when this edge
/// was created — the semantic result of the symbol consumed along it (spec
/// §3 "GSS node"). The single zero-width transition on `STOP` carries no
/// symbol and so no label.
#[derive(Clone, Copy, Debug)]
struct GssLink {
  predecessor: GssNodeId,
  label:       Option<SppfRef>,
}

#[derive(Clone, Debug)]
struct GssNode {
  state:       usize,
  position:    usize,
  links:       Vec<GssLink>,
  /// The terminal shifted immediately before this head came into being
  /// (`None` for the root). Folded into a raised [`ErrorContext`]'s
  /// `symbols_before` (spec §7).
  last_symbol: Option<SymbolId>,
}

/// A lookahead symbol paired with the real token it came from, when any
/// (spec §4.5's frontier is driven by recognized tokens; the synthetic
/// `STOP` sentinel that drives acceptance carries no token).
#[derive(Clone, Debug)]
struct Lookahead {
  symbol: SymbolId,
  token:  Option<Token>,
}

/// Which kind of table action a [`DynamicFilter`] is being asked to approve
/// (spec §4.5, §9).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DynamicAction {
  Shift,
  Reduce,
}

/// The runtime disambiguation hook of spec §4.2 step 5 / §4.5: consulted
/// only for actions whose underlying terminal or production has its
/// `dynamic` flag set, after every static resolution step has already run.
/// Returning `false` drops that action for this head; the filter may be
/// stateful (it is invoked through a `&mut` reference) and is called once
/// with every argument `None`/empty at the start of a parse so it can
/// initialize before any real candidate is judged (spec §9).
pub trait DynamicFilter {
  #[allow(clippy::too_many_arguments)]
  fn filter(
    &mut self,
    from_state: Option<usize>,
    to_state: Option<usize>,
    action: Option<DynamicAction>,
    production: Option<ProdId>,
    subresults: &[SppfRef],
  ) -> bool;
}

pub struct GlrDriver<'g> {
  pub grammar:     &'g Grammar,
  pub tables:      &'g Tables,
  pub recognizers: &'g RecognizerTable,
}

/// The outcome of a full GLR parse: the forest of every accepted
/// derivation, plus whatever heads were still alive with no accept when the
/// frontier died (spec §9 Open Questions, `consume_input = false`).
pub struct GlrOutcome {
  pub forest: Forest,
}

impl<'g> GlrDriver<'g> {
  pub fn new(grammar: &'g Grammar, tables: &'g Tables, recognizers: &'g RecognizerTable) -> Self {
    Self { grammar, tables, recognizers }
  }

  /// All GSS paths of exactly `len` edges walking backward from `start`,
  /// each as `(path_end_node, children_in_left_to_right_order)`. A head with
  /// more than one predecessor at some step forks into more than one path —
  /// this is precisely where ambiguity enters reduction (spec §4.5).
  fn paths_of_length(&self, nodes: &[GssNode], start: GssNodeId, len: usize) -> Vec<(GssNodeId, Vec<SppfRef>)> {
    if len == 0 {
      return vec![(start, vec![])];
    }
    let mut out = vec![];
    for link in &nodes[start].links {
      if let Some(label) = link.label {
        for (end, mut children) in self.paths_of_length(nodes, link.predecessor, len - 1) {
          children.push(label);
          out.push((end, children));
        }
      }
    }
    out
  }

  fn recover(
    &self,
    error: &ParseError,
    input: &str,
    customs: &CustomRecognizers,
    hooks: &ParseHooks,
    errors: &mut Vec<ParseError>,
    state: usize,
    position: usize,
  ) -> Option<(usize, Token)> {
    let hook = hooks.on_error?;
    let mut ctx = RecoveryContext { grammar: self.grammar, recognizers: self.recognizers, customs, input, state, position, token_ahead: None };
    if hook.on_error(&mut ctx, error) {
      errors.push(error.clone());
      ctx.token_ahead.map(|tok| (ctx.position, tok))
    } else {
      None
    }
  }

  /// Whether `dynamic_filter` approves an action, for actions not flagged
  /// `dynamic` this is always `true` without consulting the filter at all
  /// (spec §4.5: the filter is the *last* step, only for ties the static
  /// ladder left dynamic).
  fn dynamic_ok(
    dynamic_filter: &mut Option<&mut dyn DynamicFilter>,
    is_dynamic: bool,
    from_state: usize,
    to_state: usize,
    action: DynamicAction,
    production: Option<ProdId>,
    subresults: &[SppfRef],
  ) -> bool {
    if !is_dynamic {
      return true;
    }
    match dynamic_filter {
      Some(f) => f.filter(Some(from_state), Some(to_state), Some(action), production, subresults),
      None => true,
    }
  }

  /// Runs a full parse to completion. Returns the forest of every derivation
  /// under an `ACCEPT`ed head (spec §4.5 "Termination").
  ///
  /// `dynamic_filter`, if supplied, is invoked once with every argument
  /// `None`/empty before parsing starts (spec §9), then consulted for every
  /// candidate action whose underlying terminal/production is `dynamic`
  /// (spec §4.2 step 5). Any token-level or action-level error first goes
  /// through `hooks.on_error` (spec §6); a successful recovery is recorded
  /// in `errors` rather than aborting the parse.
  pub fn parse(
    &self,
    input: &str,
    customs: &CustomRecognizers,
    hooks: &ParseHooks,
    mut dynamic_filter: Option<&mut dyn DynamicFilter>,
    errors: &mut Vec<ParseError>,
  ) -> RuntimeResult<GlrOutcome> {
    if let Some(f) = dynamic_filter.as_deref_mut() {
      f.filter(None, None, None, None, &[]);
    }

    let mut nodes: Vec<GssNode> = vec![GssNode { state: self.tables.start, position: 0, links: vec![], last_symbol: None }];
    let mut forest = Forest::new();
    let mut frontier: Vec<GssNodeId> = vec![0];

    loop {
      if frontier.is_empty() {
        break;
      }
      let mut pos = nodes[frontier[0]].position;
      let mut layout_end = self.recognizers.consume_layout(self.grammar, input, pos, customs);

      let mut node_at: HashMap<(usize, usize), GssNodeId> = HashMap::new();
      for &nid in &frontier {
        node_at.insert((nodes[nid].state, nodes[nid].position), nid);
      }

      // Reduce phase: a worklist seeded with every head and lookahead in
      // the frontier, growing as reductions create new heads at the same
      // position (spec §4.5 step 2, "reduce-before-shift"). `seen` dedups
      // by the specific path a reduction walked (its end node and exact
      // children), not merely by head: a new link added mid-round by
      // `reach()` re-enqueues the head it landed on, and that re-enqueue
      // must still be able to retry the reduction across the new path even
      // though the head/symbol/production triple was already "seen" via
      // its other, older paths (spec §4.5 "re-try ... the new link only").
      let mut for_reducer: Vec<(GssNodeId, Lookahead)> = vec![];
      let mut for_shifter: Vec<(GssNodeId, Token)> = vec![];
      let mut accepted_here: Vec<SppfRef> = vec![];
      let mut seen: HashSet<(GssNodeId, SymbolId, ProdId, Vec<SppfRef>)> = HashSet::new();

      if layout_end >= input.len() {
        for &nid in &frontier {
          for_reducer.push((nid, Lookahead { symbol: SymbolId::Stop, token: None }));
        }
      } else {
        let symbols_before: BTreeSet<SymbolId> = frontier.iter().filter_map(|&nid| nodes[nid].last_symbol).collect();
        let last_heads: Vec<GlrHeadSnapshot> = frontier.iter().map(|&nid| GlrHeadSnapshot { state: nodes[nid].state, position: nodes[nid].position }).collect();
        for &nid in &frontier {
          let toks = match recognize::recognize(
            self.grammar,
            self.tables,
            self.recognizers,
            customs,
            nodes[nid].state,
            input,
            pos,
            symbols_before.iter().copied().collect(),
            Some(last_heads.clone()),
            hooks.custom_recognition,
          ) {
            Ok(toks) => toks,
            Err(e) => match self.recover(&e, input, customs, hooks, errors, nodes[nid].state, pos) {
              Some((new_pos, tok)) => {
                pos = new_pos;
                layout_end = new_pos;
                vec![tok]
              }
              None => return Err(e),
            },
          };
          for t in toks {
            for_reducer.push((nid, Lookahead { symbol: SymbolId::Terminal(t.terminal), token: Some(t) }));
          }
        }
      }

      while let Some((nid, la)) = for_reducer.pop() {
        let state = nodes[nid].state;
        let actions = match self.tables.states[state].action.get(&la.symbol) {
          Some(a) => a.clone(),
          None => continue,
        };
        for action in actions {
          match action {
            Action::Reduce(prod) => {
              let rhs_len = self.grammar.production(prod).arity();
              let nonterm = self.grammar.production(prod).nonterm;
              let is_dynamic = self.grammar.production(prod).dynamic;
              for (path_end, children) in self.paths_of_length(&nodes, nid, rhs_len) {
                let key = (path_end, la.symbol, prod, children.clone());
                if !seen.insert(key) {
                  continue;
                }
                let start_pos = nodes[path_end].position;
                let to_state = match self.tables.states[nodes[path_end].state].goto.get(&nonterm) {
                  Some(&s) => s,
                  None => continue,
                };
                if !Self::dynamic_ok(&mut dynamic_filter, is_dynamic, nodes[path_end].state, to_state, DynamicAction::Reduce, Some(prod), &children) {
                  continue;
                }
                let sppf_ref = forest.intern_nonterm_alt(nonterm, start_pos, pos, prod, children);
                self.reach(&mut nodes, &mut node_at, &mut for_reducer, path_end, to_state, pos, Some(sppf_ref), &la, SymbolId::NonTerminal(nonterm));
              }
            }
            Action::Shift(target) => {
              let is_dynamic = la.symbol.as_terminal().map(|t| self.grammar.terminal(t).dynamic).unwrap_or(false);
              if !Self::dynamic_ok(&mut dynamic_filter, is_dynamic, state, target, DynamicAction::Shift, None, &[]) {
                continue;
              }
              if let Some(tok) = &la.token {
                for_shifter.push((nid, tok.clone()));
              }
            }
            Action::Accept => {
              if let Some(&root) = nodes[nid].links.first().and_then(|l| l.label.as_ref()) {
                accepted_here.push(root);
              }
            }
          }
        }

        // The STOP pseudo-shift (spec §4.2 "enter SHIFT(accepting-state)
        // under STOP"): acceptance is detected one state ahead without
        // materializing the intermediate GSS node, since nothing follows
        // end-of-input.
        if la.symbol == SymbolId::Stop {
          if let Some(actions) = self.tables.states[state].action.get(&SymbolId::Stop) {
            for action in actions {
              if let Action::Shift(target) = action {
                if self.tables.accepting.contains(target) {
                  if let Some(&root) = nodes[nid].links.first().and_then(|l| l.label.as_ref()) {
                    accepted_here.push(root);
                  }
                }
              }
            }
          }
        }
      }

      forest.roots.extend(accepted_here.into_iter().collect::<HashSet<_>>());

      if layout_end >= input.len() {
        // No real tokens remain; whatever accepted above is final for this
        // branch of the frontier, and nothing shifts further.
        break;
      }

      // Shift phase: every pending (head, token) creates or extends a node
      // at the next frontier (spec §4.5 step 3).
      let mut next_frontier: Vec<GssNodeId> = vec![];
      let mut next_node_at: HashMap<(usize, usize), GssNodeId> = HashMap::new();
      for (nid, tok) in for_shifter {
        let state = nodes[nid].state;
        let Some(actions) = self.tables.states[state].action.get(&SymbolId::Terminal(tok.terminal)) else { continue };
        for action in actions {
          if let Action::Shift(target) = action {
            let next_pos = tok.end();
            let label = forest.intern_terminal(&tok);
            let key = (*target, next_pos);
            match next_node_at.get(&key) {
              Some(&existing) => {
                if !nodes[existing].links.iter().any(|l| l.predecessor == nid && l.label == Some(label)) {
                  nodes[existing].links.push(GssLink { predecessor: nid, label: Some(label) });
                }
              }
              None => {
                let new_id = nodes.len();
                nodes.push(GssNode {
                  state:       *target,
                  position:    next_pos,
                  links:       vec![GssLink { predecessor: nid, label: Some(label) }],
                  last_symbol: Some(SymbolId::Terminal(tok.terminal)),
                });
                next_node_at.insert(key, new_id);
                next_frontier.push(new_id);
              }
            }
          }
        }
      }

      if next_frontier.is_empty() {
        break;
      }
      frontier = next_frontier;
    }

    if forest.roots.is_empty() {
      return Err(ParseError::NoViableParse { position: nodes.iter().map(|n| n.position).max().unwrap_or(0) });
    }

    Ok(GlrOutcome { forest })
  }

  /// Looks up or creates the GSS node at `(to_state, pos)`, links it from
  /// `path_end`, and enqueues it for further reductions — either because it
  /// is brand new, or because the new link crosses into reductions the
  /// existing node had not yet tried with this lookahead (spec §4.5 "if the
  /// link was new ... re-try reductions that cross the new link only").
  #[allow(clippy::too_many_arguments)]
  fn reach(
    &self,
    nodes: &mut Vec<GssNode>,
    node_at: &mut HashMap<(usize, usize), GssNodeId>,
    for_reducer: &mut Vec<(GssNodeId, Lookahead)>,
    path_end: GssNodeId,
    to_state: usize,
    pos: usize,
    label: Option<SppfRef>,
    la: &Lookahead,
    consumed_symbol: SymbolId,
  ) {
    let key = (to_state, pos);
    match node_at.get(&key) {
      Some(&existing) => {
        let already = nodes[existing].links.iter().any(|l| l.predecessor == path_end && l.label == label);
        if !already {
          nodes[existing].links.push(GssLink { predecessor: path_end, label });
          for_reducer.push((existing, la.clone()));
        }
      }
      None => {
        let new_id = nodes.len();
        nodes.push(GssNode { state: to_state, position: pos, links: vec![GssLink { predecessor: path_end, label }], last_symbol: Some(consumed_symbol) });
        node_at.insert(key, new_id);
        for_reducer.push((new_id, la.clone()));
      }
    }
  }
}
