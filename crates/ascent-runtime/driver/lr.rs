//! Deterministic LR driver (C5, spec §4.4), grounded on
//! `sherpa-rust-rt/types/parse_action.rs`'s `Shift`/`Reduce`/`Accept`/`Error`
//! action shapes and `hctk-core/deprecated_runtime/completer/completer.rs`'s
//! shift/reduce loop.

use crate::error::{ErrorContext, ParseError, RuntimeResult};
use crate::hooks::{ParseHooks, RecoveryContext};
use crate::recognize::{self, RecognizerTable};
use crate::types::context::{Child, ParseContext};
use crate::types::token::{CustomRecognizers, Token};
use ascent_core::compile::tables::Action;
use ascent_core::{Grammar, ProdId, SymbolId, Tables};
use std::any::Any;

/// A value on the parser stack: either a shifted token or a reduced result
/// (spec §4.4 "values are carried out-of-band, aligned with the stack").
#[derive(Debug, Clone)]
pub enum StackValue<V> {
  Terminal(Token),
  Value(V),
}

/// The parse tree built by the driver's own default reduction action (spec
/// §4.4 "tree-then-walk"), independent of any user `Actions` implementation.
/// Walking it bottom-up with [`LrDriver::call_actions`] is the recommended
/// build mode for GLR, so side effects never run on a pruned branch.
#[derive(Debug, Clone)]
pub enum ParseTree {
  Leaf(Token),
  Node { production: ProdId, children: Vec<ParseTree> },
}

/// User-supplied reduction actions, invoked either inline during shift/reduce
/// (spec §4.4 "in-line") or afterward by [`LrDriver::call_actions`] walking a
/// [`ParseTree`] bottom-up.
pub trait Actions<V> {
  fn reduce(&self, ctx: &mut ParseContext, children: Vec<Child<V>>) -> RuntimeResult<V>;
}

/// What the driver is dispatching on at the current position: either a real
/// recognized token, or the synthetic `STOP` sentinel once layout has
/// consumed the parser to the end of input (spec §3 "augmented start").
#[derive(Clone)]
enum Lookahead {
  Real(Token),
  Eof { position: usize },
}

impl Lookahead {
  fn symbol(&self) -> SymbolId {
    match self {
      Lookahead::Real(t) => SymbolId::Terminal(t.terminal),
      Lookahead::Eof { .. } => SymbolId::Stop,
    }
  }

  fn position(&self) -> usize {
    match self {
      Lookahead::Real(t) => t.start,
      Lookahead::Eof { position } => *position,
    }
  }
}

pub struct LrDriver<'g> {
  pub grammar:     &'g Grammar,
  pub tables:      &'g Tables,
  pub recognizers: &'g RecognizerTable,
}

impl<'g> LrDriver<'g> {
  pub fn new(grammar: &'g Grammar, tables: &'g Tables, recognizers: &'g RecognizerTable) -> Self {
    Self { grammar, tables, recognizers }
  }

  /// Builds the spec §7 `ErrorContext` for a failure in `state` at `pos`:
  /// the keys of `ACTION[state]`, every token any terminal in the grammar
  /// could produce at `pos`, and the symbol shifted immediately before (the
  /// LR driver only ever has one stack, so this is always a singleton).
  fn error_context(&self, state: usize, input: &str, pos: usize, customs: &CustomRecognizers, last_symbol: Option<SymbolId>) -> ErrorContext {
    ErrorContext {
      symbols_expected: self.tables.states[state].action.keys().copied().collect(),
      tokens_ahead:     recognize::tokens_ahead(self.grammar, self.recognizers, customs, input, pos),
      symbols_before:   last_symbol.into_iter().collect(),
      last_heads:       None,
    }
  }

  fn resolve_action(
    &self,
    state: usize,
    sym: SymbolId,
    pos: usize,
    input: &str,
    customs: &CustomRecognizers,
    last_symbol: Option<SymbolId>,
  ) -> RuntimeResult<Action> {
    match self.tables.states[state].action.get(&sym) {
      Some(actions) if actions.len() == 1 => Ok(actions[0]),
      _ => Err(ParseError::NoAction { position: pos, state, terminal: sym, context: self.error_context(state, input, pos, customs, last_symbol) }),
    }
  }

  /// Recognizes the next lookahead at `top`/`pos`: a real token if input
  /// remains after layout, else the synthetic `STOP` sentinel (spec §3's
  /// augmented production is driven entirely off this sentinel, never off a
  /// recognized `Token`).
  fn next_lookahead(
    &self,
    input: &str,
    pos: usize,
    top: usize,
    customs: &CustomRecognizers,
    hooks: &ParseHooks,
    last_symbol: Option<SymbolId>,
  ) -> RuntimeResult<(Lookahead, usize)> {
    let layout_start = pos;
    let layout_end = self.recognizers.consume_layout(self.grammar, input, pos, customs);
    if layout_end >= input.len() {
      return Ok((Lookahead::Eof { position: layout_end }, layout_start));
    }
    let symbols_before = last_symbol.into_iter().collect();
    let candidates =
      recognize::recognize(self.grammar, self.tables, self.recognizers, customs, top, input, pos, symbols_before, None, hooks.custom_recognition)?;
    let tok = recognize::require_single(candidates, layout_end)?;
    Ok((Lookahead::Real(tok), layout_start))
  }

  /// Invokes `hooks.on_error` (spec §6 `on_error(context, error) -> bool`)
  /// when one is installed. A successful recovery is appended to `errors`
  /// and its recovered `(position, token)` is returned for the caller to
  /// resume from; an unsuccessful recovery (or no hook) returns `None` and
  /// the caller raises `error`.
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

  /// In-line build mode: reductions call `actions.reduce` directly and its
  /// return value is threaded onto the stack (spec §4.4).
  #[allow(clippy::too_many_arguments)]
  pub fn parse_inline<V: Clone, A: Actions<V>>(
    &self,
    input: &str,
    customs: &CustomRecognizers,
    actions: &A,
    extra: &mut dyn Any,
    hooks: &ParseHooks,
    errors: &mut Vec<ParseError>,
  ) -> RuntimeResult<V> {
    let mut states = vec![self.tables.start];
    let mut values: Vec<StackValue<V>> = vec![];
    // Parallel to `values`: the start position of each stack entry, needed
    // to compute a reduced non-terminal's `start_position` without baking a
    // span into every `V`.
    let mut starts: Vec<usize> = vec![];
    let mut pos = 0usize;
    let mut last_symbol: Option<SymbolId> = None;
    let mut pending: Option<(Lookahead, usize)> = None;

    'parse: loop {
      let top = *states.last().unwrap();
      let (la, layout_start) = match pending.take() {
        Some(p) => p,
        None => match self.next_lookahead(input, pos, top, customs, hooks, last_symbol) {
          Ok(v) => v,
          Err(e) => match self.recover(&e, input, customs, hooks, errors, top, pos) {
            Some((new_pos, tok)) => {
              pos = new_pos;
              (Lookahead::Real(tok), new_pos)
            }
            None => return Err(e),
          },
        },
      };
      let la_pos = la.position();

      let action = match self.resolve_action(top, la.symbol(), la_pos, input, customs, last_symbol) {
        Ok(a) => a,
        Err(e) => match self.recover(&e, input, customs, hooks, errors, top, la_pos) {
          Some((new_pos, tok)) => {
            pos = new_pos;
            pending = Some((Lookahead::Real(tok), new_pos));
            continue 'parse;
          }
          None => return Err(e),
        },
      };

      match action {
        Action::Shift(target) => match la {
          Lookahead::Real(token) => {
            states.push(target);
            starts.push(token.start);
            pos = token.end();
            last_symbol = Some(SymbolId::Terminal(token.terminal));
            values.push(StackValue::Terminal(token));
            pending = None;
          }
          Lookahead::Eof { position } => {
            // The STOP pseudo-shift carries no semantic value: it only
            // advances the automaton toward the accepting state.
            states.push(target);
            pos = position;
            pending = None;
          }
        },
        Action::Reduce(prod) => {
          let rhs_len = self.grammar.production(prod).arity();
          let start = states.len() - rhs_len;
          let popped: Vec<StackValue<V>> = values.split_off(values.len() - rhs_len);
          let popped_starts: Vec<usize> = starts.split_off(starts.len() - rhs_len);
          states.truncate(start + 1);

          let layout_content = if layout_start < la_pos { Some(&input[layout_start..la_pos]) } else { None };
          let start_position = popped_starts.first().copied().unwrap_or(la_pos);

          let children: Vec<Child<V>> = popped
            .into_iter()
            .map(|v| match v {
              StackValue::Terminal(t) => Child::Terminal(t),
              StackValue::Value(val) => Child::Value(val),
            })
            .collect();

          let mut ctx = ParseContext {
            start_position,
            end_position: la_pos,
            input,
            production: prod,
            symbol: self.grammar.production(prod).nonterm,
            state: top,
            layout_content,
            extra,
          };
          let value = actions.reduce(&mut ctx, children)?;

          let under = *states.last().unwrap();
          let nonterm = self.grammar.production(prod).nonterm;
          let target = match self.tables.states.get(under).and_then(|st| st.goto.get(&nonterm)) {
            Some(&t) => t,
            None => {
              let err = ParseError::NoAction {
                position: la_pos,
                state:    under,
                terminal: SymbolId::NonTerminal(nonterm),
                context:  self.error_context(under, input, la_pos, customs, last_symbol),
              };
              return Err(err);
            }
          };
          states.push(target);
          starts.push(start_position);
          values.push(StackValue::Value(value));
          pending = Some((la, layout_start));
        }
        Action::Accept => {
          return match values.pop() {
            Some(StackValue::Value(v)) => Ok(v),
            _ => Err(ParseError::NoViableParse { position: pos }),
          };
        }
      }
    }
  }

  /// Tree-then-walk build mode: reductions use the driver's own default
  /// action (build a [`ParseTree`] node) with no user callback invoked yet.
  pub fn parse_tree(&self, input: &str, customs: &CustomRecognizers, hooks: &ParseHooks, errors: &mut Vec<ParseError>) -> RuntimeResult<ParseTree> {
    let mut states = vec![self.tables.start];
    let mut values: Vec<ParseTree> = vec![];
    let mut pos = 0usize;
    let mut last_symbol: Option<SymbolId> = None;
    let mut pending: Option<(Lookahead, usize)> = None;

    'parse: loop {
      let top = *states.last().unwrap();
      let (la, _layout_start) = match pending.take() {
        Some(p) => p,
        None => match self.next_lookahead(input, pos, top, customs, hooks, last_symbol) {
          Ok(v) => v,
          Err(e) => match self.recover(&e, input, customs, hooks, errors, top, pos) {
            Some((new_pos, tok)) => {
              pos = new_pos;
              (Lookahead::Real(tok), new_pos)
            }
            None => return Err(e),
          },
        },
      };
      let la_pos = la.position();

      let action = match self.resolve_action(top, la.symbol(), la_pos, input, customs, last_symbol) {
        Ok(a) => a,
        Err(e) => match self.recover(&e, input, customs, hooks, errors, top, la_pos) {
          Some((new_pos, tok)) => {
            pos = new_pos;
            pending = Some((Lookahead::Real(tok), new_pos));
            continue 'parse;
          }
          None => return Err(e),
        },
      };

      match action {
        Action::Shift(target) => match la {
          Lookahead::Real(token) => {
            states.push(target);
            pos = token.end();
            last_symbol = Some(SymbolId::Terminal(token.terminal));
            values.push(ParseTree::Leaf(token));
            pending = None;
          }
          Lookahead::Eof { position } => {
            states.push(target);
            pos = position;
            pending = None;
          }
        },
        Action::Reduce(prod) => {
          let rhs_len = self.grammar.production(prod).arity();
          let start = states.len() - rhs_len;
          let children = values.split_off(values.len() - rhs_len);
          states.truncate(start + 1);

          let under = *states.last().unwrap();
          let nonterm = self.grammar.production(prod).nonterm;
          let target = match self.tables.states.get(under).and_then(|st| st.goto.get(&nonterm)) {
            Some(&t) => t,
            None => {
              let err = ParseError::NoAction {
                position: la_pos,
                state:    under,
                terminal: SymbolId::NonTerminal(nonterm),
                context:  self.error_context(under, input, la_pos, customs, last_symbol),
              };
              return Err(err);
            }
          };
          states.push(target);
          values.push(ParseTree::Node { production: prod, children });
          pending = Some((la, _layout_start));
        }
        Action::Accept => {
          return values.pop().ok_or(ParseError::NoViableParse { position: pos });
        }
      }
    }
  }

  /// Walks a [`ParseTree`] bottom-up, invoking `actions.reduce` at each
  /// internal node (spec §4.4 `call_actions`).
  pub fn call_actions<V: Clone, A: Actions<V>>(&self, tree: &ParseTree, input: &str, actions: &A, extra: &mut dyn Any) -> RuntimeResult<V> {
    match tree {
      ParseTree::Leaf(_) => Err(ParseError::ActionFailed { production: "<root>".into(), message: "root of parse tree is a bare terminal".into() }),
      ParseTree::Node { production, children } => self.call_actions_node(*production, children, input, actions, extra),
    }
  }

  fn call_actions_node<V: Clone, A: Actions<V>>(&self, production: ProdId, children: &[ParseTree], input: &str, actions: &A, extra: &mut dyn Any) -> RuntimeResult<V> {
    let mut resolved = Vec::with_capacity(children.len());
    for child in children {
      match child {
        ParseTree::Leaf(t) => resolved.push(Child::Terminal(t.clone())),
        ParseTree::Node { production: p, children: c } => {
          let v = self.call_actions_node(*p, c, input, actions, extra)?;
          resolved.push(Child::Value(v));
        }
      }
    }

    let start_position = children.first().map(Self::leftmost_start).unwrap_or(0);
    let end_position = children.last().map(Self::rightmost_end).unwrap_or(0);

    let mut ctx = ParseContext {
      start_position,
      end_position,
      input,
      production,
      symbol: self.grammar.production(production).nonterm,
      // Tree-then-walk has no single "current state" once reduction is
      // decoupled from the shift/reduce loop; `state` is only meaningful
      // for the in-line build mode.
      state: 0,
      layout_content: None,
      extra,
    };
    actions.reduce(&mut ctx, resolved)
  }

  fn leftmost_start(node: &ParseTree) -> usize {
    match node {
      ParseTree::Leaf(t) => t.start,
      ParseTree::Node { children, .. } => children.first().map(Self::leftmost_start).unwrap_or(0),
    }
  }

  fn rightmost_end(node: &ParseTree) -> usize {
    match node {
      ParseTree::Leaf(t) => t.end(),
      ParseTree::Node { children, .. } => children.last().map(Self::rightmost_end).unwrap_or(0),
    }
  }
}
