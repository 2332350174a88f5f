//! Shared Packed Parse Forest (C7, spec §3 "SPPF", §4.6), grounded directly
//! on the spec's own data model — node-identity-by-`(symbol, start, end)`
//! follows the same "intern by key" discipline as `radlr-core/types/
//! parser_db.rs`'s `DBRuleKey`/`DBNonTermKey` interned indices.

use crate::error::ParseError;
use crate::types::token::Token;
use ascent_core::{NonTermId, ProdId, TerminalId};
use std::collections::{HashMap, HashSet};

pub type SppfRef = usize;

/// The dedup key a non-terminal node is uniquified on (spec §3: "node
/// identity keyed on `(symbol, start, end)`").
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct NonTermKey {
  symbol: NonTermId,
  start:  usize,
  end:    usize,
}

#[derive(Clone, Debug)]
pub struct TerminalNode {
  pub terminal:        TerminalId,
  pub start:            usize,
  pub end:              usize,
  pub value:            String,
  pub additional_data:  Option<String>,
}

/// One derivation of a non-terminal node: the production used and the
/// ordered references to its children (spec §3 "packed alternative").
#[derive(Clone, Debug)]
pub struct PackedAlt {
  pub production: ProdId,
  pub children:   Vec<SppfRef>,
}

#[derive(Clone, Debug)]
pub struct NonTerminalNode {
  pub symbol: NonTermId,
  pub start:  usize,
  pub end:    usize,
  /// More than one entry means this node is ambiguous (spec §3).
  pub alts:   Vec<PackedAlt>,
}

#[derive(Clone, Debug)]
pub enum SppfNode {
  Terminal(TerminalNode),
  NonTerminal(NonTerminalNode),
}

impl SppfNode {
  pub fn span(&self) -> (usize, usize) {
    match self {
      SppfNode::Terminal(t) => (t.start, t.end),
      SppfNode::NonTerminal(n) => (n.start, n.end),
    }
  }
}

/// A lazily-materialized parse tree view over one packed alternative at
/// every ambiguous node along the path (spec §4.6 "lazy view").
#[derive(Clone, Debug)]
pub enum Tree {
  Leaf(TerminalNode),
  Node { production: ProdId, symbol: NonTermId, children: Vec<Tree> },
}

/// A handle to the accepted SPPF roots of a parse (spec §3, §4.6).
#[derive(Default)]
pub struct Forest {
  nodes:        Vec<SppfNode>,
  nonterm_idx:  HashMap<NonTermKey, SppfRef>,
  terminal_idx: HashMap<(TerminalId, usize, usize), SppfRef>,
  pub roots:    Vec<SppfRef>,
}

impl Forest {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn node(&self, r: SppfRef) -> &SppfNode {
    &self.nodes[r]
  }

  /// Interns a terminal leaf, deduplicating by `(terminal, start, end)`.
  pub fn intern_terminal(&mut self, token: &Token) -> SppfRef {
    let key = (token.terminal, token.start, token.end());
    if let Some(&r) = self.terminal_idx.get(&key) {
      return r;
    }
    let r = self.nodes.len();
    self.nodes.push(SppfNode::Terminal(TerminalNode {
      terminal:       token.terminal,
      start:          token.start,
      end:            token.end(),
      value:          token.value.clone(),
      additional_data: token.additional_data.clone(),
    }));
    self.terminal_idx.insert(key, r);
    r
  }

  /// Interns or looks up the non-terminal node for `(symbol, start, end)`,
  /// and adds `(production, children)` as a packed alternative unless an
  /// identical alternative is already present (spec §4.5 "add this
  /// derivation as a new packed alternative rather than creating a
  /// duplicate").
  pub fn intern_nonterm_alt(&mut self, symbol: NonTermId, start: usize, end: usize, production: ProdId, children: Vec<SppfRef>) -> SppfRef {
    let key = NonTermKey { symbol, start, end };
    let r = *self.nonterm_idx.entry(key).or_insert_with(|| {
      let r = self.nodes.len();
      self.nodes.push(SppfNode::NonTerminal(NonTerminalNode { symbol, start, end, alts: vec![] }));
      r
    });
    if let SppfNode::NonTerminal(n) = &mut self.nodes[r] {
      let dup = n.alts.iter().any(|a| a.production == production && a.children == children);
      if !dup {
        n.alts.push(PackedAlt { production, children });
      }
    }
    r
  }

  pub fn ambiguities(&self) -> usize {
    self.nodes.iter().filter(|n| matches!(n, SppfNode::NonTerminal(n) if n.alts.len() > 1)).count()
  }

  /// Product of ambiguity degrees over every non-terminal node reachable
  /// from the roots, each counted once regardless of how many paths share
  /// it (spec §4.6 "accounting for sharing").
  pub fn solutions(&self) -> usize {
    if self.roots.is_empty() {
      return 0;
    }
    let mut memo: HashMap<SppfRef, usize> = HashMap::new();
    let mut total = 1usize;
    for &root in &self.roots {
      total = total.saturating_mul(self.solutions_at(root, &mut memo));
    }
    total
  }

  fn solutions_at(&self, r: SppfRef, memo: &mut HashMap<SppfRef, usize>) -> usize {
    if let Some(&v) = memo.get(&r) {
      return v;
    }
    let v = match &self.nodes[r] {
      SppfNode::Terminal(_) => 1,
      SppfNode::NonTerminal(n) => {
        let mut sum = 0usize;
        for alt in &n.alts {
          let mut prod = 1usize;
          for &c in &alt.children {
            prod = prod.saturating_mul(self.solutions_at(c, memo));
          }
          sum = sum.saturating_add(prod);
        }
        sum.max(1)
      }
    };
    memo.insert(r, v);
    v
  }

  /// Fast path: one tree, choosing the first packed alternative at every
  /// ambiguous node, without enumerating the others (spec §4.6).
  pub fn get_first_tree(&self) -> Option<Tree> {
    self.roots.first().map(|&r| self.build_tree(r, 0))
  }

  /// Decodes tree `i` as a mixed-radix number over each node's ambiguity
  /// degree, in canonical left-to-right, top-down order (spec §4.6).
  pub fn tree(&self, i: usize) -> Option<Tree> {
    if i >= self.solutions() {
      return None;
    }
    self.roots.first().map(|&r| self.build_tree(r, i))
  }

  fn build_tree(&self, r: SppfRef, index: usize) -> Tree {
    match &self.nodes[r] {
      SppfNode::Terminal(t) => Tree::Leaf(t.clone()),
      SppfNode::NonTerminal(n) => {
        // Pick the alt (and, within it, the combination of child choices)
        // that `index` falls into, by treating each alt's contribution as
        // a contiguous block of `prod(children' degrees)` tree indices.
        let mut remaining = index;
        for alt in &n.alts {
          let degree: usize = alt.children.iter().map(|&c| self.degree(c)).product::<usize>().max(1);
          if remaining < degree {
            let mut child_trees = Vec::with_capacity(alt.children.len());
            let mut radix = remaining;
            for &c in &alt.children {
              let d = self.degree(c).max(1);
              child_trees.push(self.build_tree(c, radix % d));
              radix /= d;
            }
            return Tree::Node { production: alt.production, symbol: n.symbol, children: child_trees };
          }
          remaining -= degree;
        }
        // `index < solutions()` guarantees one of the alts above matches;
        // unreachable unless `alts` is empty, which `intern_nonterm_alt`
        // never produces.
        unreachable!("tree index out of range for a node with no packed alternatives")
      }
    }
  }

  fn degree(&self, r: SppfRef) -> usize {
    let mut memo = HashMap::new();
    self.solutions_at(r, &mut memo)
  }

  /// Renders every root as an s-expression-like string, marking ambiguous
  /// nodes explicitly (spec §4.6 `to_str`).
  pub fn to_str(&self, grammar: &ascent_core::Grammar) -> String {
    let mut out = String::new();
    for &r in &self.roots {
      self.write_node(r, grammar, &mut out);
      out.push('\n');
    }
    out
  }

  fn write_node(&self, r: SppfRef, grammar: &ascent_core::Grammar, out: &mut String) {
    match &self.nodes[r] {
      SppfNode::Terminal(t) => out.push_str(&format!("{:?}", t.value)),
      SppfNode::NonTerminal(n) => {
        let name = grammar.nonterm(n.symbol).name.clone();
        if n.alts.len() > 1 {
          out.push_str(&format!("(#ambig {} [", name));
          for (i, alt) in n.alts.iter().enumerate() {
            if i > 0 {
              out.push_str(" | ");
            }
            out.push('(');
            for (j, &c) in alt.children.iter().enumerate() {
              if j > 0 {
                out.push(' ');
              }
              self.write_node(c, grammar, out);
            }
            out.push(')');
          }
          out.push_str("])");
        } else if let Some(alt) = n.alts.first() {
          out.push_str(&format!("({}", name));
          for c in &alt.children {
            out.push(' ');
            self.write_node(c, grammar, out);
          }
          out.push(')');
        } else {
          out.push_str(&format!("({})", name));
        }
      }
    }
  }

  /// Renders the forest as Graphviz dot source (spec §4.6 `to_dot`).
  pub fn to_dot(&self, grammar: &ascent_core::Grammar) -> String {
    let mut out = String::from("digraph sppf {\n");
    for (i, node) in self.nodes.iter().enumerate() {
      match node {
        SppfNode::Terminal(t) => {
          out.push_str(&format!("  n{} [shape=box,label={:?}];\n", i, t.value));
        }
        SppfNode::NonTerminal(n) => {
          let name = grammar.nonterm(n.symbol).name.clone();
          let shape = if n.alts.len() > 1 { "diamond" } else { "ellipse" };
          out.push_str(&format!("  n{} [shape={},label=\"{}[{},{})\"];\n", i, shape, name, n.start, n.end));
          for alt in &n.alts {
            for &c in &alt.children {
              out.push_str(&format!("  n{} -> n{};\n", i, c));
            }
          }
        }
      }
    }
    out.push_str("}\n");
    out
  }

  /// Depth-first visitor with memoization (shared sub-DAGs visited once)
  /// and cycle detection (spec §4.6 "Visitor").
  pub fn visit<R: Clone, F: FnMut(&SppfNode, Vec<R>) -> R>(&self, root: SppfRef, mut visit_fn: F) -> Result<R, ParseError> {
    let mut memo: HashMap<SppfRef, R> = HashMap::new();
    let mut on_stack: HashSet<SppfRef> = HashSet::new();
    self.visit_rec(root, &mut memo, &mut on_stack, &mut visit_fn)
  }

  fn visit_rec<R: Clone, F: FnMut(&SppfNode, Vec<R>) -> R>(
    &self,
    r: SppfRef,
    memo: &mut HashMap<SppfRef, R>,
    on_stack: &mut HashSet<SppfRef>,
    visit_fn: &mut F,
  ) -> Result<R, ParseError> {
    if let Some(v) = memo.get(&r) {
      return Ok(v.clone());
    }
    if !on_stack.insert(r) {
      let (start, end) = self.nodes[r].span();
      let symbol = match &self.nodes[r] {
        SppfNode::NonTerminal(n) => format!("N{}", n.symbol.0),
        SppfNode::Terminal(t) => format!("t{}", t.terminal.0),
      };
      return Err(ParseError::CycleDetected { symbol, start, end });
    }

    let children_refs: Vec<SppfRef> = match &self.nodes[r] {
      SppfNode::Terminal(_) => vec![],
      // First packed alternative only: a visitor walks one disambiguated
      // tree, not every ambiguous derivation.
      SppfNode::NonTerminal(n) => n.alts.first().map(|a| a.children.clone()).unwrap_or_default(),
    };
    let mut results = Vec::with_capacity(children_refs.len());
    for c in children_refs {
      results.push(self.visit_rec(c, memo, on_stack, visit_fn)?);
    }
    on_stack.remove(&r);

    let result = visit_fn(&self.nodes[r], results);
    memo.insert(r, result.clone());
    Ok(result)
  }
}
