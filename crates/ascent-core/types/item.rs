//! LR(1) items (spec §3: "An LR(1) item is `(p, dot, la)`").

use super::{Grammar, ProdId, SymbolId};
use std::collections::{BTreeMap, BTreeSet};

/// A production marked with a parse position. Lookaheads are tracked
/// separately (see [`ItemSet`]) since the same `(prod, dot)` core can carry
/// different, unioned lookaheads across merged states (spec §4.2).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Item {
  pub prod: ProdId,
  pub dot:  u32,
}

impl Item {
  pub fn start(prod: ProdId) -> Self {
    Self { prod, dot: 0 }
  }

  /// The `(p, dot)` core used for state-merging (spec §4.2).
  pub fn core(&self) -> (ProdId, u32) {
    (self.prod, self.dot)
  }

  /// `None` both past the end of `rhs` and for an EMPTY production's sole
  /// `Empty` placeholder — an EMPTY production matches zero real symbols, so
  /// it must be immediately complete at `dot == 0` rather than needing a
  /// phantom transition over the placeholder (spec §3: EMPTY is distinct
  /// from an absent right-hand side, not a symbol to advance past).
  pub fn symbol_at_dot(&self, g: &Grammar) -> Option<SymbolId> {
    let rhs = &g.production(self.prod).rhs;
    if g.production(self.prod).is_empty() {
      return None;
    }
    rhs.get(self.dot as usize).copied()
  }

  pub fn is_complete(&self, g: &Grammar) -> bool {
    let p = g.production(self.prod);
    p.is_empty() || self.dot as usize >= p.rhs.len()
  }

  pub fn advanced(&self) -> Self {
    Self { prod: self.prod, dot: self.dot + 1 }
  }

  /// The symbols following the dot, i.e. `p.rhs[dot+1:]`, used by closure
  /// when computing `FIRST(p.rhs[dot+1:] la)`.
  pub fn rest_after_dot(&self, g: &Grammar) -> &[SymbolId] {
    let rhs = &g.production(self.prod).rhs;
    let start = (self.dot as usize + 1).min(rhs.len());
    &rhs[start..]
  }
}

/// A lookahead-annotated set of items: the kernel/closure representation of
/// one LR automaton state while it is being built.
pub type ItemSet = BTreeMap<Item, BTreeSet<SymbolId>>;

/// The item-core-only view used to detect mergeable states (spec §4.2:
/// "Two candidate states are merged when their item cores ... are
/// identical").
pub fn item_core_set(items: &ItemSet) -> BTreeSet<(ProdId, u32)> {
  items.keys().map(Item::core).collect()
}
