//! The Grammar IR (component C1).
//!
//! Everything here is immutable once a [`Grammar`] has been built by
//! [`GrammarBuilder::build`]. Terminal and non-terminal identities are
//! interned indices (`TerminalId` / `NonTermId`) rather than names, mirroring
//! the teacher's `DBRuleKey`/`DBNonTermKey` interned-index tables
//! (`radlr-core/types/parser_db.rs`).

mod grammar;
mod item;
mod symbol;

pub use grammar::*;
pub use item::*;
pub use symbol::*;
