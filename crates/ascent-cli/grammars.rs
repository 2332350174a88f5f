//! Built-in demo grammars backing the `compile`/`parse` subcommands (spec
//! §10.4): one per §8 end-to-end scenario, since grammar-file surface syntax
//! is a non-goal and the CLI has nothing else to parse a grammar from.

use ascent_core::{Grammar, GrammarBuilder, ParserConfig, RecognizerSpec, SymbolId};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum GrammarName {
  Arithmetic,
  AmbiguousSum,
  Optional,
  SeparatedList,
  LayoutComments,
  Keyword,
}

impl GrammarName {
  pub fn sample_input(&self) -> &'static str {
    match self {
      GrammarName::Arithmetic => "34 + 4.6 / 2 * 4^2^2 + 78",
      GrammarName::AmbiguousSum => "9-1-1",
      GrammarName::Optional => "abc",
      GrammarName::SeparatedList => "x1,2,3",
      GrammarName::LayoutComments => "34 + // sum\n 78",
      GrammarName::Keyword => "for a = 10 to 20",
    }
  }

  /// The `ParserConfig` each demo needs. `AmbiguousSum` must leave its
  /// shift/reduce conflict unresolved for the GLR driver to fork on (see
  /// `ascent-test/scenario_glr_ambiguous.rs`); every other demo is plain LR.
  pub fn config(&self) -> ParserConfig {
    match self {
      GrammarName::AmbiguousSum => ParserConfig::new().use_prefer_shifts(false).use_prefer_shifts_over_empty(false),
      _ => ParserConfig::new(),
    }
  }

  pub fn is_glr(&self) -> bool {
    matches!(self, GrammarName::AmbiguousSum)
  }

  pub fn build(&self) -> Grammar {
    match self {
      GrammarName::Arithmetic => arithmetic(),
      GrammarName::AmbiguousSum => ambiguous_sum(),
      GrammarName::Optional => optional(),
      GrammarName::SeparatedList => separated_list(),
      GrammarName::LayoutComments => layout_comments(),
      GrammarName::Keyword => keyword(),
    }
  }
}

fn arithmetic() -> Grammar {
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
  b.add_production(expr, vec![SymbolId::Terminal(num)]);
  let plus_prod = b.add_production(expr, vec![SymbolId::NonTerminal(expr), SymbolId::Terminal(plus_t), SymbolId::NonTerminal(expr)]);
  let mul_prod = b.add_production(expr, vec![SymbolId::NonTerminal(expr), SymbolId::Terminal(mul_t), SymbolId::NonTerminal(expr)]);
  let div_prod = b.add_production(expr, vec![SymbolId::NonTerminal(expr), SymbolId::Terminal(div_t), SymbolId::NonTerminal(expr)]);
  let pow_prod = b.add_production(expr, vec![SymbolId::NonTerminal(expr), SymbolId::Terminal(pow_t), SymbolId::NonTerminal(expr)]);
  use ascent_core::Assoc;
  b.set_production_priority(plus_prod, 1);
  b.set_production_assoc(plus_prod, Assoc::Left);
  b.set_production_priority(mul_prod, 2);
  b.set_production_assoc(mul_prod, Assoc::Left);
  b.set_production_priority(div_prod, 2);
  b.set_production_assoc(div_prod, Assoc::Left);
  b.set_production_priority(pow_prod, 3);
  b.set_production_assoc(pow_prod, Assoc::Left);
  b.set_start(expr);
  b.build().expect("arithmetic demo grammar is well-formed")
}

fn ambiguous_sum() -> Grammar {
  let mut b = GrammarBuilder::new();
  let num = b.add_terminal("NUM", RecognizerSpec::Regex(r"\d+".into()));
  let minus = b.add_terminal("-", RecognizerSpec::Str("-".into()));
  let expr = b.non_terminal("E");
  b.add_production(expr, vec![SymbolId::Terminal(num)]);
  b.add_production(expr, vec![SymbolId::NonTerminal(expr), SymbolId::Terminal(minus), SymbolId::NonTerminal(expr)]);
  b.set_start(expr);
  b.build().expect("ambiguous-sum demo grammar is well-formed")
}

fn optional() -> Grammar {
  let mut b = GrammarBuilder::new();
  let a_t = b.add_terminal("a", RecognizerSpec::Str("a".into()));
  let b_t = b.add_terminal("b", RecognizerSpec::Str("b".into()));
  let c_t = b.add_terminal("c", RecognizerSpec::Str("c".into()));
  let a_nt = b.non_terminal("A");
  let b_nt = b.non_terminal("B");
  let c_nt = b.non_terminal("C");
  let opt_nt = b.non_terminal("Opt");
  let s_nt = b.non_terminal("S");
  b.add_production(a_nt, vec![SymbolId::Terminal(a_t)]);
  b.add_production(b_nt, vec![SymbolId::Terminal(b_t)]);
  b.add_production(c_nt, vec![SymbolId::Terminal(c_t)]);
  b.add_production(opt_nt, vec![SymbolId::NonTerminal(b_nt)]);
  b.add_production(opt_nt, vec![SymbolId::Empty]);
  b.add_production(s_nt, vec![SymbolId::NonTerminal(a_nt), SymbolId::NonTerminal(opt_nt), SymbolId::NonTerminal(c_nt)]);
  b.set_start(s_nt);
  b.build().expect("optional demo grammar is well-formed")
}

fn separated_list() -> Grammar {
  let mut b = GrammarBuilder::new();
  let x_t = b.add_terminal("x", RecognizerSpec::Str("x".into()));
  let e_t = b.add_terminal("e", RecognizerSpec::Regex(r"[0-9]+".into()));
  let comma_t = b.add_terminal(",", RecognizerSpec::Str(",".into()));
  let elist_nt = b.non_terminal("EList");
  let s_nt = b.non_terminal("S");
  b.add_production(elist_nt, vec![SymbolId::Terminal(e_t)]);
  b.add_production(elist_nt, vec![SymbolId::NonTerminal(elist_nt), SymbolId::Terminal(comma_t), SymbolId::Terminal(e_t)]);
  b.add_production(s_nt, vec![SymbolId::Terminal(x_t), SymbolId::NonTerminal(elist_nt)]);
  b.set_start(s_nt);
  b.build().expect("separated-list demo grammar is well-formed")
}

fn layout_comments() -> Grammar {
  let mut b = GrammarBuilder::new();
  let num = b.add_terminal("NUM", RecognizerSpec::Regex(r"\d+".into()));
  let plus_t = b.add_terminal("+", RecognizerSpec::Str("+".into()));
  let comment_t = b.add_terminal("COMMENT", RecognizerSpec::Regex(r"//[^\n]*\n?".into()));
  let ws_t = b.add_terminal("WS", RecognizerSpec::Regex(r"[ \t\r\n]+".into()));

  let layout_item = b.non_terminal("LayoutItem");
  let layout = b.non_terminal("LAYOUT");
  b.add_production(layout_item, vec![SymbolId::Terminal(comment_t)]);
  b.add_production(layout_item, vec![SymbolId::Terminal(ws_t)]);
  b.add_production(layout, vec![SymbolId::NonTerminal(layout_item), SymbolId::NonTerminal(layout)]);
  b.add_production(layout, vec![SymbolId::Empty]);
  b.set_layout(layout);

  let probe_nt = b.non_terminal("Probe");
  let s_nt = b.non_terminal("S");
  b.add_production(probe_nt, vec![SymbolId::Empty]);
  b.add_production(s_nt, vec![SymbolId::Terminal(num), SymbolId::Terminal(plus_t), SymbolId::NonTerminal(probe_nt), SymbolId::Terminal(num)]);
  b.set_start(s_nt);
  b.build().expect("layout-with-comments demo grammar is well-formed")
}

fn keyword() -> Grammar {
  let mut b = GrammarBuilder::new();
  let for_t = b.add_terminal("FOR", RecognizerSpec::Str("for".into()));
  b.set_terminal_keyword(for_t, true);
  let to_t = b.add_terminal("TO", RecognizerSpec::Str("to".into()));
  b.set_terminal_keyword(to_t, true);
  let id_t = b.add_terminal("ID", RecognizerSpec::Regex(r"[A-Za-z_][A-Za-z0-9_]*".into()));
  let eq_t = b.add_terminal("EQ", RecognizerSpec::Str("=".into()));
  let int_t = b.add_terminal("INT", RecognizerSpec::Regex(r"\d+".into()));
  let s_nt = b.non_terminal("S");
  b.add_production(
    s_nt,
    vec![
      SymbolId::Terminal(for_t),
      SymbolId::Terminal(id_t),
      SymbolId::Terminal(eq_t),
      SymbolId::Terminal(int_t),
      SymbolId::Terminal(to_t),
      SymbolId::Terminal(int_t),
    ],
  );
  b.set_start(s_nt);
  b.build().expect("keyword demo grammar is well-formed")
}
