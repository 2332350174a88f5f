//! Spec §8 scenario 5: a `LAYOUT` non-terminal covering both whitespace and
//! `//` line comments, with `ParseContext::layout_content` captured via an
//! EMPTY "probe" production forced to reduce exactly when the second `NUM`
//! is the deciding lookahead.

use ascent_core::{Grammar, GrammarBuilder, ParserConfig, ProdId, RecognizerSpec, SymbolId};
use ascent_runtime::types::context::Child;
use ascent_runtime::{Actions, CustomRecognizers, LrDriver, ParseContext, ParseHooks, RecognizerTable, RuntimeResult};

struct SumActions {
  probe: ProdId,
  s_prod: ProdId,
}

fn num_value(child: &Child<f64>) -> f64 {
  match child {
    Child::Terminal(t) => t.value.parse().expect("numeric token"),
    Child::Value(v) => *v,
  }
}

impl Actions<f64> for SumActions {
  fn reduce(&self, ctx: &mut ParseContext, children: Vec<Child<f64>>) -> RuntimeResult<f64> {
    if ctx.production == self.probe {
      if let Some(layout) = ctx.layout_content {
        let captured: &mut Option<String> = ctx.extra.downcast_mut().expect("extra is Option<String>");
        *captured = Some(layout.to_string());
      }
      return Ok(0.0);
    }
    if ctx.production == self.s_prod {
      let lhs = num_value(&children[0]);
      let rhs = num_value(&children[3]);
      return Ok(lhs + rhs);
    }
    unreachable!("no other production reduces in this grammar")
  }
}

fn build() -> (Grammar, SumActions) {
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
  let probe = b.add_production(probe_nt, vec![SymbolId::Empty]);
  let s_prod = b.add_production(s_nt, vec![SymbolId::Terminal(num), SymbolId::Terminal(plus_t), SymbolId::NonTerminal(probe_nt), SymbolId::Terminal(num)]);
  b.set_start(s_nt);

  let g = b.build().expect("grammar builds and LAYOUT is verified nullable");
  (g, SumActions { probe, s_prod })
}

#[test]
fn layout_with_line_comment_is_captured_and_ignored_by_value() {
  let (grammar, actions) = build();
  let config = ParserConfig::new();
  let tables = ascent_core::build_tables(&grammar, &config).expect("tables build");
  tables.ensure_deterministic().expect("grammar is LR");
  let recognizers = RecognizerTable::build(&grammar).expect("recognizers compile");
  let driver = LrDriver::new(&grammar, &tables, &recognizers);
  let customs = CustomRecognizers::new();

  let mut captured: Option<String> = None;
  let hooks = ParseHooks::default();
  let mut errors = Vec::new();
  let result = driver.parse_inline("34 + // sum\n 78", &customs, &actions, &mut captured, &hooks, &mut errors).expect("parse succeeds");
  assert_eq!(result, 112.0);
  assert_eq!(captured.as_deref(), Some(" // sum\n "));
}
