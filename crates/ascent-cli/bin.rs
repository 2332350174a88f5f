//! Thin CLI demonstrating `ascent-core`/`ascent-runtime` end-to-end, grounded
//! on the teacher's `crates/cli` (a `clap`-based binary dispatching straight
//! into library crates, with no logic of its own).

mod grammars;

use ascent_runtime::{CustomRecognizers, GlrDriver, LrDriver, ParseHooks, ParseTree, RecognizerTable};
use clap::{Parser, Subcommand};
use grammars::GrammarName;

#[derive(Parser)]
#[command(name = "ascent", about = "LR/GLR parser generator demo CLI")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Build ACTION/GOTO tables for a built-in demo grammar and report state
  /// counts and table determinism.
  Compile {
    #[arg(value_enum)]
    grammar: GrammarName,
  },
  /// Parse a built-in demo grammar's sample input (or one supplied with
  /// `--input`), printing the resulting parse tree or SPPF.
  Parse {
    #[arg(value_enum)]
    grammar: GrammarName,
    #[arg(long)]
    input: Option<String>,
  },
}

fn main() {
  let cli = Cli::parse();
  match cli.command {
    Command::Compile { grammar } => compile(grammar),
    Command::Parse { grammar, input } => parse(grammar, input),
  }
}

fn compile(name: GrammarName) {
  let grammar = name.build();
  let config = name.config();
  let tables = match ascent_core::build_tables(&grammar, &config) {
    Ok(t) => t,
    Err(e) => {
      eprintln!("table construction failed: {e}");
      std::process::exit(1);
    }
  };

  println!("states:     {}", tables.states.len());
  println!("accepting:  {}", tables.accepting.len());
  match tables.ensure_deterministic() {
    Ok(()) => println!("determinism: LR-deterministic under this policy"),
    Err(e) => println!("determinism: conflicts remain (expected for a GLR demo)\n{e}"),
  }
}

fn parse(name: GrammarName, input: Option<String>) {
  let grammar = name.build();
  let config = name.config();
  let tables = match ascent_core::build_tables(&grammar, &config) {
    Ok(t) => t,
    Err(e) => {
      eprintln!("table construction failed: {e}");
      std::process::exit(1);
    }
  };
  let recognizers = match RecognizerTable::build(&grammar) {
    Ok(r) => r,
    Err(e) => {
      eprintln!("recognizer compilation failed: {e}");
      std::process::exit(1);
    }
  };
  let customs = CustomRecognizers::new();
  let text = input.unwrap_or_else(|| name.sample_input().to_string());

  let hooks = ParseHooks::default();
  let mut errors = Vec::new();

  if name.is_glr() {
    let driver = GlrDriver::new(&grammar, &tables, &recognizers);
    match driver.parse(&text, &customs, &hooks, None, &mut errors) {
      Ok(outcome) => {
        println!("solutions:   {}", outcome.forest.solutions());
        println!("ambiguities: {}", outcome.forest.ambiguities());
        print!("{}", outcome.forest.to_str(&grammar));
      }
      Err(e) => {
        eprintln!("parse failed: {e}");
        std::process::exit(1);
      }
    }
  } else {
    let driver = LrDriver::new(&grammar, &tables, &recognizers);
    match driver.parse_tree(&text, &customs, &hooks, &mut errors) {
      Ok(tree) => print_tree(&tree, &grammar, 0),
      Err(e) => {
        eprintln!("parse failed: {e}");
        std::process::exit(1);
      }
    }
  }

  for e in &errors {
    eprintln!("recovered: {e}");
  }
}

fn print_tree(tree: &ParseTree, grammar: &ascent_core::Grammar, depth: usize) {
  let indent = "  ".repeat(depth);
  match tree {
    ParseTree::Leaf(t) => println!("{indent}{:?}", t.value),
    ParseTree::Node { production, children } => {
      let name = grammar.nonterm(grammar.production(*production).nonterm).name.clone();
      println!("{indent}({name}");
      for child in children {
        print_tree(child, grammar, depth + 1);
      }
      println!("{indent})");
    }
  }
}
