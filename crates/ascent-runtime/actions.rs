//! Built-in action library (spec §6 "Action interface"): a small set of
//! generic reductions good enough to drive a grammar without writing a
//! bespoke action per production, grounded directly on the distilled
//! spec's own naming.
//!
//! Every built-in operates over a single concrete value type, [`Value`], a
//! minimal untyped AST shape (token / list / keyed object) — the shape most
//! of these generic collectors need to stay generic over grammars.

use crate::error::{ParseError, RuntimeResult};
use crate::types::context::{Child, ParseContext};
use crate::types::token::Token;
use ascent_core::MetaValue;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  None,
  Token(Token),
  List(Vec<Value>),
  Obj(HashMap<String, Value>),
}

impl Value {
  pub fn as_list(&self) -> Option<&[Value]> {
    match self {
      Value::List(v) => Some(v),
      _ => None,
    }
  }
}

fn child_value(c: Child<Value>) -> Value {
  match c {
    Child::Terminal(t) => Value::Token(t),
    Child::Value(v) => v,
  }
}

/// Discards all children, producing [`Value::None`]. Used for productions
/// whose only purpose is syntactic (e.g. a bare keyword).
pub fn none(_children: Vec<Child<Value>>) -> Value {
  Value::None
}

/// Alias of [`none`] for the explicit `EMPTY` production (spec §3).
pub fn empty(_children: Vec<Child<Value>>) -> Value {
  Value::None
}

/// Passes a single child through unchanged — the default action for
/// one-symbol passthrough productions (`A -> B`).
pub fn nochange(mut children: Vec<Child<Value>>) -> RuntimeResult<Value> {
  if children.len() != 1 {
    return Err(ParseError::ActionFailed { production: "nochange".into(), message: format!("expected exactly 1 child, got {}", children.len()) });
  }
  Ok(child_value(children.remove(0)))
}

/// Wraps the sole child as the first element of a new list — the base case
/// of a `collect` recursion (`list: item`).
pub fn single(mut children: Vec<Child<Value>>) -> RuntimeResult<Value> {
  if children.len() != 1 {
    return Err(ParseError::ActionFailed { production: "single".into(), message: format!("expected exactly 1 child, got {}", children.len()) });
  }
  Ok(Value::List(vec![child_value(children.remove(0))]))
}

/// Picks out the child at `index`, discarding the rest — for productions
/// like `"(" expr ")"` that want just the inner value.
pub fn inner(children: Vec<Child<Value>>, index: usize) -> RuntimeResult<Value> {
  let len = children.len();
  children
    .into_iter()
    .nth(index)
    .map(child_value)
    .ok_or_else(|| ParseError::ActionFailed { production: "inner".into(), message: format!("index {} out of range for {} children", index, len) })
}

/// Left-recursive list accumulation: `list: list item`. Appends the last
/// child to the list already built by the first.
pub fn collect(mut children: Vec<Child<Value>>) -> RuntimeResult<Value> {
  if children.len() != 2 {
    return Err(ParseError::ActionFailed { production: "collect".into(), message: format!("expected exactly 2 children, got {}", children.len()) });
  }
  let item = child_value(children.remove(1));
  let head = child_value(children.remove(0));
  append(head, item)
}

/// Right-recursive mirror of [`collect`]: `list: item list`. Prepends the
/// first child instead of appending, so the resulting order still matches
/// left-to-right input order.
pub fn collect_right(mut children: Vec<Child<Value>>) -> RuntimeResult<Value> {
  if children.len() != 2 {
    return Err(ParseError::ActionFailed { production: "collect_right".into(), message: format!("expected exactly 2 children, got {}", children.len()) });
  }
  let tail = child_value(children.remove(1));
  let item = child_value(children.remove(0));
  prepend(item, tail)
}

/// Left-recursive, separator-skipping list accumulation: `list: list ','
/// item` (spec's "separated one-or-more list" scenario, §8).
pub fn collect_sep(mut children: Vec<Child<Value>>) -> RuntimeResult<Value> {
  if children.len() != 3 {
    return Err(ParseError::ActionFailed { production: "collect_sep".into(), message: format!("expected exactly 3 children, got {}", children.len()) });
  }
  let item = child_value(children.remove(2));
  let _sep = children.remove(1);
  let head = child_value(children.remove(0));
  append(head, item)
}

/// Right-recursive mirror of [`collect_sep`]: `list: item ',' list`.
pub fn collect_sep_right(mut children: Vec<Child<Value>>) -> RuntimeResult<Value> {
  if children.len() != 3 {
    return Err(ParseError::ActionFailed { production: "collect_sep_right".into(), message: format!("expected exactly 3 children, got {}", children.len()) });
  }
  let tail = child_value(children.remove(2));
  let _sep = children.remove(1);
  let item = child_value(children.remove(0));
  prepend(item, tail)
}

/// List accumulation tolerant of a trailing separator with nothing after it
/// (`list: list ',' item | list ','`); the 2-child alternative is treated as
/// a no-op continuation of the existing list.
pub fn collect_optional(children: Vec<Child<Value>>) -> RuntimeResult<Value> {
  match children.len() {
    3 => collect_sep(children),
    2 => {
      let mut children = children;
      let _trailing_sep = children.remove(1);
      Ok(child_value(children.remove(0)))
    }
    n => Err(ParseError::ActionFailed { production: "collect_optional".into(), message: format!("expected 2 or 3 children, got {}", n) }),
  }
}

/// Right-recursive mirror of [`collect_optional`]: `list: item list | ','
/// list`, the two-child alternative being a bare separator continuing an
/// already-built list.
pub fn collect_optional_right(children: Vec<Child<Value>>) -> RuntimeResult<Value> {
  match children.len() {
    3 => collect_sep_right(children),
    2 => {
      let mut children = children;
      let tail = child_value(children.remove(1));
      let _leading_sep = children.remove(0);
      Ok(tail)
    }
    n => Err(ParseError::ActionFailed { production: "collect_optional_right".into(), message: format!("expected 2 or 3 children, got {}", n) }),
  }
}

/// Left-recursive list accumulation tolerant of a leading empty list:
/// `list: list ',' item | item` (the single-child alternative seeds the
/// list, mirroring [`single`] rather than requiring a separate EMPTY rule).
pub fn collect_sep_optional(children: Vec<Child<Value>>) -> RuntimeResult<Value> {
  match children.len() {
    3 => collect_sep(children),
    1 => single(children),
    n => Err(ParseError::ActionFailed { production: "collect_sep_optional".into(), message: format!("expected 1 or 3 children, got {}", n) }),
  }
}

/// Right-recursive mirror of [`collect_sep_optional`]: `list: item ',' list
/// | item`.
pub fn collect_sep_optional_right(children: Vec<Child<Value>>) -> RuntimeResult<Value> {
  match children.len() {
    3 => collect_sep_right(children),
    1 => single(children),
    n => Err(ParseError::ActionFailed { production: "collect_sep_optional_right".into(), message: format!("expected 1 or 3 children, got {}", n) }),
  }
}

fn append(head: Value, item: Value) -> RuntimeResult<Value> {
  match head {
    Value::List(mut v) => {
      v.push(item);
      Ok(Value::List(v))
    }
    other => Err(ParseError::ActionFailed { production: "collect".into(), message: format!("expected a list to extend, got {:?}", other) }),
  }
}

fn prepend(item: Value, tail: Value) -> RuntimeResult<Value> {
  match tail {
    Value::List(mut v) => {
      v.insert(0, item);
      Ok(Value::List(v))
    }
    other => Err(ParseError::ActionFailed { production: "collect_right".into(), message: format!("expected a list to extend, got {:?}", other) }),
  }
}

/// `opt: x | EMPTY` — the empty alternative yields `Value::None`, the
/// populated one yields its single child's value (spec §8 "optional
/// operator" scenario).
pub fn optional(children: Vec<Child<Value>>) -> Value {
  match children.into_iter().next() {
    Some(c) => child_value(c),
    None => Value::None,
  }
}

/// Builds a keyed object out of positional children, using `keys` to name
/// each position (`keys.len()` must equal `children.len()`; a `None` entry
/// skips that position, useful for literal/punctuation children).
pub fn obj(children: Vec<Child<Value>>, keys: &[Option<&str>]) -> RuntimeResult<Value> {
  if children.len() != keys.len() {
    return Err(ParseError::ActionFailed {
      production: "obj".into(),
      message:    format!("{} keys given for {} children", keys.len(), children.len()),
    });
  }
  let mut map = HashMap::new();
  for (key, child) in keys.iter().zip(children.into_iter()) {
    if let Some(k) = key {
      map.insert(k.to_string(), child_value(child));
    }
  }
  Ok(Value::Obj(map))
}

/// Reads the `"action"` meta key a production was tagged with (spec §3
/// `meta`) and dispatches to the matching built-in, so a grammar can opt
/// whole productions into this library without writing Rust closures.
/// Productions with no `"action"` meta fall back to [`nochange`].
pub struct BuiltinActions<'g> {
  pub grammar: &'g ascent_core::Grammar,
}

impl<'g> crate::driver::lr::Actions<Value> for BuiltinActions<'g> {
  fn reduce(&self, ctx: &mut ParseContext, children: Vec<Child<Value>>) -> RuntimeResult<Value> {
    let meta = &self.grammar.production(ctx.production).meta;
    match meta.get("action") {
      Some(MetaValue::Str(name)) => match name.as_str() {
        "none" => Ok(none(children)),
        "empty" => Ok(empty(children)),
        "single" => single(children),
        "collect" => collect(children),
        "collect_right" => collect_right(children),
        "collect_sep" => collect_sep(children),
        "collect_sep_right" => collect_sep_right(children),
        "collect_optional" => collect_optional(children),
        "collect_optional_right" => collect_optional_right(children),
        "collect_sep_optional" => collect_sep_optional(children),
        "collect_sep_optional_right" => collect_sep_optional_right(children),
        "optional" => Ok(optional(children)),
        "inner" => {
          let index = match meta.get("inner_index") {
            Some(MetaValue::Int(i)) => *i as usize,
            _ => 0,
          };
          inner(children, index)
        }
        other => Err(ParseError::ActionFailed { production: other.to_string(), message: "unknown built-in action".into() }),
      },
      _ => nochange(children),
    }
  }
}
