//! Error/recovery hook (spec §6 "Error/recovery hook", §7 "Default
//! recovery") and the bundle both drivers thread it and the token
//! recognition override hook through. Only the hook *contracts* are in
//! scope here; a recovery *policy* beyond the one default algorithm spec §7
//! names is a non-goal.

use crate::error::ParseError;
use crate::recognize::{RecognizerTable, TokenRecognitionHook};
use crate::types::token::{CustomRecognizers, Token};
use ascent_core::Grammar;

/// Mutable parse progress exposed to an [`ErrorHook`]. A hook that wants to
/// resume parsing sets `token_ahead`/`position` to a recoverable point and
/// returns `true`; the driver picks up from there.
pub struct RecoveryContext<'a> {
  pub grammar:     &'a Grammar,
  pub recognizers: &'a RecognizerTable,
  pub customs:     &'a CustomRecognizers,
  pub input:       &'a str,
  pub state:       usize,
  pub position:    usize,
  pub token_ahead: Option<Token>,
}

/// A pluggable recovery policy, invoked when no ACTION applies (spec §6
/// `on_error(context, error) -> bool`). Returning `true` tells the driver
/// `ctx` now holds a usable `token_ahead`/`position` to resume from;
/// returning `false` surfaces the original error.
pub trait ErrorHook {
  fn on_error(&self, ctx: &mut RecoveryContext, error: &ParseError) -> bool;
}

/// The concrete default recovery algorithm spec §7 names: scan forward
/// through the input, trying every terminal named in the error's
/// `symbols_expected` at each successive position, and stop at the first
/// match. Returns `false` if no such position exists before end-of-input.
pub struct DefaultRecovery;

impl ErrorHook for DefaultRecovery {
  fn on_error(&self, ctx: &mut RecoveryContext, error: &ParseError) -> bool {
    let terminals: Vec<_> = match error.context() {
      Some(c) => c.symbols_expected.iter().filter_map(|s| s.as_terminal()).collect(),
      None => return false,
    };
    if terminals.is_empty() {
      return false;
    }
    let mut pos = ctx.position;
    while pos < ctx.input.len() {
      for &t in &terminals {
        if let Some(tok) = ctx.recognizers.try_recognize(t, ctx.input, pos, ctx.customs) {
          ctx.token_ahead = Some(tok);
          ctx.position = pos;
          return true;
        }
      }
      pos += 1;
    }
    false
  }
}

/// The optional hooks a caller may install for one parse call: an error
/// recovery policy and a token-recognition override. Bundled together since
/// both `LrDriver` and `GlrDriver` thread the same pair through, and a bare
/// `Option` per hook would otherwise triple the parameter list of every
/// `parse*` method.
#[derive(Default)]
pub struct ParseHooks<'a> {
  pub on_error:           Option<&'a dyn ErrorHook>,
  pub custom_recognition: Option<&'a dyn TokenRecognitionHook>,
}
