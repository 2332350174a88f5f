#![allow(non_snake_case)]
//! The parse-time half of the parser generator: scannerless token
//! recognition (C4), the deterministic LR driver (C5), the GLR driver over a
//! Graph-Structured Stack (C6), and the Shared Packed Parse Forest (C7).
//!
//! Consumes the immutable [`ascent_core::Tables`] built by `ascent_core` and
//! never mutates them; each parse owns its own cursor/GSS/SPPF, so a single
//! `Tables` value may be shared across concurrently running parses (spec
//! §5).

pub mod actions;
pub mod driver;
pub mod error;
pub mod forest;
pub mod hooks;
pub mod recognize;
pub mod types;

pub use error::{DisambiguationError, ErrorContext, GlrHeadSnapshot, ParseError, RuntimeResult};
pub use hooks::{DefaultRecovery, ErrorHook, ParseHooks, RecoveryContext};
pub use types::context::ParseContext;
pub use types::token::{CustomRecognizers, Recognizer, Token};

pub use actions::{BuiltinActions, Value};
pub use driver::gss::{DynamicAction, DynamicFilter, GlrDriver, GlrOutcome};
pub use driver::lr::{Actions, LrDriver, ParseTree};
pub use forest::sppf::Forest;
pub use recognize::{RecognizerTable, TokenHookContext, TokenRecognitionHook};
