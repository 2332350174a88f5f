pub mod context;
pub mod token;

pub use context::ParseContext;
pub use token::{Recognizer, Token};
