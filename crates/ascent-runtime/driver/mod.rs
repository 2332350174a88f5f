pub mod gss;
pub mod lr;

pub use gss::GlrDriver;
pub use lr::LrDriver;
