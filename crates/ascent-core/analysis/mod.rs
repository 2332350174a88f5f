//! FIRST/FOLLOW analyzer (component C2, spec §4.1).

mod first_follow;

pub use first_follow::*;
