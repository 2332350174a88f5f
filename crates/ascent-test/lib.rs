//! End-to-end scenario suite (spec §8 "Testable properties", concrete
//! scenarios 1-6), built against the public `ascent-core`/`ascent-runtime`
//! API only — no internal access to either crate.

#[cfg(test)]
mod scenario_lr_arithmetic;

#[cfg(test)]
mod scenario_glr_ambiguous;

#[cfg(test)]
mod scenario_optional;

#[cfg(test)]
mod scenario_separated_list;

#[cfg(test)]
mod scenario_layout_comments;

#[cfg(test)]
mod scenario_keyword;
