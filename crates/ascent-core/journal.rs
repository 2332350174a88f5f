//! Build-time diagnostics, grounded on `sherpa-core/journal/mod.rs`.
//!
//! The teacher repo does not reach for `log`/`tracing` for its compiler
//! diagnostics; it threads a small `Journal` object through the build
//! explicitly. This crate follows the same idiom rather than bolting on a
//! logging facade the teacher never uses.

use std::time::Instant;

/// One phase of table construction that was timed, e.g. `"closure"`,
/// `"goto"`, `"merge"`, `"tables"`.
#[derive(Debug)]
pub struct Report {
  pub phase: String,
  pub start: Instant,
  pub end:   Option<Instant>,
}

impl Report {
  fn new(phase: &str) -> Self {
    Self { phase: phase.to_string(), start: Instant::now(), end: None }
  }

  pub fn duration(&self) -> Option<std::time::Duration> {
    self.end.map(|e| e.duration_since(self.start))
  }
}

/// Threaded through grammar validation and automaton construction to record
/// phase timings and non-fatal notices. Unlike [`crate::error::AscentError`],
/// nothing here aborts a build; it exists purely for diagnostics, mirroring
/// the teacher's `Journal`/`Report` split from its fatal `SherpaError`.
#[derive(Debug, Default)]
pub struct Journal {
  reports: Vec<Report>,
  notices: Vec<String>,
}

impl Journal {
  pub fn new() -> Self {
    Self::default()
  }

  /// Starts timing `phase`. Call [`Journal::stop_timer`] with the same name
  /// to close it out.
  pub fn start_timer(&mut self, phase: &str) {
    self.reports.push(Report::new(phase));
  }

  pub fn stop_timer(&mut self, phase: &str) {
    if let Some(r) = self.reports.iter_mut().rev().find(|r| r.phase == phase && r.end.is_none()) {
      r.end = Some(Instant::now());
    }
  }

  pub fn note(&mut self, message: impl Into<String>) {
    self.notices.push(message.into());
  }

  pub fn reports(&self) -> &[Report] {
    &self.reports
  }

  pub fn notices(&self) -> &[String] {
    &self.notices
  }

  /// Dumps every timed phase and notice to stderr, mirroring the teacher's
  /// `Journal::debug_print_reports`.
  pub fn debug_print(&self) {
    for r in &self.reports {
      match r.duration() {
        Some(d) => eprintln!("[ascent] phase `{}` took {:?}", r.phase, d),
        None => eprintln!("[ascent] phase `{}` did not complete", r.phase),
      }
    }
    for n in &self.notices {
      eprintln!("[ascent] note: {}", n);
    }
  }
}
