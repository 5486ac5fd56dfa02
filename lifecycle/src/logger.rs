//! Diagnostic hook used by the registry while wiring and driving components.

use std::fmt;
use std::io::Write;

/// Receives the registry's debug trace.
pub trait Logger {
  /// Logs an unstructured message.
  fn debug(&self, message: &str);

  /// Logs preformatted arguments, usually built with `format_args!`.
  fn debugf(&self, args: fmt::Arguments<'_>);
}

/// Writes timestamped lines to standard error. This is the default logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl ConsoleLogger {
  fn write_line(&self, args: fmt::Arguments<'_>) {
    let now = chrono::Local::now().format("%Y/%m/%d %H:%M:%S");
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    // Diagnostics must never fail the caller.
    let _ = writeln!(handle, "{} {}", now, args);
  }
}

impl Logger for ConsoleLogger {
  fn debug(&self, message: &str) {
    self.write_line(format_args!("{}", message));
  }

  fn debugf(&self, args: fmt::Arguments<'_>) {
    self.write_line(args);
  }
}

/// Forwards the trace to `tracing` at DEBUG level under the `fibre_lifecycle` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
  fn debug(&self, message: &str) {
    tracing::debug!(target: "fibre_lifecycle", "{}", message);
  }

  fn debugf(&self, args: fmt::Arguments<'_>) {
    tracing::debug!(target: "fibre_lifecycle", "{}", args);
  }
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLogger;

impl Logger for NoLogger {
  fn debug(&self, _message: &str) {}

  fn debugf(&self, _args: fmt::Arguments<'_>) {}
}
