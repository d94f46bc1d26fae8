use std::cell::RefCell;

use tracing::Level;

/// Where patches report what they did.
///
/// Passed into every patch so embedders can route or capture the messages
/// instead of relying on a global subscriber.
pub trait PatchLogger {
  fn log(&self, level: Level, message: &str);

  fn warn(&self, message: &str) {
    self.log(Level::WARN, message);
  }

  fn error(&self, message: &str) {
    self.log(Level::ERROR, message);
  }
}

/// Forwards patch messages to `tracing` under the `awxport::patch` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl PatchLogger for TracingLogger {
  fn log(&self, level: Level, message: &str) {
    match level {
      Level::ERROR => tracing::error!(target: "awxport::patch", "{}", message),
      Level::WARN => tracing::warn!(target: "awxport::patch", "{}", message),
      Level::INFO => tracing::info!(target: "awxport::patch", "{}", message),
      Level::DEBUG => tracing::debug!(target: "awxport::patch", "{}", message),
      _ => tracing::trace!(target: "awxport::patch", "{}", message),
    }
  }
}

/// Keeps every message in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingLogger {
  records: RefCell<Vec<(Level, String)>>,
}

impl RecordingLogger {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn records(&self) -> Vec<(Level, String)> {
    self.records.borrow().clone()
  }

  /// Messages logged at exactly `level`.
  pub fn messages(&self, level: Level) -> Vec<String> {
    self
      .records
      .borrow()
      .iter()
      .filter(|(l, _)| *l == level)
      .map(|(_, m)| m.clone())
      .collect()
  }

  pub fn is_empty(&self) -> bool {
    self.records.borrow().is_empty()
  }
}

impl PatchLogger for RecordingLogger {
  fn log(&self, level: Level, message: &str) {
    self.records.borrow_mut().push((level, message.to_string()));
  }
}
