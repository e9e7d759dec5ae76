// storefront/src/flow/control.rs

/// Returned by a handler to tell the engine whether to keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
  Continue,
  /// Halt immediately; no further handlers or steps run.
  Stop,
}

/// How a complete run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  Completed,
  Stopped,
}
