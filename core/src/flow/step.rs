// storefront/src/flow/step.rs

use super::ContextData;

pub type SkipCondition<TData> = std::sync::Arc<dyn Fn(ContextData<TData>) -> bool + Send + Sync + 'static>;

/// How the engine treats a step that has no handlers or whose handler fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
  /// Must have a handler; a handler error aborts the flow.
  Required,
  /// May have no handler (skipped); a handler error still aborts the flow.
  Optional,
  /// May have no handler; a handler error is logged and the flow moves on.
  BestEffort,
}

impl StepMode {
  pub fn needs_handler(self) -> bool {
    matches!(self, StepMode::Required)
  }
}

#[derive(Clone)]
pub struct StepDef<T: 'static + Send + Sync> {
  pub name: String,
  pub mode: StepMode,
  /// Evaluated before the step; `true` skips it.
  pub skip_if: Option<SkipCondition<T>>,
}

impl<T: 'static + Send + Sync> std::fmt::Debug for StepDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("mode", &self.mode)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
