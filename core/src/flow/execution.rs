// storefront/src/flow/execution.rs

use super::context_data::ContextData;
use super::control::{FlowControl, FlowOutcome};
use super::definition::Flow;
use super::step::{StepDef, StepMode};
use crate::error::FlowError;
use tracing::{event, info_span, instrument, Instrument, Level};

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step in order against `ctx_data`.
  ///
  /// A `BestEffort` step that fails is logged and the run continues with the next
  /// step; any other handler error ends the run with that error.
  #[instrument(
    name = "Flow::run",
    skip_all,
    fields(
      flow_context_data_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<FlowOutcome, Err> {
    event!(Level::DEBUG, "Flow execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_span = info_span!(
        "flow_step",
        step_name = step_def.name.as_str(),
        step_index = step_idx,
        mode = ?step_def.mode
      );
      let control = self.run_step(step_def, ctx_data.clone()).instrument(step_span).await?;
      if control == FlowControl::Stop {
        return Ok(FlowOutcome::Stopped);
      }
    }

    event!(Level::DEBUG, "Flow execution completed.");
    Ok(FlowOutcome::Completed)
  }

  async fn run_step(&self, step_def: &StepDef<TData>, ctx_data: ContextData<TData>) -> Result<FlowControl, Err> {
    if let Some(skip_cond_fn) = &step_def.skip_if {
      if skip_cond_fn(ctx_data.clone()) {
        event!(Level::INFO, "Step skipped due to 'skip_if' condition.");
        return Ok(FlowControl::Continue);
      }
    }

    let handlers = match self.handlers.get(step_def.name.as_str()) {
      Some(handlers) if !handlers.is_empty() => handlers,
      _ if step_def.mode.needs_handler() => {
        event!(Level::ERROR, "Required step has no handlers.");
        return Err(Err::from(FlowError::HandlerMissing {
          step_name: step_def.name.clone(),
        }));
      }
      _ => {
        event!(Level::DEBUG, "Step has no handlers, skipping.");
        return Ok(FlowControl::Continue);
      }
    };

    for handler_fn in handlers.iter() {
      match handler_fn(ctx_data.clone()).await {
        Ok(FlowControl::Continue) => {}
        Ok(FlowControl::Stop) => {
          event!(Level::INFO, "Flow stopped by a handler.");
          return Ok(FlowControl::Stop);
        }
        Err(e) if step_def.mode == StepMode::BestEffort => {
          event!(Level::WARN, error = %e, "Best-effort step failed; continuing.");
          return Ok(FlowControl::Continue);
        }
        Err(e) => {
          event!(Level::ERROR, error = %e, "Step handler failed.");
          return Err(e);
        }
      }
    }
    event!(Level::DEBUG, "Step finished.");
    Ok(FlowControl::Continue)
  }
}
