// storefront/src/flow/mod.rs

//! A small step engine used to run multi-step user actions (checkout submission).
//!
//! A `Flow<TData, Err>` is an ordered list of named steps. Each step carries
//! handlers that receive a shared `ContextData<TData>` and return a
//! `FlowControl` telling the engine whether to keep going.

pub mod context_data;
pub mod control;
pub mod definition;
pub mod execution;
pub mod hooks;
pub mod step;

pub use context_data::ContextData;
pub use control::{FlowControl, FlowOutcome};
pub use definition::Flow;
pub use hooks::Handler;
pub use step::{SkipCondition, StepDef, StepMode};
