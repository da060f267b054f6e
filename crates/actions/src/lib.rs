//! Post-export action pipeline and action-type registry.
//!
//! This crate provides:
//! - `ActionRegistry`: declarative field schemas per action kind, supplied
//!   by the host as YAML and never mutated here
//! - `ExportAction` / `ActionPipeline`: the ordered action list attached to
//!   a schedule definition
//! - Required-field validation of actions against the registry

pub mod pipeline;
pub mod registry;

pub use pipeline::{validate_action, ActionPipeline, ActionValidation, ExportAction};
pub use registry::{ActionKindDef, ActionRegistry, FieldDef, FieldKind, RegistryError, SelectOption};
