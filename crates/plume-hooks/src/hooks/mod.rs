//! Hook system: definitions, registry, dispatcher, and shaper.

pub mod definitions;
pub mod dispatcher;
pub mod registry;
pub mod shaper;

pub use definitions::{HookContext, HookOutput, Record};
pub use dispatcher::HookDispatcher;
pub use registry::HookRegistry;
