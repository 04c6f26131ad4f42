//! # plume-hooks
//!
//! Extension points for Plume modules. Provides:
//!
//! - A context bag passed into every handler invocation
//! - A hook registry keyed by event name, in registration order
//! - A dispatcher that invokes every handler and collects their output
//! - A result shaper that turns loosely-typed records into typed values
//! - Closure and static-record handler adapters

pub mod handlers;
pub mod hooks;

pub use handlers::{ClosureHandler, StaticRecordsHandler};
pub use hooks::definitions::{HookContext, HookOutput, Record, names};
pub use hooks::dispatcher::{HandlerOutput, HookDispatcher};
pub use hooks::registry::{HookHandler, HookRegistry, RegisteredHandler};
pub use hooks::shaper::{FieldKind, FieldRule, FieldRules, Shape, shape, shape_records};
