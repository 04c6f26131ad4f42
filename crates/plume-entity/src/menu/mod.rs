//! Navigation menu entities.

pub mod item;
pub mod model;

pub use item::{DEFAULT_PRIORITY, MenuItem};
pub use model::Menu;
