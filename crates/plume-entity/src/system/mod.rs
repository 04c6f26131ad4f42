//! System configuration entities.

pub mod variable;

pub use variable::SystemVariable;
