//! Core type definitions used across the Plume workspace.

pub mod id;

pub use id::*;
