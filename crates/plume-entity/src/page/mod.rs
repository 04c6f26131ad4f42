//! Page domain entities.

pub mod metadata;
pub mod model;

pub use metadata::{MetadataStatus, PageMetadata, slugify};
pub use model::Page;
