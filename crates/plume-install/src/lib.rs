//! # plume-install
//!
//! Installation orchestration for Plume modules:
//!
//! - The [`Module`] trait and the [`ModuleManager`] that registers every
//!   module's hooks in load order
//! - Declarative catalog assembly for system variables
//! - The content installer that builds and persists pages and menus
//! - The top-level [`Installer`]

pub mod catalog;
pub mod content;
pub mod installer;
pub mod manager;
pub mod module;

pub use catalog::{Catalog, CatalogEntry, CatalogItem};
pub use content::{
    ContentInstaller, ContentPlan, ContentSummary, MenuItemInput, PageInput, WriteGroup,
};
pub use installer::{InstallReport, Installer, StoreCounts};
pub use manager::ModuleManager;
pub use module::{InstallContext, Module, ModuleInfo};
