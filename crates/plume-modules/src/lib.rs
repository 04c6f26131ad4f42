//! # plume-modules
//!
//! The modules shipped with Plume. Each one implements
//! [`plume_install::Module`] and talks to the others only through hooks.
//!
//! | Module | Contributes | Installs |
//! |---|---|---|
//! | `system` | | the assembled catalog as system variables |
//! | `user` | its own permissions | every contributed permission |
//! | `frontend` | catalog entries, permissions | pages and menus |
//! | `blog` | a menu item, a page, catalog entries, permissions | |

pub mod blog;
pub mod builtin;
pub mod frontend;
pub mod permissions;
pub mod system;
pub mod user;

pub use blog::BlogModule;
pub use builtin::{builtin, from_config};
pub use frontend::FrontendModule;
pub use permissions::PermissionInput;
pub use system::SystemModule;
pub use user::UserModule;
