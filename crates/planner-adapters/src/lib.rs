//! Infrastructure adapters for the career planner.
//!
//! This crate implements the ports defined in `planner_core::application::ports`
//! and everything else that touches the outside world: HTTP, the process
//! environment, secrets files, and template files.

pub mod credentials;
pub mod template;
pub mod trello;

// Re-export commonly used adapters
pub use credentials::{
    CredentialOrigin, CredentialResolver, CredentialSources, EnvSnapshot, ResolvedCredentials,
};
pub use template::{builtin_template, load_template, template_to_toml};
pub use trello::{ClientConfig, TrelloClient};
