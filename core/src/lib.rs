#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod bridge;
pub mod cache;
pub mod directory;
pub mod models;
pub mod policy;
pub mod repository;
pub mod schema;
pub mod seed;
pub mod services;

// Re-export commonly used types
pub use bridge::{BridgeClient, BridgeError, BridgeTransport, NullTransport};
pub use directory::Directory;
pub use models::{Report, ReportDraft, User};
pub use policy::{can_create, can_delete, can_edit, visible_to, Action};
pub use repository::{Actor, ReportRepository, RepositoryError};
pub use seed::seed_reports;
pub use services::{Feature, ServiceKey};
