//! `buildcrm-auth` — authentication/session + role-based authorization core.
//!
//! This crate is intentionally decoupled from HTTP and rendering. It answers
//! exactly two questions for the rest of the application:
//!
//! - "Is there an authenticated actor, and who is it?" ([`SessionManager`])
//! - "May this actor perform action A on module M?" ([`AuthorizationEngine`])
//!
//! [`AuthService`] composes both behind the single contract that screens and
//! route guards consume. Session state is persisted through the
//! [`SessionStore`] port; implementations live in `buildcrm-infra`.

pub mod engine;
pub mod identity;
pub mod permissions;
pub mod role;
pub mod service;
pub mod session;
pub mod store;

pub use engine::AuthorizationEngine;
pub use identity::Identity;
pub use permissions::PermissionSet;
pub use role::Role;
pub use service::AuthService;
pub use session::{SessionError, SessionManager};
pub use store::{InMemorySessionStore, SessionStore, keys};
