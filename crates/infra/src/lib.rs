//! `buildcrm-infra` — infrastructure adapters for the auth core.

pub mod session_store;

pub use session_store::JsonFileSessionStore;
