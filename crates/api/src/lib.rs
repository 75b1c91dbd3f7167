//! HTTP API: session and authorization endpoints over the auth core.

pub mod app;
