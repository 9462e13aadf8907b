//! Core functionality: the content document, its store, the session and configuration

pub mod auth;
pub mod config;
pub mod document;
pub mod error;
pub mod normalize;
pub mod session;
pub mod store;
