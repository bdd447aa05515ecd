//! code-workspaces library
//!
//! Discovers VS Code `.code-workspace` files, caches them with a time-to-live
//! and tracks favorites and recently opened workspaces.
//!
//! The launcher host is abstracted behind two traits:
//! [`presentation::Host`] for display and external actions, and
//! [`storage::KeyValueStore`] for durable storage.

pub mod actions;
pub mod cache;
pub mod config;
pub mod error;
pub mod presentation;
pub mod state;
pub mod storage;
pub mod workspace;

pub use error::{Error, Result};
