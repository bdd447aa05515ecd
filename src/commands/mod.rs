//! CLI commands

pub mod context;
pub mod favorite;
pub mod host;
pub mod list;
pub mod open;
pub mod refresh;
pub mod utils;
