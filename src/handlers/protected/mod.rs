// handlers/protected/mod.rs - Protected handlers (token required)
pub mod auth;
pub mod import;

pub use auth::{logout, whoami};
pub use import::import_shapefile;
