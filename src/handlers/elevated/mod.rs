// handlers/elevated/mod.rs - Administrator-only handlers
pub mod admin;

pub use admin::database_info;
