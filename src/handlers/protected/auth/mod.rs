// handlers/protected/auth/mod.rs - Session handlers for authenticated callers
pub mod session;

pub use session::{logout, whoami};
