// handlers/public/auth/mod.rs - Token acquisition
pub mod fake_login;

pub use fake_login::fake_login;
