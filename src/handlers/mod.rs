// handlers/mod.rs - Handler tiers
//
// Public (no token) → Protected (token required) → Elevated (administrator).
// Debug-only diagnostics sit beside them and are hidden outside debug mode.
pub mod debug;
pub mod elevated;
pub mod protected;
pub mod public;
