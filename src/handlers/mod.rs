// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (admin bearer token, enforced by
// middleware::require_admin on the /admin routes)
pub mod public;
pub mod protected;
