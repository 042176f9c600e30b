// handlers/mod.rs - Handler tiers
//
// Public (no session) → Protected (/api/*, session cookie required) → Pages
// (browser navigations behind the gatekeeper redirect)
pub mod pages;
pub mod protected;
pub mod public;
