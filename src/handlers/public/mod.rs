// handlers/public/mod.rs - Endpoints reachable without a session
//
// Sign-in issues the session cookie; the placeholder pages are where the
// gatekeeper sends browsers that fail its checks.
pub mod health;
pub mod pages;
pub mod session;
