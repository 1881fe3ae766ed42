// handlers/mod.rs - Two-tier handler architecture
//
// Public (no auth) → Protected (JWT auth). Handlers only unpack the request
// and hand it to a service; every rule lives in `crate::services`.
pub mod protected; // Tier 2: JWT authentication required (/api/v1/*)
pub mod public; // Tier 1: No authentication required (/, /health, signup, signin)
