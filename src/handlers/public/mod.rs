// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and service probes.

pub mod system;
pub mod users;
