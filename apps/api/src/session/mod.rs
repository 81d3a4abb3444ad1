// Per-user sessions: explicit stores owned by a registry, no global state.

pub mod handlers;
pub mod registry;
pub mod store;
