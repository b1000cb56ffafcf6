//! Cross-cutting plumbing for Crewdir services: health probes, request-id
//! middleware, response serde helpers, and tracing setup.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
