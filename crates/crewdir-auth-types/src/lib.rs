//! Identity types shared across Crewdir services.
//!
//! Credential verification happens at the gateway; services consume the
//! verified [`principal::Principal`] it injects and nothing else.

pub mod principal;
