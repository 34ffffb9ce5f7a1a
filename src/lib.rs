//! CVI Gateway - proxy and client reconciliation for a conversational video API
//!
//! The gateway exposes one stateless endpoint per provider operation (start
//! conversation, generate video, list and fetch conversations and videos),
//! each forwarding exactly one request upstream and normalising the reply.
//! The reconciliation layer drives those endpoints from a client and polls
//! video jobs until they settle.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
