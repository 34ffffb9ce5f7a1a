//! Domain layer - resources relayed by the gateway and its error vocabulary.
//!
//! ## Modules
//!
//! - `conversation` - Conversation snapshots and start results
//! - `video` - Video generation jobs and their status
//! - `gateway` - Operations, list normalisation, gateway errors

pub mod conversation;
pub mod gateway;
pub mod video;
