//! Client-side reconciliation.
//!
//! Mirrors remote resources as transient view state and re-polls the gateway
//! while any video job is still in flight.

mod dashboard;
mod poller;
mod view_state;

pub use dashboard::{Dashboard, RejoinOutcome};
pub use poller::{PollHandle, PollTarget, DEFAULT_POLL_INTERVAL};
pub use view_state::{VideoDraft, ViewMode, ViewState};
