//! Search coordination and per-session presentation state.
//!
//! [`SearchCoordinator`] keeps at most one title search in flight and
//! reports outcomes over a channel. [`SessionState`] holds what the
//! collaborator is currently showing: results, selected title, resources
//! and category.

mod coordinator;
mod session;

pub use coordinator::{Dispatch, SearchCoordinator, SearchEvent, SearchState};
pub use session::{SessionError, SessionState};
