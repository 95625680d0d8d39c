//! Reducer plumbing shared by state machines in this crate.
//!
//! A state machine is a [`ViewState`] value plus a [`Reducer`] that folds
//! [`Action`]s into it. The fetch lifecycle's reducer driver is built on
//! these traits:
//!
//! ```text
//! FetchAction ──→ FetchReducer ──→ RequestState ──→ View
//! ```

mod action;
mod reducer;
mod state;

pub use action::Action;
pub use reducer::Reducer;
pub use state::ViewState;
