//! Asynchronous fetch lifecycle.
//!
//! A request for a named entity moves through four states:
//!
//! ```text
//! observe("")      ──► Idle
//! observe("name")  ──► Pending ──┬── ok ──► Resolved
//!                                └── err ─► Rejected
//! ```
//!
//! Settled states are left only by a new request. State is driven either
//! by direct record replacement or by a reducer over tagged actions; see
//! [`driver`].

mod action;
pub mod driver;
mod error;
mod fetcher;
mod lifecycle;
mod pokeapi;
mod reducer;
mod state;
mod status;
mod view;

pub use action::{ActionTag, FetchAction, TaggedAction};
pub use driver::{DirectDriver, Driver, LifecycleMode, ReducerDriver};
pub use error::{FetchError, LifecycleError};
pub use fetcher::EntityFetcher;
pub use lifecycle::{FetchLifecycle, StalePolicy, Transition};
pub use pokeapi::{PokeApiClient, Pokemon, Stat};
pub use reducer::FetchReducer;
pub use state::{RequestRecord, RequestState};
pub use status::FetchStatus;
pub use view::{View, PROMPT};
