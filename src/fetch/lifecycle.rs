//! Drives one named request through Idle/Pending/Resolved/Rejected.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, error};

use super::action::FetchAction;
use super::driver::{Driver, LifecycleMode};
use super::error::LifecycleError;
use super::fetcher::EntityFetcher;
use super::state::RequestState;
use super::view::View;

/// Capacity of the transition broadcast channel.
const EVENT_CAPACITY: usize = 64;

/// What to do with a fetch that settles after a newer request started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
    /// Drop the stale result; the newest request owns the state.
    #[default]
    Discard,
    /// Apply results in the order they settle, even if stale.
    Apply,
}

/// A state transition, as seen by subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<E> {
    /// Name the state belongs to.
    pub name: String,
    pub state: RequestState<E>,
}

struct Inner<E> {
    driver: Driver<E>,
    name: String,
}

/// Request lifecycle for entities loaded through `F`.
///
/// Each [`observe`](Self::observe) call is one request. Several may be in
/// flight at once; [`StalePolicy`] decides whether an older one may still
/// write its result.
pub struct FetchLifecycle<F: EntityFetcher> {
    fetcher: F,
    inner: Mutex<Inner<F::Entity>>,
    generation: AtomicU64,
    policy: StalePolicy,
    events: broadcast::Sender<Transition<F::Entity>>,
}

impl<F: EntityFetcher> FetchLifecycle<F> {
    pub fn new(fetcher: F, mode: LifecycleMode, policy: StalePolicy) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            fetcher,
            inner: Mutex::new(Inner {
                driver: Driver::new(mode),
                name: String::new(),
            }),
            generation: AtomicU64::new(0),
            policy,
            events,
        }
    }

    pub fn mode(&self) -> LifecycleMode {
        self.inner.lock().driver.mode()
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn state(&self) -> RequestState<F::Entity> {
        self.inner.lock().driver.state().clone()
    }

    /// Name of the most recent request.
    pub fn name(&self) -> String {
        self.inner.lock().name.clone()
    }

    /// Receive every transition from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Transition<F::Entity>> {
        self.events.subscribe()
    }

    /// Render the current state with `render`.
    pub fn with_view<R>(&self, render: impl FnOnce(View<'_, F::Entity>) -> R) -> R {
        let inner = self.inner.lock();
        render(View::of(inner.driver.state(), &inner.name))
    }

    /// Start a request for `name` and wait for it to settle.
    ///
    /// An empty name resets to Idle without fetching. Otherwise the state
    /// goes to Pending, then Resolved or Rejected once the fetch settles.
    /// Returns the state after this call's last transition (or the current
    /// state, if its result was discarded as stale).
    pub async fn observe(&self, name: &str) -> Result<RequestState<F::Entity>, LifecycleError> {
        if name.is_empty() {
            self.begin(name, FetchAction::SetIdle)?;
            return Ok(self.state());
        }

        let generation = self.begin(name, FetchAction::SetPending)?;
        debug!(name, generation, "fetch started");

        let action = match self.fetcher.fetch(name).await {
            Ok(entity) => FetchAction::SetResolved(entity),
            Err(err) => {
                error!(name, error = %err, "Error while fetching entity");
                FetchAction::SetRejected(err)
            }
        };

        self.settle(name, action, generation)?;
        Ok(self.state())
    }

    /// Open a new request generation and apply its first transition.
    ///
    /// Both happen under the state lock, so generations are ordered the
    /// same way as the transitions that start them.
    fn begin(&self, name: &str, action: FetchAction<F::Entity>) -> Result<u64, LifecycleError> {
        let mut inner = self.inner.lock();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply(&mut inner, name, action)?;
        Ok(generation)
    }

    /// Apply the settle transition of `generation`. Under
    /// [`StalePolicy::Discard`] it is dropped if a newer request has begun.
    fn settle(
        &self,
        name: &str,
        action: FetchAction<F::Entity>,
        generation: u64,
    ) -> Result<(), LifecycleError> {
        let mut inner = self.inner.lock();

        let current = self.generation.load(Ordering::SeqCst);
        if self.policy == StalePolicy::Discard && current != generation {
            debug!(name, generation, current, "discarding stale result");
            return Ok(());
        }

        self.apply(&mut inner, name, action)
    }

    fn apply(
        &self,
        inner: &mut Inner<F::Entity>,
        name: &str,
        action: FetchAction<F::Entity>,
    ) -> Result<(), LifecycleError> {
        let tag = action.tag();
        inner.driver.apply(action)?;
        inner.name = name.to_string();
        debug!(name, action = tag.as_str(), status = %inner.driver.state().status(), "transition");

        let _ = self.events.send(Transition {
            name: inner.name.clone(),
            state: inner.driver.state().clone(),
        });
        Ok(())
    }
}
