//! The two ways of driving request state.
//!
//! Both drivers produce identical observable states for the same sequence
//! of transitions. The direct driver replaces the whole record and checks
//! it against the state invariants; the reducer driver dispatches actions
//! through [`FetchReducer`] and validates raw action tags.

use serde::{Deserialize, Serialize};

use super::action::{FetchAction, TaggedAction};
use super::error::LifecycleError;
use super::reducer::FetchReducer;
use super::state::{RequestRecord, RequestState};
use crate::mvi::Reducer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleMode {
    Direct,
    #[default]
    Reducer,
}

/// Replaces the request record wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectDriver<E> {
    state: RequestState<E>,
}

impl<E: Clone> DirectDriver<E> {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
        }
    }

    pub fn state(&self) -> &RequestState<E> {
        &self.state
    }

    /// Install `record` as the new state. An inconsistent record is refused
    /// and the current state is kept.
    pub fn replace(&mut self, record: RequestRecord<E>) -> Result<(), LifecycleError> {
        self.state = RequestState::try_from(record)?;
        Ok(())
    }
}

impl<E: Clone> Default for DirectDriver<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatches actions through [`FetchReducer`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReducerDriver<E> {
    state: RequestState<E>,
}

impl<E: Clone + PartialEq + Send + 'static> ReducerDriver<E> {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
        }
    }

    pub fn state(&self) -> &RequestState<E> {
        &self.state
    }

    pub fn dispatch(&mut self, action: FetchAction<E>) {
        let state = std::mem::take(&mut self.state);
        self.state = FetchReducer::<E>::reduce(state, action);
    }

    /// Dispatch an action given by tag. Unrecognized tags and missing
    /// payloads are refused and leave the state untouched.
    pub fn dispatch_tagged(&mut self, action: TaggedAction<E>) -> Result<(), LifecycleError> {
        let action = FetchAction::try_from(action)?;
        self.dispatch(action);
        Ok(())
    }
}

impl<E: Clone + PartialEq + Send + 'static> Default for ReducerDriver<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Driver<E> {
    Direct(DirectDriver<E>),
    Reducer(ReducerDriver<E>),
}

impl<E: Clone + PartialEq + Send + 'static> Driver<E> {
    pub fn new(mode: LifecycleMode) -> Self {
        match mode {
            LifecycleMode::Direct => Self::Direct(DirectDriver::new()),
            LifecycleMode::Reducer => Self::Reducer(ReducerDriver::new()),
        }
    }

    pub fn mode(&self) -> LifecycleMode {
        match self {
            Self::Direct(_) => LifecycleMode::Direct,
            Self::Reducer(_) => LifecycleMode::Reducer,
        }
    }

    pub fn state(&self) -> &RequestState<E> {
        match self {
            Self::Direct(driver) => driver.state(),
            Self::Reducer(driver) => driver.state(),
        }
    }

    pub fn apply(&mut self, action: FetchAction<E>) -> Result<(), LifecycleError> {
        match self {
            Self::Direct(driver) => driver.replace(match action {
                FetchAction::SetIdle => RequestRecord::idle(),
                FetchAction::SetPending => RequestRecord::pending(),
                FetchAction::SetResolved(entity) => RequestRecord::resolved(entity),
                FetchAction::SetRejected(error) => RequestRecord::rejected(error),
            }),
            Self::Reducer(driver) => {
                driver.dispatch(action);
                Ok(())
            }
        }
    }
}
