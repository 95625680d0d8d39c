//! Reducer for request state transitions.

use std::marker::PhantomData;

use super::action::FetchAction;
use super::state::RequestState;
use crate::mvi::Reducer;

/// Every action fully determines the next state; the previous state only
/// matters to callers comparing before and after.
pub struct FetchReducer<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E: Clone + PartialEq + Send + 'static> Reducer for FetchReducer<E> {
    type State = RequestState<E>;
    type Action = FetchAction<E>;

    fn reduce(_state: Self::State, action: Self::Action) -> Self::State {
        match action {
            FetchAction::SetIdle => RequestState::Idle,
            FetchAction::SetPending => RequestState::Pending,
            FetchAction::SetResolved(entity) => RequestState::Resolved(entity),
            FetchAction::SetRejected(error) => RequestState::Rejected(error),
        }
    }
}
