use super::action::Action;
use super::state::ViewState;

/// Folds actions into state.
pub trait Reducer {
    type State: ViewState;
    type Action: Action;

    /// Next state after `action`. No I/O; all effects stay with the driver.
    fn reduce(state: Self::State, action: Self::Action) -> Self::State;
}
