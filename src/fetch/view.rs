//! Mapping from request state to what a presentation shell shows.

use std::fmt;

use super::state::RequestState;

pub const PROMPT: &str = "Submit a pokemon";

#[derive(Debug, Clone, PartialEq)]
pub enum View<'a, E> {
    /// Nothing requested yet.
    Prompt,
    /// Placeholder while `name` loads.
    Loading { name: &'a str },
    Data(&'a E),
    Error { message: String },
}

impl<'a, E> View<'a, E> {
    pub fn of(state: &'a RequestState<E>, name: &'a str) -> Self {
        match state {
            RequestState::Idle => View::Prompt,
            RequestState::Pending => View::Loading { name },
            RequestState::Resolved(entity) => View::Data(entity),
            RequestState::Rejected(error) => View::Error {
                message: error.message(),
            },
        }
    }
}

impl<E: fmt::Display> fmt::Display for View<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Prompt => f.write_str(PROMPT),
            View::Loading { name } => write!(f, "Loading {}...", name),
            View::Data(entity) => write!(f, "{}", entity),
            View::Error { message } => write!(f, "There was an error: {}", message),
        }
    }
}
