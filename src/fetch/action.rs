//! Reducer actions and their tagged wire form.

use serde::{Deserialize, Serialize};

use super::error::{FetchError, LifecycleError};
use crate::mvi::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchAction<E> {
    SetIdle,
    SetPending,
    SetResolved(E),
    SetRejected(FetchError),
}

impl<E: Send + 'static> Action for FetchAction<E> {}

impl<E> FetchAction<E> {
    pub fn tag(&self) -> ActionTag {
        match self {
            Self::SetIdle => ActionTag::SetIdle,
            Self::SetPending => ActionTag::SetPending,
            Self::SetResolved(_) => ActionTag::SetResolved,
            Self::SetRejected(_) => ActionTag::SetRejected,
        }
    }
}

/// The four recognized action tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTag {
    SetIdle,
    SetPending,
    SetResolved,
    SetRejected,
}

impl ActionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetIdle => "SetIdle",
            Self::SetPending => "SetPending",
            Self::SetResolved => "SetResolved",
            Self::SetRejected => "SetRejected",
        }
    }

    /// Parse a tag. Anything outside the four known tags is an error.
    pub fn parse(tag: &str) -> Result<Self, LifecycleError> {
        match tag {
            "SetIdle" => Ok(Self::SetIdle),
            "SetPending" => Ok(Self::SetPending),
            "SetResolved" => Ok(Self::SetResolved),
            "SetRejected" => Ok(Self::SetRejected),
            other => Err(LifecycleError::UnknownAction {
                tag: other.to_string(),
            }),
        }
    }
}

/// An action as it arrives from outside the type system, e.g. a replay file:
///
/// ```json
/// {"type": "SetPending", "name": "pikachu"}
/// {"type": "SetResolved", "entity": {"name": "pikachu"}}
/// {"type": "SetRejected", "error": "not found"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedAction<E> {
    #[serde(rename = "type")]
    pub tag: String,
    /// Name of the request the action belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<E>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<E> TaggedAction<E> {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: None,
            entity: None,
            error: None,
        }
    }
}

impl<E> TryFrom<TaggedAction<E>> for FetchAction<E> {
    type Error = LifecycleError;

    fn try_from(action: TaggedAction<E>) -> Result<Self, Self::Error> {
        let tag = ActionTag::parse(&action.tag)?;
        match tag {
            ActionTag::SetIdle => Ok(Self::SetIdle),
            ActionTag::SetPending => Ok(Self::SetPending),
            ActionTag::SetResolved => action
                .entity
                .map(Self::SetResolved)
                .ok_or(LifecycleError::MissingPayload {
                    tag: tag.as_str(),
                    field: "entity",
                }),
            ActionTag::SetRejected => action
                .error
                .map(|message| Self::SetRejected(FetchError::Message(message)))
                .ok_or(LifecycleError::MissingPayload {
                    tag: tag.as_str(),
                    field: "error",
                }),
        }
    }
}
