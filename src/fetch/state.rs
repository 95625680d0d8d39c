//! Request state and its record form.

use super::error::{FetchError, LifecycleError};
use super::status::FetchStatus;
use crate::mvi::ViewState;

/// State of a single named request.
///
/// The entity exists only when resolved and the error only when rejected,
/// so inconsistent combinations cannot be built.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<E> {
    Idle,
    Pending,
    Resolved(E),
    Rejected(FetchError),
}

impl<E> Default for RequestState<E> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<E: Clone + PartialEq + Send + 'static> ViewState for RequestState<E> {}

impl<E> RequestState<E> {
    pub fn status(&self) -> FetchStatus {
        match self {
            Self::Idle => FetchStatus::Idle,
            Self::Pending => FetchStatus::Pending,
            Self::Resolved(_) => FetchStatus::Resolved,
            Self::Rejected(_) => FetchStatus::Rejected,
        }
    }

    pub fn entity(&self) -> Option<&E> {
        match self {
            Self::Resolved(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Rejected(error) => Some(error),
            _ => None,
        }
    }

    /// Build a state from its three record fields, rejecting combinations
    /// that break the status/entity/error invariants.
    pub fn from_parts(
        status: FetchStatus,
        entity: Option<E>,
        error: Option<FetchError>,
    ) -> Result<Self, LifecycleError> {
        let violation = |reason| LifecycleError::InvariantViolation {
            status: status.as_str(),
            reason,
        };

        match (status, entity, error) {
            (FetchStatus::Idle, None, None) => Ok(Self::Idle),
            (FetchStatus::Pending, None, None) => Ok(Self::Pending),
            (FetchStatus::Resolved, Some(entity), None) => Ok(Self::Resolved(entity)),
            (FetchStatus::Rejected, None, Some(error)) => Ok(Self::Rejected(error)),
            (FetchStatus::Resolved, None, _) => Err(violation("missing entity")),
            (FetchStatus::Rejected, _, None) => Err(violation("missing error")),
            (_, Some(_), _) => Err(violation("unexpected entity")),
            (_, _, Some(_)) => Err(violation("unexpected error")),
        }
    }

    pub fn into_parts(self) -> RequestRecord<E> {
        let status = self.status();
        match self {
            Self::Idle | Self::Pending => RequestRecord {
                status,
                entity: None,
                error: None,
            },
            Self::Resolved(entity) => RequestRecord {
                status,
                entity: Some(entity),
                error: None,
            },
            Self::Rejected(error) => RequestRecord {
                status,
                entity: None,
                error: Some(error),
            },
        }
    }
}

/// Field-by-field form of a request state, as replaced by the direct driver.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord<E> {
    pub status: FetchStatus,
    pub entity: Option<E>,
    pub error: Option<FetchError>,
}

impl<E> RequestRecord<E> {
    pub fn idle() -> Self {
        Self {
            status: FetchStatus::Idle,
            entity: None,
            error: None,
        }
    }

    pub fn pending() -> Self {
        Self {
            status: FetchStatus::Pending,
            entity: None,
            error: None,
        }
    }

    pub fn resolved(entity: E) -> Self {
        Self {
            status: FetchStatus::Resolved,
            entity: Some(entity),
            error: None,
        }
    }

    pub fn rejected(error: FetchError) -> Self {
        Self {
            status: FetchStatus::Rejected,
            entity: None,
            error: Some(error),
        }
    }
}

impl<E> TryFrom<RequestRecord<E>> for RequestState<E> {
    type Error = LifecycleError;

    fn try_from(record: RequestRecord<E>) -> Result<Self, Self::Error> {
        Self::from_parts(record.status, record.entity, record.error)
    }
}
