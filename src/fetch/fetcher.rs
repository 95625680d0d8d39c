use std::sync::Arc;

use async_trait::async_trait;

use super::error::FetchError;

/// Loads a single entity by name.
///
/// Implementations must be safe to call while an earlier call is still in
/// flight; the lifecycle never cancels a fetch.
#[async_trait]
pub trait EntityFetcher: Send + Sync {
    type Entity: Clone + PartialEq + Send + Sync + 'static;

    async fn fetch(&self, name: &str) -> Result<Self::Entity, FetchError>;
}

#[async_trait]
impl<F: EntityFetcher + ?Sized> EntityFetcher for Arc<F> {
    type Entity = F::Entity;

    async fn fetch(&self, name: &str) -> Result<Self::Entity, FetchError> {
        (**self).fetch(name).await
    }
}
