use std::sync::Arc;

use async_trait::async_trait;

use crate::{CloudError, Description, Filter, Mutation, ProviderParams, ResourceKind, Submission};

/// The remote provider API as seen by actions.
///
/// Implementations wrap a provider SDK client bound to one region and one
/// set of credentials. All calls may fail with [`CloudError::Remote`].
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// Submit a state-changing call. Success means "accepted", not "done".
    async fn mutate(&self, mutation: Mutation) -> Result<Submission, CloudError>;

    /// List resources of `kind` matching `filter`.
    async fn describe(&self, kind: ResourceKind, filter: &Filter)
    -> Result<Description, CloudError>;
}

/// Builds a [`CloudApi`] client for the region and credentials of one
/// input record.
pub trait CloudConnector: Send + Sync {
    /// Create a client.
    fn connect(&self, params: &ProviderParams) -> Result<Arc<dyn CloudApi>, CloudError>;
}

#[async_trait]
impl<T: CloudApi + ?Sized> CloudApi for Arc<T> {
    async fn mutate(&self, mutation: Mutation) -> Result<Submission, CloudError> {
        (**self).mutate(mutation).await
    }

    async fn describe(
        &self,
        kind: ResourceKind,
        filter: &Filter,
    ) -> Result<Description, CloudError> {
        (**self).describe(kind, filter).await
    }
}
