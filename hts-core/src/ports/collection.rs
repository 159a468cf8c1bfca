use crate::models::{Resource, StoreQuery};
use std::marker::PhantomData;

use super::DocumentRepository;

/// An ordered collection of documents that a page can be resolved against.
///
/// This is the only capability the
/// [`PaginationQueryResolver`](crate::resolver::PaginationQueryResolver) needs
/// from a store. Implementations must tolerate concurrent reads; the resolver
/// issues `count` and `query` at the same time.
pub trait DocumentCollection: Send + Sync {
    /// The identifier attached to each document
    type Id: Send;

    /// The stored representation of a document
    type Document: Send;

    /// The error type for underlying operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Count every document in the collection, ignoring any filter.
    fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Fetch the documents selected by `query`, in order, paired with their identifiers.
    fn query(
        &self,
        query: &StoreQuery,
    ) -> impl Future<Output = Result<Vec<(Self::Document, Self::Id)>, Self::Error>> + Send;
}

/// A view of one resource of a [`DocumentRepository`] as a [`DocumentCollection`].
pub struct ResourceCollection<'a, R, Data> {
    repository: &'a R,
    resource: Resource,
    _data: PhantomData<fn() -> Data>,
}

impl<'a, R, Data> ResourceCollection<'a, R, Data> {
    /// Wrap `resource` of `repository`.
    pub fn new(repository: &'a R, resource: Resource) -> Self {
        Self {
            repository,
            resource,
            _data: PhantomData,
        }
    }

    /// The resource this collection reads.
    pub fn resource(&self) -> Resource {
        self.resource
    }
}

impl<'a, R, Data> DocumentCollection for ResourceCollection<'a, R, Data>
where
    R: DocumentRepository<Data> + Sync,
    Data: Send,
{
    type Id = R::DocumentId;
    type Document = Data;
    type Error = R::Error;

    fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send {
        self.repository.count_documents(self.resource)
    }

    fn query(
        &self,
        query: &StoreQuery,
    ) -> impl Future<Output = Result<Vec<(Self::Document, Self::Id)>, Self::Error>> + Send {
        self.repository.query_documents(self.resource, query)
    }
}
