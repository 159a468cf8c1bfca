use crate::models::{Entity, Resource, StoreQuery};

use super::ResourceCollection;

/// Repository interface for document CRUD across every [`Resource`].
///
/// Documents are opaque, application-defined `DocumentData`. Implementations
/// store the identifier next to the document, never inside it, so that an
/// `id` field submitted by a client cannot shadow the real identifier.
pub trait DocumentRepository<DocumentData>: super::Repository {
    /// Count every document of `resource`.
    fn count_documents(
        &self,
        resource: Resource,
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Fetch the documents of `resource` selected by `query`, in order.
    fn query_documents(
        &self,
        resource: Resource,
        query: &StoreQuery,
    ) -> impl Future<Output = Result<Vec<(DocumentData, Self::DocumentId)>, Self::Error>> + Send;

    /// Store a new document.
    fn create_document(
        &self,
        resource: Resource,
        document_id: Self::DocumentId,
        data: DocumentData,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Entity<Self::DocumentId, DocumentData>, Self::Error>> + Send;

    /// Retrieve a document.
    ///
    /// # Returns
    ///
    /// Ok(None) if the document does not exist.
    fn get_document(
        &self,
        resource: Resource,
        document_id: Self::DocumentId,
    ) -> impl Future<Output = Result<Option<Entity<Self::DocumentId, DocumentData>>, Self::Error>> + Send;

    /// Replace the contents of a document.
    ///
    /// # Returns
    ///
    /// - Ok(Some(entity)) with the stored result if successful
    /// - Ok(None) if the document does not exist
    /// - Err otherwise
    fn update_document(
        &self,
        resource: Resource,
        document_id: Self::DocumentId,
        data: DocumentData,
        as_of: Self::DateTime,
    ) -> impl Future<Output = Result<Option<Entity<Self::DocumentId, DocumentData>>, Self::Error>> + Send;

    /// Remove a document, returning whether it existed.
    fn delete_document(
        &self,
        resource: Resource,
        document_id: Self::DocumentId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// View `resource` as a [`DocumentCollection`](super::DocumentCollection).
    fn collection(&self, resource: Resource) -> ResourceCollection<'_, Self, DocumentData> {
        ResourceCollection::new(self, resource)
    }
}
