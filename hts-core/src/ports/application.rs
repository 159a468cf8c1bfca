use super::{DocumentRepository, Repository};
use crate::{models::Resource, resolver::PaginationQueryResolver};

/// The bundle of collaborators an API server is built around.
///
/// An application owns the repository and the pagination resolver, and decides
/// how new document identifiers and timestamps are produced. Authentication is
/// left to whatever fronts the API.
pub trait Application {
    /// Application-specific document contents
    type DocumentData;

    /// The backing store
    type Repository: DocumentRepository<Self::DocumentData>;

    /// Access the repository.
    fn database(&self) -> &Self::Repository;

    /// Access the pagination resolver.
    fn resolver(&self) -> &PaginationQueryResolver;

    /// The current time, for stamping writes.
    fn now(&self) -> <Self::Repository as Repository>::DateTime;

    /// Produce the identifier for a document about to be created.
    fn generate_document_id(
        &self,
        resource: Resource,
        data: &Self::DocumentData,
    ) -> <Self::Repository as Repository>::DocumentId;
}
