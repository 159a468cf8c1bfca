mod application;
mod collection;
mod document;

pub use application::Application;
pub use collection::{DocumentCollection, ResourceCollection};
pub use document::DocumentRepository;

/// Base trait for repository implementations, declaring the primitive types
/// shared by all of the more specific repository traits.
pub trait Repository: Sized {
    /// The error type for underlying operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// A timestamp type for recording when documents change
    type DateTime: Send + Sync;

    /// A unique identifier for a document within a resource
    type DocumentId: Send + Sync;
}
