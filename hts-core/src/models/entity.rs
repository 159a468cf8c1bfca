/// A stored document merged with its identifier.
///
/// With the `serde` feature, the document's fields are flattened next to the
/// `id` key, so `{"name": "ibuprofen"}` stored under `42` serializes as
/// `{"id": 42, "name": "ibuprofen"}`. Stores are expected to keep `id` out of
/// the document itself.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity<Id, T> {
    /// The document identifier
    pub id: Id,
    /// The stored fields
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub data: T,
}

impl<Id, T> From<(T, Id)> for Entity<Id, T> {
    fn from((data, id): (T, Id)) -> Self {
        Self { id, data }
    }
}
