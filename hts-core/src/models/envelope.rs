/// The uniform envelope around one page of a list.
///
/// Serializes as `{ "data": [...], "total": n, "limit": n, "offset": n, "hasMore": bool }`.
///
/// Note that `total` is the size of the whole collection, independent of any
/// range filter applied to `data`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PaginatedResult<T> {
    /// The items of this page
    pub data: Vec<T>,
    /// Number of documents in the collection
    pub total: u64,
    /// The page size that was applied
    pub limit: u64,
    /// The offset that was applied
    pub offset: u64,
    /// Whether documents remain beyond this page
    pub has_more: bool,
}

impl<T> PaginatedResult<T> {
    /// Assemble an envelope, deriving `has_more` from the other fields.
    pub fn new(data: Vec<T>, total: u64, limit: u64, offset: u64) -> Self {
        Self {
            data,
            total,
            limit,
            offset,
            has_more: has_more(total, limit, offset),
        }
    }

    /// Transform the items while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
            has_more: self.has_more,
        }
    }
}

/// `offset + limit < total`, without overflowing.
pub fn has_more(total: u64, limit: u64, offset: u64) -> bool {
    offset.saturating_add(limit) < total
}
