use super::{DateRange, SortKey};

/// A validated list request, with defaults substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Maximum number of items in the page, at least 1
    pub limit: u64,
    /// Number of items to skip
    pub offset: u64,
    /// Ordering clauses, primary first
    pub sort: Vec<SortKey>,
    /// Optional inclusive date filter
    pub range: Option<DateRange>,
}

impl PageQuery {
    /// Build the query handed to a document collection, filtering `range` on
    /// the document field named `range_field`.
    pub fn into_store_query(self, range_field: &str) -> StoreQuery {
        StoreQuery {
            order_by: self.sort,
            range: self.range.map(|range| RangeFilter {
                field: range_field.to_owned(),
                range,
            }),
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Restrict a query to documents whose `field` holds a date within `range`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeFilter {
    /// The document field holding a `YYYY-MM-DD` date (or a timestamp starting with one)
    pub field: String,
    /// The inclusive interval
    pub range: DateRange,
}

/// A bounded, ordered query against a document collection.
///
/// Stores apply `order_by` in sequence, then `range`, then skip `offset`
/// documents and return at most `limit`. With no ordering clauses the store's
/// natural order applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreQuery {
    /// Ordering clauses, primary first
    pub order_by: Vec<SortKey>,
    /// Optional date filter
    pub range: Option<RangeFilter>,
    /// Maximum number of documents to return
    pub limit: u64,
    /// Number of documents to skip
    pub offset: u64,
}
