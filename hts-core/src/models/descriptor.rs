/// The raw parameters of a paginated list request.
///
/// Every field arrives as optional text (typically from a query string) and is
/// only coerced and validated by the
/// [`PaginationQueryResolver`](crate::resolver::PaginationQueryResolver).
/// Blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryDescriptor {
    /// Maximum number of items in the page (default 20, at least 1)
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub limit: Option<String>,

    /// Number of items to skip (default 0)
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub offset: Option<String>,

    /// Ordering, e.g. `name:asc&date:desc`; the first pair is the primary key
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub sort: Option<String>,

    /// Inclusive date interval, e.g. `2024-01-01:2024-01-31`
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub range: Option<String>,
}

impl QueryDescriptor {
    /// Set the `limit` parameter.
    pub fn with_limit(mut self, limit: impl ToString) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    /// Set the `offset` parameter.
    pub fn with_offset(mut self, offset: impl ToString) -> Self {
        self.offset = Some(offset.to_string());
        self
    }

    /// Set the `sort` parameter.
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set the `range` parameter.
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }
}
