/// Pagination defaults, injected into the
/// [`PaginationQueryResolver`](crate::resolver::PaginationQueryResolver) at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaginationConfig {
    /// Page size used when a request does not specify `limit`
    #[cfg_attr(feature = "serde", serde(default = "default_limit"))]
    pub default_limit: u64,

    /// Largest accepted `limit`; unbounded when absent
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub max_limit: Option<u64>,

    /// The document field a `range` filters on
    #[cfg_attr(feature = "serde", serde(default = "default_range_field"))]
    pub range_field: String,
}

fn default_limit() -> u64 {
    20
}

fn default_range_field() -> String {
    "date".to_owned()
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: None,
            range_field: default_range_field(),
        }
    }
}
