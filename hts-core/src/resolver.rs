use crate::{
    models::{
        DateRange, Entity, PageQuery, PaginatedResult, PaginationConfig, QueryDescriptor,
        SortKey, parse_sort,
    },
    ports::DocumentCollection,
    validation::{Schema, ValidationErrors},
};
use thiserror::Error;
use tokio::try_join;
use tracing::{Level, event};

/// The ways resolving a page can fail.
#[derive(Debug, Error)]
pub enum ResolveError<E> {
    /// The request was malformed; nothing was read from the store.
    /// This is a client error and should not be retried as-is.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The store failed to count or to fetch documents.
    #[error("store access failed: {0}")]
    Store(#[source] E),
}

/// Translates list requests into bounded store queries and paginated envelopes.
///
/// A resolver is configured once (see [`PaginationConfig`]) and then shared by
/// every request; it holds no per-request state.
///
/// # Example
///
/// ```
/// use hts_core::{models::{PaginationConfig, QueryDescriptor}, resolver::PaginationQueryResolver};
///
/// let resolver = PaginationQueryResolver::new(PaginationConfig::default());
///
/// let page = resolver.resolve(&QueryDescriptor::default()).unwrap();
/// assert_eq!((page.limit, page.offset), (20, 0));
///
/// let errors = resolver
///     .resolve(&QueryDescriptor::default().with_limit(0).with_sort("bad"))
///     .unwrap_err();
/// assert!(errors.contains("limit") && errors.contains("sort"));
/// ```
#[derive(Debug)]
pub struct PaginationQueryResolver {
    config: PaginationConfig,
    schema: Schema<Coerced>,
}

impl PaginationQueryResolver {
    /// Build a resolver and its validation schema from `config`.
    pub fn new(config: PaginationConfig) -> Self {
        let schema = descriptor_schema(&config);
        Self { config, schema }
    }

    /// The configuration this resolver was built with.
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Validate `descriptor` and substitute defaults.
    ///
    /// Every field is checked before returning, so the error lists all
    /// offending fields at once.
    pub fn resolve(&self, descriptor: &QueryDescriptor) -> Result<PageQuery, ValidationErrors> {
        let coerced = Coerced::new(descriptor, self.config.default_limit);
        self.schema.validate(&coerced)?;

        // Every field is `Ok` once the schema has passed
        Ok(PageQuery {
            limit: coerced.limit.unwrap_or(self.config.default_limit),
            offset: coerced.offset.unwrap_or_default(),
            sort: coerced.sort.unwrap_or_default(),
            range: coerced.range.unwrap_or_default(),
        })
    }

    /// Resolve one page of `collection`.
    ///
    /// The descriptor is validated before the store is touched. The unfiltered
    /// document count and the page itself are then fetched concurrently; if
    /// either fails, the whole call fails and no partial page is returned.
    pub async fn resolve_page<C: DocumentCollection>(
        &self,
        descriptor: &QueryDescriptor,
        collection: &C,
    ) -> Result<PaginatedResult<Entity<C::Id, C::Document>>, ResolveError<C::Error>> {
        let page = self.resolve(descriptor)?;
        let (limit, offset) = (page.limit, page.offset);
        let query = page.into_store_query(&self.config.range_field);

        event!(
            Level::DEBUG,
            limit,
            offset,
            order_by = query.order_by.len(),
            range = query.range.is_some(),
            "resolving page"
        );

        // `total` counts the whole collection, not just the range
        let (total, rows) =
            try_join!(collection.count(), collection.query(&query)).map_err(ResolveError::Store)?;

        let data = rows.into_iter().map(Entity::from).collect();
        Ok(PaginatedResult::new(data, total, limit, offset))
    }
}

impl Default for PaginationQueryResolver {
    fn default() -> Self {
        Self::new(PaginationConfig::default())
    }
}

/// A descriptor with each field coerced exactly once.
#[derive(Debug)]
struct Coerced {
    limit: Result<u64, String>,
    offset: Result<u64, String>,
    sort: Result<Vec<SortKey>, String>,
    range: Result<Option<DateRange>, String>,
}

impl Coerced {
    fn new(descriptor: &QueryDescriptor, default_limit: u64) -> Self {
        Self {
            limit: coerce_limit(text(&descriptor.limit), default_limit),
            offset: coerce_offset(text(&descriptor.offset)),
            sort: coerce_sort(text(&descriptor.sort)),
            range: coerce_range(text(&descriptor.range)),
        }
    }
}

fn descriptor_schema(config: &PaginationConfig) -> Schema<Coerced> {
    let max_limit = config.max_limit;
    Schema::new()
        .rule("limit", |c: &Coerced| outcome(&c.limit))
        .rule("limit", move |c: &Coerced| match (&c.limit, max_limit) {
            (Ok(limit), Some(max)) if *limit > max => {
                Err(format!("must be less than or equal to {max}"))
            }
            _ => Ok(()),
        })
        .rule("offset", |c: &Coerced| outcome(&c.offset))
        .rule("sort", |c: &Coerced| outcome(&c.sort))
        .rule("range", |c: &Coerced| outcome(&c.range))
}

fn outcome<T>(coerced: &Result<T, String>) -> Result<(), String> {
    coerced.as_ref().map(drop).map_err(Clone::clone)
}

// Blank values count as absent; anything else is parsed verbatim
fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn coerce_integer(value: &str) -> Result<i64, String> {
    value
        .parse::<i64>()
        .map_err(|_| format!("must be an integer, got `{value}`"))
}

fn coerce_limit(value: Option<&str>, default: u64) -> Result<u64, String> {
    let Some(value) = value else {
        return Ok(default);
    };

    let limit = coerce_integer(value)?;
    u64::try_from(limit)
        .ok()
        .filter(|limit| *limit >= 1)
        .ok_or_else(|| "must be greater than or equal to 1".to_owned())
}

fn coerce_offset(value: Option<&str>) -> Result<u64, String> {
    let Some(value) = value else {
        return Ok(0);
    };

    let offset = coerce_integer(value)?;
    u64::try_from(offset).map_err(|_| "must be greater than or equal to 0".to_owned())
}

fn coerce_sort(value: Option<&str>) -> Result<Vec<SortKey>, String> {
    value
        .map(parse_sort)
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(|err| err.to_string())
}

fn coerce_range(value: Option<&str>) -> Result<Option<DateRange>, String> {
    value
        .map(str::parse::<DateRange>)
        .transpose()
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RangeFilter, SortDirection, StoreQuery};
    use rstest::*;
    use std::{cmp::Ordering, sync::Mutex};

    type Doc = serde_json::Map<String, serde_json::Value>;

    /// A store kept in a vector, recording the last query it received.
    #[derive(Default)]
    struct VecCollection {
        docs: Vec<(Doc, u32)>,
        last_query: Mutex<Option<StoreQuery>>,
        fail_count: bool,
        fail_query: bool,
    }

    #[derive(Debug, Error)]
    #[error("store unavailable")]
    struct Unavailable;

    impl VecCollection {
        fn with_docs(docs: impl IntoIterator<Item = serde_json::Value>) -> Self {
            let docs = docs
                .into_iter()
                .zip(1..)
                .map(|(value, id)| match value {
                    serde_json::Value::Object(map) => (map, id),
                    _ => panic!("documents must be objects"),
                })
                .collect();
            Self {
                docs,
                ..Default::default()
            }
        }

        fn numbered(n: u32) -> Self {
            Self::with_docs((0..n).map(|i| serde_json::json!({ "n": i })))
        }

        fn failing(fail_count: bool, fail_query: bool) -> Self {
            Self {
                fail_count,
                fail_query,
                ..Self::numbered(3)
            }
        }

        fn last_query(&self) -> Option<StoreQuery> {
            self.last_query.lock().unwrap().clone()
        }
    }

    fn field_text(doc: &Doc, field: &str) -> String {
        match doc.get(field) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    impl DocumentCollection for VecCollection {
        type Id = u32;
        type Document = Doc;
        type Error = Unavailable;

        async fn count(&self) -> Result<u64, Self::Error> {
            if self.fail_count {
                return Err(Unavailable);
            }
            Ok(self.docs.len() as u64)
        }

        async fn query(&self, query: &StoreQuery) -> Result<Vec<(Doc, u32)>, Self::Error> {
            *self.last_query.lock().unwrap() = Some(query.clone());
            if self.fail_query {
                return Err(Unavailable);
            }

            let mut rows: Vec<_> = self
                .docs
                .iter()
                .filter(|(doc, _)| match &query.range {
                    Some(RangeFilter { field, range }) => {
                        let value = field_text(doc, field);
                        let day = value.get(..10).unwrap_or(value.as_str());
                        range.start_string().as_str() <= day && day <= range.end_string().as_str()
                    }
                    None => true,
                })
                .cloned()
                .collect();

            rows.sort_by(|(a, _), (b, _)| {
                query
                    .order_by
                    .iter()
                    .map(|key| {
                        let ord = field_text(a, &key.field).cmp(&field_text(b, &key.field));
                        match key.direction {
                            SortDirection::Asc => ord,
                            SortDirection::Desc => ord.reverse(),
                        }
                    })
                    .find(|ord| *ord != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });

            Ok(rows
                .into_iter()
                .skip(query.offset as usize)
                .take(query.limit as usize)
                .collect())
        }
    }

    #[fixture]
    fn resolver() -> PaginationQueryResolver {
        PaginationQueryResolver::default()
    }

    #[rstest]
    #[tokio::test]
    async fn test_defaults(resolver: PaginationQueryResolver) {
        let collection = VecCollection::numbered(30);
        let page = resolver
            .resolve_page(&QueryDescriptor::default(), &collection)
            .await
            .unwrap();

        assert_eq!((page.limit, page.offset, page.total), (20, 0, 30));
        assert_eq!(page.data.len(), 20);
        assert!(page.has_more);

        let query = collection.last_query().unwrap();
        assert!(query.order_by.is_empty());
        assert!(query.range.is_none());
    }

    #[rstest]
    #[case(20, 20, 0, false)]
    #[case(21, 20, 0, true)]
    #[case(25, 10, 20, false)]
    #[case(25, 10, 10, true)]
    #[case(0, 20, 0, false)]
    #[case(5, 10, 50, false)]
    #[tokio::test]
    async fn test_has_more(
        resolver: PaginationQueryResolver,
        #[case] total: u32,
        #[case] limit: u64,
        #[case] offset: u64,
        #[case] expected: bool,
    ) {
        let collection = VecCollection::numbered(total);
        let descriptor = QueryDescriptor::default()
            .with_limit(limit)
            .with_offset(offset);
        let page = resolver
            .resolve_page(&descriptor, &collection)
            .await
            .unwrap();

        assert_eq!(page.has_more, expected);
        assert_eq!(page.has_more, page.offset + page.limit < page.total);
        assert!(page.data.len() as u64 <= limit);
    }

    #[rstest]
    #[tokio::test]
    async fn test_last_partial_page(resolver: PaginationQueryResolver) {
        let collection = VecCollection::numbered(25);
        let descriptor = QueryDescriptor::default().with_limit(10).with_offset(20);
        let page = resolver
            .resolve_page(&descriptor, &collection)
            .await
            .unwrap();

        assert_eq!(page.data.len(), 5);
        assert_eq!(page.total, 25);
        assert!(!page.has_more);
        assert_eq!(page.data[0].id, 21);
    }

    #[rstest]
    #[tokio::test]
    async fn test_sort_precedence(resolver: PaginationQueryResolver) {
        let collection = VecCollection::with_docs([
            serde_json::json!({ "name": "b", "date": "2024-01-01" }),
            serde_json::json!({ "name": "a", "date": "2024-01-01" }),
            serde_json::json!({ "name": "a", "date": "2024-03-01" }),
            serde_json::json!({ "name": "b", "date": "2024-02-01" }),
        ]);
        let descriptor = QueryDescriptor::default().with_sort("name:asc&date:desc");
        let page = resolver
            .resolve_page(&descriptor, &collection)
            .await
            .unwrap();

        assert_eq!(
            collection.last_query().unwrap().order_by,
            vec![SortKey::asc("name"), SortKey::desc("date")]
        );
        let ids: Vec<_> = page.data.iter().map(|entity| entity.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_idempotent(resolver: PaginationQueryResolver) {
        let collection = VecCollection::numbered(12);
        let descriptor = QueryDescriptor::default()
            .with_limit(5)
            .with_offset(3)
            .with_sort("n:desc");

        let first = resolver.resolve_page(&descriptor, &collection).await.unwrap();
        let second = resolver.resolve_page(&descriptor, &collection).await.unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn test_total_ignores_range(resolver: PaginationQueryResolver) {
        let collection = VecCollection::with_docs([
            serde_json::json!({ "date": "2024-01-05" }),
            serde_json::json!({ "date": "2024-01-20T08:30:00Z" }),
            serde_json::json!({ "date": "2024-02-11" }),
            serde_json::json!({ "date": "2023-12-31" }),
        ]);
        let descriptor = QueryDescriptor::default()
            .with_limit(1)
            .with_range("2024-01-01:2024-01-31");
        let page = resolver
            .resolve_page(&descriptor, &collection)
            .await
            .unwrap();

        let query = collection.last_query().unwrap();
        assert_eq!(query.range.as_ref().map(|r| r.field.as_str()), Some("date"));

        // Two documents match the range but the whole collection is counted
        assert_eq!(page.total, 4);
        assert_eq!(page.data.len(), 1);
        assert!(page.has_more);
    }

    #[rstest]
    #[case(QueryDescriptor::default().with_limit(0), &["limit"])]
    #[case(QueryDescriptor::default().with_limit(-3), &["limit"])]
    #[case(QueryDescriptor::default().with_limit("ten"), &["limit"])]
    #[case(QueryDescriptor::default().with_offset(-1), &["offset"])]
    #[case(QueryDescriptor::default().with_offset("1.5"), &["offset"])]
    #[case(QueryDescriptor::default().with_sort("badformat"), &["sort"])]
    #[case(QueryDescriptor::default().with_sort("name:sideways"), &["sort"])]
    #[case(QueryDescriptor::default().with_range("2024-01-01"), &["range"])]
    #[case(QueryDescriptor::default().with_range("2024-02-30:2024-03-01"), &["range"])]
    #[case(QueryDescriptor::default().with_sort("name:asc "), &["sort"])]
    #[case(QueryDescriptor::default().with_range(" 2024-01-01:2024-01-02"), &["range"])]
    #[case(QueryDescriptor::default().with_limit(" 5"), &["limit"])]
    #[case(QueryDescriptor::default().with_limit(0).with_sort("bad"), &["limit", "sort"])]
    #[case(
        QueryDescriptor::default().with_limit("x").with_offset(-1).with_sort("s").with_range("r"),
        &["limit", "offset", "sort", "range"]
    )]
    #[tokio::test]
    async fn test_rejected_before_store(
        resolver: PaginationQueryResolver,
        #[case] descriptor: QueryDescriptor,
        #[case] fields: &[&str],
    ) {
        let collection = VecCollection::numbered(3);
        let err = resolver
            .resolve_page(&descriptor, &collection)
            .await
            .unwrap_err();

        match err {
            ResolveError::Validation(errors) => {
                assert_eq!(errors.fields().collect::<Vec<_>>(), fields);
                for field in fields {
                    assert!(!errors.messages(field).is_empty());
                }
            }
            ResolveError::Store(_) => panic!("expected a validation error"),
        }
        assert!(collection.last_query().is_none());
    }

    #[rstest]
    #[case::count(true, false)]
    #[case::query(false, true)]
    #[case::both(true, true)]
    #[tokio::test]
    async fn test_store_failure(
        resolver: PaginationQueryResolver,
        #[case] fail_count: bool,
        #[case] fail_query: bool,
    ) {
        let collection = VecCollection::failing(fail_count, fail_query);
        let err = resolver
            .resolve_page(&QueryDescriptor::default(), &collection)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Store(Unavailable)));
    }

    #[rstest]
    fn test_blank_values_are_defaults(resolver: PaginationQueryResolver) {
        let descriptor = QueryDescriptor {
            limit: Some("".to_owned()),
            offset: Some("  ".to_owned()),
            sort: Some("".to_owned()),
            range: Some("".to_owned()),
        };
        let page = resolver.resolve(&descriptor).unwrap();
        assert_eq!(
            page,
            PageQuery {
                limit: 20,
                offset: 0,
                sort: Vec::new(),
                range: None,
            }
        );
    }

    #[test]
    fn test_configured_limits() {
        let resolver = PaginationQueryResolver::new(PaginationConfig {
            default_limit: 5,
            max_limit: Some(50),
            range_field: "recorded_on".to_owned(),
        });

        let page = resolver.resolve(&QueryDescriptor::default()).unwrap();
        assert_eq!(page.limit, 5);

        let errors = resolver
            .resolve(&QueryDescriptor::default().with_limit(51))
            .unwrap_err();
        assert_eq!(errors.messages("limit"), ["must be less than or equal to 50"]);

        let query = resolver
            .resolve(&QueryDescriptor::default().with_range("2024-01-01:2024-01-02"))
            .unwrap()
            .into_store_query(&resolver.config().range_field);
        assert_eq!(query.range.unwrap().field, "recorded_on");
    }

    #[rstest]
    fn test_messages_name_expected_format(resolver: PaginationQueryResolver) {
        let errors = resolver
            .resolve(&QueryDescriptor::default().with_sort("name").with_range("soon"))
            .unwrap_err();
        assert!(errors.messages("sort")[0].contains("field:asc"));
        assert!(errors.messages("range")[0].contains("YYYY-MM-DD"));
    }

    #[rstest]
    fn test_inverted_range_is_passed_through(resolver: PaginationQueryResolver) {
        let page = resolver
            .resolve(&QueryDescriptor::default().with_range("2024-03-01:2024-01-01"))
            .unwrap();
        assert!(page.range.unwrap().is_inverted());
    }
}
