mod config;
mod descriptor;
mod entity;
mod envelope;
mod page;
mod range;
mod resource;
mod sort;

pub use config::PaginationConfig;
pub use descriptor::QueryDescriptor;
pub use entity::Entity;
pub use envelope::{PaginatedResult, has_more};
pub use page::{PageQuery, RangeFilter, StoreQuery};
pub use range::{DateRange, RangeError};
pub use resource::{Resource, UnknownResource};
pub use sort::{SortDirection, SortError, SortKey, parse_sort};
