use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The direction of a single ordering clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SortDirection {
    /// Smallest value first
    Asc,
    /// Largest value first
    Desc,
}

impl SortDirection {
    /// The lowercase keyword used in sort expressions (and in SQL).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(SortError::Direction(other.to_owned())),
        }
    }
}

/// One `(field, direction)` ordering clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortKey {
    /// The document field to order by
    pub field: String,
    /// Ascending or descending
    pub direction: SortDirection,
}

impl SortKey {
    /// Order by `field`, smallest first.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Order by `field`, largest first.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.field, self.direction)
    }
}

/// A sort expression that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// A segment is not of the form `field:direction`
    #[error("segment `{0}` must look like `field:asc` or `field:desc`")]
    Segment(String),
    /// The direction of a segment is neither `asc` nor `desc`
    #[error("direction `{0}` must be `asc` or `desc`")]
    Direction(String),
}

/// Parse a sort expression of the form `field1:asc&field2:desc`.
///
/// The returned keys preserve left-to-right precedence: the first key is the
/// primary ordering. A single leading `&` is tolerated. The field is everything
/// before the last `:` of a segment, so it may itself contain colons, but it
/// may not be empty.
pub fn parse_sort(input: &str) -> Result<Vec<SortKey>, SortError> {
    let input = input.strip_prefix('&').unwrap_or(input);
    input.split('&').map(parse_segment).collect()
}

fn parse_segment(segment: &str) -> Result<SortKey, SortError> {
    let (field, direction) = segment
        .rsplit_once(':')
        .filter(|(field, _)| !field.is_empty())
        .ok_or_else(|| SortError::Segment(segment.to_owned()))?;

    Ok(SortKey {
        field: field.to_owned(),
        direction: direction.parse()?,
    })
}
