use indexmap::IndexMap;
use std::fmt::Display;

type FieldMap = IndexMap<&'static str, Vec<String>, rustc_hash::FxBuildHasher>;

/// A single constraint on a value of type `T`.
///
/// A rule returns `Err` with a human-readable message when the constraint is
/// violated.
pub type Rule<T> = Box<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// An explicit list of `(field, rule)` pairs.
///
/// Unlike attribute-driven validation, a schema is an ordinary value: it can be
/// built at runtime from configuration and evaluated against any `T`.
/// [`Schema::validate`] runs every rule, so all violations are reported
/// together rather than stopping at the first.
///
/// ```
/// use hts_core::validation::Schema;
///
/// let schema = Schema::<i64>::new()
///     .rule("value", |v| if *v > 0 { Ok(()) } else { Err("must be positive".into()) })
///     .rule("value", |v| if v % 2 == 0 { Ok(()) } else { Err("must be even".into()) });
///
/// let errors = schema.validate(&-1).unwrap_err();
/// assert_eq!(errors.messages("value"), ["must be positive", "must be even"]);
/// ```
pub struct Schema<T> {
    rules: Vec<(&'static str, Rule<T>)>,
}

impl<T> Schema<T> {
    /// An empty schema, which accepts everything.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule for `field`. A field may have any number of rules.
    pub fn rule(
        mut self,
        field: &'static str,
        rule: impl Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push((field, Box::new(rule)));
        self
    }

    /// The distinct fields this schema checks, in the order they were added.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        let mut seen = Vec::new();
        self.rules.iter().filter_map(move |(field, _)| {
            if seen.contains(field) {
                None
            } else {
                seen.push(*field);
                Some(*field)
            }
        })
    }

    /// Evaluate every rule against `value`.
    pub fn validate(&self, value: &T) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, rule) in &self.rules {
            if let Err(message) = rule(value) {
                errors.add(field, message);
            }
        }
        errors.into_result()
    }
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.fields().collect::<Vec<_>>())
            .finish()
    }
}

/// Every violation found while validating one value, grouped by field.
///
/// Fields keep the order in which they first failed, and each field keeps its
/// messages in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(FieldMap);

impl ValidationErrors {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A collection holding a single violation.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Record a violation of `field`.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Whether no violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one violation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether `field` has at least one violation.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// The messages recorded for `field`.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// The failing fields, in the order they first failed.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// One [`FieldError`] per failing field.
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.0
            .iter()
            .map(|(field, messages)| FieldError {
                field: (*field).to_owned(),
                messages: messages.clone(),
            })
            .collect()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed")?;
        for (i, (field, messages)) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{field} {}", messages.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// The violations of a single field, in a form suitable for API responses.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldError {
    /// The offending field
    pub field: String,
    /// What is wrong with it
    pub messages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positive(value: &i64) -> Result<(), String> {
        if *value > 0 {
            Ok(())
        } else {
            Err("must be positive".to_owned())
        }
    }

    fn small(value: &i64) -> Result<(), String> {
        if *value < 100 {
            Ok(())
        } else {
            Err("must be below 100".to_owned())
        }
    }

    #[test]
    fn test_valid() {
        let schema = Schema::new().rule("a", positive).rule("b", small);
        assert_eq!(schema.validate(&5), Ok(()));
    }

    #[test]
    fn test_collects_every_field() {
        let schema = Schema::new()
            .rule("a", positive)
            .rule("b", |v: &i64| small(&(v + 200)));
        let errors = schema.validate(&-1).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(errors.messages("a"), ["must be positive"]);
        assert_eq!(errors.messages("b"), ["must be below 100"]);
        assert!(errors.messages("c").is_empty());
    }

    #[test]
    fn test_rules_on_one_field_accumulate() {
        let schema = Schema::new()
            .rule("value", positive)
            .rule("value", |v: &i64| small(&v.abs()));
        let errors = schema.validate(&-500).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.messages("value"),
            ["must be positive", "must be below 100"]
        );
    }

    #[test]
    fn test_schema_fields_are_distinct() {
        let schema = Schema::new()
            .rule("a", positive)
            .rule("b", small)
            .rule("a", small);
        assert_eq!(schema.fields().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn test_display() {
        let mut errors = ValidationErrors::single("limit", "must be at least 1");
        errors.add("sort", "bad segment");
        assert_eq!(
            errors.to_string(),
            "validation failed: limit must be at least 1; sort bad segment"
        );
    }

    #[test]
    fn test_field_errors_serialize() {
        let errors = ValidationErrors::single("range", "bad range");
        assert_eq!(
            serde_json::to_value(errors.field_errors()).unwrap(),
            serde_json::json!([{ "field": "range", "messages": ["bad range"] }])
        );
    }
}
