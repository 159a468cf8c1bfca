use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The kinds of documents the service keeps.
///
/// Each resource is an independent collection; identifiers are only unique
/// within one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Resource {
    /// Health issues a user is tracking
    Issues,
    /// Medications
    Meds,
    /// Logged symptoms
    Symptoms,
    /// Accounts
    Users,
}

impl Resource {
    /// Every resource, in a stable order.
    pub const ALL: [Resource; 4] = [Self::Issues, Self::Meds, Self::Symptoms, Self::Users];

    /// The collection name, as used in URLs and storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issues => "issues",
            Self::Meds => "meds",
            Self::Symptoms => "symptoms",
            Self::Users => "users",
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collection name that is not one of the known resources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource `{0}`")]
pub struct UnknownResource(pub String);

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.as_str() == s)
            .ok_or_else(|| UnknownResource(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for resource in Resource::ALL {
            assert_eq!(resource.as_str().parse::<Resource>(), Ok(resource));
        }
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            "reports".parse::<Resource>(),
            Err(UnknownResource("reports".to_owned()))
        );
    }

    #[test]
    fn test_serde_matches_display() {
        for resource in Resource::ALL {
            let json = serde_json::to_value(resource).unwrap();
            assert_eq!(json, serde_json::Value::String(resource.to_string()));
        }
    }
}
