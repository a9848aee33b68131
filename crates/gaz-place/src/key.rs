//! Ancestry keys for administrative divisions
//!
//! Provides [`AncestryKey`], the dot-separated administrative code that names a
//! position in the country → admin1 → admin2 → … hierarchy.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Separator between administrative codes
pub const KEY_SEPARATOR: char = '.';

/// Hierarchical administrative code
///
/// # Examples
/// - `US` → a country
/// - `US.CA` → an admin1 division of `US`
/// - `US.CA.037` → an admin2 division of `US.CA`
///
/// Keys order by specificity first (number of components), then
/// lexicographically, so sorting a set of keys visits every country-level key
/// before any admin1 key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AncestryKey(String);

impl AncestryKey {
    /// Build a key from its components
    ///
    /// # Errors
    /// Returns error if there are no components, or a component is empty or
    /// contains the separator.
    pub fn from_components<I, S>(components: I) -> Result<Self, KeyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut key = String::new();
        for component in components {
            let component = component.as_ref();
            validate_component(component)?;
            if !key.is_empty() {
                key.push(KEY_SEPARATOR);
            }
            key.push_str(component);
        }
        if key.is_empty() {
            return Err(KeyError::Empty);
        }
        Ok(Self(key))
    }

    /// Key as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of components
    #[inline]
    #[must_use]
    pub fn specificity(&self) -> usize {
        self.0.split(KEY_SEPARATOR).count()
    }

    /// Iterator over components, country first
    #[inline]
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split(KEY_SEPARATOR)
    }

    /// First component (the country code)
    #[inline]
    #[must_use]
    pub fn country(&self) -> &str {
        self.components().next().unwrap_or_default()
    }

    /// Key with the last component removed, `None` for a country-level key
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rfind(KEY_SEPARATOR)
            .map(|dot| Self(self.0[..dot].to_string()))
    }

    /// Successive parents, nearest first
    ///
    /// `US.CA.037` yields `US.CA`, then `US`.
    pub fn ancestors(&self) -> impl Iterator<Item = AncestryKey> + '_ {
        std::iter::successors(self.parent(), AncestryKey::parent)
    }

    /// Check if this key is a strict prefix of another
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        other.0.len() > self.0.len()
            && other.0.starts_with(&self.0)
            && other.0[self.0.len()..].starts_with(KEY_SEPARATOR)
    }
}

fn validate_component(component: &str) -> Result<(), KeyError> {
    if component.is_empty() {
        Err(KeyError::EmptyComponent)
    } else if component.contains(KEY_SEPARATOR) {
        Err(KeyError::InvalidComponent(component.to_string()))
    } else {
        Ok(())
    }
}

impl Ord for AncestryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.specificity()
            .cmp(&other.specificity())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for AncestryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for AncestryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AncestryKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(KeyError::Empty);
        }
        Self::from_components(s.split(KEY_SEPARATOR))
    }
}

impl TryFrom<String> for AncestryKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AncestryKey> for String {
    fn from(key: AncestryKey) -> Self {
        key.0
    }
}

impl AsRef<str> for AncestryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors related to ancestry keys
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// Key has no components
    #[error("ancestry key is empty")]
    Empty,

    /// A component is empty (e.g. `US..037`)
    #[error("ancestry key contains an empty component")]
    EmptyComponent,

    /// A component contains the separator
    #[error("invalid ancestry key component: '{0}'")]
    InvalidComponent(String),
}
