//! Catalog

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs,
    path::Path,
};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two records share the same identifier
    #[error("duplicate monument id: {0}")]
    DuplicateMonument(MonumentId),

    /// A markup multiplier was zero or negative
    #[error("monument {0} has a non-positive markup multiplier")]
    InvalidMarkup(MonumentId),
}

/// Monument identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonumentId(String);

impl MonumentId {
    /// Creates a new identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MonumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for MonumentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A catalog record for a single apparel design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monument {
    /// Unique identifier
    pub id: MonumentId,

    /// URL slug
    pub slug: String,

    /// Display title
    pub title: String,

    /// Retail markup applied on top of the product line's wholesale base
    #[serde(alias = "markupStd")]
    pub markup_std: Decimal,

    /// Descriptive copy
    #[serde(default)]
    pub narrative: String,

    /// Image path
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    monuments: Vec<Monument>,
}

/// Immutable, id-indexed set of monuments.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    monuments: Vec<Monument>,
    index: FxHashMap<MonumentId, usize>,
}

impl Catalog {
    /// Build a catalog from a list of monuments.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateMonument`]: two monuments share an id.
    /// - [`CatalogError::InvalidMarkup`]: a markup multiplier is not positive.
    pub fn new(monuments: Vec<Monument>) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();

        for (position, monument) in monuments.iter().enumerate() {
            if monument.markup_std <= Decimal::ZERO {
                return Err(CatalogError::InvalidMarkup(monument.id.clone()));
            }

            if index.insert(monument.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateMonument(monument.id.clone()));
            }
        }

        Ok(Self { monuments, index })
    }

    /// Parse a catalog from a YAML document with a top-level `monuments` list.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or the records are invalid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        Self::new(fixture.monuments)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Find a monument by identifier.
    pub fn find(&self, id: &MonumentId) -> Option<&Monument> {
        self.index
            .get(id)
            .and_then(|position| self.monuments.get(*position))
    }

    /// Find a monument by slug.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Monument> {
        self.monuments.iter().find(|monument| monument.slug == slug)
    }

    /// Iterate monuments in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Monument> {
        self.monuments.iter()
    }

    /// Number of monuments.
    pub fn len(&self) -> usize {
        self.monuments.len()
    }

    /// Whether the catalog has no monuments.
    pub fn is_empty(&self) -> bool {
        self.monuments.is_empty()
    }
}
