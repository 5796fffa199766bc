//! Product Lines

use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback wholesale base for the standard line, in major units.
const STANDARD_WHOLESALE_FALLBACK: i64 = 18;

/// Fallback wholesale base for the USA line, in major units.
const USA_WHOLESALE_FALLBACK: i64 = 28;

/// Errors loading product line tables.
#[derive(Debug, Error)]
pub enum LinesError {
    /// IO error reading the lines file
    #[error("failed to read product lines file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse product lines YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A wholesale price was negative
    #[error("product line {0} has a negative wholesale price")]
    NegativeWholesale(ProductLine),
}

/// Fulfillment tier a piece is produced on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductLine {
    /// On-demand global supply.
    #[default]
    Standard,

    /// USA-made and printed.
    Usa,
}

impl ProductLine {
    /// Wire tag, as used in requests and comments.
    pub fn as_str(self) -> &'static str {
        match self {
            ProductLine::Standard => "standard",
            ProductLine::Usa => "usa",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            ProductLine::Standard => "Standard Drop",
            ProductLine::Usa => "USA Maker Line",
        }
    }

    fn fallback_wholesale(self) -> Decimal {
        match self {
            ProductLine::Standard => Decimal::from(STANDARD_WHOLESALE_FALLBACK),
            ProductLine::Usa => Decimal::from(USA_WHOLESALE_FALLBACK),
        }
    }
}

impl std::fmt::Display for ProductLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product line record as stored in the lines dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineRecord {
    /// Line tag
    pub id: ProductLine,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Example wholesale base, in major units
    #[serde(default, alias = "wholesaleExample")]
    pub wholesale_example: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct LinesFixture {
    lines: Vec<LineRecord>,
}

/// Wholesale base prices per product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingTables {
    standard: Decimal,
    usa: Decimal,
}

impl Default for PricingTables {
    fn default() -> Self {
        Self {
            standard: ProductLine::Standard.fallback_wholesale(),
            usa: ProductLine::Usa.fallback_wholesale(),
        }
    }
}

impl PricingTables {
    /// Build tables from line records, falling back for missing lines or prices.
    ///
    /// # Errors
    ///
    /// Returns [`LinesError::NegativeWholesale`] if a record carries a negative price.
    pub fn from_records(records: &[LineRecord]) -> Result<Self, LinesError> {
        let resolve = |line: ProductLine| -> Result<Decimal, LinesError> {
            let price = records
                .iter()
                .find(|record| record.id == line)
                .and_then(|record| record.wholesale_example)
                .unwrap_or_else(|| line.fallback_wholesale());

            if price.is_sign_negative() {
                return Err(LinesError::NegativeWholesale(line));
            }

            Ok(price)
        };

        Ok(Self {
            standard: resolve(ProductLine::Standard)?,
            usa: resolve(ProductLine::Usa)?,
        })
    }

    /// Parse tables from a YAML document with a top-level `lines` list.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or holds invalid prices.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LinesError> {
        let fixture: LinesFixture = serde_norway::from_str(yaml)?;

        Self::from_records(&fixture.lines)
    }

    /// Load tables from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LinesError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Wholesale base for the given line, in major units.
    pub fn wholesale(&self, line: ProductLine) -> Decimal {
        match line {
            ProductLine::Standard => self.standard,
            ProductLine::Usa => self.usa,
        }
    }
}
