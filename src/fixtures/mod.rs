//! Fixtures
//!
//! YAML skip lists in the same shape as the skips API. The fallback catalog is
//! compiled in so it is available even when nothing on disk is.

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::{catalog::records::SkipRecord, prices::PriceError, products::Product};

const FALLBACK_SKIPS: &str = include_str!("../../fixtures/skips/fallback.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price in a record
    #[error("Invalid price format: {0}")]
    InvalidPrice(#[from] PriceError),
}

/// Wrapper for skips in YAML
#[derive(Debug, Deserialize)]
pub struct SkipsFixture {
    /// Skip records in catalog order
    pub skips: Vec<SkipRecord>,
}

impl SkipsFixture {
    /// Parse a fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Yaml`] when the text is not a valid skips fixture.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Read and parse a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Convert the records into products.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidPrice`] if any record carries a bad price.
    pub fn into_products(self) -> Result<Vec<Product>, FixtureError> {
        self.skips
            .into_iter()
            .map(|record| Product::try_from(record).map_err(FixtureError::from))
            .collect()
    }
}

/// The built-in catalog served when the skips API is unavailable.
///
/// # Errors
///
/// Returns an error only if the embedded fixture is malformed.
pub fn fallback_products() -> Result<Vec<Product>, FixtureError> {
    SkipsFixture::from_yaml(FALLBACK_SKIPS)?.into_products()
}
