//! Catalog loaders.

use std::{path::PathBuf, time::Duration};

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    catalog::records::SkipRecord,
    config::CatalogConfig,
    fixtures::{FixtureError, SkipsFixture, fallback_products},
    prices::PriceError,
    products::Product,
};

/// Errors raised while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure or an unreadable body.
    #[error("Failed to fetch skips: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Failed to fetch skips: {status}")]
    Status {
        /// Status returned by the API
        status: StatusCode,
    },

    /// A record carried an unusable price.
    #[error("Invalid skip record: {0}")]
    InvalidRecord(#[from] PriceError),

    /// A fixture could not be read.
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

impl CatalogError {
    /// Text shown to the user next to the retry option.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Source of the product list.
pub trait CatalogLoader {
    /// Load the catalog in display order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the catalog is unavailable.
    async fn load(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Loads skips from the `skips/by-location` endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalogLoader {
    config: CatalogConfig,
    http: Client,
}

impl HttpCatalogLoader {
    /// Create a loader for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the HTTP client cannot be built.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, http })
    }

    /// Endpoint queried by [`CatalogLoader::load`], without query parameters.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/skips/by-location",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

impl CatalogLoader for HttpCatalogLoader {
    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("postcode", self.config.postcode.as_str()),
                ("area", self.config.area.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::Status { status });
        }

        let records: Vec<SkipRecord> = response.json().await?;

        info!(
            %url,
            postcode = %self.config.postcode,
            area = %self.config.area,
            count = records.len(),
            "loaded skips"
        );

        records
            .into_iter()
            .map(|record| Product::try_from(record).map_err(CatalogError::from))
            .collect()
    }
}

/// Loads skips from a YAML fixture on disk.
#[derive(Debug, Clone)]
pub struct FixtureCatalogLoader {
    path: PathBuf,
}

impl FixtureCatalogLoader {
    /// Create a loader reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogLoader for FixtureCatalogLoader {
    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let products = SkipsFixture::from_path(&self.path)?.into_products()?;

        info!(path = %self.path.display(), count = products.len(), "loaded skips fixture");

        Ok(products)
    }
}

/// Serves the built-in catalog whenever the wrapped loader fails.
#[derive(Debug, Clone)]
pub struct FallbackCatalogLoader<L> {
    inner: L,
    fallback: Vec<Product>,
}

impl<L: CatalogLoader> FallbackCatalogLoader<L> {
    /// Wrap `inner` with the built-in fallback catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in catalog cannot be parsed.
    pub fn new(inner: L) -> Result<Self, FixtureError> {
        Ok(Self::with_fallback(inner, fallback_products()?))
    }

    /// Wrap `inner` with a caller-supplied fallback catalog.
    pub fn with_fallback(inner: L, fallback: Vec<Product>) -> Self {
        Self { inner, fallback }
    }
}

impl<L: CatalogLoader> CatalogLoader for FallbackCatalogLoader<L> {
    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        match self.inner.load().await {
            Ok(products) => Ok(products),
            Err(error) => {
                warn!(%error, count = self.fallback.len(), "catalog unavailable; using fallback skips");

                Ok(self.fallback.clone())
            }
        }
    }
}
