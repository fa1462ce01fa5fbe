use crate::domain::model::{ListProductsResponse, Product};
use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::{RecommendationError, Result};
use crate::utils::validation::is_canonical_product_id;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Catalog backed by a `products.json` file, re-read on every call.
#[derive(Debug, Clone)]
pub struct LocalFileCatalog {
    path: PathBuf,
}

impl LocalFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, data: &[u8]) -> Result<Vec<Product>> {
        let catalog: ListProductsResponse = serde_json::from_slice(data).map_err(|e| {
            tracing::warn!("failed to parse the catalog JSON: {}", e);
            e
        })?;

        let mut products = catalog.products;
        for (index, product) in products.iter_mut().enumerate() {
            if product.id.trim().is_empty() {
                return Err(RecommendationError::CatalogError {
                    message: format!(
                        "product #{} in {} has an empty id",
                        index,
                        self.path.display()
                    ),
                });
            }
            if !is_canonical_product_id(&product.id) {
                tracing::warn!("non-canonical product id in catalog: {}", product.id);
            }
            // Categories are always lowercase, whatever the catalog source.
            product.normalize();
        }

        Ok(products)
    }
}

#[async_trait]
impl CatalogSource for LocalFileCatalog {
    async fn list_products(&self) -> Result<Vec<Product>> {
        tracing::info!("loading catalog from local file {}...", self.path.display());

        let data = tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::warn!("failed to open product catalog json file: {}", e);
            e
        })?;
        let products = self.parse(&data)?;

        tracing::info!("successfully parsed product catalog json ({} products)", products.len());
        Ok(products)
    }
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ids.into_iter().map(Product::with_id).collect())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.products.clone())
    }
}

/// The catalog a configuration asks for: inline ids win over a file path.
#[derive(Debug, Clone)]
pub enum ConfiguredCatalog {
    Local(LocalFileCatalog),
    Static(StaticCatalog),
}

impl ConfiguredCatalog {
    pub fn from_config(config: &impl ConfigProvider) -> Result<Self> {
        let inline = config.inline_product_ids();
        if !inline.is_empty() {
            tracing::info!("using inline catalog with {} products", inline.len());
            return Ok(Self::Static(StaticCatalog::from_ids(inline.iter().cloned())));
        }

        match config.catalog_path() {
            Some(path) => Ok(Self::Local(LocalFileCatalog::new(path))),
            None => Err(RecommendationError::MissingConfigError {
                field: "catalog.path".to_string(),
            }),
        }
    }
}

#[async_trait]
impl CatalogSource for ConfiguredCatalog {
    async fn list_products(&self) -> Result<Vec<Product>> {
        match self {
            Self::Local(catalog) => catalog.list_products().await,
            Self::Static(catalog) => catalog.list_products().await,
        }
    }
}
