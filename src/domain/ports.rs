use crate::domain::model::Product;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies the product catalog that recommendations are drawn from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;

    async fn product_ids(&self) -> Result<Vec<String>> {
        let products = self.list_products().await?;
        Ok(products.into_iter().map(|p| p.id).collect())
    }
}

pub trait ConfigProvider: Send + Sync {
    /// Raw cap as configured; negative values are rejected when the selector is built.
    fn max_responses(&self) -> i64;
    fn seed(&self) -> Option<u64>;
    fn catalog_path(&self) -> Option<&str>;
    fn inline_product_ids(&self) -> &[String];
}
