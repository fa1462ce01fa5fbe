use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub currency_code: String,
    #[serde(default)]
    pub units: i64,
    #[serde(default)]
    pub nanos: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<Money>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Product {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            picture: String::new(),
            price_usd: None,
            categories: Vec::new(),
        }
    }

    /// Lowercases categories so lookups are case-insensitive.
    pub fn normalize(&mut self) {
        for category in &mut self.categories {
            *category = category.trim().to_lowercase();
        }
    }
}

/// On-disk catalog layout (`products.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRecommendationsRequest {
    pub user_id: String,
    /// Items already in the user's cart; never recommended back.
    #[serde(default)]
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecommendationsResponse {
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Serving,
    NotServing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: HealthStatus,
}
