use crate::core::ConfigProvider;
use crate::utils::error::{RecommendationError, Result};
use crate::utils::validation::{validate_non_negative, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "recommendation-service")]
#[command(about = "Recommend catalog products that are not already in the cart")]
pub struct CliConfig {
    #[arg(long, default_value = "products.json")]
    pub catalog_path: String,

    /// Inline catalog; takes precedence over --catalog-path
    #[arg(long, value_delimiter = ',')]
    pub catalog_ids: Vec<String>,

    /// Product ids already in the cart
    #[arg(long, value_delimiter = ',')]
    pub product_ids: Vec<String>,

    #[arg(long, default_value = "anonymous")]
    pub user_id: String,

    #[arg(long, default_value = "4", allow_hyphen_values = true)]
    pub max_responses: i64,

    #[arg(long, help = "Seed for reproducible recommendations")]
    pub seed: Option<u64>,

    #[arg(long, help = "Print the response and logs as JSON")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn max_responses(&self) -> i64 {
        self.max_responses
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn catalog_path(&self) -> Option<&str> {
        Some(&self.catalog_path)
    }

    fn inline_product_ids(&self) -> &[String] {
        &self.catalog_ids
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_negative("max_responses", self.max_responses)?;
        if self.catalog_ids.is_empty() {
            validate_path("catalog_path", &self.catalog_path)?;
        }
        if self.catalog_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(RecommendationError::ValidationError {
                message: "catalog_ids contains a blank id".to_string(),
            });
        }
        Ok(())
    }
}
