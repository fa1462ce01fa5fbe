pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::catalog::{ConfiguredCatalog, LocalFileCatalog, StaticCatalog};
pub use crate::core::random::RandomSource;
pub use crate::core::selector::{eligible, select, CandidateSelector, DEFAULT_MAX_RESPONSES};
pub use crate::core::service::RecommendationService;
pub use crate::domain::model::{
    HealthCheckResponse, HealthStatus, ListProductsResponse, ListRecommendationsRequest,
    ListRecommendationsResponse, Money, Product,
};
pub use crate::domain::ports::{CatalogSource, ConfigProvider};
pub use crate::utils::error::{RecommendationError, Result};
