pub mod random;
pub mod selector;
pub mod service;

pub use crate::domain::model::{ListRecommendationsRequest, ListRecommendationsResponse, Product};
pub use crate::domain::ports::{CatalogSource, ConfigProvider};
pub use crate::utils::error::Result;
