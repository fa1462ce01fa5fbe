use crate::core::random::RandomSource;
use crate::core::selector::CandidateSelector;
use crate::domain::model::{
    HealthCheckResponse, HealthStatus, ListRecommendationsRequest, ListRecommendationsResponse,
};
use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::Result;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct RecommendationService<C: CatalogSource> {
    catalog: C,
    selector: CandidateSelector,
    rng: RandomSource,
    serving: AtomicBool,
}

impl<C: CatalogSource> RecommendationService<C> {
    pub fn new(catalog: C, selector: CandidateSelector, rng: RandomSource) -> Self {
        Self {
            catalog,
            selector,
            rng,
            serving: AtomicBool::new(true),
        }
    }

    pub fn from_config(catalog: C, config: &impl ConfigProvider) -> Result<Self> {
        let selector = CandidateSelector::try_from_cap(config.max_responses())?;
        let rng = RandomSource::from_seed(config.seed());
        tracing::debug!(
            "Recommendation service configured: cap={}, seeded={}",
            selector.cap(),
            rng.is_seeded()
        );
        Ok(Self::new(catalog, selector, rng))
    }

    pub async fn list_recommendations(
        &self,
        request: &ListRecommendationsRequest,
    ) -> Result<ListRecommendationsResponse> {
        let catalog = self.catalog.product_ids().await?;
        let cart: HashSet<&str> = request.product_ids.iter().map(String::as_str).collect();

        let product_ids = self
            .rng
            .with_rng(|rng| self.selector.select(&catalog, &cart, rng))?;

        tracing::info!(
            "[Recv ListRecommendations] user_id={} cart_size={} recommended={}",
            request.user_id,
            cart.len(),
            product_ids.len()
        );
        tracing::debug!("Recommended product ids: {:?}", product_ids);

        Ok(ListRecommendationsResponse { product_ids })
    }

    pub fn check(&self) -> HealthCheckResponse {
        if self.is_serving() {
            tracing::debug!("Health check: SERVING");
            HealthCheckResponse {
                status: HealthStatus::Serving,
            }
        } else {
            tracing::warn!("Health check: NOT_SERVING");
            HealthCheckResponse {
                status: HealthStatus::NotServing,
            }
        }
    }

    pub fn set_serving(&self, serving: bool) {
        self.serving.store(serving, Ordering::SeqCst);
    }

    pub fn is_serving(&self) -> bool {
        self.serving.load(Ordering::SeqCst)
    }

    pub fn selector(&self) -> CandidateSelector {
        self.selector
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::StaticCatalog;
    use crate::domain::model::Product;
    use crate::utils::error::RecommendationError;
    use async_trait::async_trait;

    const DEMO_CATALOG: [&str; 9] = [
        "L9ECAV7KIM",
        "2ZYFJ3GM2N",
        "0PUK6V6EV0",
        "1YMWWN1N4O",
        "66VCHSJNUP",
        "6E92ZMYYFZ",
        "9SIQT8TOJO",
        "LS4PSXUNUM",
        "OLJCESPC7Z",
    ];

    fn service() -> RecommendationService<StaticCatalog> {
        RecommendationService::new(
            StaticCatalog::from_ids(DEMO_CATALOG),
            CandidateSelector::default(),
            RandomSource::seeded(42),
        )
    }

    fn request(user_id: &str, cart: &[&str]) -> ListRecommendationsRequest {
        ListRecommendationsRequest {
            user_id: user_id.to_string(),
            product_ids: cart.iter().map(|s| s.to_string()).collect(),
        }
    }

    struct FailingCatalog;

    #[async_trait]
    impl CatalogSource for FailingCatalog {
        async fn list_products(&self) -> Result<Vec<Product>> {
            Err(RecommendationError::CatalogError {
                message: "catalog offline".to_string(),
            })
        }
    }

    struct TestConfig {
        max_responses: i64,
    }

    impl ConfigProvider for TestConfig {
        fn max_responses(&self) -> i64 {
            self.max_responses
        }

        fn seed(&self) -> Option<u64> {
            Some(1)
        }

        fn catalog_path(&self) -> Option<&str> {
            None
        }

        fn inline_product_ids(&self) -> &[String] {
            &[]
        }
    }

    #[tokio::test]
    async fn test_empty_cart() {
        let response = service()
            .list_recommendations(&request("test-user-1", &[]))
            .await
            .unwrap();

        assert_eq!(response.product_ids.len(), 4);
    }

    #[tokio::test]
    async fn test_cart_items_not_recommended() {
        let cart = ["L9ECAV7KIM", "2ZYFJ3GM2N"];
        let response = service()
            .list_recommendations(&request("test-user-2", &cart))
            .await
            .unwrap();

        assert!(response.product_ids.len() <= 4);
        for id in &response.product_ids {
            assert!(!cart.contains(&id.as_str()));
        }
    }

    #[tokio::test]
    async fn test_whole_catalog_in_cart() {
        let response = service()
            .list_recommendations(&request("test-user-3", &DEMO_CATALOG))
            .await
            .unwrap();

        assert_eq!(response.product_ids, Vec::<String>::new());
    }

    #[tokio::test]
    async fn test_catalog_failure_propagates() {
        let service = RecommendationService::new(
            FailingCatalog,
            CandidateSelector::default(),
            RandomSource::thread(),
        );

        let err = service
            .list_recommendations(&request("user", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, RecommendationError::CatalogError { .. }));
    }

    #[test]
    fn test_health_check() {
        let service = service();
        assert_eq!(service.check().status, HealthStatus::Serving);

        service.set_serving(false);
        assert_eq!(service.check().status, HealthStatus::NotServing);

        service.set_serving(true);
        assert!(service.is_serving());
    }

    #[test]
    fn test_from_config() {
        let catalog = StaticCatalog::from_ids(DEMO_CATALOG);
        let service =
            RecommendationService::from_config(catalog, &TestConfig { max_responses: 2 }).unwrap();
        assert_eq!(service.selector().cap(), 2);

        let response = tokio_test::block_on(service.list_recommendations(&request("u", &[])))
            .unwrap();
        assert_eq!(response.product_ids.len(), 2);

        let rejected = RecommendationService::from_config(
            StaticCatalog::from_ids(DEMO_CATALOG),
            &TestConfig { max_responses: -3 },
        );
        assert!(matches!(
            rejected,
            Err(RecommendationError::InvalidArgument { .. })
        ));
    }
}
