use clap::Parser;
use recommendation_service::utils::{logger, validation::Validate};
use recommendation_service::{
    CliConfig, ConfiguredCatalog, ListRecommendationsRequest, RecommendationError,
    RecommendationService,
};

fn report(e: &RecommendationError) {
    tracing::error!(
        "❌ Recommendation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting recommendation-service CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report(&e);
        std::process::exit(e.severity().exit_code().max(1));
    }

    let service = match ConfiguredCatalog::from_config(&config)
        .and_then(|catalog| RecommendationService::from_config(catalog, &config))
    {
        Ok(service) => service,
        Err(e) => {
            report(&e);
            std::process::exit(e.severity().exit_code().max(1));
        }
    };

    let request = ListRecommendationsRequest {
        user_id: config.user_id.clone(),
        product_ids: config.product_ids.clone(),
    };

    match service.list_recommendations(&request).await {
        Ok(response) => {
            if config.json {
                println!("{}", serde_json::to_string(&response)?);
            } else {
                for id in &response.product_ids {
                    println!("{}", id);
                }
            }
        }
        Err(e) => {
            report(&e);
            let code = e.severity().exit_code();
            if code > 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}
