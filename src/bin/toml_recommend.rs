use clap::Parser;
use recommendation_service::config::toml_config::TomlConfig;
use recommendation_service::utils::{logger, validation::Validate};
use recommendation_service::{
    ConfigProvider, ConfiguredCatalog, HealthStatus, ListRecommendationsRequest,
    RecommendationService,
};

#[derive(Parser)]
#[command(name = "toml-recommend")]
#[command(about = "Recommendation service driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "recommendation.toml")]
    config: String,

    /// Product ids already in the cart
    #[arg(long, value_delimiter = ',')]
    product_ids: Vec<String>,

    #[arg(long, default_value = "anonymous")]
    user_id: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Dry run - validate config and report health without selecting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.severity().exit_code().max(1));
        }
    };

    // 初始化日誌
    logger::init_cli_logger(args.verbose || config.verbose_logging());

    tracing::info!("🚀 Starting TOML-based recommendation service");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(seed) = args.seed {
        config.selection.get_or_insert_with(Default::default).seed = Some(seed);
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.severity().exit_code().max(1));
    }

    let service = match ConfiguredCatalog::from_config(&config)
        .and_then(|catalog| RecommendationService::from_config(catalog, &config))
    {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("❌ Service setup failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code().max(1));
        }
    };

    if args.dry_run {
        let health = service.check();
        println!("🔍 Dry run for service '{}'", config.service.name);
        println!("   catalog: {}", config.catalog_path().unwrap_or("inline"));
        println!("   max_responses: {}", service.selector().cap());
        println!("   seed: {:?}", config.seed());
        println!(
            "   health: {}",
            if health.status == HealthStatus::Serving { "SERVING" } else { "NOT_SERVING" }
        );
        return Ok(());
    }

    let request = ListRecommendationsRequest {
        user_id: args.user_id,
        product_ids: args.product_ids,
    };

    match service.list_recommendations(&request).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Err(e) => {
            tracing::error!("❌ Recommendation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            let code = e.severity().exit_code();
            if code > 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}
