use crate::core::ConfigProvider;
use crate::core::selector::DEFAULT_MAX_RESPONSES;
use crate::utils::error::{RecommendationError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative, validate_one_of, validate_path,
    validate_required_field, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

const CATALOG_TYPES: [&str; 2] = ["local", "inline"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub catalog: CatalogConfig,
    pub selection: Option<SelectionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub r#type: String,
    pub path: Option<String>,
    pub product_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub max_responses: Option<i64>,
    pub seed: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RecommendationError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_PATH})，未定義的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RecommendationError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("service.name", &self.service.name)?;
        validate_one_of("catalog.type", &self.catalog.r#type, &CATALOG_TYPES)?;

        match self.catalog.r#type.as_str() {
            "local" => {
                let path = validate_required_field("catalog.path", &self.catalog.path)?;
                validate_path("catalog.path", path)?;
            }
            _ => {
                let ids = validate_required_field("catalog.product_ids", &self.catalog.product_ids)?;
                if ids.is_empty() {
                    return Err(RecommendationError::ConfigValidationError {
                        field: "catalog.product_ids".to_string(),
                        message: "inline catalog needs at least one product id".to_string(),
                    });
                }
                for id in ids {
                    validate_non_empty_string("catalog.product_ids", id)?;
                }
            }
        }

        validate_non_negative("selection.max_responses", self.max_responses())?;
        Ok(())
    }

    /// 取得推薦數量上限
    pub fn max_responses(&self) -> i64 {
        self.selection
            .as_ref()
            .and_then(|s| s.max_responses)
            .unwrap_or(DEFAULT_MAX_RESPONSES as i64)
    }

    /// 是否啟用詳細日誌
    pub fn verbose_logging(&self) -> bool {
        matches!(
            self.service.log_level.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("debug") | Some("trace")
        )
    }
}

impl ConfigProvider for TomlConfig {
    fn max_responses(&self) -> i64 {
        self.max_responses()
    }

    fn seed(&self) -> Option<u64> {
        self.selection.as_ref().and_then(|s| s.seed)
    }

    fn catalog_path(&self) -> Option<&str> {
        match self.catalog.r#type.as_str() {
            "local" => self.catalog.path.as_deref(),
            _ => None,
        }
    }

    fn inline_product_ids(&self) -> &[String] {
        match self.catalog.r#type.as_str() {
            "inline" => self.catalog.product_ids.as_deref().unwrap_or(&[]),
            _ => &[],
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
