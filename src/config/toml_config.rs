use crate::domain::model::City;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ExplorerError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_PAUSE_SECONDS: u64 = 5;
const MAX_PAUSE_SECONDS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub datasets: DatasetsConfig,
    pub session: Option<SessionConfig>,
    pub output: Option<OutputConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetsConfig {
    pub dir: Option<String>,
    /// 以 chicago、new_york_city、washington 為鍵覆寫檔名
    pub files: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub pause_seconds: Option<u64>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub report_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

fn file_key(city: City) -> String {
    city.name().replace(' ', "_")
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExplorerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ExplorerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BIKESHARE_DATA})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ExplorerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let dir = validation::validate_required_field("datasets.dir", &self.datasets.dir)?;
        validation::validate_path("datasets.dir", dir)?;

        if let Some(files) = &self.datasets.files {
            let known: Vec<String> = City::ALL.into_iter().map(file_key).collect();
            for key in files.keys() {
                if !known.contains(key) {
                    return Err(ExplorerError::InvalidConfigValueError {
                        field: "datasets.files".to_string(),
                        value: key.clone(),
                        reason: format!("Unknown city. Valid keys: {}", known.join(", ")),
                    });
                }
            }
            let names: Vec<String> = files.values().cloned().collect();
            validation::validate_file_extensions("datasets.files", &names, &["csv"])?;
        }

        validation::validate_positive_number("session.page_size", self.page_size(), 1)?;
        validation::validate_range(
            "session.pause_seconds",
            self.pause_seconds(),
            0,
            MAX_PAUSE_SECONDS,
        )?;

        if let Some(report_path) = self.report_path() {
            validation::validate_report_path("output.report_path", report_path)?;
        }

        if let Some(format) = self.monitoring.as_ref().and_then(|m| m.log_format.as_ref()) {
            if format != "compact" && format != "json" {
                return Err(ExplorerError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.clone(),
                    reason: "Supported formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_level(&self) -> &str {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_level.as_deref())
            .unwrap_or("info")
    }

    pub fn log_format(&self) -> LogFormat {
        match self.monitoring.as_ref().and_then(|m| m.log_format.as_deref()) {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        self.datasets.dir.as_deref().unwrap_or(".")
    }

    fn dataset_file(&self, city: City) -> String {
        self.datasets
            .files
            .as_ref()
            .and_then(|files| files.get(&file_key(city)))
            .cloned()
            .unwrap_or_else(|| city.default_file().to_string())
    }

    fn pause_seconds(&self) -> u64 {
        self.session
            .as_ref()
            .and_then(|s| s.pause_seconds)
            .unwrap_or(DEFAULT_PAUSE_SECONDS)
    }

    fn page_size(&self) -> usize {
        self.session
            .as_ref()
            .and_then(|s| s.page_size)
            .unwrap_or(crate::core::viewer::DEFAULT_PAGE_SIZE)
    }

    fn report_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.report_path.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
