use crate::core::report::OutputFormat;
use crate::domain::model::PairingSettings;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, TournamentError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub tournament: TournamentSection,
    #[serde(default)]
    pub pairing: PairingSettings,
    #[serde(default)]
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentSection {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_data_path")]
    pub data_path: String,
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

impl Default for TournamentSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_path: default_data_path(),
            data_file: default_data_file(),
        }
    }
}

fn default_name() -> String {
    "Swiss Tournament".to_string()
}

fn default_data_path() -> String {
    "./data".to_string()
}

fn default_data_file() -> String {
    "tournament.json".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TournamentError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TournamentError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TournamentError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 以環境變數覆蓋資料位置 (SWISS_DATA_PATH, SWISS_DATA_FILE)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("SWISS_DATA_PATH") {
            tracing::debug!("🔧 data_path overridden by SWISS_DATA_PATH: {}", path);
            self.tournament.data_path = path;
        }
        if let Ok(file) = std::env::var("SWISS_DATA_FILE") {
            tracing::debug!("🔧 data_file overridden by SWISS_DATA_FILE: {}", file);
            self.tournament.data_file = file;
        }
    }

    pub fn data_file(&self) -> &str {
        &self.tournament.data_file
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_path(&self) -> &str {
        &self.tournament.data_path
    }

    fn tournament_name(&self) -> &str {
        &self.tournament.name
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("tournament.name", &self.tournament.name)?;
        validation::validate_path("tournament.data_path", &self.tournament.data_path)?;
        validation::validate_file_extension(
            "tournament.data_file",
            &self.tournament.data_file,
            &["json"],
        )?;
        validation::validate_one_of("logging.level", self.log_level(), &LOG_LEVELS)?;
        Ok(())
    }
}
