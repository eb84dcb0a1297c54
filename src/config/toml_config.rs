use crate::adapters::SourceKind;
use crate::config::AppSettings;
use crate::domain::model::SortDirection;
use crate::output::OutputFormat;
use crate::utils::error::{Result, TrackError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
    pub source: Option<SourceKind>,
    pub timeout_seconds: Option<u64>,
    pub sort: Option<SortDirection>,
    pub json_field: Option<String>,
    pub form: Option<FormConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormConfig {
    pub name: Option<String>,
    pub fields: Option<[String; 2]>,
    pub table_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub header: Option<bool>,
    pub delimiter: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TrackError::ConfigError {
            message: format!("cannot read '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TrackError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${POSTA_ENDPOINT})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TrackError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用到預設設定上，檔案沒寫的欄位保留原值
    pub fn apply_to(&self, settings: &mut AppSettings) {
        let service = &self.service;
        if let Some(endpoint) = &service.endpoint {
            settings.tracker.endpoint = endpoint.clone();
        }
        if let Some(seconds) = service.timeout_seconds {
            settings.tracker.timeout = Duration::from_secs(seconds);
        }
        if let Some(sort) = service.sort {
            settings.tracker.sort = sort;
        }
        if let Some(kind) = service.source {
            settings.source.kind = kind;
        }
        if let Some(field) = &service.json_field {
            settings.source.json_field = Some(field.clone());
        }
        if let Some(form) = &service.form {
            if let Some(name) = &form.name {
                settings.source.form.form_name = name.clone();
            }
            if let Some(fields) = &form.fields {
                settings.source.form.fields = fields.clone();
            }
            if let Some(table_id) = &form.table_id {
                settings.source.form.table_id = table_id.clone();
            }
        }

        let output = &self.output;
        if let Some(format) = output.format {
            settings.output.format = format;
        }
        if let Some(header) = output.header {
            settings.output.header = header;
        }
        if let Some(delimiter) = &output.delimiter {
            settings.output.delimiter = delimiter.clone();
        }
    }
}
