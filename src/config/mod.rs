#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::{SourceKind, SourceSettings};
use crate::domain::model::TrackerConfig;
use crate::output::FormatConfig;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_delimiter, validate_non_empty_string, validate_range, validate_url, Validate,
};

pub const MIN_TIMEOUT_SECONDS: u64 = 1;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

/// 預設值 → TOML 檔 → 命令列，依序覆蓋後的完整設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppSettings {
    pub tracker: TrackerConfig,
    pub source: SourceSettings,
    pub output: FormatConfig,
}

impl Validate for AppSettings {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", &self.tracker.endpoint)?;
        validate_range(
            "timeout_seconds",
            self.tracker.timeout.as_secs(),
            MIN_TIMEOUT_SECONDS,
            MAX_TIMEOUT_SECONDS,
        )?;
        validate_delimiter("delimiter", &self.output.delimiter)?;

        match self.source.kind {
            SourceKind::JsonApi => {
                if let Some(field) = &self.source.json_field {
                    validate_non_empty_string("json_field", field)?;
                }
            }
            SourceKind::HtmlForm => {
                let form = &self.source.form;
                validate_non_empty_string("form.name", &form.form_name)?;
                for field in &form.fields {
                    validate_non_empty_string("form.fields", field)?;
                }
                validate_non_empty_string("form.table_id", &form.table_id)?;
            }
        }

        Ok(())
    }
}
