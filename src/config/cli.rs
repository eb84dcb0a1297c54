use crate::adapters::SourceKind;
use crate::config::toml_config::TomlConfig;
use crate::config::AppSettings;
use crate::domain::model::SortDirection;
use crate::output::OutputFormat;
use crate::utils::error::{Result, TrackError};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "posta-track")]
#[command(about = "Look up parcel tracking events and print them as a table")]
#[command(version)]
pub struct CliConfig {
    /// Tracking number to look up
    pub tracking_number: Option<String>,

    #[arg(long, help = "Sort events in descending order")]
    pub descending: bool,

    #[arg(long, help = "Do not print header line")]
    pub no_header: bool,

    #[arg(long, help = "Seconds to wait for the tracking service [default: 8]")]
    pub timeout: Option<u64>,

    #[arg(
        long,
        allow_hyphen_values = true,
        help = "String to use as column delimiter [default: two spaces]"
    )]
    pub delimiter: Option<String>,

    #[arg(long, value_enum, help = "Output format [default: table]")]
    pub format: Option<OutputFormat>,

    #[arg(long, value_enum, help = "Remote source type [default: json-api]")]
    pub source: Option<SourceKind>,

    #[arg(long, help = "Tracking service URL")]
    pub endpoint: Option<String>,

    #[arg(long, help = "Form field carrying the number for the JSON API [default: kodi]")]
    pub json_field: Option<String>,

    #[arg(long, help = "Name or id of the tracking form (html-form source)")]
    pub form_name: Option<String>,

    #[arg(
        long,
        num_args = 2,
        value_names = ["FIRST", "SECOND"],
        help = "The two form fields that receive the tracking number (html-form source)"
    )]
    pub form_fields: Option<Vec<String>>,

    #[arg(long, help = "Id of the result table (html-form source)")]
    pub table_id: Option<String>,

    #[arg(long, help = "Exit successfully and print the empty table when nothing is found")]
    pub allow_empty: bool,

    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON on stderr")]
    pub log_json: bool,
}

impl CliConfig {
    /// 預設值 → 設定檔 → 命令列參數
    pub fn settings(&self) -> Result<AppSettings> {
        let mut settings = AppSettings::default();
        if let Some(path) = &self.config {
            tracing::debug!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?.apply_to(&mut settings);
        }
        self.apply_to(&mut settings);
        Ok(settings)
    }

    pub fn apply_to(&self, settings: &mut AppSettings) {
        if self.descending {
            settings.tracker.sort = SortDirection::Descending;
        }
        if self.no_header {
            settings.output.header = false;
        }
        if let Some(seconds) = self.timeout {
            settings.tracker.timeout = Duration::from_secs(seconds);
        }
        if let Some(delimiter) = &self.delimiter {
            settings.output.delimiter = delimiter.clone();
        }
        if let Some(format) = self.format {
            settings.output.format = format;
        }
        if let Some(kind) = self.source {
            settings.source.kind = kind;
        }
        if let Some(endpoint) = &self.endpoint {
            settings.tracker.endpoint = endpoint.clone();
        }
        if let Some(field) = &self.json_field {
            settings.source.json_field = Some(field.clone());
        }
        if let Some(name) = &self.form_name {
            settings.source.form.form_name = name.clone();
        }
        if let Some([first, second]) = self.form_fields.as_deref() {
            settings.source.form.fields = [first.clone(), second.clone()];
        }
        if let Some(table_id) = &self.table_id {
            settings.source.form.table_id = table_id.clone();
        }
    }

    pub fn tracking_number(&self) -> Result<&str> {
        match self.tracking_number.as_deref().map(str::trim) {
            Some(number) if !number.is_empty() => Ok(number),
            _ => Err(TrackError::ArgumentError {
                message: "No tracking number given".to_string(),
            }),
        }
    }
}
