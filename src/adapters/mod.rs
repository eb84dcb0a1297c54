// Adapters layer: concrete row sources for the remote tracking service.

pub mod html;
pub mod html_form;
pub mod http;
pub mod json_api;

use crate::domain::ports::RowSource;
use serde::{Deserialize, Serialize};

pub use html_form::{FormLayout, HtmlFormSource};
pub use json_api::JsonApiSource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SourceKind {
    #[default]
    JsonApi,
    HtmlForm,
}

/// 來源設定：選哪個實作，以及各自需要的欄位名稱
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSettings {
    pub kind: SourceKind,
    pub json_field: Option<String>,
    pub form: FormLayout,
}

impl SourceSettings {
    pub fn build(&self) -> Box<dyn RowSource> {
        match self.kind {
            SourceKind::JsonApi => Box::new(match &self.json_field {
                Some(field) => JsonApiSource::new(field.clone()),
                None => JsonApiSource::default(),
            }),
            SourceKind::HtmlForm => Box::new(HtmlFormSource::new(self.form.clone())),
        }
    }
}
