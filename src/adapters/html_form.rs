use crate::adapters::html::{self, FormMethod};
use crate::adapters::http::{build_client, map_transport_error, parse_endpoint};
use crate::domain::model::{RawRow, TrackerConfig};
use crate::domain::ports::RowSource;
use crate::utils::error::{Result, TrackError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 追蹤頁面的結構：表單名稱、要填入號碼的兩個欄位、結果表格 id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormLayout {
    pub form_name: String,
    pub fields: [String; 2],
    pub table_id: String,
}

impl Default for FormLayout {
    fn default() -> Self {
        Self {
            form_name: "trackingForm".to_string(),
            fields: ["txtBarcode".to_string(), "hdnBarcode".to_string()],
            table_id: "tblTrackingEvents".to_string(),
        }
    }
}

/// 像瀏覽器一樣開頁面、填表單、送出，再抓結果表格
#[derive(Debug, Clone, Default)]
pub struct HtmlFormSource {
    layout: FormLayout,
}

impl HtmlFormSource {
    pub fn new(layout: FormLayout) -> Self {
        Self { layout }
    }
}

#[async_trait]
impl RowSource for HtmlFormSource {
    async fn fetch_rows(
        &self,
        config: &TrackerConfig,
        tracking_number: &str,
    ) -> Result<Vec<RawRow>> {
        let endpoint = parse_endpoint(config)?;
        // cookie store 讓兩次請求共用同一個 session
        let client = build_client(config, true)?;

        tracing::debug!("GET {}", endpoint);
        let page = client
            .get(endpoint)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| map_transport_error(config, e))?;
        let page_url = page.url().clone();
        let page_body = page.text().await.map_err(|e| map_transport_error(config, e))?;

        let mut form = html::find_form(&page_body, &self.layout.form_name).ok_or_else(|| {
            TrackError::format(format!("form '{}' not found on page", self.layout.form_name))
        })?;
        for field in &self.layout.fields {
            form.set_field(field, tracking_number);
        }

        let action = match form.action.as_deref().map(str::trim) {
            Some(action) if !action.is_empty() => page_url.join(action).map_err(|e| {
                TrackError::format(format!("invalid form action '{}': {}", action, e))
            })?,
            _ => page_url,
        };

        tracing::debug!(
            "Submitting form '{}' ({} fields) to {}",
            self.layout.form_name,
            form.fields.len(),
            action
        );
        let request = match form.method {
            FormMethod::Get => client.get(action).query(&form.fields),
            FormMethod::Post => client.post(action).form(&form.fields),
        };
        let result_body = request
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| map_transport_error(config, e))?
            .text()
            .await
            .map_err(|e| map_transport_error(config, e))?;

        let table = html::find_table_by_id(&result_body, &self.layout.table_id).ok_or_else(|| {
            TrackError::format(format!(
                "table '{}' not found in response",
                self.layout.table_id
            ))
        })?;

        Ok(html::table_rows(table)
            .into_iter()
            .map(RawRow::new)
            .collect())
    }
}
