use crate::adapters::http::{build_client, map_transport_error, origin_of, parse_endpoint};
use crate::domain::model::{RawRow, TrackerConfig};
use crate::domain::ports::RowSource;
use crate::utils::error::{Result, TrackError};
use async_trait::async_trait;
use serde_json::{Map, Value};

pub const DEFAULT_FORM_FIELD: &str = "kodi";

/// 每個欄位的鍵名：線上服務用阿爾巴尼亞文，英文拼法為備用
const ROW_FIELDS: [(&str, &str); 4] = [
    ("Data", "Date"),
    ("Ngjarja", "Description"),
    ("Zyra", "Location"),
    ("Destinacioni", "Destination"),
];

type ApiRow = Map<String, Value>;

// 兩種拼法同時出現時以阿爾巴尼亞文為準；
// 缺少或非字串的欄位直接略過，讓 parser 回報欄位不足
fn row_from_api(row: &ApiRow) -> RawRow {
    ROW_FIELDS
        .iter()
        .filter_map(|(primary, fallback)| row.get(*primary).or_else(|| row.get(*fallback)))
        .filter_map(Value::as_str)
        .collect()
}

/// 以表單編碼 POST 追蹤號碼，回應為 JSON 陣列
#[derive(Debug, Clone)]
pub struct JsonApiSource {
    form_field: String,
}

impl JsonApiSource {
    pub fn new(form_field: impl Into<String>) -> Self {
        Self {
            form_field: form_field.into(),
        }
    }

}

impl Default for JsonApiSource {
    fn default() -> Self {
        Self::new(DEFAULT_FORM_FIELD)
    }
}

#[async_trait]
impl RowSource for JsonApiSource {
    async fn fetch_rows(
        &self,
        config: &TrackerConfig,
        tracking_number: &str,
    ) -> Result<Vec<RawRow>> {
        let endpoint = parse_endpoint(config)?;
        let client = build_client(config, false)?;

        tracing::debug!("POST {} ({}={})", endpoint, self.form_field, tracking_number);

        let response = client
            .post(endpoint.clone())
            .header(reqwest::header::ORIGIN, origin_of(&endpoint))
            .form(&[(self.form_field.as_str(), tracking_number)])
            .send()
            .await
            .map_err(|e| map_transport_error(config, e))?;

        tracing::debug!("API response status: {}", response.status());

        let body = response
            .error_for_status()
            .map_err(|e| map_transport_error(config, e))?
            .text()
            .await
            .map_err(|e| map_transport_error(config, e))?;

        parse_api_body(&body)
    }
}

fn parse_api_body(body: &str) -> Result<Vec<RawRow>> {
    // `null` 表示查無事件
    let rows: Option<Vec<ApiRow>> = serde_json::from_str(body).map_err(|e| {
        TrackError::format(format!("expected a JSON array of tracking events: {}", e))
    })?;

    Ok(rows.unwrap_or_default().iter().map(row_from_api).collect())
}
