use crate::domain::model::TrackerConfig;
use crate::utils::error::{Result, TrackError};
use reqwest::Client;
use url::Url;

pub const USER_AGENT: &str = concat!("posta-track/", env!("CARGO_PKG_VERSION"));

/// 每次查詢建立新的 client，連線與 cookie 都只活在這次呼叫內
pub fn build_client(config: &TrackerConfig, keep_cookies: bool) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(USER_AGENT)
        .cookie_store(keep_cookies)
        .build()?;
    Ok(client)
}

/// reqwest 的逾時錯誤轉成 `TimeoutError`，其餘保留原樣
pub fn map_transport_error(config: &TrackerConfig, err: reqwest::Error) -> TrackError {
    if err.is_timeout() {
        TrackError::TimeoutError {
            seconds: config.timeout.as_secs_f64().ceil() as u64,
        }
    } else {
        TrackError::TransportError(err)
    }
}

pub fn parse_endpoint(config: &TrackerConfig) -> Result<Url> {
    Url::parse(&config.endpoint).map_err(|e| TrackError::InvalidConfigValueError {
        field: "endpoint".to_string(),
        value: config.endpoint.clone(),
        reason: format!("Invalid URL format: {}", e),
    })
}

/// 端點的 origin，例如 `https://www.postashqiptare.al`
pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}
