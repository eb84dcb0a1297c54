use crate::domain::model::{RawRow, TrackerConfig};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 給定追蹤號碼，回傳遠端來源的原始資料列。
///
/// 每次呼叫自行建立並關閉連線（或 session），實作之間不共用狀態。
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self, config: &TrackerConfig, tracking_number: &str)
        -> Result<Vec<RawRow>>;
}

#[async_trait]
impl<S: RowSource + ?Sized> RowSource for Box<S> {
    async fn fetch_rows(
        &self,
        config: &TrackerConfig,
        tracking_number: &str,
    ) -> Result<Vec<RawRow>> {
        (**self).fetch_rows(config, tracking_number).await
    }
}
