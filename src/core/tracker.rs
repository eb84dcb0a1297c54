use crate::core::parser::parse_events;
use crate::domain::model::{Event, Events, SortDirection, TrackerConfig};
use crate::domain::ports::RowSource;
use crate::utils::error::Result;
use crate::utils::validation::validate_tracking_number;

/// fetch → parse → sort 的查詢流程
pub struct Tracker<S: RowSource> {
    source: S,
}

impl<S: RowSource> Tracker<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn track(&self, config: &TrackerConfig, tracking_number: &str) -> Result<Events> {
        validate_tracking_number(tracking_number)?;
        let tracking_number = tracking_number.trim();

        tracing::info!("🔎 Tracking {} via {}", tracking_number, config.endpoint);

        let rows = self.source.fetch_rows(config, tracking_number).await?;
        tracing::debug!("Fetched {} raw rows", rows.len());

        let mut events = parse_events(&rows)?;
        sort_events(&mut events, config.sort);
        number_events(&mut events, tracking_number);

        tracing::info!("✅ Found {} events for {}", events.len(), tracking_number);
        Ok(Events(events))
    }
}

/// 依日期穩定排序；同一時間的事件在兩個方向都保持原始順序
pub fn sort_events(events: &mut [Event], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => events.sort_by(|a, b| a.date.cmp(&b.date)),
        SortDirection::Descending => events.sort_by(|a, b| b.date.cmp(&a.date)),
    }
}

/// 排序後填入 1 起算的序號與追蹤號碼
pub fn number_events(events: &mut [Event], tracking_number: &str) {
    for (i, event) in events.iter_mut().enumerate() {
        event.num = i + 1;
        event.tracking_number = tracking_number.to_string();
    }
}
