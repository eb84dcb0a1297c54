use crate::domain::model::{Event, RawRow};
use crate::utils::error::{Result, TrackError};
use chrono::{NaiveDateTime, Timelike};

/// 服務端日期格式：日-月-年 時:分 AM/PM
pub const EVENT_DATE_FORMAT: &str = "%d-%m-%Y %I:%M %p";

// 服務端偶爾送出 24 小時制的小時再加上 AM/PM 標記（例如 "13:45 PM"）
const EVENT_DATE_FORMAT_24H: &str = "%d-%m-%Y %H:%M";

/// 每列至少需要：日期、描述、地點、目的地
pub const MIN_ROW_VALUES: usize = 4;

/// 把原始資料列轉成 `Event`，任何一列失敗整批失敗。
///
/// 回傳的事件保持輸入順序，`num` 與 `tracking_number` 留待排序後填入。
pub fn parse_events(rows: &[RawRow]) -> Result<Vec<Event>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| parse_row(index, row))
        .collect()
}

fn parse_row(index: usize, row: &RawRow) -> Result<Event> {
    if row.cells.len() < MIN_ROW_VALUES {
        return Err(TrackError::format(format!(
            "row {} has fewer values than expected ({} < {})",
            index + 1,
            row.cells.len(),
            MIN_ROW_VALUES
        )));
    }

    let date = parse_event_date(&row.cells[0])?;

    Ok(Event {
        num: 0,
        tracking_number: String::new(),
        date,
        description: row.cells[1].trim().to_string(),
        location: row.cells[2].trim().to_string(),
        destination: row.cells[3].trim().to_string(),
    })
}

pub fn parse_event_date(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, EVENT_DATE_FORMAT).or_else(|err| {
        parse_24_hour_with_marker(value).ok_or_else(|| TrackError::DateParseError {
            value: value.to_string(),
            source: err,
        })
    })
}

/// 小時以 0-23 解析，標記只在需要時調整：
/// PM 且小時 < 12 加 12，AM 且小時 == 12 歸零，其餘保持不變
fn parse_24_hour_with_marker(value: &str) -> Option<NaiveDateTime> {
    let (datetime, marker) = value.rsplit_once(' ')?;
    let parsed = NaiveDateTime::parse_from_str(datetime.trim_end(), EVENT_DATE_FORMAT_24H).ok()?;
    let hour = parsed.hour();

    if marker.eq_ignore_ascii_case("PM") {
        if hour < 12 {
            parsed.with_hour(hour + 12)
        } else {
            Some(parsed)
        }
    } else if marker.eq_ignore_ascii_case("AM") {
        if hour == 12 {
            parsed.with_hour(0)
        } else {
            Some(parsed)
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().copied().collect()
    }

    fn sample_rows() -> Vec<RawRow> {
        vec![
            row(&["10-01-2023 09:00 AM", "Accepted", "Tirana", "Durres"]),
            row(&["11-01-2023 10:00 AM", "In transit", "Durres", "Vlore"]),
        ]
    }

    #[test]
    fn test_parse_rows_in_input_order() {
        let events = parse_events(&sample_rows()).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].description, "Accepted");
        assert_eq!(
            events[0].date,
            NaiveDate::from_ymd_opt(2023, 1, 10)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        );
        assert_eq!(events[1].location, "Durres");
        assert_eq!(events[1].destination, "Vlore");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let rows = sample_rows();
        assert_eq!(parse_events(&rows).unwrap(), parse_events(&rows).unwrap());
    }

    #[test]
    fn test_row_with_three_values_fails_whole_batch() {
        let mut rows = sample_rows();
        rows.push(row(&["12-01-2023 10:00 AM", "Delivered", "Vlore"]));

        let err = parse_events(&rows).unwrap_err();
        match err {
            TrackError::FormatError { message } => {
                assert!(message.contains("fewer values than expected"));
                assert!(message.starts_with("row 3"));
            }
            other => panic!("expected FormatError, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_date_fails_whole_batch() {
        let rows = vec![
            row(&["10-01-2023 09:00 AM", "Accepted", "Tirana", "Durres"]),
            row(&["2023-01-10", "In transit", "Durres", "Vlore"]),
        ];

        match parse_events(&rows) {
            Err(TrackError::DateParseError { value, .. }) => assert_eq!(value, "2023-01-10"),
            other => panic!("expected DateParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_values_are_ignored_and_trimmed() {
        let rows = vec![row(&[
            " 10-01-2023 09:00 AM ",
            " Accepted ",
            "Tirana",
            "Durres",
            "ignored",
        ])];
        let events = parse_events(&rows).unwrap();
        assert_eq!(events[0].description, "Accepted");
    }

    #[test]
    fn test_pm_marker() {
        assert_eq!(parse_event_date("10-01-2023 03:15 PM").unwrap().hour(), 15);
        assert_eq!(parse_event_date("10-01-2023 12:05 AM").unwrap().hour(), 0);
        assert_eq!(parse_event_date("10-01-2023 12:05 PM").unwrap().hour(), 12);
    }

    #[test]
    fn test_24_hour_value_with_marker() {
        assert_eq!(parse_event_date("10-01-2023 13:45 PM").unwrap().hour(), 13);
        assert_eq!(parse_event_date("10-01-2023 00:30 AM").unwrap().hour(), 0);
        assert!(parse_event_date("10-01-2023 13:45").is_err());
        assert!(parse_event_date("10-01-2023 13:45 XM").is_err());
    }

    #[test]
    fn test_marker_only_adjusts_when_needed() {
        let afternoon = parse_event_date("10-01-2023 13:45 AM").unwrap();
        assert_eq!((afternoon.hour(), afternoon.minute()), (13, 45));

        let after_midnight = parse_event_date("10-01-2023 00:30 PM").unwrap();
        assert_eq!((after_midnight.hour(), after_midnight.minute()), (12, 30));

        assert!(matches!(
            parse_event_date("10-01-2023 24:10 PM"),
            Err(TrackError::DateParseError { .. })
        ));
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        assert!(parse_events(&[]).unwrap().is_empty());
    }
}
