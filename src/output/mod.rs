pub mod table;

use crate::domain::model::{Event, Events};
use crate::utils::error::{Result, TrackError};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

pub const HEADER: [&str; 6] = [
    "#",
    "Tracking-Number",
    "Date",
    "Description",
    "Location",
    "Destination",
];

/// 輸出用的日期格式
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M %p";

pub const DEFAULT_DELIMITER: &str = "  ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    pub format: OutputFormat,
    pub header: bool,
    pub delimiter: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            header: true,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

pub struct EventsFormatter {
    config: FormatConfig,
}

impl EventsFormatter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn format(&self, events: &Events) -> Result<String> {
        match self.config.format {
            OutputFormat::Table => Ok(self.format_table(events)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(events)?),
            OutputFormat::Csv => self.format_csv(events),
        }
    }

    pub fn print<W: Write>(&self, events: &Events, writer: &mut W) -> Result<()> {
        let formatted = self.format(events)?;
        writeln!(writer, "{}", formatted)?;
        Ok(())
    }

    fn format_table(&self, events: &Events) -> String {
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(events.len() + 1);
        if self.config.header {
            rows.push(HEADER.iter().map(|h| h.to_string()).collect());
        }
        rows.extend(events.iter().map(|e| event_cells(e).to_vec()));

        table::columnize(&rows, &self.config.delimiter)
    }

    fn format_csv(&self, events: &Events) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(csv_delimiter(&self.config.delimiter))
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        if self.config.header {
            writer.write_record(HEADER)?;
        }
        for event in events {
            writer.write_record(event_cells(event))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| TrackError::IoError(io::Error::new(e.error().kind(), e.to_string())))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| TrackError::IoError(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        Ok(text.trim_end_matches('\n').to_string())
    }
}

impl Default for EventsFormatter {
    fn default() -> Self {
        Self::new(FormatConfig::default())
    }
}

fn event_cells(event: &Event) -> [String; 6] {
    [
        event.num.to_string(),
        event.tracking_number.clone(),
        event.date.format(DISPLAY_DATE_FORMAT).to_string(),
        event.description.clone(),
        event.location.clone(),
        event.destination.clone(),
    ]
}

/// 單一 ASCII 位元組的分隔符才沿用，其餘（包括預設的兩個空格）改用逗號
fn csv_delimiter(delimiter: &str) -> u8 {
    match delimiter.as_bytes() {
        [b] if b.is_ascii() => *b,
        _ => b',',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(num: usize, day: u32, hour: u32, description: &str, location: &str) -> Event {
        Event {
            num,
            tracking_number: "ABC123".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            description: description.to_string(),
            location: location.to_string(),
            destination: "Vlore".to_string(),
        }
    }

    fn sample() -> Events {
        Events(vec![
            event(1, 10, 9, "Accepted", "Tirana"),
            event(2, 11, 14, "In transit", "Durres"),
        ])
    }

    #[test]
    fn test_table_with_header() {
        let out = EventsFormatter::default().format(&sample()).unwrap();
        let expected = [
            "#  Tracking-Number  Date                 Description  Location  Destination",
            "1  ABC123           2023-01-10 09:00 AM  Accepted     Tirana    Vlore",
            "2  ABC123           2023-01-11 14:00 PM  In transit   Durres    Vlore",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_table_without_header_and_custom_delimiter() {
        let formatter = EventsFormatter::new(FormatConfig {
            header: false,
            delimiter: " | ".to_string(),
            ..FormatConfig::default()
        });
        let out = formatter.format(&sample()).unwrap();
        assert_eq!(
            out,
            "1 | ABC123 | 2023-01-10 09:00 AM | Accepted   | Tirana | Vlore\n\
             2 | ABC123 | 2023-01-11 14:00 PM | In transit | Durres | Vlore"
        );
    }

    #[test]
    fn test_empty_events() {
        let with_header = EventsFormatter::default().format(&Events::default()).unwrap();
        assert_eq!(
            with_header,
            "#  Tracking-Number  Date  Description  Location  Destination"
        );

        let formatter = EventsFormatter::new(FormatConfig {
            header: false,
            ..FormatConfig::default()
        });
        assert_eq!(formatter.format(&Events::default()).unwrap(), "");
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let formatter = EventsFormatter::default();
        assert_eq!(
            formatter.format(&sample()).unwrap(),
            formatter.format(&sample()).unwrap()
        );
    }

    #[test]
    fn test_json_output() {
        let formatter = EventsFormatter::new(FormatConfig {
            format: OutputFormat::Json,
            ..FormatConfig::default()
        });
        let out = formatter.format(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["num"], 1);
        assert_eq!(value[0]["tracking_number"], "ABC123");
        assert_eq!(value[0]["date"], "2023-01-10T09:00:00");
        assert_eq!(value[1]["description"], "In transit");

        assert_eq!(formatter.format(&Events::default()).unwrap(), "[]");
    }

    #[test]
    fn test_csv_output() {
        let formatter = EventsFormatter::new(FormatConfig {
            format: OutputFormat::Csv,
            delimiter: ";".to_string(),
            header: true,
        });
        let mut events = sample();
        events.0[1].description = "In transit; sorted".to_string();

        let out = formatter.format(&events).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "#;Tracking-Number;Date;Description;Location;Destination"
        );
        assert_eq!(lines[1], "1;ABC123;2023-01-10 09:00 AM;Accepted;Tirana;Vlore");
        assert_eq!(
            lines[2],
            "2;ABC123;2023-01-11 14:00 PM;\"In transit; sorted\";Durres;Vlore"
        );
    }

    #[test]
    fn test_csv_delimiter_fallback() {
        assert_eq!(csv_delimiter("\t"), b'\t');
        assert_eq!(csv_delimiter("  "), b',');
        assert_eq!(csv_delimiter("ë"), b',');
    }

    #[test]
    fn test_print_appends_newline() {
        let mut buf = Vec::new();
        EventsFormatter::default().print(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("Vlore\n"));
        assert_eq!(text.lines().count(), 3);
    }
}
