pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod output;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{FormLayout, HtmlFormSource, JsonApiSource, SourceKind, SourceSettings};
pub use config::AppSettings;
pub use crate::core::tracker::Tracker;
pub use domain::model::{Event, Events, RawRow, SortDirection, TrackerConfig};
pub use domain::ports::RowSource;
pub use output::{EventsFormatter, FormatConfig, OutputFormat};
pub use utils::error::{Result, TrackError};
