pub mod parser;
pub mod tracker;

pub use crate::domain::model::{Event, Events, RawRow, SortDirection, TrackerConfig};
pub use crate::domain::ports::RowSource;
pub use crate::utils::error::Result;
